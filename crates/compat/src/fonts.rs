//! # Fonts
//!
//! Native font parsers on Windows only accept file paths, so in-memory font streams are
//! spooled to a temporary file first. The Windows font directory is derived from the
//! environment rather than queried from the OS.

use crate::error::{CompatError, CompatErrorExt};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_WINDOWS_DIR: &str = r"C:\Windows";

/// Format code for TrueType fonts.
pub const TRUETYPE_FONT: i32 = 0;
/// Format code for Type 1 fonts.
pub const TYPE1_FONT: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    TrueType,
    Type1,
}

impl FontFormat {
    /// # Errors
    /// Returns [`CompatError::UnrecognizedFormat`] for any code other than
    /// [`TRUETYPE_FONT`] and [`TYPE1_FONT`].
    pub const fn from_code(code: i32) -> Result<Self, CompatError> {
        match code {
            TRUETYPE_FONT => Ok(Self::TrueType),
            TYPE1_FONT => Ok(Self::Type1),
            _ => Err(CompatError::UnrecognizedFormat { code, context: None }),
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::TrueType => TRUETYPE_FONT,
            Self::Type1 => TYPE1_FONT,
        }
    }
}

/// `%WINDIR%\Fonts`, falling back to `%SystemRoot%` and then `C:\Windows`.
///
/// `env` looks up an environment variable; pass `|k| std::env::var(k).ok()` for the
/// process environment.
pub fn windows_font_dir(env: impl Fn(&str) -> Option<String>) -> PathBuf {
    let root = env("WINDIR")
        .or_else(|| env("SystemRoot"))
        .unwrap_or_else(|| DEFAULT_WINDOWS_DIR.to_owned());
    PathBuf::from(format!(r"{root}\Fonts"))
}

/// Builds a font from an in-memory stream through a path-based `loader`.
///
/// The format code is validated before the stream is touched. The whole stream is then
/// written to a `font-*.tmp` file, `loader` is called with its path, and the file is
/// removed whether or not loading succeeded.
///
/// # Errors
/// Returns [`CompatError::UnrecognizedFormat`] for a bad code, [`CompatError::Io`] if
/// the stream or temporary file fails, or whatever `loader` returns.
pub fn create_font_from_stream<R, T, L>(
    format_code: i32,
    mut stream: R,
    loader: L,
) -> Result<T, CompatError>
where
    R: Read,
    L: FnOnce(FontFormat, &Path) -> Result<T, CompatError>,
{
    let format = FontFormat::from_code(format_code)?;

    let mut data = Vec::new();
    stream.read_to_end(&mut data).context("Failed to read font stream")?;
    drop(stream);

    let mut spool = tempfile::Builder::new()
        .prefix("font-")
        .suffix(".tmp")
        .tempfile()
        .context("Failed to create temporary font file")?;
    spool.write_all(&data).context("Failed to write temporary font file")?;
    spool.flush().context("Failed to flush temporary font file")?;
    debug!(?format, bytes = data.len(), path = %spool.path().display(), "Spooled font stream");

    let loaded = loader(format, spool.path());
    if let Err(e) = spool.close() {
        warn!("Failed to remove temporary font file: {e}");
    }
    loaded
}
