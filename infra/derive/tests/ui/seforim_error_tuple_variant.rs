use seforim_derive::seforim_error;

#[seforim_error]
pub enum DemoError {
    #[error("IO error: {0}")] Io(std::io::Error),
}

fn main() {}
