pub mod attribute;
pub mod error;
