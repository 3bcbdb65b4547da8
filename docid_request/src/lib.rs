pub mod error;
pub mod field;
pub mod value;
