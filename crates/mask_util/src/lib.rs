pub mod field;
pub mod word;

pub use field::FieldError;
