pub mod converter;
pub mod errors;
