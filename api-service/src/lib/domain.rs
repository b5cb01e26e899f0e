pub mod dataset;
pub mod product;
pub mod user;
pub mod weather;
