pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::dataset;
pub use domain::product;
pub use domain::user;
pub use domain::weather;
pub use outbound::repositories;
