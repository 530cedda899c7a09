pub mod analytics;
pub mod catalog;
pub mod procurement;
pub mod products;
pub mod reports;
pub mod trends;
