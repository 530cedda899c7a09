pub mod product;
pub mod product_inventory_history;
pub mod reorder;
pub mod stock_entry;
pub mod supplier;

pub use reorder::ReorderStatus;
pub use stock_entry::ChangeType;
