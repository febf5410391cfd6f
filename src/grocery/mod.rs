mod departments;
mod export;
mod list;

pub use departments::{Department, classify};
pub use export::write_csv;
pub use list::{GroceryItem, GroceryList, aggregate, normalize_name};
