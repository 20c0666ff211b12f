pub mod category;
pub mod health;

pub use category::{category_handler, Category};
pub use health::health_handler;
