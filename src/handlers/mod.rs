pub mod analytics_handler;
pub mod item_handler;
pub mod quiz_handler;
pub mod user_handler;
