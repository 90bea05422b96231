pub mod analytics;
pub mod communication;
pub mod item;
pub mod quiz;
pub mod user;
