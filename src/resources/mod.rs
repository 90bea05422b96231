//! Item and user records, validated here and stored through the record store.
pub mod items;
pub mod users;

pub use items::ItemResource;
pub use users::UserResource;
