use log::{info, warn};
use serde_json::Value;

use crate::{
    error::AppError,
    helpers::to_document,
    models::item::{Item, NewItem},
    store::{Collection, RecordId, RecordStore, StoreError, ITEMS_COLLECTION},
};

pub struct ItemResource {
    items: Collection,
}

impl ItemResource {
    pub fn new(store: &RecordStore) -> Result<Self, AppError> {
        Ok(Self {
            items: store.collection(ITEMS_COLLECTION)?,
        })
    }

    pub fn create(&self, item: NewItem) -> Result<RecordId, AppError> {
        item.validate()?;

        let id = self.items.insert(&to_document(&item)?)?;
        info!("Created item {} ({})", id, item.name);

        Ok(id)
    }

    pub fn list(&self) -> Result<Vec<Item>, AppError> {
        self.items
            .find_all()?
            .into_iter()
            .map(|record| {
                serde_json::from_value(Value::Object(record.into_display_document()))
                    .map_err(|error| AppError::Storage(StoreError::Encoding(error)))
            })
            .collect()
    }

    pub fn delete(&self, raw_id: &str) -> Result<(), AppError> {
        let id = RecordId::parse(raw_id)?;

        if !self.items.delete(&id)? {
            warn!("Delete of unknown item {}", id);
            return Err(AppError::NotFound(format!(
                "Item with ID {} not found",
                raw_id
            )));
        }

        info!("Deleted item {}", id);
        Ok(())
    }
}
