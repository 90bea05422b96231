use log::{info, warn};
use serde_json::Value;

use crate::{
    error::AppError,
    helpers::to_document,
    models::user::{NewUser, User, USERNAME_FIELD},
    store::{Collection, Filter, RecordId, RecordStore, StoreError, USERS_COLLECTION},
};

pub const USER_EXISTS: &str = "user already exists";

pub struct UserResource {
    users: Collection,
}

impl UserResource {
    pub fn new(store: &RecordStore) -> Result<Self, AppError> {
        Ok(Self {
            users: store.collection(USERS_COLLECTION)?,
        })
    }

    /// The lookup gives a clean error for the common case. Two concurrent
    /// creates can both pass it; the store's unique index stops the second.
    pub fn create(&self, user: NewUser) -> Result<RecordId, AppError> {
        user.validate()?;

        let existing = self
            .users
            .find_one(&Filter::by(USERNAME_FIELD, user.username.as_str()))?;
        if existing.is_some() {
            warn!("Username {} already taken", user.username);
            return Err(AppError::Conflict(USER_EXISTS.to_string()));
        }

        match self.users.insert(&to_document(&user)?) {
            Ok(id) => {
                info!("Created user {} ({})", id, user.username);
                Ok(id)
            }
            Err(StoreError::Duplicate(_)) => {
                warn!("Username {} taken by a concurrent create", user.username);
                Err(AppError::Conflict(USER_EXISTS.to_string()))
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn list(&self) -> Result<Vec<User>, AppError> {
        self.users
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

        if !self.users.delete(&id)? {
            warn!("Delete of unknown user {}", id);
            return Err(AppError::NotFound("User not found".to_string()));
        }

        info!("Deleted user {}", id);
        Ok(())
    }
}
