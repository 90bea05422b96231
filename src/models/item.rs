use serde::{Deserialize, Serialize};

use crate::{error::AppError, helpers::check_length, helpers::check_optional_length};

pub const NAME_MIN: usize = 1;
pub const NAME_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;

/// Body of `POST /items`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("name", &self.name, NAME_MIN, NAME_MAX)?;
        check_optional_length("description", self.description.as_deref(), DESCRIPTION_MAX)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
