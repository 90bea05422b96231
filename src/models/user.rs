use serde::{Deserialize, Serialize};

use crate::{error::AppError, helpers::check_length, helpers::check_optional_length};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const BIO_MAX: usize = 200;

/// Field the store keeps unique across users.
pub const USERNAME_FIELD: &str = "username";

/// Body of `POST /users`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        check_length("username", &self.username, USERNAME_MIN, USERNAME_MAX)?;
        check_optional_length("bio", self.bio.as_deref(), BIO_MAX)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
}
