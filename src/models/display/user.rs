//! User display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::User;

/// User display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USER ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
