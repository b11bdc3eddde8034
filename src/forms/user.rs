use crate::models::user::{User as UserModel, USER_ROLE};
use serde_derive::{Deserialize, Serialize};

/// Body returned by the auth server for a valid token.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub user: User,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<UserForm> for UserModel {
    type Error = String;

    fn try_from(form: UserForm) -> Result<Self, Self::Error> {
        if form.user.id <= 0 {
            return Err(format!("auth server returned invalid user id {}", form.user.id));
        }

        Ok(UserModel {
            id: form.user.id,
            email: form.user.email,
            role: form
                .user
                .role
                .filter(|role| !role.is_empty())
                .unwrap_or_else(|| USER_ROLE.to_string()),
        })
    }
}
