use crate::models::Feedback;
use serde::{Deserialize, Serialize};

pub const ADMIN_ROLE: &str = "admin";
pub const USER_ROLE: &str = "user";

/// Authenticated principal resolved by the auth server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    pub fn owns(&self, feedback: &Feedback) -> bool {
        feedback.user_id == self.id
    }

    /// Owners and administrators may change or remove a feedback row.
    pub fn can_modify(&self, feedback: &Feedback) -> bool {
        self.owns(feedback) || self.is_admin()
    }
}
