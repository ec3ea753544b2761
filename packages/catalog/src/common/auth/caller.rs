use serde::{Deserialize, Serialize};

use crate::common::UserId;

/// Identity context handed to every engine call by the auth layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id: UserId::new(user_id),
            is_admin,
        }
    }

    pub fn submitter(user_id: impl Into<String>) -> Self {
        Self::new(user_id, false)
    }

    pub fn reviewer(user_id: impl Into<String>) -> Self {
        Self::new(user_id, true)
    }
}
