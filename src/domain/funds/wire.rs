//! Wire types for funds responses (REST).

use serde::{Deserialize, Serialize};

/// `GET /api/users/getFunds/:userId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserFundsResponse {
    pub user_id: String,
    pub funds: String,
}
