use serde::{Deserialize, Serialize};

/// Favorite record stored in redb, keyed by favorite id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub user_id: String,
    /// Weak reference, nothing in the store cascades on board deletion
    pub board_id: String,
    /// Tenant the board was favorited from
    pub org_id: String,
    pub created_at: i64,
}

#[derive(Debug, Clone)]
pub struct NewFavorite {
    pub user_id: String,
    pub board_id: String,
    pub org_id: String,
}

/// A user's favorite mark on a board
#[derive(Debug, Clone, PartialEq)]
pub struct UserFavorite {
    pub id: String,
    pub user_id: String,
    pub board_id: String,
    pub org_id: String,
    pub created_at: i64,
}

impl UserFavorite {
    pub fn from_record(id: impl Into<String>, record: FavoriteRecord) -> Self {
        Self {
            id: id.into(),
            user_id: record.user_id,
            board_id: record.board_id,
            org_id: record.org_id,
            created_at: record.created_at,
        }
    }
}
