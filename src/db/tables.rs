use redb::TableDefinition;

/// Boards table: board_id -> BoardRecord (serialized)
pub const BOARDS: TableDefinition<&str, &[u8]> = TableDefinition::new("boards");

/// User favorites table: favorite_id -> FavoriteRecord (serialized)
pub const USER_FAVORITES: TableDefinition<&str, &[u8]> = TableDefinition::new("user_favorites");

/// Composite index: (user_id, board_id) -> favorite_id
/// Holds at most one entry per pair, which is what makes favorites unique
pub const FAVORITES_BY_USER_BOARD: TableDefinition<(&str, &str), &str> =
    TableDefinition::new("favorites_by_user_board");
