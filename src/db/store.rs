use chrono::Utc;
use redb::{ReadableTable, ReadableTableMetadata};
use uuid::Uuid;

use crate::db::{tables, Db};
use crate::error::{AppError, Result};
use crate::models::{Board, BoardRecord, FavoriteRecord, NewBoard, NewFavorite, UserFavorite};

const BINCODE_CONFIG: bincode::config::Configuration = bincode::config::standard();

/// Persistence primitives the board service is built on
///
/// Every method is a single atomic step against the store. Implementations
/// block, so async callers should run them via `spawn_blocking`.
pub trait DocumentStore: Send + Sync {
    /// Point lookup of a board by id
    fn get_board(&self, id: &str) -> Result<Option<Board>>;

    /// Insert a board and return its newly assigned id
    fn insert_board(&self, board: NewBoard) -> Result<String>;

    /// Replace the title of an existing board and return the patched board
    ///
    /// Fails with `BoardNotFound` when no board has this id.
    fn patch_board_title(&self, id: &str, title: &str) -> Result<Board>;

    /// Delete a board; a missing id is a no-op
    fn delete_board(&self, id: &str) -> Result<()>;

    /// Unique lookup of a favorite via the (user_id, board_id) index
    fn find_favorite(&self, user_id: &str, board_id: &str) -> Result<Option<UserFavorite>>;

    /// Insert a favorite and return its id
    ///
    /// Fails with `AlreadyFavorited` if the pair is already present.
    fn insert_favorite(&self, favorite: NewFavorite) -> Result<String>;

    /// Delete a favorite by id; a missing id is a no-op
    fn delete_favorite(&self, id: &str) -> Result<()>;

    /// Check the store is reachable
    fn ping(&self) -> Result<()>;
}

/// Document store backed by an embedded redb database
#[derive(Clone)]
pub struct RedbStore {
    db: Db,
}

impl RedbStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Number of favorite rows across all users
    pub fn favorite_count(&self) -> Result<u64> {
        let read_txn = self.db.begin_read()?;
        let favorites = read_txn.open_table(tables::USER_FAVORITES)?;
        Ok(favorites.len()?)
    }

    /// Number of boards across all organizations
    pub fn board_count(&self) -> Result<u64> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;
        Ok(boards.len()?)
    }
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, _) = bincode::serde::decode_from_slice(bytes, BINCODE_CONFIG)?;
    Ok(value)
}

impl DocumentStore for RedbStore {
    fn get_board(&self, id: &str) -> Result<Option<Board>> {
        let read_txn = self.db.begin_read()?;
        let boards = read_txn.open_table(tables::BOARDS)?;

        let board = boards
            .get(id)?
            .map(|b| decode::<BoardRecord>(b.value()))
            .transpose()?
            .map(|record| Board::from_record(id, record));

        Ok(board)
    }

    fn insert_board(&self, board: NewBoard) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let record = BoardRecord {
            title: board.title,
            org_id: board.org_id,
            author_id: board.author_id,
            author_name: board.author_name,
            image_url: board.image_url,
            created_at: Utc::now().timestamp(),
        };
        let bytes = bincode::serde::encode_to_vec(&record, BINCODE_CONFIG)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut boards = write_txn.open_table(tables::BOARDS)?;
            boards.insert(id.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(id)
    }

    fn patch_board_title(&self, id: &str, title: &str) -> Result<Board> {
        let write_txn = self.db.begin_write()?;
        let record = {
            let mut boards = write_txn.open_table(tables::BOARDS)?;

            let existing = boards.get(id)?.map(|b| decode::<BoardRecord>(b.value()));
            let mut record = match existing {
                Some(record) => record?,
                None => return Err(AppError::BoardNotFound),
            };

            record.title = title.to_string();
            let bytes = bincode::serde::encode_to_vec(&record, BINCODE_CONFIG)?;
            boards.insert(id, bytes.as_slice())?;
            record
        };
        write_txn.commit()?;

        Ok(Board::from_record(id, record))
    }

    fn delete_board(&self, id: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut boards = write_txn.open_table(tables::BOARDS)?;
            boards.remove(id)?;
        }
        write_txn.commit()?;

        Ok(())
    }

    fn find_favorite(&self, user_id: &str, board_id: &str) -> Result<Option<UserFavorite>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(tables::FAVORITES_BY_USER_BOARD)?;

        let favorite_id = match index.get((user_id, board_id))? {
            Some(id) => id.value().to_string(),
            None => return Ok(None),
        };

        let favorites = read_txn.open_table(tables::USER_FAVORITES)?;
        let favorite = favorites
            .get(favorite_id.as_str())?
            .map(|f| decode::<FavoriteRecord>(f.value()))
            .transpose()?
            .map(|record| UserFavorite::from_record(favorite_id.as_str(), record));

        Ok(favorite)
    }

    fn insert_favorite(&self, favorite: NewFavorite) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let record = FavoriteRecord {
            user_id: favorite.user_id,
            board_id: favorite.board_id,
            org_id: favorite.org_id,
            created_at: Utc::now().timestamp(),
        };
        let bytes = bincode::serde::encode_to_vec(&record, BINCODE_CONFIG)?;

        // Index check and insert share one write transaction, so concurrent
        // callers cannot both pass the check
        let write_txn = self.db.begin_write()?;
        {
            let mut index = write_txn.open_table(tables::FAVORITES_BY_USER_BOARD)?;
            let key = (record.user_id.as_str(), record.board_id.as_str());
            if index.get(key)?.is_some() {
                return Err(AppError::AlreadyFavorited);
            }
            index.insert(key, id.as_str())?;

            let mut favorites = write_txn.open_table(tables::USER_FAVORITES)?;
            favorites.insert(id.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        Ok(id)
    }

    fn delete_favorite(&self, id: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut favorites = write_txn.open_table(tables::USER_FAVORITES)?;
            let removed = favorites
                .remove(id)?
                .map(|f| decode::<FavoriteRecord>(f.value()))
                .transpose()?;

            if let Some(record) = removed {
                let mut index = write_txn.open_table(tables::FAVORITES_BY_USER_BOARD)?;
                let key = (record.user_id.as_str(), record.board_id.as_str());
                let points_here = index.get(key)?.map(|v| v.value() == id).unwrap_or(false);
                if points_here {
                    index.remove(key)?;
                }
            }
        }
        write_txn.commit()?;

        Ok(())
    }

    fn ping(&self) -> Result<()> {
        self.db.begin_read()?;
        Ok(())
    }
}
