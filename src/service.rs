//! Board operations
//!
//! Every operation except [`BoardService::get`] first resolves the caller's
//! identity and fails with `Unauthorized` before touching the store.

use rand::Rng;
use std::sync::Arc;

use crate::constants::PLACEHOLDER_IMAGES;
use crate::db::DocumentStore;
use crate::error::{AppError, Result};
use crate::models::{Board, Identity, NewBoard, NewFavorite};
use crate::security::{Credentials, IdentityResolver};

/// Board service composed from an identity resolver and a document store
#[derive(Clone)]
pub struct BoardService {
    store: Arc<dyn DocumentStore>,
    identity: Arc<dyn IdentityResolver>,
}

impl BoardService {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { store, identity }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    fn authenticate(&self, credentials: Option<&Credentials>) -> Result<Identity> {
        self.identity
            .resolve(credentials)
            .ok_or(AppError::Unauthorized)
    }

    /// Create a board owned by `org_id` with a random placeholder image
    ///
    /// Returns the new board id. The title is stored as given.
    pub fn create(
        &self,
        credentials: Option<&Credentials>,
        org_id: &str,
        title: &str,
    ) -> Result<String> {
        let identity = self.authenticate(credentials)?;

        let image_url = pick_placeholder_image(&mut rand::rng());
        tracing::debug!("Assigned placeholder image {} to new board", image_url);

        let id = self.store.insert_board(NewBoard {
            title: title.to_string(),
            org_id: org_id.to_string(),
            author_id: identity.subject.clone(),
            author_name: identity.name,
            image_url: image_url.to_string(),
        })?;

        tracing::info!("Board {} created in org {} by {}", id, org_id, identity.subject);

        Ok(id)
    }

    /// Delete a board along with the caller's favorite of it
    ///
    /// Removing a board that does not exist succeeds.
    pub fn remove(&self, credentials: Option<&Credentials>, id: &str) -> Result<()> {
        let identity = self.authenticate(credentials)?;

        if let Some(favorite) = self.store.find_favorite(&identity.subject, id)? {
            self.store.delete_favorite(&favorite.id)?;
        }

        self.store.delete_board(id)?;

        tracing::info!("Board {} removed by {}", id, identity.subject);

        Ok(())
    }

    /// Rename a board; the title is trimmed and must be 1-60 characters
    pub fn update(&self, credentials: Option<&Credentials>, id: &str, title: &str) -> Result<Board> {
        let identity = self.authenticate(credentials)?;

        let title = Board::validate_title(title)?;
        let board = self.store.patch_board_title(id, title)?;

        tracing::info!("Board {} renamed by {}", id, identity.subject);

        Ok(board)
    }

    /// Mark a board as a favorite of the caller
    pub fn favorite(
        &self,
        credentials: Option<&Credentials>,
        id: &str,
        org_id: &str,
    ) -> Result<Board> {
        let identity = self.authenticate(credentials)?;

        let board = self.store.get_board(id)?.ok_or(AppError::BoardNotFound)?;

        if self
            .store
            .find_favorite(&identity.subject, &board.id)?
            .is_some()
        {
            return Err(AppError::AlreadyFavorited);
        }

        self.store.insert_favorite(NewFavorite {
            user_id: identity.subject.clone(),
            board_id: board.id.clone(),
            org_id: org_id.to_string(),
        })?;

        tracing::info!("Board {} favorited by {}", board.id, identity.subject);

        Ok(board)
    }

    /// Remove the caller's favorite mark from a board
    pub fn unfavorite(&self, credentials: Option<&Credentials>, id: &str) -> Result<Board> {
        let identity = self.authenticate(credentials)?;

        let board = self.store.get_board(id)?.ok_or(AppError::BoardNotFound)?;

        let favorite = self
            .store
            .find_favorite(&identity.subject, &board.id)?
            .ok_or(AppError::FavoriteNotFound)?;

        self.store.delete_favorite(&favorite.id)?;

        tracing::info!("Board {} unfavorited by {}", board.id, identity.subject);

        Ok(board)
    }

    /// Fetch a board; no identity required
    pub fn get(&self, id: &str) -> Result<Option<Board>> {
        self.store.get_board(id)
    }
}

/// Uniformly draw one of the placeholder images
pub fn pick_placeholder_image<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PLACEHOLDER_IMAGES[rng.random_range(0..PLACEHOLDER_IMAGES.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ERR_TITLE_REQUIRED, ERR_TITLE_TOO_LONG};
    use crate::db::{open_database, RedbStore};
    use crate::security::HmacIdentityResolver;
    use tempfile::TempDir;

    const SECRET: &str = "test-secret-key";

    struct Harness {
        service: BoardService,
        store: Arc<RedbStore>,
        _temp_dir: TempDir,
    }

    fn harness() -> Harness {
        let temp_dir = TempDir::new().unwrap();
        let db = open_database(temp_dir.path().join("test.db")).unwrap();
        let store = Arc::new(RedbStore::new(db));
        let identity = Arc::new(HmacIdentityResolver::new(SECRET, 300));
        let service = BoardService::new(store.clone(), identity);

        Harness {
            service,
            store,
            _temp_dir: temp_dir,
        }
    }

    fn caller(subject: &str, name: &str) -> Credentials {
        Credentials::signed(subject, name, chrono::Utc::now().timestamp(), SECRET)
    }

    fn ada() -> Credentials {
        caller("user_ada", "Ada Lovelace")
    }

    #[test]
    fn test_create_records_author_and_placeholder() {
        let h = harness();

        let id = h.service.create(Some(&ada()), "org1", "My Board").unwrap();
        let board = h.service.get(&id).unwrap().unwrap();

        assert_eq!(board.title, "My Board");
        assert_eq!(board.org_id, "org1");
        assert_eq!(board.author_id, "user_ada");
        assert_eq!(board.author_name, "Ada Lovelace");
        assert!(PLACEHOLDER_IMAGES.contains(&board.image_url.as_str()));
    }

    #[test]
    fn test_create_does_not_validate_title() {
        let h = harness();

        let id = h.service.create(Some(&ada()), "org1", "").unwrap();
        assert_eq!(h.service.get(&id).unwrap().unwrap().title, "");
    }

    #[test]
    fn test_unauthenticated_calls_change_nothing() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Original").unwrap();
        h.service.favorite(Some(&ada()), &id, "org1").unwrap();

        let forged = Credentials {
            subject: "user_ada".to_string(),
            name: "Ada Lovelace".to_string(),
            timestamp: chrono::Utc::now().timestamp(),
            signature: "0".repeat(64),
        };

        for credentials in [None, Some(&forged)] {
            assert!(matches!(
                h.service.create(credentials, "org1", "New"),
                Err(AppError::Unauthorized)
            ));
            assert!(matches!(
                h.service.update(credentials, &id, "Renamed"),
                Err(AppError::Unauthorized)
            ));
            assert!(matches!(
                h.service.favorite(credentials, &id, "org1"),
                Err(AppError::Unauthorized)
            ));
            assert!(matches!(
                h.service.unfavorite(credentials, &id),
                Err(AppError::Unauthorized)
            ));
            assert!(matches!(
                h.service.remove(credentials, &id),
                Err(AppError::Unauthorized)
            ));
        }

        assert_eq!(h.store.board_count().unwrap(), 1);
        assert_eq!(h.store.favorite_count().unwrap(), 1);
        assert_eq!(h.service.get(&id).unwrap().unwrap().title, "Original");
    }

    #[test]
    fn test_get_needs_no_identity_and_reports_absence() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Public").unwrap();

        assert!(h.service.get(&id).unwrap().is_some());
        assert!(h.service.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Keep me").unwrap();

        assert!(matches!(
            h.service.update(Some(&ada()), &id, "  "),
            Err(AppError::InvalidInput(msg)) if msg == ERR_TITLE_REQUIRED
        ));
        assert_eq!(h.service.get(&id).unwrap().unwrap().title, "Keep me");
    }

    #[test]
    fn test_update_title_length_limit() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Short").unwrap();

        assert!(matches!(
            h.service.update(Some(&ada()), &id, &"x".repeat(61)),
            Err(AppError::InvalidInput(msg)) if msg == ERR_TITLE_TOO_LONG
        ));
        assert_eq!(h.service.get(&id).unwrap().unwrap().title, "Short");

        let sixty = "x".repeat(60);
        let board = h.service.update(Some(&ada()), &id, &sixty).unwrap();
        assert_eq!(board.title, sixty);
    }

    #[test]
    fn test_update_persists_trimmed_title() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Draft").unwrap();

        let board = h.service.update(Some(&ada()), &id, "  Final  ").unwrap();
        assert_eq!(board.title, "Final");
        assert_eq!(h.service.get(&id).unwrap().unwrap().title, "Final");
    }

    #[test]
    fn test_update_missing_board() {
        let h = harness();

        assert!(matches!(
            h.service.update(Some(&ada()), "missing", "Title"),
            Err(AppError::BoardNotFound)
        ));
    }

    #[test]
    fn test_favorite_twice() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Fav").unwrap();

        let board = h.service.favorite(Some(&ada()), &id, "org1").unwrap();
        assert_eq!(board.id, id);
        assert_eq!(h.store.favorite_count().unwrap(), 1);

        assert!(matches!(
            h.service.favorite(Some(&ada()), &id, "org1"),
            Err(AppError::AlreadyFavorited)
        ));
        assert_eq!(h.store.favorite_count().unwrap(), 1);
    }

    #[test]
    fn test_favorites_are_per_user() {
        let h = harness();
        let grace = caller("user_grace", "Grace Hopper");
        let id = h.service.create(Some(&ada()), "org1", "Shared").unwrap();

        h.service.favorite(Some(&ada()), &id, "org1").unwrap();
        h.service.favorite(Some(&grace), &id, "org1").unwrap();
        assert_eq!(h.store.favorite_count().unwrap(), 2);

        let favorite = h.store.find_favorite("user_grace", &id).unwrap().unwrap();
        assert_eq!(favorite.org_id, "org1");
    }

    #[test]
    fn test_favorite_missing_board() {
        let h = harness();

        assert!(matches!(
            h.service.favorite(Some(&ada()), "missing", "org1"),
            Err(AppError::BoardNotFound)
        ));
        assert_eq!(h.store.favorite_count().unwrap(), 0);
    }

    #[test]
    fn test_unfavorite_without_favorite() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Plain").unwrap();

        assert!(matches!(
            h.service.unfavorite(Some(&ada()), &id),
            Err(AppError::FavoriteNotFound)
        ));
        assert!(matches!(
            h.service.unfavorite(Some(&ada()), "missing"),
            Err(AppError::BoardNotFound)
        ));
    }

    #[test]
    fn test_favorite_then_unfavorite() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Toggle").unwrap();

        h.service.favorite(Some(&ada()), &id, "org1").unwrap();
        let board = h.service.unfavorite(Some(&ada()), &id).unwrap();

        assert_eq!(board.id, id);
        assert!(h.store.find_favorite("user_ada", &id).unwrap().is_none());
        assert_eq!(h.store.favorite_count().unwrap(), 0);
    }

    #[test]
    fn test_remove_deletes_favorite_and_board() {
        let h = harness();
        let id = h.service.create(Some(&ada()), "org1", "Doomed").unwrap();
        h.service.favorite(Some(&ada()), &id, "org1").unwrap();

        h.service.remove(Some(&ada()), &id).unwrap();

        assert!(h.service.get(&id).unwrap().is_none());
        assert!(h.store.find_favorite("user_ada", &id).unwrap().is_none());
        assert_eq!(h.store.favorite_count().unwrap(), 0);

        // Second removal is a no-op
        h.service.remove(Some(&ada()), &id).unwrap();
    }

    #[test]
    fn test_remove_leaves_other_users_favorites() {
        let h = harness();
        let grace = caller("user_grace", "Grace Hopper");
        let id = h.service.create(Some(&ada()), "org1", "Shared").unwrap();
        h.service.favorite(Some(&grace), &id, "org1").unwrap();

        h.service.remove(Some(&ada()), &id).unwrap();

        assert!(h.service.get(&id).unwrap().is_none());
        assert!(h.store.find_favorite("user_grace", &id).unwrap().is_some());
    }

    #[test]
    fn test_pick_placeholder_image_covers_set() {
        let mut rng = rand::rng();
        let mut seen = std::collections::HashSet::new();

        for _ in 0..1000 {
            seen.insert(pick_placeholder_image(&mut rng));
        }

        assert_eq!(seen.len(), PLACEHOLDER_IMAGES.len());
    }
}
