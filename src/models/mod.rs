pub mod board;
pub mod favorite;
pub mod identity;

pub use board::{Board, BoardRecord, NewBoard};
pub use favorite::{FavoriteRecord, NewFavorite, UserFavorite};
pub use identity::Identity;
