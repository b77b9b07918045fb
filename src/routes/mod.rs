pub mod boards;
pub mod caller;
pub mod favorites;
pub mod health;

pub use boards::{create_board, get_board, remove_board, update_board};
pub use caller::Caller;
pub use favorites::{favorite_board, unfavorite_board};
pub use health::health_check;
