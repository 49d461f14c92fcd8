//! Domain layer: allow-list, registration records, receiver selection
//! and user-facing messages.

pub mod messages;
pub mod picker;
pub mod player;
pub mod roster;

pub use messages::{Locale, Messages};
pub use picker::{RandomPicker, ReceiverPicker, SeededPicker};
pub use player::{NewPlayer, PlayerRecord, normalize_email};
pub use roster::Roster;
