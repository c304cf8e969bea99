//! Song records and the in-memory library.
//!
//! `SongRecord` lives in `library::model`; `library::store` holds the
//! ordered `SongLibrary` with its dedup rule and change channel.

mod model;
mod store;

pub use model::*;
pub use store::*;
