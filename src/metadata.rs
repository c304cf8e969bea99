//! Metadata extraction: audio byte buffer in, `SongRecord` out.
//!
//! Pure and synchronous; the import pipeline calls this after reading a
//! source and catches every failure without touching the library.

mod extract;

pub use extract::*;
