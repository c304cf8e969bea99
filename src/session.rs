//! The owning context: one `PlayerSession` ties the library, the
//! importer, the transport controller and the progress clock together
//! and serializes every mutation through `&mut self`.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
