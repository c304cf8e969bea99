//! The import pipeline: scoped source access, background extraction,
//! and insert-time dedup against the library.
//!
//! `import::source` is the boundary to the external file chooser;
//! `import::pipeline` owns the worker thread and the completion
//! channel drained by the owning context.

mod pipeline;
mod source;

pub use pipeline::*;
pub use source::*;
