//! Whole-file read and atomic replace.
//!
//! Manifests are rewritten through a temporary sibling file that is renamed
//! over the target, so readers never observe a half-written file.

mod error;
mod rw;

pub use error::{Error, Result};
pub use rw::{AtomicWriteOptions, atomic_write, read_to_string};
