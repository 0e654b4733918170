//! Manifest access and version synchronization.
//!
//! A manifest is a JSON or TOML file holding one version string at a known
//! nested [`FieldPath`]. [`apply_to_manifests`] bumps the minor component of
//! each manifest's own version, in order, and rewrites each file in the
//! format's canonical layout.
//!
//! Files are processed one after another. A failure stops the run but does
//! not roll back manifests already written.

mod document;
mod error;
mod format;
mod sync;

pub use document::{Document, DocumentError};
pub use error::{ManifestError, Result};
pub use format::{FieldPath, FieldPathError, Format};
pub use sync::{
    BumpEntry, Manifest, ManifestSpec, ManifestVersion, SyncOptions, SyncReport, apply_to_manifests,
    ensure_in_sync, read_versions,
};
