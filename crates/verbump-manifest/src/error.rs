use std::path::PathBuf;

use thiserror::Error;
use verbump_version::VersionError;

use crate::{DocumentError, FieldPathError};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Io(#[from] verbump_fs::Error),

    #[error("{}", path.display())]
    Document {
        path:   PathBuf,
        #[source]
        source: DocumentError,
    },

    #[error("bad version in {}", path.display())]
    Version {
        path:   PathBuf,
        #[source]
        source: VersionError,
    },

    #[error("cannot infer manifest format of {}, expected a .json or .toml file", path.display())]
    UnknownFormat { path: PathBuf },

    #[error(transparent)]
    FieldPath(#[from] FieldPathError),

    #[error("manifests are out of sync: {summary}")]
    OutOfSync { summary: String },
}

pub type Result<T> = std::result::Result<T, ManifestError>;
