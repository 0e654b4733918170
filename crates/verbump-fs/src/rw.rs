use crate::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug)]
pub struct AtomicWriteOptions {
    /// Copy the permission bits of the file being replaced onto the new one.
    pub keep_permissions: bool,
    pub sync:             bool,
}

impl Default for AtomicWriteOptions {
    fn default() -> Self { Self::new() }
}

impl AtomicWriteOptions {
    pub fn new() -> Self {
        Self {
            keep_permissions: true,
            sync:             false,
        }
    }

    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }
}

pub fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}

pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: AtomicWriteOptions) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    // Write through symlinks so the link itself survives.
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let existing = if options.keep_permissions {
        fs::metadata(&target).ok().map(|m| m.permissions())
    } else {
        None
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".verbump.")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(write_err)?;

    tmp.write_all(content).map_err(write_err)?;

    if options.sync {
        tmp.as_file().sync_all().map_err(write_err)?;
    }

    if let Some(perms) = existing {
        fs::set_permissions(tmp.path(), perms).map_err(write_err)?;
    }

    // The temp file is removed on drop if persisting fails.
    tmp.persist(&target).map_err(|e| write_err(e.error))?;

    tracing::trace!(path = %path.display(), bytes = content.len(), "replaced file");
    Ok(())
}
