//! Applying the minor bump across a list of manifests.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use verbump_fs::AtomicWriteOptions;
use verbump_version::Version;

use crate::{Document, FieldPath, Format, ManifestError, Result};

/// Where a manifest lives and where its version field sits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSpec {
    /// Relative to the project root unless absolute.
    pub path:   PathBuf,
    pub field:  FieldPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl ManifestSpec {
    pub fn new(path: impl Into<PathBuf>, field: &str) -> Result<Self> {
        Ok(Self {
            path:   path.into(),
            field:  field.parse()?,
            format: None,
        })
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn resolve(&self, root: &Path) -> PathBuf { root.join(&self.path) }

    /// The declared format, or the one implied by the file extension.
    pub fn format(&self) -> Result<Format> {
        self.format
            .or_else(|| Format::from_path(&self.path))
            .ok_or_else(|| ManifestError::UnknownFormat {
                path: self.path.clone(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Compute every bump but leave the files untouched.
    pub dry_run:      bool,
    /// Refuse to start when the manifests currently disagree.
    pub require_sync: bool,
}

/// A manifest loaded into memory.
#[derive(Debug, Clone)]
pub struct Manifest {
    path:     PathBuf,
    field:    FieldPath,
    document: Document,
}

impl Manifest {
    pub fn load(root: &Path, spec: &ManifestSpec) -> Result<Self> {
        let path = spec.resolve(root);
        let format = spec.format()?;
        let text = verbump_fs::read_to_string(&path)?;
        let document = Document::parse(format, &text).map_err(|source| ManifestError::Document {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), %format, "loaded manifest");

        Ok(Self {
            path,
            field: spec.field.clone(),
            document,
        })
    }

    pub fn path(&self) -> &Path { &self.path }

    pub fn version(&self) -> Result<Version> {
        let raw = self
            .document
            .get_str(&self.field)
            .map_err(|source| self.document_error(source))?;
        Version::parse(raw).map_err(|source| ManifestError::Version {
            path: self.path.clone(),
            source,
        })
    }

    pub fn set_version(&mut self, version: &Version) -> Result<()> {
        self.document
            .set_str(&self.field, version.to_string())
            .map_err(|source| ManifestError::Document {
                path: self.path.clone(),
                source,
            })
    }

    /// Rewrite the whole file in canonical layout.
    pub fn save(&self) -> Result<()> {
        let text = self
            .document
            .render()
            .map_err(|source| self.document_error(source))?;
        verbump_fs::atomic_write(&self.path, text.as_bytes(), AtomicWriteOptions::new())?;
        debug!(path = %self.path.display(), format = %self.document.format(), "wrote manifest");
        Ok(())
    }

    fn document_error(&self, source: crate::DocumentError) -> ManifestError {
        ManifestError::Document {
            path: self.path.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestVersion {
    pub path:    PathBuf,
    pub version: Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpEntry {
    pub path: PathBuf,
    pub old:  Version,
    pub new:  Version,
}

/// What a run did, in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub entries: Vec<BumpEntry>,
    pub dry_run: bool,
}

impl SyncReport {
    /// Distinct resulting versions, in first-seen order.
    pub fn new_versions(&self) -> Vec<&Version> {
        let mut out: Vec<&Version> = Vec::new();
        for entry in &self.entries {
            if !out.contains(&&entry.new) {
                out.push(&entry.new);
            }
        }
        out
    }

    pub fn is_in_sync(&self) -> bool { self.new_versions().len() <= 1 }
}

impl fmt::Display for BumpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.path.display(), self.old, self.new)
    }
}

/// Current version of every manifest, nothing is written.
pub fn read_versions(root: &Path, manifests: &[ManifestSpec]) -> Result<Vec<ManifestVersion>> {
    manifests
        .iter()
        .map(|spec| -> Result<ManifestVersion> {
            let manifest = Manifest::load(root, spec)?;
            Ok(ManifestVersion {
                version: manifest.version()?,
                path:    manifest.path,
            })
        })
        .collect()
}

/// Fail with [`ManifestError::OutOfSync`] unless all versions are equal.
pub fn ensure_in_sync(versions: &[ManifestVersion]) -> Result<()> {
    let Some(first) = versions.first() else {
        return Ok(());
    };
    if versions.iter().all(|v| v.version == first.version) {
        return Ok(());
    }

    let summary = versions
        .iter()
        .map(|v| format!("{}={}", v.path.display(), v.version))
        .collect::<Vec<_>>()
        .join(", ");
    Err(ManifestError::OutOfSync { summary })
}

/// Bump the minor component of each manifest's own version, in order.
///
/// Each file is replaced atomically, but the run as a whole is not: when a
/// later manifest fails, earlier ones stay updated.
pub fn apply_to_manifests(
    root: &Path,
    manifests: &[ManifestSpec],
    options: &SyncOptions,
) -> Result<SyncReport> {
    if options.require_sync {
        ensure_in_sync(&read_versions(root, manifests)?)?;
    }

    let mut report = SyncReport {
        entries: Vec::with_capacity(manifests.len()),
        dry_run: options.dry_run,
    };

    for spec in manifests {
        let mut manifest = Manifest::load(root, spec)?;
        let old = manifest.version()?;
        let new = old.increment().map_err(|source| ManifestError::Version {
            path: manifest.path.clone(),
            source,
        })?;
        manifest.set_version(&new)?;

        if options.dry_run {
            info!(path = %manifest.path.display(), %old, %new, "would bump version");
        } else {
            manifest.save()?;
            info!(path = %manifest.path.display(), %old, %new, "bumped version");
        }

        report.entries.push(BumpEntry {
            path: manifest.path,
            old,
            new,
        });
    }

    if !report.is_in_sync() {
        let versions = report
            .new_versions()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        warn!(%versions, "manifests ended on different versions");
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_infers_format() {
        let spec = ManifestSpec::new("src-tauri/tauri.conf.json", "package.version").unwrap();
        assert_eq!(spec.format().unwrap(), Format::Json);

        let spec = ManifestSpec::new("VERSION", "version").unwrap();
        assert!(matches!(spec.format(), Err(ManifestError::UnknownFormat { .. })));

        let spec = spec.with_format(Format::Toml);
        assert_eq!(spec.format().unwrap(), Format::Toml);
    }

    #[test]
    fn test_spec_rejects_bad_field() {
        assert!(matches!(
            ManifestSpec::new("package.json", "a..b"),
            Err(ManifestError::FieldPath(_))
        ));
    }

    #[test]
    fn test_spec_deserialize() {
        let spec: ManifestSpec = toml::from_str(
            "path = \"Cargo.toml\"\nfield = \"workspace.package.version\"\nformat = \"toml\"\n",
        )
        .unwrap();
        assert_eq!(spec.field.segments().len(), 3);
        assert_eq!(spec.format, Some(Format::Toml));
    }

    #[test]
    fn test_ensure_in_sync() {
        let v = |p: &str, s: &str| ManifestVersion {
            path:    PathBuf::from(p),
            version: s.parse().unwrap(),
        };

        assert!(ensure_in_sync(&[]).is_ok());
        assert!(ensure_in_sync(&[v("a.json", "0.3.0"), v("b.toml", "0.3.0")]).is_ok());

        let err = ensure_in_sync(&[v("a.json", "0.3.0"), v("b.toml", "0.2.0")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "manifests are out of sync: a.json=0.3.0, b.toml=0.2.0"
        );
    }

    #[test]
    fn test_report_versions() {
        let entry = |p: &str, new: &str| BumpEntry {
            path: PathBuf::from(p),
            old:  "0.1.0".parse().unwrap(),
            new:  new.parse().unwrap(),
        };
        let report = SyncReport {
            entries: vec![entry("a", "0.2.0"), entry("b", "0.2.0"), entry("c", "1.1.0")],
            dry_run: false,
        };
        assert_eq!(report.new_versions().len(), 2);
        assert!(!report.is_in_sync());
        assert_eq!(report.entries[0].to_string(), "a: 0.1.0 -> 0.2.0");
    }
}
