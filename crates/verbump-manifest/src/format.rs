use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    /// Guess the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => write!(f, "json"),
            Format::Toml => write!(f, "toml"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field path `{0}`")]
pub struct FieldPathError(pub String);

/// Keys leading from the document root to the version string,
/// written as `workspace.package.version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn parse(s: &str) -> Result<Self, FieldPathError> {
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|seg| seg.trim().is_empty()) {
            return Err(FieldPathError(s.to_string()));
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] { &self.0 }

    /// Split into the parent keys and the final key.
    pub fn split_last(&self) -> (&[String], &str) {
        match self.0.split_last() {
            Some((last, parents)) => (parents, last.as_str()),
            None => (&self.0[..], ""),
        }
    }

    /// Dotted prefix ending at `index`, used to name where lookup stopped.
    pub(crate) fn prefix(&self, index: usize) -> String { self.0[..=index].join(".") }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { FieldPath::parse(s) }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> { FieldPath::parse(&value) }
}

impl From<FieldPath> for String {
    fn from(value: FieldPath) -> Self { value.to_string() }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0.join(".")) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/tauri.conf.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("Cargo.TOML")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("setup.cfg")), None);
        assert_eq!(Format::from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_field_path_parse() {
        let path: FieldPath = "workspace.package.version".parse().unwrap();
        assert_eq!(path.segments(), &["workspace", "package", "version"]);
        assert_eq!(path.split_last(), (&path.segments()[..2], "version"));
        assert_eq!(path.to_string(), "workspace.package.version");
    }

    #[test]
    fn test_field_path_rejects_empty_segments() {
        assert!(FieldPath::parse("").is_err());
        assert!(FieldPath::parse("package..version").is_err());
        assert!(FieldPath::parse(".version").is_err());
    }
}
