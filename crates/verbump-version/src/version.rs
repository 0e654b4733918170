//! Version type and the minor bump.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static COMPONENT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("empty version string")]
    Empty,
    #[error("invalid component `{component}` in version `{input}`")]
    InvalidComponent { input: String, component: String },
    #[error("version `{input}` has {found} component(s), at least 2 are required to bump the minor slot")]
    TooFewComponents { input: String, found: usize },
    #[error("minor component of version `{input}` overflows")]
    Overflow { input: String },
}

/// A release version made of dot-separated non-negative integers.
///
/// Leading zeros are accepted when parsing and dropped when displaying,
/// so `0.03.0` reads back as `0.3.0`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(Vec<u64>);

impl Version {
    /// Index of the component bumped by [`Version::increment`].
    pub const MINOR: usize = 1;

    pub fn parse(s: &str) -> Result<Self, VersionError> {
        if s.is_empty() {
            return Err(VersionError::Empty);
        }

        let components = s
            .split('.')
            .map(|component| parse_component(s, component))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(components))
    }

    pub fn from_components(components: impl Into<Vec<u64>>) -> Result<Self, VersionError> {
        let components = components.into();
        if components.is_empty() {
            return Err(VersionError::Empty);
        }
        Ok(Self(components))
    }

    /// Bump the minor slot by one.
    ///
    /// The component count is kept and trailing components are not reset.
    pub fn increment(&self) -> Result<Self, VersionError> {
        let mut components = self.0.clone();
        let found = components.len();

        let minor = components
            .get_mut(Self::MINOR)
            .ok_or_else(|| VersionError::TooFewComponents {
                input: self.to_string(),
                found,
            })?;
        *minor = minor.checked_add(1).ok_or_else(|| VersionError::Overflow {
            input: self.to_string(),
        })?;

        Ok(Self(components))
    }

    pub fn components(&self) -> &[u64] { &self.0 }

    pub fn minor(&self) -> Option<u64> { self.0.get(Self::MINOR).copied() }
}

fn parse_component(input: &str, component: &str) -> Result<u64, VersionError> {
    let invalid = || VersionError::InvalidComponent {
        input:     input.to_string(),
        component: component.to_string(),
    };

    if !COMPONENT_REGEX.is_match(component) {
        return Err(invalid());
    }
    component.parse().map_err(|_| invalid())
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Version::parse(s) }
}

impl TryFrom<&str> for Version {
    type Error = VersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> { Version::parse(value) }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = self.0.iter();
        if let Some(first) = components.next() {
            write!(f, "{}", first)?;
        }
        for component in components {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

pub fn increment(version: &Version) -> Result<Version, VersionError> { version.increment() }

/// Parse, bump and format in one step.
pub fn increment_str(version: &str) -> Result<String, VersionError> {
    Ok(Version::parse(version)?.increment()?.to_string())
}
