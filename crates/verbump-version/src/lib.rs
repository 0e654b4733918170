//! Dot-separated numeric versions and the minor bump rule.
//!
//! A [`Version`] is any number of non-negative integer components joined by
//! dots (`0.3.0`, `2.0`, `1.2.3.4`). [`Version::increment`] adds one to the
//! second component and leaves every other component untouched, so
//! `1.2.3` becomes `1.3.3`.

pub use self::version::{Version, VersionError, increment, increment_str};

mod version;
