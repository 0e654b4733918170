use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use verbump_manifest::ManifestSpec;

pub const CONFIG_FILE: &str = "verbump.toml";
pub const ENV_PREFIX: &str = "VERBUMP_";

// Layout of a Tauri app: frontend config, Rust workspace, npm package.
const DEFAULT_MANIFESTS: [(&str, &str); 3] = [
    ("src-tauri/tauri.conf.json", "package.version"),
    ("Cargo.toml", "workspace.package.version"),
    ("package.json", "version"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub require_sync: bool,
    /// Processed in order.
    #[serde(rename = "manifest")]
    pub manifests:    Vec<ManifestSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_sync: false,
            manifests:    DEFAULT_MANIFESTS
                .iter()
                .filter_map(|(path, field)| ManifestSpec::new(*path, field).ok())
                .collect(),
        }
    }
}

impl Config {
    /// Defaults, then the TOML file if it exists, then `VERBUMP_*` variables.
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).only(&["require_sync"]))
            .extract()
    }
}

/// Nearest ancestor of `start` holding a config file, or `start` itself.
pub fn discover_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
