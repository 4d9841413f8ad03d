//! Startup configuration: which node types get caching pre-enabled.
//!
//! The config file lists type identifiers to convert in place at startup and
//! optionally overrides the per-instance cache capacity. Application is
//! permissive on purpose: a missing file, an unknown type name, or a bad
//! entry is logged and skipped, never allowed to fail startup, because
//! caching is an optimization the host must be able to boot without.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::registry::NodeTypeRegistry;
use crate::store::DEFAULT_CACHE_CAPACITY;
use crate::{NodeCacheError, Result};

/// Default config file name searched for near the working directory.
pub const CONFIG_FILE_NAME: &str = "node_cacher.toml";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV_VAR: &str = "NODECACHE_CONFIG_PATH";

/// How many parent directories the file search walks up.
const PARENT_SEARCH_DEPTH: usize = 5;

/// Startup configuration for the caching layer.
///
/// ```toml
/// capacity = 4
/// convert = ["LoadImage", "UpscaleModel"]
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacherConfig {
    /// Per-instance cache capacity for types converted after loading.
    pub capacity: usize,
    /// Type identifiers to convert to caching in place at startup.
    pub convert: Vec<String>,
}

impl Default for CacherConfig {
    fn default() -> Self {
        CacherConfig {
            capacity: DEFAULT_CACHE_CAPACITY,
            convert: Vec::new(),
        }
    }
}

/// Finds the config file.
///
/// Search order:
/// 1. `NODECACHE_CONFIG_PATH` environment variable
/// 2. `./node_cacher.toml`
/// 3. Parent directories, up to 5 levels
///
/// # Errors
///
/// Returns `NodeCacheError::ConfigNotFound` if no file exists at any
/// searched location (including a set but dangling environment variable).
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV_VAR) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(NodeCacheError::ConfigNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV_VAR,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd;
        for _ in 0..PARENT_SEARCH_DEPTH {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent.to_path_buf();
                }
                None => break,
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    Err(NodeCacheError::ConfigNotFound(format!(
        "'{}' not found in the working directory or its parents; set {} to use a custom location",
        CONFIG_FILE_NAME, CONFIG_PATH_ENV_VAR
    )))
}

/// Reads and parses the config file at `path`.
pub fn load_config(path: &Path) -> Result<CacherConfig> {
    let contents = fs::read_to_string(path)?;
    let config: CacherConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Applies a loaded config to the registry: sets the cache capacity, then
/// converts every listed type in place. Unknown types are logged and
/// skipped. Returns the number of types actually converted.
pub fn apply_config(registry: &mut NodeTypeRegistry, config: &CacherConfig) -> usize {
    registry.set_cache_capacity(config.capacity);
    let mut converted = 0;
    for type_id in &config.convert {
        match registry.convert_to_caching(type_id) {
            Ok(true) => {
                info!("Cacher: converted {}", type_id);
                converted += 1;
            }
            Ok(false) => {}
            Err(error) => {
                warn!("Cacher: {} not converted ({})", type_id, error);
            }
        }
    }
    converted
}
