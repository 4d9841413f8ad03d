//! Engine error type

/// Errors surfaced by the caching engine.
///
/// Only `Computation` reaches callers of a wrapped node during normal
/// operation; it carries the wrapped computation's own failure, identical to
/// the uncached behavior. Registration no-ops (already wrapped, name
/// collision) are reported as `None` results, not errors.
#[derive(Debug, thiserror::Error)]
pub enum NodeCacheError {
    /// No node type registered under the given identifier
    #[error("Node type not found: {0}")]
    UnknownNodeType(String),

    /// The wrapped computation itself failed; never cached, never swallowed
    #[error("Computation failed: {0}")]
    Computation(String),

    /// Invalid argument value construction
    #[error("Bad value: {0}")]
    Value(#[from] nodecache_structures::ValueError),

    /// Config file could not be read
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// No config file found at any searched location
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),
}

pub type Result<T> = std::result::Result<T, NodeCacheError>;
