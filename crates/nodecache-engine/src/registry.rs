//! Node type registration and the caching wrap.
//!
//! The registry is the process-wide lookup table from type identifiers to
//! node type entries. It replaces runtime attribute injection with an
//! explicit record per type: the constructor (the "entry point" the host
//! reads off a type), a display category, and the flag recording whether the
//! type already carries caching.
//!
//! Two wrap modes exist because the surrounding system needs both: installing
//! a caching sibling alongside the original type, and shadowing the original
//! in place so existing references resolve to the cached version.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::node::{CachedNode, ComputeNode};
use crate::store::DEFAULT_CACHE_CAPACITY;
use crate::{NodeCacheError, Result};

/// Name prefix for caching siblings derived without an explicit name.
pub const CACHED_NAME_PREFIX: &str = "cached_";

/// Default display category assigned to caching siblings.
pub const CACHED_NODES_CATEGORY: &str = "cached_nodes";

type NodeConstructor = Arc<dyn Fn() -> Box<dyn ComputeNode> + Send + Sync>;

/// One registered node type: its constructor, display category, and whether
/// its entry point is already redirected through a memoizer.
#[derive(Clone)]
pub struct NodeTypeEntry {
    constructor: NodeConstructor,
    category: String,
    caching: bool,
}

impl NodeTypeEntry {
    pub fn get_category(&self) -> &str {
        &self.category
    }

    pub fn is_caching(&self) -> bool {
        self.caching
    }
}

/// The lookup table mapping type identifiers to node types.
///
/// Initialized once at startup by the host, then read and mutated only
/// through this interface. No lock is held: the engine assumes the
/// single-threaded cooperative model, and hosts that need concurrent access
/// serialize it externally.
pub struct NodeTypeRegistry {
    entries: HashMap<String, NodeTypeEntry>,
    cache_capacity: usize,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        NodeTypeRegistry::new()
    }
}

impl NodeTypeRegistry {
    pub fn new() -> NodeTypeRegistry {
        NodeTypeRegistry {
            entries: HashMap::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Capacity handed to the memoizers of types wrapped after this call.
    /// Already-wrapped types keep the capacity they were wrapped with.
    pub fn set_cache_capacity(&mut self, capacity: usize) {
        self.cache_capacity = capacity;
    }

    /// Registers a node type under `type_id`.
    pub fn register<F>(&mut self, type_id: impl Into<String>, category: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn ComputeNode> + Send + Sync + 'static,
    {
        let type_id = type_id.into();
        debug!("Registering node type {}", type_id);
        self.entries.insert(
            type_id,
            NodeTypeEntry {
                constructor: Arc::new(constructor),
                category: category.into(),
                caching: false,
            },
        );
    }

    /// Builds a fresh instance of the given type.
    pub fn instantiate(&self, type_id: &str) -> Result<Box<dyn ComputeNode>> {
        let entry = self.get_entry(type_id)?;
        Ok((entry.constructor)())
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.entries.contains_key(type_id)
    }

    pub fn get_entry(&self, type_id: &str) -> Result<&NodeTypeEntry> {
        self.entries
            .get(type_id)
            .ok_or_else(|| NodeCacheError::UnknownNodeType(type_id.to_string()))
    }

    /// Whether the given type's entry point already goes through a memoizer.
    pub fn is_caching(&self, type_id: &str) -> Result<bool> {
        Ok(self.get_entry(type_id)?.caching)
    }

    /// Registered type identifiers, in no particular order.
    pub fn type_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Installs a caching sibling of `type_id` alongside the original.
    ///
    /// The sibling is registered as `cached_<type_id>` (or `new_name`) in the
    /// `cached_nodes` category (or `new_category`); the original entry is
    /// untouched. Returns the sibling's identifier, or `None` when nothing
    /// changed: type unknown, type already caching, or the derived name is
    /// taken. All three are reported, none is fatal.
    pub fn create_cached_version(
        &mut self,
        type_id: &str,
        new_name: Option<&str>,
        new_category: Option<&str>,
    ) -> Option<String> {
        let entry = match self.entries.get(type_id) {
            Some(entry) => entry,
            None => {
                warn!("Cannot wrap unknown node type {}", type_id);
                return None;
            }
        };
        if entry.caching {
            debug!("{} already has caching", type_id);
            return None;
        }
        let name = new_name
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", CACHED_NAME_PREFIX, type_id));
        if self.entries.contains_key(&name) {
            warn!("{} already wrapped as {}", type_id, name);
            return None;
        }
        let wrapped = self.wrap_entry(entry, new_category.unwrap_or(CACHED_NODES_CATEGORY));
        info!("✓ Wrapped {} as {}", type_id, name);
        self.entries.insert(name.clone(), wrapped);
        Some(name)
    }

    /// Replaces `type_id`'s entry with its caching version under the same
    /// identity, keeping the original category, so existing references
    /// resolve to the cached variant transparently.
    ///
    /// Returns `Ok(false)` when the type already carries caching (no-op).
    pub fn convert_to_caching(&mut self, type_id: &str) -> Result<bool> {
        let entry = self.get_entry(type_id)?;
        if entry.caching {
            debug!("{} already has caching", type_id);
            return Ok(false);
        }
        let category = entry.category.clone();
        let wrapped = self.wrap_entry(entry, &category);
        info!("✓ Converted {} to caching in place", type_id);
        self.entries.insert(type_id.to_string(), wrapped);
        Ok(true)
    }

    /// Derives the caching entry: a constructor producing a [`CachedNode`]
    /// around whatever the original constructor builds, flagged so a second
    /// registration pass cannot wrap it again.
    fn wrap_entry(&self, original: &NodeTypeEntry, category: &str) -> NodeTypeEntry {
        let inner_constructor = Arc::clone(&original.constructor);
        let capacity = self.cache_capacity;
        NodeTypeEntry {
            constructor: Arc::new(move || {
                Box::new(CachedNode::with_capacity((inner_constructor)(), capacity))
            }),
            category: category.to_string(),
            caching: true,
        }
    }
}
