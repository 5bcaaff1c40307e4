//! Operation name registry.
//!
//! Names root every derived key, so two operations sharing one would corrupt
//! each other's counters and histories. Every store carries one registry and
//! names are only issued through it: while a name is held, nothing else
//! wrapped over that store can obtain it.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{Error, Result};

// == Operation Name ==
/// A validated operation name, reserved in its store's registry until dropped.
#[derive(Debug)]
pub struct OperationName {
    name: String,
    registry: OperationRegistry,
}

impl OperationName {
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Drop for OperationName {
    fn drop(&mut self) {
        self.registry.release(&self.name);
    }
}

// == Registry ==
/// Names reserved on one store. Clones share the same set.
///
/// Obtained from `KeyValueStore::operations`; only stores create registries.
#[derive(Debug, Clone)]
pub struct OperationRegistry {
    names: Arc<Mutex<BTreeSet<String>>>,
}

impl OperationRegistry {
    pub(crate) fn new() -> Self {
        Self {
            names: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.names.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Register ==
    /// Validates and reserves `name`.
    ///
    /// A name must be non-empty and free of whitespace and `:`, the separator
    /// of derived keys. It stays reserved until the returned handle is dropped.
    pub fn register(&self, name: &str) -> Result<OperationName> {
        if name.is_empty() || name.contains(':') || name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidName(name.to_string()));
        }
        if !self.lock().insert(name.to_string()) {
            return Err(Error::DuplicateName(name.to_string()));
        }

        debug!("Registered operation {}", name);
        Ok(OperationName {
            name: name.to_string(),
            registry: self.clone(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// Reserved names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    fn release(&self, name: &str) {
        if self.lock().remove(name) {
            debug!("Released operation {}", name);
        }
    }
}
