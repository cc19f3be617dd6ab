//! Process-wide cache of resolved field lists.
//!
//! Resolution is a pure function of the type, so each type is resolved at
//! most once per cache and the resulting list is shared by identity from
//! then on. Entries are never evicted or invalidated: registered schemas are
//! immutable for the lifetime of the process.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::descriptor::TypeDescriptor;
use crate::error::SchemaError;
use crate::resolve::{resolve_fields, FieldSpec};

/// An immutable, identity-shared resolved field list.
pub type ResolvedFields = Arc<[FieldSpec]>;

/// Maps type identity to its resolved field list.
///
/// Injectable rather than implicit: converters own one, and tests construct
/// isolated instances. Reads take the shared lock; a miss recomputes outside
/// any lock (resolution is deterministic, so a racing duplicate computation
/// is harmless) and the write-side insert keeps whichever entry landed
/// first, so concurrent first resolutions can never store conflicting lists.
#[derive(Debug, Default)]
pub struct FieldCache {
    entries: RwLock<HashMap<TypeId, ResolvedFields>>,
}

impl FieldCache {
    pub fn new() -> FieldCache {
        FieldCache::default()
    }

    /// Resolved fields for `descriptor`, computing and caching on first use.
    ///
    /// Repeated calls for the same type return the identical `Arc`.
    pub fn resolve(&self, descriptor: &'static TypeDescriptor) -> Result<ResolvedFields, SchemaError> {
        // Entries are write-once, so data behind a poisoned lock is still
        // valid; recover instead of propagating the panic.
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = entries.get(&descriptor.id()) {
            return Ok(Arc::clone(hit));
        }
        drop(entries);

        let computed: ResolvedFields = resolve_fields(descriptor)?.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(entries.entry(descriptor.id()).or_insert(computed)))
    }
}
