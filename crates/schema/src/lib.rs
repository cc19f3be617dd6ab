//! attrmap-schema: record type descriptors, field-name resolution, and the
//! resolved-field cache.
//!
//! A record type registers a [`TypeDescriptor`] once — its fields, key
//! overrides, exclusion markers, and flatten markers — and implements
//! [`Record`] for index-addressed field access. [`resolve_fields`] turns a
//! descriptor into the ordered [`FieldSpec`] list that names every mapped
//! field and how to reach it; [`FieldCache`] guards at-most-once resolution
//! per type and shares the result by identity.
//!
//! The conversion operations themselves live in `attrmap-convert`.

pub mod cache;
pub mod descriptor;
pub mod error;
pub mod record;
pub mod resolve;
pub mod value;

pub use cache::{FieldCache, ResolvedFields};
pub use descriptor::{FieldDescriptor, Shape, TypeDescriptor};
pub use error::SchemaError;
pub use record::{Record, ToRecord};
pub use resolve::{resolve_fields, FieldSpec};
pub use value::{AttributeMap, Value};
