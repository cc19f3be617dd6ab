//! attrmap-convert: bidirectional conversion between records and attribute
//! maps, over the descriptors and cache of `attrmap-schema`.
//!
//! Four operations: record → map, map → record, batch map-list → record
//! slice, and record → parallel (names, values) sequences. Use a [`Mapper`]
//! for an isolated cache, or the module-level functions for the process-wide
//! default.

pub mod mapper;

pub use mapper::{fields_and_values, map_to_struct, maps_to_structs, struct_to_map, Mapper};

pub use attrmap_schema::{
    AttributeMap, FieldCache, FieldDescriptor, FieldSpec, Record, SchemaError, ToRecord,
    TypeDescriptor, Value,
};
