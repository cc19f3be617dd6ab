//! The four conversion operations between records and attribute maps.
//!
//! Both directions are stateless over their input; the only persistent state
//! is the [`FieldCache`] a `Mapper` owns. Reading traverses resolved paths
//! and surfaces `Null` past an absent optional reference; writing traverses
//! the same paths, allocating absent intermediate references so the final
//! field location is writable, and assigns only on an exact type-name match.

use std::sync::OnceLock;

use attrmap_schema::{AttributeMap, FieldCache, FieldSpec, Record, SchemaError, ToRecord, Value};

/// Converter over an injectable field cache.
///
/// Construct one per subsystem under test, or use the module-level functions
/// bound to the process-wide default instance.
#[derive(Debug, Default)]
pub struct Mapper {
    cache: FieldCache,
}

impl Mapper {
    pub fn new() -> Mapper {
        Mapper::default()
    }

    /// Convert a record into an attribute map.
    ///
    /// Accepts records, optional references to records, and plain scalars
    /// alike; `None` signals that the input was not record-shaped. This is a
    /// compatibility probe, not a failure condition.
    pub fn struct_to_map(&self, value: &dyn ToRecord) -> Option<AttributeMap> {
        let record = value.as_record()?;
        let fields = self.cache.resolve(record.descriptor()).ok()?;
        let mut map = AttributeMap::with_capacity(fields.len());
        for spec in fields.iter() {
            map.insert(spec.name.clone(), read_path(record, &spec.path));
        }
        Some(map)
    }

    /// Resolved field names and their current values, as two parallel
    /// sequences in resolution order. Same probe contract as
    /// [`Mapper::struct_to_map`].
    pub fn fields_and_values(&self, value: &dyn ToRecord) -> Option<(Vec<String>, Vec<Value>)> {
        let record = value.as_record()?;
        let fields = self.cache.resolve(record.descriptor()).ok()?;
        let mut names = Vec::with_capacity(fields.len());
        let mut values = Vec::with_capacity(fields.len());
        for spec in fields.iter() {
            names.push(spec.name.clone());
            values.push(read_path(record, &spec.path));
        }
        Some((names, values))
    }

    /// Populate a record from an attribute map. Inverse of
    /// [`Mapper::struct_to_map`].
    ///
    /// Map keys with no resolved field are ignored; resolved fields with no
    /// map entry keep their current value; entries whose runtime type name
    /// differs from the field's declared type are skipped without error.
    pub fn map_to_struct(&self, map: &AttributeMap, dest: &mut dyn Record) -> Result<(), SchemaError> {
        let fields = self.cache.resolve(dest.descriptor())?;
        for spec in fields.iter() {
            if let Some(value) = map.get(&spec.name) {
                write_path(dest, spec, value.clone());
            }
        }
        Ok(())
    }

    /// Populate a record slice from a list of attribute maps, element-wise
    /// and in order.
    ///
    /// The destination is resized to exactly `maps.len()`: longer slices are
    /// truncated, shorter ones grow with default instances. The first
    /// per-element error aborts the remaining batch.
    pub fn maps_to_structs<R: Record + Default>(
        &self,
        maps: &[AttributeMap],
        dest: &mut Vec<R>,
    ) -> Result<(), SchemaError> {
        dest.truncate(maps.len());
        for (index, map) in maps.iter().enumerate() {
            if index == dest.len() {
                dest.push(R::default());
            }
            self.map_to_struct(map, &mut dest[index])?;
        }
        Ok(())
    }
}

/// Read the scalar at `path`, yielding `Null` once the traversal crosses an
/// absent optional reference.
fn read_path(root: &dyn Record, path: &[usize]) -> Value {
    let Some((last, intermediate)) = path.split_last() else {
        return Value::Null;
    };
    let mut current = root;
    for &index in intermediate {
        match current.nested(index) {
            Some(nested) => current = nested,
            None => return Value::Null,
        }
    }
    current.field(*last)
}

/// Walk `path` to the leaf, allocating absent intermediate references, and
/// assign `value` if its runtime type name matches the declared one.
///
/// Allocation happens during traversal even when the final type check skips
/// the write; the map entry's presence alone materializes the chain.
fn write_path(root: &mut dyn Record, spec: &FieldSpec, value: Value) {
    let Some((last, intermediate)) = spec.path.split_last() else {
        return;
    };
    let mut current = root;
    for &index in intermediate {
        match current.nested_mut(index) {
            Some(nested) => current = nested,
            None => return,
        }
    }
    if spec.type_name == value.type_name() {
        current.set_field(*last, value);
    }
}

// ──────────────────────────────────────────────
// Process-wide default mapper
// ──────────────────────────────────────────────

fn default_mapper() -> &'static Mapper {
    static DEFAULT: OnceLock<Mapper> = OnceLock::new();
    DEFAULT.get_or_init(Mapper::new)
}

/// [`Mapper::struct_to_map`] on the process-wide default mapper.
pub fn struct_to_map(value: &dyn ToRecord) -> Option<AttributeMap> {
    default_mapper().struct_to_map(value)
}

/// [`Mapper::fields_and_values`] on the process-wide default mapper.
pub fn fields_and_values(value: &dyn ToRecord) -> Option<(Vec<String>, Vec<Value>)> {
    default_mapper().fields_and_values(value)
}

/// [`Mapper::map_to_struct`] on the process-wide default mapper.
pub fn map_to_struct(map: &AttributeMap, dest: &mut dyn Record) -> Result<(), SchemaError> {
    default_mapper().map_to_struct(map, dest)
}

/// [`Mapper::maps_to_structs`] on the process-wide default mapper.
pub fn maps_to_structs<R: Record + Default>(
    maps: &[AttributeMap],
    dest: &mut Vec<R>,
) -> Result<(), SchemaError> {
    default_mapper().maps_to_structs(maps, dest)
}
