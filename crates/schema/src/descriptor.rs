//! Type and field descriptors: the registered schema of a record type.
//!
//! Descriptors are declared once per type, typically behind a `OnceLock` in
//! an inherent `schema()` function, and are never mutated afterwards. They
//! carry everything the resolver needs: field identifiers, key overrides,
//! exclusion and flatten markers, and references to nested record schemas.

use std::any::TypeId;

/// Shape of a described type: either a scalar leaf or a record with fields.
#[derive(Debug)]
pub enum Shape {
    Scalar,
    Record(Vec<FieldDescriptor>),
}

/// Identity and shape of a registered type.
///
/// `id` is the cache key for resolved field lists; two descriptors built for
/// the same Rust type share it, so re-registration cannot fork the cache.
#[derive(Debug)]
pub struct TypeDescriptor {
    name: &'static str,
    id: TypeId,
    shape: Shape,
}

impl TypeDescriptor {
    /// Describe a record-shaped type with the given fields, in declaration
    /// order.
    pub fn record<T: 'static>(name: &'static str, fields: Vec<FieldDescriptor>) -> TypeDescriptor {
        TypeDescriptor {
            name,
            id: TypeId::of::<T>(),
            shape: Shape::Record(fields),
        }
    }

    /// Describe a scalar (non-record) type. Resolving one is an error.
    pub fn scalar<T: 'static>(name: &'static str) -> TypeDescriptor {
        TypeDescriptor {
            name,
            id: TypeId::of::<T>(),
            shape: Shape::Scalar,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn is_record(&self) -> bool {
        matches!(self.shape, Shape::Record(_))
    }

    /// Fields in declaration order, or `None` for scalar shapes.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match &self.shape {
            Shape::Record(fields) => Some(fields),
            Shape::Scalar => None,
        }
    }
}

/// One declared field of a record type.
///
/// The marker surface mirrors the annotations a data-access layer reads off
/// its record declarations: a key override, an exclusion marker, and a
/// flatten marker for nested-record fields.
#[derive(Debug)]
pub struct FieldDescriptor {
    ident: &'static str,
    key: Option<&'static str>,
    skip: bool,
    flatten: bool,
    type_name: &'static str,
    nested: Option<fn() -> &'static TypeDescriptor>,
}

impl FieldDescriptor {
    /// A plain field: external key defaults to `ident`, declared type name
    /// used verbatim for assignment compatibility checks.
    pub fn new(ident: &'static str, type_name: &'static str) -> FieldDescriptor {
        FieldDescriptor {
            ident,
            key: None,
            skip: false,
            flatten: false,
            type_name,
            nested: None,
        }
    }

    /// Override the external key name.
    pub fn renamed(mut self, key: &'static str) -> FieldDescriptor {
        self.key = Some(key);
        self
    }

    /// Exclude the field from mapping entirely.
    pub fn skipped(mut self) -> FieldDescriptor {
        self.skip = true;
        self
    }

    /// Merge the nested record's fields into the parent's key namespace.
    /// Meaningful only together with [`FieldDescriptor::nested`]; on any
    /// other field the marker degrades to ordinary treatment.
    pub fn flattened(mut self) -> FieldDescriptor {
        self.flatten = true;
        self
    }

    /// Declare the field's value type as a nested record. The descriptor is
    /// referenced through a function pointer so mutually nested schemas can
    /// be registered without initialization cycles.
    pub fn nested(mut self, descriptor: fn() -> &'static TypeDescriptor) -> FieldDescriptor {
        self.nested = Some(descriptor);
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// External key name: the override when present, the identifier otherwise.
    pub fn key(&self) -> &'static str {
        self.key.unwrap_or(self.ident)
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub fn is_flattened(&self) -> bool {
        self.flatten
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The nested record's descriptor, if the field declared one.
    pub fn nested_descriptor(&self) -> Option<&'static TypeDescriptor> {
        self.nested.map(|f| f())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    #[test]
    fn key_falls_back_to_ident_without_override() {
        let field = FieldDescriptor::new("Timeline", "Text");
        assert_eq!(field.key(), "Timeline");
        assert_eq!(field.renamed("timeline").key(), "timeline");
    }

    #[test]
    fn scalar_descriptor_has_no_fields() {
        let descriptor = TypeDescriptor::scalar::<Probe>("Probe");
        assert!(!descriptor.is_record());
        assert!(descriptor.fields().is_none());
    }

    #[test]
    fn same_type_yields_same_id() {
        let a = TypeDescriptor::record::<Probe>("Probe", vec![]);
        let b = TypeDescriptor::record::<Probe>("Probe", vec![]);
        assert_eq!(a.id(), b.id());
    }
}
