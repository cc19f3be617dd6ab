//! The record access capability: how the converter reads and writes fields.
//!
//! A `Record` pairs a registered [`TypeDescriptor`] with index-addressed
//! field access. Field indices are positions in the descriptor's declaration
//! order; resolved paths are sequences of such indices, traversing nested
//! records one hop per element.

use crate::descriptor::TypeDescriptor;
use crate::value::Value;

/// A fixed-shape value with named, typed fields.
///
/// Implementations register their schema once (an inherent `schema()`
/// returning `&'static TypeDescriptor` is the expected pattern) and expose
/// index-addressed access to it. The trait is object safe; the converter
/// works exclusively through `&dyn Record` / `&mut dyn Record`.
pub trait Record {
    /// The registered schema for this record type.
    fn descriptor(&self) -> &'static TypeDescriptor;

    /// Read the scalar value of the field at `index`.
    ///
    /// An absent optional scalar reads as [`Value::Null`]. Indices that
    /// address nested-record fields also read as `Null`: nested records
    /// reach the map only through flattening.
    fn field(&self, index: usize) -> Value;

    /// Write a scalar into the field at `index`.
    ///
    /// The converter only calls this after the declared and runtime type
    /// names matched exactly, so implementations may ignore values of any
    /// other variant.
    fn set_field(&mut self, index: usize, value: Value);

    /// Borrow the nested record at `index`, or `None` when the optional
    /// reference is absent or the index does not address a nested record.
    fn nested(&self, index: usize) -> Option<&dyn Record>;

    /// Mutably borrow the nested record at `index`, allocating a default
    /// instance into an absent optional reference so the location becomes
    /// writable. `None` when the index does not address a nested record.
    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Record>;
}

/// Probe for record-shaped input at an operation boundary.
///
/// The map-producing operations accept anything and signal "not a record"
/// with `None` instead of failing, so callers can hand them a record, an
/// optional reference to one, or a plain scalar alike. Record types
/// implement this with `Some(self)`; the provided impls cover optional
/// references (indirecting through the `Option`, with `Box` forwarding so
/// `Option<Box<T>>` composes) and common scalars.
pub trait ToRecord {
    fn as_record(&self) -> Option<&dyn Record>;
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn descriptor(&self) -> &'static TypeDescriptor {
        (**self).descriptor()
    }

    fn field(&self, index: usize) -> Value {
        (**self).field(index)
    }

    fn set_field(&mut self, index: usize, value: Value) {
        (**self).set_field(index, value)
    }

    fn nested(&self, index: usize) -> Option<&dyn Record> {
        (**self).nested(index)
    }

    fn nested_mut(&mut self, index: usize) -> Option<&mut dyn Record> {
        (**self).nested_mut(index)
    }
}

impl<T: Record> ToRecord for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().map(|r| r as &dyn Record)
    }
}

impl<T: ToRecord + ?Sized> ToRecord for &T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

macro_rules! not_a_record {
    ($($ty:ty),* $(,)?) => {
        $(impl ToRecord for $ty {
            fn as_record(&self) -> Option<&dyn Record> {
                None
            }
        })*
    };
}

not_a_record!(String, str, bool, i32, i64, u32, u64, f64);
