//! Field-name resolution: from a type descriptor to the ordered list of
//! externally-visible fields.
//!
//! Resolution walks nesting levels breadth-first. Fields declared directly on
//! the root type are emitted before anything reached through a flattened
//! nested record, and declaration order is preserved within each level. Name
//! collisions are settled by dominance, not by erroring: the first emission
//! wins, which under breadth-first order is the shallower entry, then the
//! earlier-declared one.

use std::collections::{HashSet, VecDeque};

use serde::Serialize;

use crate::descriptor::TypeDescriptor;
use crate::error::SchemaError;

/// One resolved, mapped field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// External key used in the attribute map.
    pub name: String,
    /// Field indices from the record root to the field, one hop per nested
    /// record traversed.
    pub path: Vec<usize>,
    /// Whether the field was discovered through flattening rather than
    /// declared directly on the root type.
    pub embedded: bool,
    /// Declared type name of the leaf field, compared against the runtime
    /// type name of an incoming value before assignment.
    pub type_name: &'static str,
}

/// Resolve the mapped fields of `descriptor` in external order.
///
/// Fails with [`SchemaError::NotARecord`] when the descriptor is not
/// record-shaped. Malformed markers never fail: a flatten marker on a field
/// with no nested record schema degrades to ordinary-field treatment.
pub fn resolve_fields(descriptor: &'static TypeDescriptor) -> Result<Vec<FieldSpec>, SchemaError> {
    if !descriptor.is_record() {
        return Err(SchemaError::NotARecord {
            type_name: descriptor.name(),
        });
    }

    let mut resolved: Vec<FieldSpec> = Vec::new();
    let mut taken: HashSet<String> = HashSet::new();

    // Worklist of (descriptor, key prefix, path prefix); the root enters with
    // both prefixes empty, flattened nested records enter one level deeper.
    let mut worklist: VecDeque<(&'static TypeDescriptor, String, Vec<usize>)> = VecDeque::new();
    worklist.push_back((descriptor, String::new(), Vec::new()));

    while let Some((current, prefix, base_path)) = worklist.pop_front() {
        let Some(fields) = current.fields() else {
            continue;
        };
        for (index, field) in fields.iter().enumerate() {
            if field.is_skipped() {
                continue;
            }

            let mut path = base_path.clone();
            path.push(index);

            if field.is_flattened() {
                if let Some(nested) = field.nested_descriptor() {
                    if nested.is_record() {
                        // The prefix composes from field identifiers, not key
                        // overrides; the override applies at its own level.
                        worklist.push_back((nested, format!("{}{}_", prefix, field.ident()), path));
                        continue;
                    }
                }
                // Flatten marker without a nested record schema: ordinary.
            }

            let name = format!("{}{}", prefix, field.key());
            if taken.insert(name.clone()) {
                resolved.push(FieldSpec {
                    name,
                    embedded: !base_path.is_empty(),
                    path,
                    type_name: field.type_name(),
                });
            }
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldDescriptor;
    use std::sync::OnceLock;

    struct Inner;
    struct Outer;
    struct Deep;
    struct Shadowing;

    fn inner_schema() -> &'static TypeDescriptor {
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            TypeDescriptor::record::<Inner>(
                "Inner",
                vec![
                    FieldDescriptor::new("Name", "Text"),
                    FieldDescriptor::new("Score", "Int").renamed("score"),
                ],
            )
        })
    }

    fn outer_schema() -> &'static TypeDescriptor {
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            TypeDescriptor::record::<Outer>(
                "Outer",
                vec![
                    FieldDescriptor::new("Id", "Text").renamed("id"),
                    FieldDescriptor::new("Secret", "Text").skipped(),
                    FieldDescriptor::new("Inner", "Inner").nested(inner_schema).flattened(),
                    FieldDescriptor::new("Note", "Text"),
                ],
            )
        })
    }

    // Deep -> Outer -> Inner, to exercise prefix and path composition across
    // two flattening levels.
    fn deep_schema() -> &'static TypeDescriptor {
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            TypeDescriptor::record::<Deep>(
                "Deep",
                vec![FieldDescriptor::new("Outer", "Outer").nested(outer_schema).flattened()],
            )
        })
    }

    fn shadowing_schema() -> &'static TypeDescriptor {
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            TypeDescriptor::record::<Shadowing>(
                "Shadowing",
                vec![
                    // Declared directly under the exact name the flattened
                    // field below would also produce.
                    FieldDescriptor::new("Inner_Name", "Int"),
                    FieldDescriptor::new("Inner", "Inner").nested(inner_schema).flattened(),
                ],
            )
        })
    }

    #[test]
    fn direct_fields_precede_flattened_in_declaration_order() {
        let fields = resolve_fields(outer_schema()).expect("record schema");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "Note", "Inner_Name", "Inner_score"]);
    }

    #[test]
    fn skipped_field_never_resolves() {
        let fields = resolve_fields(outer_schema()).expect("record schema");
        assert!(fields.iter().all(|f| f.name != "Secret"));
    }

    #[test]
    fn paths_traverse_nested_indices() {
        let fields = resolve_fields(outer_schema()).expect("record schema");
        let inner_name = fields.iter().find(|f| f.name == "Inner_Name").expect("flattened field");
        assert_eq!(inner_name.path, vec![2, 0]);
        assert!(inner_name.embedded);

        let id = fields.iter().find(|f| f.name == "id").expect("direct field");
        assert_eq!(id.path, vec![0]);
        assert!(!id.embedded);
    }

    #[test]
    fn two_level_flattening_composes_identifier_prefixes() {
        let fields = resolve_fields(deep_schema()).expect("record schema");
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        // Prefixes use field identifiers ("Outer", "Inner"), never overrides,
        // while the leaf keeps its own override ("id", "score").
        assert_eq!(
            names,
            vec!["Outer_id", "Outer_Note", "Outer_Inner_Name", "Outer_Inner_score"]
        );
        let deepest = fields.iter().find(|f| f.name == "Outer_Inner_score").expect("deep field");
        assert_eq!(deepest.path, vec![0, 2, 1]);
    }

    #[test]
    fn dominance_prefers_shallow_then_declaration_order() {
        let fields = resolve_fields(shadowing_schema()).expect("record schema");
        let hits: Vec<&FieldSpec> = fields.iter().filter(|f| f.name == "Inner_Name").collect();
        assert_eq!(hits.len(), 1, "colliding names must resolve to one entry");
        // The root-declared Int field wins over the flattened Text field.
        assert_eq!(hits[0].path, vec![0]);
        assert_eq!(hits[0].type_name, "Int");
        assert!(!hits[0].embedded);
        // The loser's sibling still resolves normally.
        assert!(fields.iter().any(|f| f.name == "Inner_score"));
    }

    #[test]
    fn flatten_marker_on_scalar_field_degrades_to_ordinary() {
        struct Sloppy;
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        let schema = SCHEMA.get_or_init(|| {
            TypeDescriptor::record::<Sloppy>(
                "Sloppy",
                vec![FieldDescriptor::new("Count", "Int").flattened()],
            )
        });
        let fields = resolve_fields(schema).expect("record schema");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "Count");
        assert_eq!(fields[0].path, vec![0]);
    }

    #[test]
    fn scalar_descriptor_is_rejected() {
        static SCHEMA: OnceLock<TypeDescriptor> = OnceLock::new();
        let schema = SCHEMA.get_or_init(|| TypeDescriptor::scalar::<u8>("Byte"));
        let err = resolve_fields(schema).expect_err("scalars must not resolve");
        assert_eq!(err.to_string(), "not a record type: Byte");
    }

    #[test]
    fn field_specs_serialize_for_schema_snapshots() {
        let fields = resolve_fields(outer_schema()).expect("record schema");
        let encoded = serde_json::to_value(&fields).expect("serializable specs");
        assert_eq!(encoded[0]["name"], "id");
        assert_eq!(encoded[2]["path"], serde_json::json!([2, 0]));
        assert_eq!(encoded[2]["embedded"], true);
    }

    #[test]
    fn repeated_resolution_is_stable() {
        let first = resolve_fields(outer_schema()).expect("record schema");
        let second = resolve_fields(outer_schema()).expect("record schema");
        assert_eq!(first, second);
    }
}
