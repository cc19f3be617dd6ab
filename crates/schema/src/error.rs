/// All errors that schema resolution can return.
///
/// Deliberately small: malformed markers degrade to ordinary-field treatment
/// and type mismatches during assignment are a silent skip, so the only
/// genuine failure is handing the resolver something that is not a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The descriptor does not describe a record-shaped type.
    #[error("not a record type: {type_name}")]
    NotARecord { type_name: &'static str },
}
