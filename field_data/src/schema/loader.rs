//! Schema declarations authored as JSON
//!
//! ```json
//! {
//!   "enabled": { "type": "bool", "default": false },
//!   "count":   { "type": "int", "description": "retry count" }
//! }
//! ```

use std::io::Read;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{FieldDescriptor, SchemaStore};
use crate::decode::{Decoder, WeakDecoder};
use crate::error::SchemaError;
use crate::field_type::DeclaredType;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DescriptorDecl {
    #[serde(rename = "type")]
    declared:    DeclaredType,
    #[serde(default)]
    default:     Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

impl SchemaStore {
    /// Load a schema from JSON text
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] for malformed JSON or entries of the wrong shape, and
    /// [`SchemaError::InvalidDefault`] when a declared default does not coerce to its type.
    pub fn from_json_str(json: &str) -> Result<Self, SchemaError> {
        let decls: Map<String, Value> = serde_json::from_str(json)?;
        Self::from_declarations(decls)
    }

    /// Load a schema from an already-parsed JSON value
    ///
    /// # Errors
    ///
    /// See [`SchemaStore::from_json_str`].
    pub fn from_json_value(value: Value) -> Result<Self, SchemaError> {
        let decls: Map<String, Value> = serde_json::from_value(value)?;
        Self::from_declarations(decls)
    }

    /// Load a schema from a reader producing JSON
    ///
    /// # Errors
    ///
    /// See [`SchemaStore::from_json_str`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SchemaError> {
        let decls: Map<String, Value> = serde_json::from_reader(reader)?;
        Self::from_declarations(decls)
    }

    fn from_declarations(decls: Map<String, Value>) -> Result<Self, SchemaError> {
        let mut builder = Self::builder();
        for (name, decl) in decls {
            let decl: DescriptorDecl = serde_json::from_value(decl)?;
            let descriptor = resolve_descriptor(&name, decl)?;
            builder = builder.field(name, descriptor);
        }
        let schema = builder.build();
        tracing::debug!(fields = schema.len(), "loaded schema declaration");
        Ok(schema)
    }
}

fn resolve_descriptor(name: &str, decl: DescriptorDecl) -> Result<FieldDescriptor, SchemaError> {
    let default = match (decl.declared.known(), decl.default) {
        (_, None) => None,
        (Some(field_type), Some(raw)) => Some(WeakDecoder.decode(&raw, field_type).map_err(
            |source| SchemaError::InvalidDefault {
                field: name.to_string(),
                source,
            },
        )?),
        (None, Some(_)) => {
            tracing::warn!(
                field = name,
                type_tag = decl.declared.tag(),
                "ignoring default declared for unrecognized type"
            );
            None
        },
    };

    Ok(FieldDescriptor::from_parts(
        decl.declared,
        default,
        decl.description,
    ))
}
