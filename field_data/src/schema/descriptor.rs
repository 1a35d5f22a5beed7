//! Per-field type and default

use crate::field_type::{DeclaredType, FieldType};
use crate::value::FieldValue;

/// Declared type and default value of one schema field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    declared:    DeclaredType,
    default:     Option<FieldValue>,
    description: Option<String>,
}

impl FieldDescriptor {
    /// A field of `field_type` whose default is the type's zero value
    #[must_use]
    pub const fn new(field_type: FieldType) -> Self {
        Self {
            declared:    DeclaredType::Known(field_type),
            default:     None,
            description: None,
        }
    }

    /// A field whose type is taken from its default
    #[must_use]
    pub fn with_default(default: impl Into<FieldValue>) -> Self {
        let default = default.into();
        Self {
            declared:    DeclaredType::Known(default.field_type()),
            default:     Some(default),
            description: None,
        }
    }

    /// A field declared with a tag the accessor does not recognize
    #[must_use]
    pub fn unrecognized(tag: impl Into<String>) -> Self {
        Self {
            declared:    DeclaredType::Unrecognized(tag.into()),
            default:     None,
            description: None,
        }
    }

    /// Attach a human-readable description
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) const fn from_parts(
        declared: DeclaredType,
        default: Option<FieldValue>,
        description: Option<String>,
    ) -> Self {
        Self {
            declared,
            default,
            description,
        }
    }

    /// The type tag as declared
    #[must_use]
    pub const fn declared_type(&self) -> &DeclaredType {
        &self.declared
    }

    /// The recognized primitive, `None` for an unrecognized tag
    #[must_use]
    pub const fn field_type(&self) -> Option<FieldType> {
        self.declared.known()
    }

    /// The explicitly declared default, if any
    #[must_use]
    pub const fn default(&self) -> Option<&FieldValue> {
        self.default.as_ref()
    }

    /// Description, if one was attached
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The declared default, or the zero value of the declared type.
    ///
    /// `None` only when the type tag is unrecognized and no default was declared.
    #[must_use]
    pub fn default_or_zero(&self) -> Option<FieldValue> {
        self.default
            .clone()
            .or_else(|| self.field_type().map(FieldType::zero_value))
    }
}
