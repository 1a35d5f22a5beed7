//! Schema store: field name to descriptor
//!
//! A [`SchemaStore`] is built once (in code or from a JSON declaration) and then only read.
//! Many accessors can borrow the same store at the same time.

mod descriptor;
mod loader;

use std::collections::HashMap;

pub use descriptor::FieldDescriptor;

/// Immutable mapping from field name to [`FieldDescriptor`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaStore {
    fields: HashMap<String, FieldDescriptor>,
}

impl SchemaStore {
    /// Start building a schema
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Descriptor for `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Whether `name` is declared
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Number of declared fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate declared fields in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields
            .iter()
            .map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Declared field names, sorted
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for SchemaStore {
    fn from_iter<I: IntoIterator<Item = (K, FieldDescriptor)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, descriptor)| (name.into(), descriptor))
                .collect(),
        }
    }
}

/// Builder for [`SchemaStore`]. Declaring a name twice keeps the last descriptor.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: HashMap<String, FieldDescriptor>,
}

impl SchemaBuilder {
    /// Declare a field
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    /// Freeze the schema
    #[must_use]
    pub fn build(self) -> SchemaStore {
        SchemaStore {
            fields: self.fields,
        }
    }
}
