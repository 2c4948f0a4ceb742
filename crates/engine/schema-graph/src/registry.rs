use field_registry::{Schema, TypeDefinition};
use indexmap::IndexMap;

/// Where type references are looked up during traversal.
pub trait TypeRegistry {
    fn lookup_type(&self, identifier: &str) -> Option<&TypeDefinition>;

    /// All known identifiers, in declaration order.
    fn type_identifiers(&self) -> Vec<&str>;
}

impl TypeRegistry for Schema {
    fn lookup_type(&self, identifier: &str) -> Option<&TypeDefinition> {
        Schema::lookup_type(self, identifier)
    }

    fn type_identifiers(&self) -> Vec<&str> {
        self.type_map().keys().map(String::as_str).collect()
    }
}

impl TypeRegistry for IndexMap<String, TypeDefinition> {
    fn lookup_type(&self, identifier: &str) -> Option<&TypeDefinition> {
        self.get(identifier)
    }

    fn type_identifiers(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }
}
