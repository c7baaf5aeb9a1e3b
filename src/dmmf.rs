//! Raw schema document types
//!
//! A minimal subset of the Prisma DMMF (data model meta format) as emitted by
//! the schema front end. Only the data model section is read; everything else
//! in the document is ignored during deserialization.

use serde::Deserialize;

/// Root schema document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// The data model section
    #[serde(default)]
    pub datamodel: Datamodel,
}

/// Models and enums declared in the schema
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Datamodel {
    /// Models in declaration order
    #[serde(default)]
    pub models: Vec<Model>,
    /// Enums in declaration order
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
}

/// A model declaration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    /// Model name
    pub name: String,
    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Kind of a model field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Built-in scalar (`String`, `Int`, ...)
    #[default]
    Scalar,
    /// Relation or composite type
    Object,
    /// Reference to a declared enum
    Enum,
    /// `Unsupported(...)` database type, or any kind this crate does not know
    #[serde(other)]
    Unsupported,
}

/// A field declaration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name
    pub name: String,
    /// Field kind
    #[serde(default)]
    pub kind: FieldKind,
    /// Scalar type tag, enum name or related model name
    #[serde(rename = "type")]
    pub field_type: String,
    /// Field is a list
    #[serde(default)]
    pub is_list: bool,
    /// Field is required
    #[serde(default)]
    pub is_required: bool,
    /// Field is the model's identity
    #[serde(default)]
    pub is_id: bool,
    /// Field carries `@updatedAt`
    #[serde(default)]
    pub is_updated_at: Option<bool>,
    /// Relation name for relation fields
    #[serde(default)]
    pub relation_name: Option<String>,
    /// Default value marker; the value itself is never inspected
    #[serde(default)]
    pub default: Option<serde_json::Value>,
}

/// An enum declaration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatamodelEnum {
    /// Enum name
    pub name: String,
    /// Values in declaration order
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

/// A single enum value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnumValue {
    /// Value name
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_field() {
        let field: Field = serde_json::from_value(json!({
            "name": "createdAt",
            "kind": "scalar",
            "type": "DateTime",
            "isList": false,
            "isRequired": true,
            "isId": false,
            "default": { "name": "now", "args": [] }
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Scalar);
        assert_eq!(field.field_type, "DateTime");
        assert!(field.is_required);
        assert!(field.default.is_some());
        assert_eq!(field.is_updated_at, None);
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let field: Field = serde_json::from_value(json!({
            "name": "geom",
            "kind": "somethingNew",
            "type": "geometry"
        }))
        .unwrap();
        assert_eq!(field.kind, FieldKind::Unsupported);
    }

    #[test]
    fn test_null_default_is_absent() {
        let field: Field = serde_json::from_value(json!({
            "name": "bio",
            "kind": "scalar",
            "type": "String",
            "default": null
        }))
        .unwrap();
        assert!(field.default.is_none());
    }

    #[test]
    fn test_extra_document_sections_ignored() {
        let doc: Document = serde_json::from_value(json!({
            "datamodel": { "models": [], "enums": [], "types": [] },
            "schema": { "inputObjectTypes": {} },
            "mappings": {}
        }))
        .unwrap();
        assert!(doc.datamodel.models.is_empty());
    }
}
