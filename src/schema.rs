//! Normalized schema representation
//!
//! The generator never works on the raw schema document directly. Every
//! model, field and enum is first turned into the uniform description below,
//! with nullability, optionality and enum/relation information resolved.

use crate::dmmf::{self, FieldKind};

/// Scalar type tag for booleans; booleans are never nullable
const BOOLEAN_TYPE: &str = "Boolean";

/// An enum and its values in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumInfo {
    /// Enum name
    pub name: String,
    /// Values in declaration order
    pub values: Vec<String>,
}

/// Cardinality of a relation field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationType {
    /// Single related record
    One,
    /// List of related records
    Many,
}

/// A normalized model field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Scalar type tag, enum name or related model name
    pub field_type: String,
    /// Field may be omitted
    pub is_optional: bool,
    /// Field may hold `null`
    pub is_nullable: bool,
    /// Field is a list
    pub is_array: bool,
    /// Field is maintained as the last-update timestamp
    pub is_updated_at: bool,
    /// Field has a default value in the schema
    pub has_default: bool,
    /// Field is the model's identity
    pub is_id: bool,
    /// Field is a relation to another model
    pub is_relation: bool,
    /// Relation name, for relation fields
    pub relation_name: Option<String>,
    /// Relation cardinality, for relation fields
    pub relation_type: Option<RelationType>,
    /// Referenced enum, for enum fields
    pub enum_name: Option<String>,
    /// Values of the referenced enum, when it was found in the catalogue
    pub enum_values: Option<Vec<String>>,
}

/// A normalized model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Model name
    pub name: String,
    /// Fields in declaration order
    pub fields: Vec<FieldInfo>,
    /// Distinct enums referenced by this model's fields, in first-use order
    pub enums: Vec<EnumInfo>,
}

/// The normalized schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Models in declaration order
    pub models: Vec<ModelInfo>,
    /// The enum catalogue in declaration order
    pub enums: Vec<EnumInfo>,
}

/// Normalize a raw schema document
pub fn normalize(document: &dmmf::Document) -> Schema {
    let enums: Vec<EnumInfo> = document
        .datamodel
        .enums
        .iter()
        .map(normalize_enum)
        .collect();

    let models = document
        .datamodel
        .models
        .iter()
        .map(|model| normalize_model(model, &enums))
        .collect();

    Schema { models, enums }
}

fn normalize_enum(raw: &dmmf::DatamodelEnum) -> EnumInfo {
    EnumInfo {
        name: raw.name.clone(),
        values: raw.values.iter().map(|v| v.name.clone()).collect(),
    }
}

fn normalize_model(raw: &dmmf::Model, enums: &[EnumInfo]) -> ModelInfo {
    let fields: Vec<FieldInfo> = raw
        .fields
        .iter()
        .map(|field| normalize_field(field, enums))
        .collect();

    let mut model_enums: Vec<EnumInfo> = Vec::new();
    for enum_name in fields.iter().filter_map(|f| f.enum_name.as_deref()) {
        if model_enums.iter().any(|e| e.name == enum_name) {
            continue;
        }
        if let Some(info) = find_enum(enums, enum_name) {
            model_enums.push(info.clone());
        }
    }

    ModelInfo {
        name: raw.name.clone(),
        fields,
        enums: model_enums,
    }
}

/// Normalize a single raw field against the already-normalized enums
pub fn normalize_field(raw: &dmmf::Field, enums: &[EnumInfo]) -> FieldInfo {
    let is_array = raw.is_list;
    let is_optional = !raw.is_required;
    let is_nullable =
        raw.kind == FieldKind::Scalar && raw.field_type != BOOLEAN_TYPE && is_optional;

    let mut field = FieldInfo {
        name: raw.name.clone(),
        field_type: raw.field_type.clone(),
        is_optional,
        is_nullable,
        is_array,
        is_updated_at: raw.is_updated_at.unwrap_or(false),
        has_default: raw.default.is_some(),
        is_id: raw.is_id,
        is_relation: raw.relation_name.is_some(),
        ..Default::default()
    };

    match raw.kind {
        FieldKind::Object => {
            field.relation_name = raw.relation_name.clone();
            field.relation_type = Some(if is_array {
                RelationType::Many
            } else {
                RelationType::One
            });
        }
        FieldKind::Enum => {
            // A dangling reference keeps `enum_values` empty; the type mapper rejects it
            field.enum_values = find_enum(enums, &raw.field_type).map(|e| e.values.clone());
            field.enum_name = Some(raw.field_type.clone());
        }
        FieldKind::Scalar | FieldKind::Unsupported => {}
    }

    field
}

fn find_enum<'a>(enums: &'a [EnumInfo], name: &str) -> Option<&'a EnumInfo> {
    enums.iter().find(|e| e.name == name)
}
