//! Property generation for DTO classes
//!
//! This module generates the decorated TypeScript property for a field: the
//! `@ApiProperty`/`@ApiPropertyOptional` Swagger decorator, the
//! class-validator decorator and the property declaration itself.

use crate::schema::FieldInfo;
use crate::types::{FieldMapping, TypeMapper, OBJECT_SWAGGER_TYPE};
use crate::GeneratorError;

/// Swagger decorator for fields that must be present
pub const API_PROPERTY: &str = "ApiProperty";

/// Swagger decorator for fields that may be omitted or null
pub const API_PROPERTY_OPTIONAL: &str = "ApiPropertyOptional";

/// The pieces of a generated property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyParts {
    /// Decorator lines, outermost first
    pub decorators: Vec<String>,
    /// Property name, with `?` when omittable and not nullable
    pub name: String,
    /// TypeScript type
    pub ts_type: String,
}

impl PropertyParts {
    /// Render as class body lines indented by two spaces
    pub fn render(&self) -> String {
        let mut lines = self.decorators.clone();
        lines.push(format!("{}: {};", self.name, self.ts_type));
        lines.join("\n  ")
    }
}

/// Generate the decorated property for a field
pub fn generate_property(
    mapper: &TypeMapper,
    field: &FieldInfo,
    is_read_only: bool,
) -> Result<PropertyParts, GeneratorError> {
    let mapping = mapper.map_field(field)?;

    let swagger = swagger_options(&mapping, field, is_read_only);
    let decorator = if mapping.is_optional || mapping.is_nullable {
        API_PROPERTY_OPTIONAL
    } else {
        API_PROPERTY
    };

    let validator = match mapping.validator_options {
        Some(options) => format!("@{}({})", mapping.validator, options),
        None => format!("@{}()", mapping.validator),
    };

    Ok(PropertyParts {
        decorators: vec![
            format!("@{}({{ {} }})", decorator, swagger.join(", ")),
            validator,
        ],
        name: property_name(&mapping, &field.name),
        ts_type: ts_property_type(&mapping),
    })
}

/// Entries of the Swagger decorator's options object
pub fn swagger_options(
    mapping: &FieldMapping<'_>,
    field: &FieldInfo,
    is_read_only: bool,
) -> Vec<String> {
    let mut options = Vec::new();

    if mapping.is_array {
        match mapping.enum_name {
            Some(enum_name) => options.push(format!("type: {}", enum_name)),
            None => options.push(format!("type: '{}'", mapping.swagger_type)),
        }
        options.push("isArray: true".to_string());
    } else if let Some(enum_name) = mapping.enum_name {
        options.push(format!("enum: {}", enum_name));
        options.push(format!("enumName: '{}'", enum_name));
    } else {
        options.push(format!("type: '{}'", mapping.swagger_type));
        if let Some(format) = mapping.swagger_format {
            options.push(format!("format: '{}'", format));
        }
        if mapping.swagger_type == OBJECT_SWAGGER_TYPE {
            options.push("additionalProperties: true".to_string());
        }
    }

    if mapping.is_nullable {
        options.push("nullable: true".to_string());
    }

    if is_read_only || field.is_id || field.is_updated_at {
        options.push("readOnly: true".to_string());
    }

    options
}

/// TypeScript type of the property
///
/// Nullable fields always get the `| null` union, optional or not.
pub fn ts_property_type(mapping: &FieldMapping<'_>) -> String {
    let mut ts_type = mapping.ts_type.to_string();
    if mapping.is_array {
        ts_type.push_str("[]");
    }
    if mapping.is_nullable {
        ts_type.push_str(" | null");
    }
    ts_type
}

/// Property name, marked `?` only when optional and not nullable
///
/// An optional nullable field is rendered `name: T | null` without `?`.
pub fn property_name(mapping: &FieldMapping<'_>, field_name: &str) -> String {
    if mapping.is_optional && !mapping.is_nullable {
        format!("{}?", field_name)
    } else {
        field_name.to_string()
    }
}
