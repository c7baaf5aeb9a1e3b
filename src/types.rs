//! Type mapping from schema fields to TypeScript, Swagger and class-validator
//!
//! Every field resolves to a [`FieldMapping`]: the TypeScript property type,
//! the Swagger type/format pair and the class-validator decorator to apply.

use crate::schema::{EnumInfo, FieldInfo};
use crate::GeneratorError;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// A class-validator decorator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Validator {
    /// `@IsBoolean`
    IsBoolean,
    /// `@IsDateString`
    IsDateString,
    /// `@IsEmail`
    IsEmail,
    /// `@IsEnum`
    IsEnum,
    /// `@IsInt`
    IsInt,
    /// `@IsNumber`
    IsNumber,
    /// `@IsObject`
    IsObject,
    /// `@IsString`
    IsString,
    /// `@IsUrl`
    IsUrl,
    /// `@IsUUID`
    IsUuid,
}

impl Validator {
    /// Decorator name as imported from class-validator
    pub fn as_str(&self) -> &'static str {
        match self {
            Validator::IsBoolean => "IsBoolean",
            Validator::IsDateString => "IsDateString",
            Validator::IsEmail => "IsEmail",
            Validator::IsEnum => "IsEnum",
            Validator::IsInt => "IsInt",
            Validator::IsNumber => "IsNumber",
            Validator::IsObject => "IsObject",
            Validator::IsString => "IsString",
            Validator::IsUrl => "IsUrl",
            Validator::IsUuid => "IsUUID",
        }
    }
}

impl fmt::Display for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options passed to a validator decorator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Validate each element of an array
    pub each: bool,
}

impl fmt::Display for ValidatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ each: {} }}", self.each)
    }
}

/// Swagger type used for JSON columns
pub const OBJECT_SWAGGER_TYPE: &str = "object";

/// Scalar type tag for JSON columns
pub const JSON_TYPE: &str = "Json";

/// Scalar type tag subject to name heuristics
const STRING_TYPE: &str = "String";

/// Static mapping for one scalar type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalarMapping {
    /// TypeScript type
    pub ts_type: &'static str,
    /// Swagger type
    pub swagger_type: &'static str,
    /// Swagger format hint
    pub swagger_format: Option<&'static str>,
    /// Base validator before heuristics
    pub validator: Validator,
}

const fn scalar(
    ts_type: &'static str,
    swagger_type: &'static str,
    swagger_format: Option<&'static str>,
    validator: Validator,
) -> ScalarMapping {
    ScalarMapping {
        ts_type,
        swagger_type,
        swagger_format,
        validator,
    }
}

/// Mapping for type tags missing from the scalar table
pub const FALLBACK_MAPPING: ScalarMapping = scalar("any", "string", None, Validator::IsString);

/// Scalar type tag lookup table
static SCALAR_TYPES: Lazy<HashMap<&'static str, ScalarMapping>> = Lazy::new(|| {
    HashMap::from([
        (STRING_TYPE, scalar("string", "string", None, Validator::IsString)),
        ("Int", scalar("number", "integer", Some("int32"), Validator::IsInt)),
        ("BigInt", scalar("string", "string", Some("bigint"), Validator::IsString)),
        ("Float", scalar("number", "number", Some("float"), Validator::IsNumber)),
        ("Decimal", scalar("string", "string", Some("decimal"), Validator::IsString)),
        ("Boolean", scalar("boolean", "boolean", None, Validator::IsBoolean)),
        ("DateTime", scalar("string", "string", Some("date-time"), Validator::IsDateString)),
        (
            JSON_TYPE,
            scalar(
                "Record<string, unknown>",
                OBJECT_SWAGGER_TYPE,
                Some("object"),
                Validator::IsObject,
            ),
        ),
        ("Bytes", scalar("string", "string", Some("byte"), Validator::IsString)),
    ])
});

/// Look up the static mapping for a scalar type tag
///
/// Total: unknown tags resolve to [`FALLBACK_MAPPING`].
pub fn map_scalar_type(tag: &str) -> &'static ScalarMapping {
    SCALAR_TYPES.get(tag).unwrap_or(&FALLBACK_MAPPING)
}

fn mentions_email(name: &str) -> bool {
    name.to_lowercase().contains("email")
}

fn mentions_url(name: &str) -> bool {
    name.to_lowercase().contains("url")
}

fn is_identifier(name: &str) -> bool {
    name == "id" || name.ends_with("Id")
}

/// Name-based validator overrides for `String` fields, first match wins
static STRING_HEURISTICS: &[(fn(&str) -> bool, Validator)] = &[
    (mentions_email, Validator::IsEmail),
    (mentions_url, Validator::IsUrl),
    (is_identifier, Validator::IsUuid),
];

/// Pick the validator for a `String` field from its name
pub fn string_validator(field_name: &str) -> Validator {
    STRING_HEURISTICS
        .iter()
        .find(|(matches, _)| matches(field_name))
        .map(|(_, validator)| *validator)
        .unwrap_or(Validator::IsString)
}

/// The resolved mapping for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping<'a> {
    /// TypeScript type, without array or null decoration
    pub ts_type: &'a str,
    /// Swagger type
    pub swagger_type: &'a str,
    /// Swagger format hint
    pub swagger_format: Option<&'a str>,
    /// Validator decorator
    pub validator: Validator,
    /// Validator options, set for arrays
    pub validator_options: Option<ValidatorOptions>,
    /// Field is a list
    pub is_array: bool,
    /// Field may be omitted
    pub is_optional: bool,
    /// Field may hold `null`
    pub is_nullable: bool,
    /// Referenced enum
    pub enum_name: Option<&'a str>,
    /// Values of the referenced enum
    pub enum_values: Option<&'a [String]>,
}

/// Maps fields against a fixed enum catalogue
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
    enums: HashMap<String, EnumInfo>,
    order: Vec<String>,
}

impl TypeMapper {
    /// Build a mapper over the given enum catalogue
    ///
    /// A repeated enum name keeps its first position and its last values.
    pub fn new(enums: Vec<EnumInfo>) -> Self {
        let mut mapper = TypeMapper::default();
        for info in enums {
            if !mapper.enums.contains_key(&info.name) {
                mapper.order.push(info.name.clone());
            }
            mapper.enums.insert(info.name.clone(), info);
        }
        mapper
    }

    /// Look up an enum in the catalogue
    pub fn get_enum(&self, name: &str) -> Option<&EnumInfo> {
        self.enums.get(name)
    }

    /// Enum names in catalogue order
    pub fn enum_names(&self) -> &[String] {
        &self.order
    }

    /// Whether the catalogue holds any enum
    pub fn has_enums(&self) -> bool {
        !self.order.is_empty()
    }

    /// Resolve the mapping for a field
    ///
    /// Fails only when the field references an enum that is not in the catalogue.
    pub fn map_field<'a>(
        &'a self,
        field: &'a FieldInfo,
    ) -> Result<FieldMapping<'a>, GeneratorError> {
        let mut mapping = match field.enum_name.as_deref() {
            Some(enum_name) => {
                let info = self
                    .enums
                    .get(enum_name)
                    .ok_or_else(|| GeneratorError::UnknownEnum(enum_name.to_string()))?;
                FieldMapping {
                    ts_type: enum_name,
                    swagger_type: enum_name,
                    swagger_format: None,
                    validator: Validator::IsEnum,
                    validator_options: None,
                    is_array: false,
                    is_optional: field.is_optional,
                    is_nullable: field.is_nullable,
                    enum_name: Some(enum_name),
                    enum_values: Some(&info.values),
                }
            }
            None => {
                let base = map_scalar_type(&field.field_type);
                let validator = if field.field_type == STRING_TYPE {
                    string_validator(&field.name)
                } else {
                    base.validator
                };
                FieldMapping {
                    ts_type: base.ts_type,
                    swagger_type: base.swagger_type,
                    swagger_format: base.swagger_format,
                    validator,
                    validator_options: None,
                    is_array: false,
                    is_optional: field.is_optional,
                    is_nullable: field.is_nullable,
                    enum_name: None,
                    enum_values: None,
                }
            }
        };

        mapping.is_array = field.is_array;
        if field.is_array {
            mapping.validator_options = Some(ValidatorOptions { each: true });
        }

        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: &str) -> FieldInfo {
        FieldInfo {
            name: name.to_string(),
            field_type: ty.to_string(),
            ..Default::default()
        }
    }

    fn role_enum() -> EnumInfo {
        EnumInfo {
            name: "UserRole".to_string(),
            values: vec!["ADMIN".into(), "USER".into(), "GUEST".into()],
        }
    }

    #[test]
    fn test_string_field() {
        let mapper = TypeMapper::default();
        let f = field("name", "String");
        let m = mapper.map_field(&f).unwrap();
        assert_eq!(m.ts_type, "string");
        assert_eq!(m.swagger_type, "string");
        assert_eq!(m.swagger_format, None);
        assert_eq!(m.validator, Validator::IsString);
        assert_eq!(m.validator_options, None);
        assert!(!m.is_array);
    }

    #[test]
    fn test_optional_and_nullable_copied() {
        let mapper = TypeMapper::default();
        let mut f = field("bio", "String");
        f.is_optional = true;
        f.is_nullable = true;
        let m = mapper.map_field(&f).unwrap();
        assert!(m.is_optional);
        assert!(m.is_nullable);
    }

    #[test]
    fn test_scalar_table() {
        let cases = [
            ("Int", "number", "integer", Some("int32"), Validator::IsInt),
            ("BigInt", "string", "string", Some("bigint"), Validator::IsString),
            ("Float", "number", "number", Some("float"), Validator::IsNumber),
            ("Decimal", "string", "string", Some("decimal"), Validator::IsString),
            ("Boolean", "boolean", "boolean", None, Validator::IsBoolean),
            ("DateTime", "string", "string", Some("date-time"), Validator::IsDateString),
            ("Json", "Record<string, unknown>", "object", Some("object"), Validator::IsObject),
            ("Bytes", "string", "string", Some("byte"), Validator::IsString),
        ];
        let mapper = TypeMapper::default();
        for (tag, ts, swagger, format, validator) in cases {
            let f = field("value", tag);
            let m = mapper.map_field(&f).unwrap();
            assert_eq!(m.ts_type, ts, "ts type for {}", tag);
            assert_eq!(m.swagger_type, swagger, "swagger type for {}", tag);
            assert_eq!(m.swagger_format, format, "format for {}", tag);
            assert_eq!(m.validator, validator, "validator for {}", tag);
        }
    }

    #[test]
    fn test_unknown_type_falls_back() {
        let mapper = TypeMapper::default();
        let f = field("geom", "Unsupported");
        let m = mapper.map_field(&f).unwrap();
        assert_eq!(m.ts_type, "any");
        assert_eq!(m.swagger_type, "string");
        assert_eq!(m.validator, Validator::IsString);
    }

    #[test]
    fn test_heuristics_only_apply_to_strings() {
        let mapper = TypeMapper::default();
        let f = field("authorId", "Int");
        assert_eq!(mapper.map_field(&f).unwrap().validator, Validator::IsInt);
        let f = field("emailCount", "BigInt");
        assert_eq!(mapper.map_field(&f).unwrap().validator, Validator::IsString);
    }

    #[test]
    fn test_string_heuristic_priority() {
        assert_eq!(string_validator("email"), Validator::IsEmail);
        assert_eq!(string_validator("contactEmail"), Validator::IsEmail);
        assert_eq!(string_validator("EMAIL_ADDRESS"), Validator::IsEmail);
        assert_eq!(string_validator("websiteUrl"), Validator::IsUrl);
        assert_eq!(string_validator("avatarURL"), Validator::IsUrl);
        assert_eq!(string_validator("id"), Validator::IsUuid);
        assert_eq!(string_validator("organizationId"), Validator::IsUuid);
        assert_eq!(string_validator("emailId"), Validator::IsEmail);
        assert_eq!(string_validator("urlId"), Validator::IsUrl);
        assert_eq!(string_validator("identity"), Validator::IsString);
        assert_eq!(string_validator("name"), Validator::IsString);
    }

    #[test]
    fn test_enum_field() {
        let mapper = TypeMapper::new(vec![role_enum()]);
        let mut f = field("role", "UserRole");
        f.enum_name = Some("UserRole".to_string());
        let m = mapper.map_field(&f).unwrap();
        assert_eq!(m.ts_type, "UserRole");
        assert_eq!(m.swagger_type, "UserRole");
        assert_eq!(m.validator, Validator::IsEnum);
        assert_eq!(m.enum_name, Some("UserRole"));
        assert_eq!(m.enum_values, Some(&role_enum().values[..]));
    }

    #[test]
    fn test_enum_values_come_from_catalogue() {
        let mapper = TypeMapper::new(vec![role_enum()]);
        let mut f = field("role", "UserRole");
        f.enum_name = Some("UserRole".to_string());
        f.enum_values = Some(vec!["STALE".to_string()]);
        let m = mapper.map_field(&f).unwrap();
        assert_eq!(m.enum_values.map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_unknown_enum_fails() {
        let mapper = TypeMapper::default();
        let mut f = field("status", "Status");
        f.enum_name = Some("UnknownEnum".to_string());
        let err = mapper.map_field(&f).unwrap_err();
        assert_eq!(err, GeneratorError::UnknownEnum("UnknownEnum".to_string()));
        assert_eq!(err.to_string(), "Enum UnknownEnum not found");
    }

    #[test]
    fn test_array_fields_validate_each() {
        let mapper = TypeMapper::new(vec![role_enum()]);

        let tags = [
            "String", "Int", "BigInt", "Float", "Decimal", "Boolean", "DateTime", "Json", "Bytes",
            "Unsupported",
        ];
        for tag in tags {
            let mut values = field("values", tag);
            values.is_array = true;
            let m = mapper.map_field(&values).unwrap();
            assert!(m.is_array, "is_array for {}", tag);
            assert_eq!(
                m.validator_options,
                Some(ValidatorOptions { each: true }),
                "validator options for {}",
                tag
            );
            assert_eq!(m.validator, map_scalar_type(tag).validator, "validator for {}", tag);
        }

        let mut websites = field("websiteUrls", "String");
        websites.is_array = true;
        let m = mapper.map_field(&websites).unwrap();
        assert_eq!(m.validator, Validator::IsUrl);
        assert_eq!(m.validator_options, Some(ValidatorOptions { each: true }));

        let mut roles = field("roles", "UserRole");
        roles.enum_name = Some("UserRole".to_string());
        roles.is_array = true;
        let m = mapper.map_field(&roles).unwrap();
        assert!(m.is_array);
        assert_eq!(m.validator, Validator::IsEnum);
        assert_eq!(m.validator_options, Some(ValidatorOptions { each: true }));
    }

    #[test]
    fn test_catalogue_order_and_duplicates() {
        let mapper = TypeMapper::new(vec![
            EnumInfo {
                name: "Status".to_string(),
                values: vec!["ACTIVE".into()],
            },
            role_enum(),
            EnumInfo {
                name: "Status".to_string(),
                values: vec!["ACTIVE".into(), "INACTIVE".into()],
            },
        ]);
        assert_eq!(mapper.enum_names(), &["Status".to_string(), "UserRole".to_string()]);
        assert_eq!(mapper.get_enum("Status").map(|e| e.values.len()), Some(2));
        assert!(mapper.has_enums());
        assert!(!TypeMapper::default().has_enums());
    }

    #[test]
    fn test_validator_options_display() {
        assert_eq!(ValidatorOptions { each: true }.to_string(), "{ each: true }");
        assert_eq!(Validator::IsUuid.to_string(), "IsUUID");
    }
}
