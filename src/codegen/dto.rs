//! DTO class generation
//!
//! Each model yields three classes:
//! - `Create{Model}Dto`: writable fields only
//! - `Update{Model}Dto`: `PartialType` of the Create DTO
//! - `{Model}Dto`: every non-relation field, all marked read-only

use super::property::{generate_property, API_PROPERTY, API_PROPERTY_OPTIONAL};
use super::{root_module_specifier, DtoKind, ENUMS_MODULE};
use crate::schema::{FieldInfo, ModelInfo};
use crate::types::{TypeMapper, Validator, JSON_TYPE};
use crate::GeneratorError;
use std::collections::BTreeSet;

/// Fields left out of every Create DTO
pub const DEFAULT_CREATE_OMITS: [&str; 3] = ["id", "createdAt", "updatedAt"];

/// Fields of a Create DTO, in declaration order
pub fn fields_for_create<'a>(model: &'a ModelInfo, omitted: &[String]) -> Vec<&'a FieldInfo> {
    model
        .fields
        .iter()
        .filter(|field| {
            !DEFAULT_CREATE_OMITS.contains(&field.name.as_str())
                && !omitted.contains(&field.name)
                && !field.is_updated_at
                && !field.is_relation
        })
        .collect()
}

/// Fields of a Read DTO, in declaration order
pub fn fields_for_read<'a>(model: &'a ModelInfo, omitted: &[String]) -> Vec<&'a FieldInfo> {
    model
        .fields
        .iter()
        .filter(|field| !omitted.contains(&field.name) && !field.is_relation)
        .collect()
}

/// Import block for a class file
///
/// `folder_path` is where the file will live; the enums import is resolved
/// relative to it.
pub fn generate_imports(
    mapper: &TypeMapper,
    fields: &[&FieldInfo],
    folder_path: Option<&str>,
) -> Result<String, GeneratorError> {
    let mut validators: BTreeSet<&'static str> = BTreeSet::new();
    let mut enum_names: BTreeSet<&str> = BTreeSet::new();

    for field in fields {
        let mapping = mapper.map_field(field)?;
        validators.insert(mapping.validator.as_str());
        if let Some(enum_name) = mapping.enum_name {
            enum_names.insert(enum_name);
        }
    }

    if fields.iter().any(|f| f.field_type == JSON_TYPE) {
        validators.insert(Validator::IsObject.as_str());
    }

    let mut lines = vec![format!(
        "import {{ {}, {} }} from '@nestjs/swagger';",
        API_PROPERTY, API_PROPERTY_OPTIONAL
    )];

    if !validators.is_empty() {
        lines.push(format!(
            "import {{ {} }} from 'class-validator';",
            validators.into_iter().collect::<Vec<_>>().join(", ")
        ));
    }

    if !enum_names.is_empty() {
        lines.push(format!(
            "import {{ {} }} from '{}';",
            enum_names.into_iter().collect::<Vec<_>>().join(", "),
            root_module_specifier(folder_path, ENUMS_MODULE)
        ));
    }

    Ok(lines.join("\n"))
}

/// Render a class file from its fields
fn generate_class(
    mapper: &TypeMapper,
    class_name: &str,
    fields: &[&FieldInfo],
    is_read_only: bool,
    folder_path: Option<&str>,
) -> Result<String, GeneratorError> {
    let imports = generate_imports(mapper, fields, folder_path)?;

    let properties = fields
        .iter()
        .map(|field| generate_property(mapper, field, is_read_only).map(|p| p.render()))
        .collect::<Result<Vec<_>, _>>()?;

    if properties.is_empty() {
        return Ok(format!("{}\n\nexport class {} {{}}\n", imports, class_name));
    }

    Ok(format!(
        "{}\n\nexport class {} {{\n  {}\n}}\n",
        imports,
        class_name,
        properties.join("\n\n  ")
    ))
}

/// Content of `create-{model}.dto.ts`
pub fn generate_create_dto(
    mapper: &TypeMapper,
    model: &ModelInfo,
    omitted: &[String],
    folder_path: Option<&str>,
) -> Result<String, GeneratorError> {
    let fields = fields_for_create(model, omitted);
    generate_class(
        mapper,
        &DtoKind::Create.class_name(&model.name),
        &fields,
        false,
        folder_path,
    )
}

/// Content of `update-{model}.dto.ts`
pub fn generate_update_dto(model: &ModelInfo) -> String {
    let create_class = DtoKind::Create.class_name(&model.name);
    format!(
        "import {{ PartialType }} from '@nestjs/swagger';\n\
         import {{ {create} }} from './{module}';\n\
         \n\
         export class {update} extends PartialType({create}) {{}}\n",
        create = create_class,
        module = DtoKind::Create.module_name(&model.name),
        update = DtoKind::Update.class_name(&model.name),
    )
}

/// Content of `read-{model}.dto.ts`
pub fn generate_read_dto(
    mapper: &TypeMapper,
    model: &ModelInfo,
    omitted: &[String],
    folder_path: Option<&str>,
) -> Result<String, GeneratorError> {
    let fields = fields_for_read(model, omitted);
    generate_class(
        mapper,
        &DtoKind::Read.class_name(&model.name),
        &fields,
        true,
        folder_path,
    )
}
