//! DTO generation orchestration
//!
//! Ties the type mapper, the domain mapper and the codegen modules together
//! and assembles the ordered list of virtual output files: the enums file,
//! then Create/Update/Read per model in input order, then domain barrels,
//! then the root barrel.

use crate::codegen::{barrel, dto, enums, DtoKind, BARREL_FILE_NAME, ENUMS_FILE_NAME};
use crate::domain::DomainMapper;
use crate::options::{FolderStructure, GeneratorConfig};
use crate::schema::{EnumInfo, ModelInfo};
use crate::types::TypeMapper;
use crate::GeneratorError;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// A generated file, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DtoFile {
    /// File name
    pub file_name: String,
    /// File content
    pub content: String,
    /// Folder relative to the output root; `None` for the root itself
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_path: Option<String>,
}

impl DtoFile {
    fn new(file_name: impl Into<String>, content: String, folder_path: Option<String>) -> Self {
        DtoFile {
            file_name: file_name.into(),
            content,
            folder_path,
        }
    }
}

/// Generates DTO files for a fixed configuration and enum catalogue
#[derive(Debug, Clone)]
pub struct DtoGenerator {
    config: GeneratorConfig,
    type_mapper: TypeMapper,
    domain_mapper: DomainMapper,
}

impl DtoGenerator {
    /// Create a generator
    pub fn new(config: GeneratorConfig, enums: Vec<EnumInfo>) -> Self {
        let domain_mapper = DomainMapper::new(config.domain_mapping.as_ref());
        DtoGenerator {
            config,
            type_mapper: TypeMapper::new(enums),
            domain_mapper,
        }
    }

    /// The active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate every output file for `models`
    ///
    /// Fails if a field references an enum missing from the catalogue.
    pub fn generate_dtos(&self, models: &[ModelInfo]) -> Result<Vec<DtoFile>, GeneratorError> {
        let mut files = Vec::new();

        if let Some(content) = enums::generate_enums_file(&self.type_mapper) {
            files.push(DtoFile::new(ENUMS_FILE_NAME, content, None));
        }

        for model in models {
            files.extend(self.generate_model_files(model)?);
        }

        if self.config.emit_barrel {
            files.extend(self.generate_barrels(models));
        }

        debug!(models = models.len(), files = files.len(), "generated DTO files");
        Ok(files)
    }

    /// Create, Update and Read files for one model
    fn generate_model_files(&self, model: &ModelInfo) -> Result<[DtoFile; 3], GeneratorError> {
        let folder_path = self.folder_path(&model.name);
        let omitted = self.config.omitted_fields(&model.name);

        let create = dto::generate_create_dto(
            &self.type_mapper,
            model,
            omitted,
            folder_path.as_deref(),
        )?;
        let update = dto::generate_update_dto(model);
        let read =
            dto::generate_read_dto(&self.type_mapper, model, omitted, folder_path.as_deref())?;

        Ok([
            DtoFile::new(
                DtoKind::Create.file_name(&model.name),
                create,
                folder_path.clone(),
            ),
            DtoFile::new(
                DtoKind::Update.file_name(&model.name),
                update,
                folder_path.clone(),
            ),
            DtoFile::new(DtoKind::Read.file_name(&model.name), read, folder_path),
        ])
    }

    /// Folder for a model's files; `None` in the flat layout or when unmapped
    pub fn folder_path(&self, model_name: &str) -> Option<String> {
        match self.config.folder_structure {
            FolderStructure::Flat => None,
            FolderStructure::Domain => self
                .domain_mapper
                .get_domain_path(model_name)
                .map(|path| path.folder_path()),
        }
    }

    fn generate_barrels(&self, models: &[ModelInfo]) -> Vec<DtoFile> {
        let has_enums = self.type_mapper.has_enums();
        let model_names = models.iter().map(|m| m.name.as_str());

        if self.config.folder_structure == FolderStructure::Flat {
            let content = barrel::generate_flat_barrel(model_names, has_enums);
            return vec![DtoFile::new(BARREL_FILE_NAME, content, None)];
        }

        let generated: HashSet<&str> = model_names.clone().collect();
        let groups = barrel::group_by_domain(&self.domain_mapper, &generated);

        let mut files = Vec::new();
        for group in &groups {
            files.push(DtoFile::new(
                BARREL_FILE_NAME,
                barrel::generate_domain_barrel(group),
                Some(group.domain.clone()),
            ));
            for subfolder in &group.subfolders {
                files.push(DtoFile::new(
                    BARREL_FILE_NAME,
                    barrel::generate_subfolder_barrel(subfolder),
                    Some(format!("{}/{}", group.domain, subfolder.subfolder)),
                ));
            }
        }

        let mut seen = HashSet::new();
        let unbucketed = model_names.filter(|name| {
            self.domain_mapper.get_domain_path(name).is_none() && seen.insert(*name)
        });
        let content = barrel::generate_domain_root_barrel(&groups, unbucketed, has_enums);
        files.push(DtoFile::new(BARREL_FILE_NAME, content, None));

        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn user_model() -> ModelInfo {
        ModelInfo {
            name: "User".to_string(),
            fields: vec![crate::schema::FieldInfo {
                name: "name".to_string(),
                field_type: "String".to_string(),
                ..Default::default()
            }],
            enums: vec![],
        }
    }

    fn domain_config(entries: &[(&str, &str)]) -> GeneratorConfig {
        GeneratorConfig {
            folder_structure: FolderStructure::Domain,
            domain_mapping: Some(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_output_order() {
        let generator = DtoGenerator::new(
            GeneratorConfig::default(),
            vec![EnumInfo {
                name: "UserRole".to_string(),
                values: vec!["ADMIN".into()],
            }],
        );
        let files = generator.generate_dtos(&[user_model()]).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "enums.ts",
                "create-user.dto.ts",
                "update-user.dto.ts",
                "read-user.dto.ts",
                "index.ts"
            ]
        );
        assert!(files.iter().all(|f| f.folder_path.is_none()));
    }

    #[test]
    fn test_barrel_disabled() {
        let config = GeneratorConfig {
            emit_barrel: false,
            ..domain_config(&[("User", "users/user")])
        };
        let files = DtoGenerator::new(config, vec![])
            .generate_dtos(&[user_model()])
            .unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.file_name != "index.ts"));
    }

    #[test]
    fn test_folder_path() {
        let generator = DtoGenerator::new(domain_config(&[("User", "users/user")]), vec![]);
        assert_eq!(generator.folder_path("User").as_deref(), Some("users/user"));
        assert_eq!(generator.folder_path("Post"), None);

        let flat = GeneratorConfig {
            folder_structure: FolderStructure::Flat,
            ..domain_config(&[("User", "users/user")])
        };
        assert_eq!(DtoGenerator::new(flat, vec![]).folder_path("User"), None);
    }

    #[test]
    fn test_domain_output_order() {
        let generator = DtoGenerator::new(domain_config(&[("User", "users/user")]), vec![]);
        let files = generator.generate_dtos(&[user_model()]).unwrap();
        let paths: Vec<(Option<&str>, &str)> = files
            .iter()
            .map(|f| (f.folder_path.as_deref(), f.file_name.as_str()))
            .collect();
        assert_eq!(
            paths,
            vec![
                (Some("users/user"), "create-user.dto.ts"),
                (Some("users/user"), "update-user.dto.ts"),
                (Some("users/user"), "read-user.dto.ts"),
                (Some("users"), "index.ts"),
                (Some("users/user"), "index.ts"),
                (None, "index.ts"),
            ]
        );
    }

    #[test]
    fn test_dto_file_serialization() {
        let file = DtoFile::new("index.ts", "export {};\n".to_string(), None);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "fileName": "index.ts", "content": "export {};\n" })
        );
    }
}
