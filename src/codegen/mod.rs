//! Code generation modules for NestJS DTOs
//!
//! This module contains the text emission logic for the generated
//! TypeScript: DTO classes, their decorated properties, the shared enums
//! file and barrel files.

pub mod barrel;
pub mod dto;
pub mod enums;
pub mod property;

use crate::domain::kebab_case;

/// File name of the shared enums module
pub const ENUMS_FILE_NAME: &str = "enums.ts";

/// Module specifier of the shared enums module, relative to the output root
pub const ENUMS_MODULE: &str = "enums";

/// File name of every barrel
pub const BARREL_FILE_NAME: &str = "index.ts";

/// The three DTO variants generated per model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtoKind {
    /// Input for creating a record
    Create,
    /// Partial input for updating a record
    Update,
    /// Output representation of a record
    Read,
}

impl DtoKind {
    /// All variants in emission order
    pub const ALL: [DtoKind; 3] = [DtoKind::Create, DtoKind::Update, DtoKind::Read];

    /// Class name for a model, e.g. `CreateUserDto`
    pub fn class_name(&self, model_name: &str) -> String {
        match self {
            DtoKind::Create => format!("Create{}Dto", model_name),
            DtoKind::Update => format!("Update{}Dto", model_name),
            DtoKind::Read => format!("{}Dto", model_name),
        }
    }

    /// Module specifier without extension, e.g. `create-user.dto`
    pub fn module_name(&self, model_name: &str) -> String {
        let prefix = match self {
            DtoKind::Create => "create",
            DtoKind::Update => "update",
            DtoKind::Read => "read",
        };
        format!("{}-{}.dto", prefix, kebab_case(model_name))
    }

    /// File name, e.g. `create-user.dto.ts`
    pub fn file_name(&self, model_name: &str) -> String {
        format!("{}.ts", self.module_name(model_name))
    }
}

/// Relative module specifier for a root-level module seen from `folder_path`
pub fn root_module_specifier(folder_path: Option<&str>, module: &str) -> String {
    let depth = folder_path
        .map(|p| p.split('/').filter(|s| !s.is_empty()).count())
        .unwrap_or(0);
    if depth == 0 {
        format!("./{}", module)
    } else {
        format!("{}{}", "../".repeat(depth), module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dto_names() {
        assert_eq!(DtoKind::Create.class_name("User"), "CreateUserDto");
        assert_eq!(DtoKind::Update.class_name("User"), "UpdateUserDto");
        assert_eq!(DtoKind::Read.class_name("User"), "UserDto");

        assert_eq!(DtoKind::Create.file_name("UserProfile"), "create-user-profile.dto.ts");
        assert_eq!(DtoKind::Update.file_name("UserProfile"), "update-user-profile.dto.ts");
        assert_eq!(DtoKind::Read.file_name("UserProfile"), "read-user-profile.dto.ts");
        assert_eq!(DtoKind::Create.module_name("User"), "create-user.dto");
        assert_eq!(DtoKind::Create.file_name("OAuthToken"), "create-oauth-token.dto.ts");
    }

    #[test]
    fn test_root_module_specifier() {
        assert_eq!(root_module_specifier(None, ENUMS_MODULE), "./enums");
        assert_eq!(root_module_specifier(Some(""), ENUMS_MODULE), "./enums");
        assert_eq!(
            root_module_specifier(Some("user-management/user"), ENUMS_MODULE),
            "../../enums"
        );
    }
}
