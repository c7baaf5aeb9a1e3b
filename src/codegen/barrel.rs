//! Barrel (`index.ts`) generation
//!
//! Flat layout gets a single root barrel exporting every DTO class. Domain
//! layout gets a tree: the root barrel re-exports each domain, each domain
//! barrel re-exports its subfolders and each subfolder barrel exports the
//! DTO classes of the models it holds.

use super::{DtoKind, ENUMS_MODULE};
use crate::domain::DomainMapper;
use std::collections::HashSet;

/// Models of one subfolder inside a domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfolderGroup {
    /// Subfolder name
    pub subfolder: String,
    /// Model names, sorted
    pub models: Vec<String>,
}

/// A domain holding at least one generated model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainGroup {
    /// Domain name
    pub domain: String,
    /// Subfolders in first-seen order
    pub subfolders: Vec<SubfolderGroup>,
}

/// Group the generated models by domain and subfolder
///
/// Domains without any generated model are left out.
pub fn group_by_domain(mapper: &DomainMapper, generated: &HashSet<&str>) -> Vec<DomainGroup> {
    let mut groups = Vec::new();

    for domain in mapper.get_all_domains() {
        let mut subfolders: Vec<SubfolderGroup> = Vec::new();

        for model_name in mapper.get_models_in_domain(&domain) {
            if !generated.contains(model_name.as_str()) {
                continue;
            }
            let Some(path) = mapper.get_domain_path(&model_name) else {
                continue;
            };
            match subfolders.iter_mut().find(|g| g.subfolder == path.subfolder) {
                Some(group) => group.models.push(model_name),
                None => subfolders.push(SubfolderGroup {
                    subfolder: path.subfolder,
                    models: vec![model_name],
                }),
            }
        }

        if !subfolders.is_empty() {
            groups.push(DomainGroup { domain, subfolders });
        }
    }

    groups
}

/// Named exports of a model's three DTO classes
pub fn model_exports(model_name: &str) -> Vec<String> {
    DtoKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "export {{ {} }} from './{}';",
                kind.class_name(model_name),
                kind.module_name(model_name)
            )
        })
        .collect()
}

fn star_export(module: &str) -> String {
    format!("export * from './{}';", module)
}

fn render(lines: Vec<String>) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Root barrel for the flat layout
pub fn generate_flat_barrel<'a>(
    model_names: impl IntoIterator<Item = &'a str>,
    has_enums: bool,
) -> String {
    let mut lines: Vec<String> = model_names.into_iter().flat_map(model_exports).collect();
    if has_enums {
        lines.push(star_export(ENUMS_MODULE));
    }
    render(lines)
}

/// Root barrel for the domain layout
///
/// `unbucketed` models live in the output root and are exported by name.
pub fn generate_domain_root_barrel<'a>(
    groups: &[DomainGroup],
    unbucketed: impl IntoIterator<Item = &'a str>,
    has_enums: bool,
) -> String {
    let mut lines: Vec<String> = groups.iter().map(|g| star_export(&g.domain)).collect();
    lines.extend(unbucketed.into_iter().flat_map(model_exports));
    if has_enums {
        lines.push(star_export(ENUMS_MODULE));
    }
    render(lines)
}

/// Barrel of one domain folder
pub fn generate_domain_barrel(group: &DomainGroup) -> String {
    render(
        group
            .subfolders
            .iter()
            .map(|s| star_export(&s.subfolder))
            .collect(),
    )
}

/// Barrel of one `domain/subfolder` folder
pub fn generate_subfolder_barrel(group: &SubfolderGroup) -> String {
    render(
        group
            .models
            .iter()
            .flat_map(|name| model_exports(name))
            .collect(),
    )
}
