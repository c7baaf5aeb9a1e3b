//! Enums file generation

use crate::types::TypeMapper;
use tracing::warn;

/// Content of `enums.ts`, or `None` when the catalogue is empty
///
/// Every catalogue enum becomes a string enum whose members map to their own
/// names, in declaration order.
pub fn generate_enums_file(mapper: &TypeMapper) -> Option<String> {
    if !mapper.has_enums() {
        return None;
    }

    let definitions: Vec<String> = mapper
        .enum_names()
        .iter()
        .filter_map(|name| {
            let Some(info) = mapper.get_enum(name) else {
                warn!(enum_name = %name, "enum missing from catalogue, skipping");
                return None;
            };
            let members = info
                .values
                .iter()
                .map(|value| format!("  {} = '{}'", value, value))
                .collect::<Vec<_>>()
                .join(",\n");
            Some(format!("export enum {} {{\n{}\n}}", name, members))
        })
        .collect();

    Some(format!("{}\n", definitions.join("\n\n")))
}
