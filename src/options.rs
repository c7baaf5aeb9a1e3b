//! Generator options parsing
//!
//! The schema toolchain hands every generator its options block as a map of
//! strings (or lists of strings). Record-valued options such as
//! `domainMapping` arrive JSON-encoded. Malformed values never abort
//! generation: the option falls back to its default and a warning is logged.
//!
//! Several options are accepted and validated but not yet acted on by the
//! generator (`relations`, `dateStrategy`, `jsonType`, `fileNaming`,
//! `heuristics`, `readDtoInclude`, `clean`).

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// A raw option value as passed by the host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawOption {
    /// Single string value
    Single(String),
    /// Repeated option; only the first value is used
    List(Vec<String>),
}

impl RawOption {
    /// The effective string value
    pub fn value(&self) -> Option<&str> {
        match self {
            RawOption::Single(s) => Some(s),
            RawOption::List(values) => values.first().map(String::as_str),
        }
    }
}

impl From<&str> for RawOption {
    fn from(s: &str) -> Self {
        RawOption::Single(s.to_string())
    }
}

/// How relation fields are represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationStrategy {
    /// Leave relations out
    Omit,
    /// Reference related records by id
    #[default]
    Ids,
    /// Embed related DTOs
    Nested,
}

impl RelationStrategy {
    /// Parse strategy from string option
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "omit" => Some(RelationStrategy::Omit),
            "ids" => Some(RelationStrategy::Ids),
            "nested" => Some(RelationStrategy::Nested),
            _ => None,
        }
    }
}

/// How date-time fields are typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DateStrategy {
    /// ISO-8601 strings
    #[default]
    #[serde(rename = "iso-string")]
    IsoString,
    /// `Date` objects
    #[serde(rename = "date")]
    Date,
}

impl DateStrategy {
    /// Parse strategy from string option
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "iso-string" => Some(DateStrategy::IsoString),
            "date" => Some(DateStrategy::Date),
            _ => None,
        }
    }
}

/// File name casing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileNaming {
    /// `create-user-profile.dto.ts`
    #[default]
    Kebab,
    /// `createUserProfile.dto.ts`
    Camel,
    /// `CreateUserProfile.dto.ts`
    Pascal,
}

impl FileNaming {
    /// Parse naming from string option
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kebab" => Some(FileNaming::Kebab),
            "camel" => Some(FileNaming::Camel),
            "pascal" => Some(FileNaming::Pascal),
            _ => None,
        }
    }
}

/// Output folder layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderStructure {
    /// All files in the output root
    #[default]
    Flat,
    /// Files bucketed into `domain/subfolder` folders
    Domain,
}

impl FolderStructure {
    /// Parse layout from string option
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flat" => Some(FolderStructure::Flat),
            "domain" => Some(FolderStructure::Domain),
            _ => None,
        }
    }
}

/// Default TypeScript spelling for JSON columns
pub const DEFAULT_JSON_TYPE: &str = "Record<string, unknown>";

fn default_json_type() -> String {
    DEFAULT_JSON_TYPE.to_string()
}

fn default_true() -> bool {
    true
}

/// Generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Emit barrel (`index.ts`) files
    #[serde(default = "default_true")]
    pub emit_barrel: bool,
    /// Relation handling
    #[serde(default)]
    pub relations: RelationStrategy,
    /// Date-time typing
    #[serde(default)]
    pub date_strategy: DateStrategy,
    /// TypeScript spelling for JSON columns
    #[serde(default = "default_json_type")]
    pub json_type: String,
    /// File name casing
    #[serde(default)]
    pub file_naming: FileNaming,
    /// Name-based validator heuristics
    #[serde(default = "default_true")]
    pub heuristics: bool,
    /// Output folder layout
    #[serde(default)]
    pub folder_structure: FolderStructure,
    /// Model name to `domain/subfolder`
    #[serde(default)]
    pub domain_mapping: Option<BTreeMap<String, String>>,
    /// Model name to extra fields left out of Create and Read DTOs
    #[serde(default)]
    pub omit_fields: Option<HashMap<String, Vec<String>>>,
    /// Model name to extra fields for Read DTOs
    #[serde(default)]
    pub read_dto_include: Option<HashMap<String, Vec<String>>>,
    /// Clear the output directory before writing
    #[serde(default)]
    pub clean: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            emit_barrel: true,
            relations: RelationStrategy::default(),
            date_strategy: DateStrategy::default(),
            json_type: default_json_type(),
            file_naming: FileNaming::default(),
            heuristics: true,
            folder_structure: FolderStructure::default(),
            domain_mapping: None,
            omit_fields: None,
            read_dto_include: None,
            clean: false,
        }
    }
}

impl GeneratorConfig {
    /// Parse the host's raw options block
    ///
    /// Unknown keys are ignored. Invalid values keep the default.
    pub fn from_options(raw: &HashMap<String, RawOption>) -> Self {
        let mut config = GeneratorConfig::default();
        let get = |key: &str| raw.get(key).and_then(RawOption::value);

        if let Some(v) = get("emitBarrel") {
            config.emit_barrel = parse_bool_option("emitBarrel", v, config.emit_barrel);
        }
        if let Some(v) = get("heuristics") {
            config.heuristics = parse_bool_option("heuristics", v, config.heuristics);
        }
        if let Some(v) = get("clean") {
            config.clean = parse_bool_option("clean", v, config.clean);
        }

        if let Some(v) = get("relations") {
            config.relations = parse_enum_option("relations", v, RelationStrategy::parse)
                .unwrap_or(config.relations);
        }
        if let Some(v) = get("dateStrategy") {
            config.date_strategy = parse_enum_option("dateStrategy", v, DateStrategy::parse)
                .unwrap_or(config.date_strategy);
        }
        if let Some(v) = get("fileNaming") {
            config.file_naming =
                parse_enum_option("fileNaming", v, FileNaming::parse).unwrap_or(config.file_naming);
        }
        if let Some(v) = get("folderStructure") {
            config.folder_structure =
                parse_enum_option("folderStructure", v, FolderStructure::parse)
                    .unwrap_or(config.folder_structure);
        }
        if let Some(v) = get("jsonType") {
            if !v.is_empty() {
                config.json_type = v.to_string();
            }
        }

        if let Some(v) = get("omitFields") {
            config.omit_fields = parse_json_option("omitFields", v);
        }
        if let Some(v) = get("readDtoInclude") {
            config.read_dto_include = parse_json_option("readDtoInclude", v);
        }
        if let Some(v) = get("domainMapping") {
            config.domain_mapping = parse_json_option("domainMapping", v);
        }

        config
    }

    /// Fields configured to be left out for a model
    pub fn omitted_fields(&self, model_name: &str) -> &[String] {
        self.omit_fields
            .as_ref()
            .and_then(|m| m.get(model_name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Parse a boolean option, keeping `default` for anything but `true`/`false`
fn parse_bool_option(key: &str, value: &str, default: bool) -> bool {
    match value.trim() {
        "true" => true,
        "false" => false,
        other => {
            warn!(option = key, value = other, "expected `true` or `false`, using default");
            default
        }
    }
}

/// Parse an enumerated option, warning on unknown spellings
fn parse_enum_option<T>(key: &str, value: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(value.trim());
    if parsed.is_none() {
        warn!(option = key, value, "unrecognized value, using default");
    }
    parsed
}

/// Parse a JSON-encoded option, warning on malformed input
fn parse_json_option<T: DeserializeOwned>(key: &str, value: &str) -> Option<T> {
    match serde_json::from_str(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(option = key, error = %e, "failed to parse option");
            None
        }
    }
}
