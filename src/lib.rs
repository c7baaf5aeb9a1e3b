//! prisma-gen-nestjs-dto library
//!
//! This crate provides the code generation logic for converting a Prisma
//! schema document into NestJS data-transfer objects: Create/Update/Read
//! classes, a shared enums file and barrel (re-export) files.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod codegen;
pub mod dmmf;
pub mod domain;
pub mod generator;
pub mod options;
pub mod schema;
pub mod types;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use generator::{DtoFile, DtoGenerator};
pub use options::{GeneratorConfig, RawOption};

/// Errors that can occur during code generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// A field references an enum that is not in the enum catalogue
    #[error("Enum {0} not found")]
    UnknownEnum(String),

    /// Failed to decode the generation request
    #[error("Decode error: {0}")]
    Decode(String),
}

/// A generation request as handed over by the schema toolchain
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The parsed schema document
    pub dmmf: dmmf::Document,
    /// Raw generator options block
    #[serde(default)]
    pub config: HashMap<String, RawOption>,
}

/// The result of a generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateResponse {
    /// Generated virtual files
    pub files: Vec<DtoFile>,
    /// Error message when generation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Generate DTO files from a decoded request
///
/// This is the main entry point for the code generator.
pub fn generate(request: GenerateRequest) -> Result<GenerateResponse, GeneratorError> {
    let schema = schema::normalize(&request.dmmf);
    let config = GeneratorConfig::from_options(&request.config);

    let generator = DtoGenerator::new(config, schema.enums);
    let files = generator.generate_dtos(&schema.models)?;

    Ok(GenerateResponse { files, error: None })
}

/// Generate DTO files from raw JSON request bytes
pub fn generate_from_bytes(bytes: &[u8]) -> Result<GenerateResponse, GeneratorError> {
    let request: GenerateRequest =
        serde_json::from_slice(bytes).map_err(|e| GeneratorError::Decode(e.to_string()))?;
    generate(request)
}
