//! prisma-gen-nestjs-dto - A Prisma generator plugin for NestJS DTOs
//!
//! This binary reads a JSON generation request from stdin and writes a JSON
//! response listing the generated files to stdout. Writing the files to disk
//! is left to the host.

use prisma_gen_nestjs_dto::GenerateResponse;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    // stdout carries the response, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("prisma-gen-nestjs-dto: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;

    let response =
        prisma_gen_nestjs_dto::generate_from_bytes(&buf).unwrap_or_else(|e| GenerateResponse {
            error: Some(e.to_string()),
            ..Default::default()
        });

    tracing::debug!(files = response.files.len(), "generation finished");
    for f in &response.files {
        tracing::debug!(
            folder = f.folder_path.as_deref().unwrap_or("."),
            file = %f.file_name,
            "generated"
        );
    }
    if let Some(ref err) = response.error {
        tracing::error!("{}", err);
    }

    let out = serde_json::to_vec(&response)?;
    io::stdout().write_all(&out)?;

    Ok(())
}
