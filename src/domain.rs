//! Domain folder mapping
//!
//! Assigns models to `domain/subfolder` buckets for the domain folder layout.
//! There are no built-in buckets: only models named in the user-supplied
//! mapping are bucketed, everything else stays at the output root.

use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// A configured bucket, before the subfolder default is applied
#[derive(Debug, Clone, PartialEq, Eq)]
struct DomainEntry {
    domain: String,
    subfolder: Option<String>,
}

/// The resolved bucket of a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainPath {
    /// Top-level domain folder
    pub domain: String,
    /// Subfolder inside the domain
    pub subfolder: String,
}

impl DomainPath {
    /// Folder path relative to the output root
    pub fn folder_path(&self) -> String {
        format!("{}/{}", self.domain, self.subfolder)
    }
}

/// Lookup table from model name to domain bucket
#[derive(Debug, Clone, Default)]
pub struct DomainMapper {
    mapping: BTreeMap<String, DomainEntry>,
}

impl DomainMapper {
    /// Build the mapper from `model name -> "domain/subfolder"` entries
    ///
    /// Entries without a domain segment are dropped with a warning.
    pub fn new(custom: Option<&BTreeMap<String, String>>) -> Self {
        let mut mapping = BTreeMap::new();

        for (model_name, domain_path) in custom.into_iter().flatten() {
            let mut segments = domain_path.split('/');
            let domain = segments.next().unwrap_or_default();
            if domain.is_empty() {
                warn!(
                    model = %model_name,
                    path = %domain_path,
                    "ignoring domain mapping without a domain segment"
                );
                continue;
            }
            let subfolder = segments
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string);

            mapping.insert(
                model_name.clone(),
                DomainEntry {
                    domain: domain.to_string(),
                    subfolder,
                },
            );
        }

        DomainMapper { mapping }
    }

    /// Resolve the bucket for a model, if it has one
    ///
    /// The subfolder defaults to the kebab-case model name.
    pub fn get_domain_path(&self, model_name: &str) -> Option<DomainPath> {
        self.mapping.get(model_name).map(|entry| DomainPath {
            domain: entry.domain.clone(),
            subfolder: entry
                .subfolder
                .clone()
                .unwrap_or_else(|| kebab_case(model_name)),
        })
    }

    /// Distinct domain names, sorted
    pub fn get_all_domains(&self) -> Vec<String> {
        self.mapping
            .values()
            .map(|entry| entry.domain.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Model names mapped into a domain, sorted
    pub fn get_models_in_domain(&self, domain: &str) -> Vec<String> {
        self.mapping
            .iter()
            .filter(|(_, entry)| entry.domain == domain)
            .map(|(model_name, _)| model_name.clone())
            .collect()
    }
}

/// Convert a model name to kebab-case
///
/// A hyphen goes at every lowercase-to-uppercase boundary and in place of
/// whitespace runs, then everything is lowercased: `UserProfile` becomes
/// `user-profile`.
pub fn kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    let mut in_space = false;

    for c in s.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            prev_lower = false;
            continue;
        }
        in_space = false;

        if c.is_ascii_uppercase() && prev_lower {
            out.push('-');
        }
        prev_lower = c.is_ascii_lowercase();
        out.extend(c.to_lowercase());
    }

    out
}
