//! Operation: add a dependency to pantry.toml.

use std::path::Path;

use pantry_core::dependency::Dependency;
use pantry_core::identifier::RecipeIdentifier;
use pantry_core::version::VersionRequirement;
use pantry_util::errors::PantryError;
use toml_edit::{value, DocumentMut, Item, Table};

/// Options for `pantry add`.
pub struct AddOptions {
    /// The recipe identifier: `org/recipe` or `source+org/recipe`.
    pub recipe: String,
    /// Version requirement text; `*` when absent.
    pub requirement: Option<String>,
}

/// Add or replace a dependency in `pantry.toml` using format-preserving edits.
pub fn add_dependency(manifest_path: &Path, opts: &AddOptions) -> miette::Result<Dependency> {
    let project = RecipeIdentifier::parse(&opts.recipe)?;
    let requirement = match opts.requirement.as_deref() {
        Some(text) => VersionRequirement::parse(text)?,
        None => VersionRequirement::Any,
    };

    let mut doc = read_document(manifest_path)?;
    ensure_table(&mut doc, "dependencies");
    doc["dependencies"][project.to_string().as_str()] = value(requirement.to_string());

    std::fs::write(manifest_path, doc.to_string()).map_err(PantryError::Io)?;
    Ok(Dependency::new(project, requirement))
}

pub(crate) fn read_document(manifest_path: &Path) -> miette::Result<DocumentMut> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| PantryError::Manifest {
        message: format!("Failed to read {}: {e}", manifest_path.display()),
    })?;
    content.parse().map_err(|e| {
        PantryError::Manifest {
            message: format!("Failed to parse pantry.toml: {e}"),
        }
        .into()
    })
}

fn ensure_table(doc: &mut DocumentMut, key: &str) {
    if !doc.as_table().contains_key(key) {
        doc.insert(key, Item::Table(Table::new()));
    }
}
