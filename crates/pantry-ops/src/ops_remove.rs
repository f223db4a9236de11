//! Operation: remove a dependency from pantry.toml.

use std::path::Path;

use pantry_core::identifier::RecipeIdentifier;
use pantry_util::errors::PantryError;

use crate::ops_add::read_document;

/// Remove a dependency from `pantry.toml` using format-preserving edits.
pub fn remove_dependency(manifest_path: &Path, recipe: &str) -> miette::Result<RecipeIdentifier> {
    let project = RecipeIdentifier::parse(recipe)?;
    let mut doc = read_document(manifest_path)?;

    let removed = doc
        .get_mut("dependencies")
        .and_then(|item| item.as_table_like_mut())
        .and_then(|table| table.remove(&project.to_string()))
        .is_some();
    if !removed {
        return Err(PantryError::Generic {
            message: format!("Dependency '{project}' not found in pantry.toml"),
        }
        .into());
    }

    std::fs::write(manifest_path, doc.to_string()).map_err(PantryError::Io)?;
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_existing_dependency() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pantry.toml");
        std::fs::write(
            &path,
            "name = \"demo\"\n\n[dependencies]\n\"acme/a\" = \"*\"\n\"acme/b\" = \">=1.0.0\"\n",
        )
        .unwrap();

        let removed = remove_dependency(&path, "acme/a").unwrap();
        assert_eq!(removed.to_string(), "acme/a");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("acme/a"));
        assert!(content.contains("\"acme/b\" = \">=1.0.0\""));
    }

    #[test]
    fn remove_missing_dependency_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("pantry.toml");
        std::fs::write(&path, "name = \"demo\"\n").unwrap();
        assert!(remove_dependency(&path, "acme/a").is_err());
    }
}
