//! Operation: create a pantry.toml in an existing directory.

use std::path::{Path, PathBuf};

use pantry_core::manifest::MANIFEST_NAME;
use pantry_util::errors::PantryError;
use toml_edit::{value, DocumentMut, Item, Table};

/// Write a starter `pantry.toml` into `dir` and return its path.
///
/// The project name defaults to the directory name.
pub fn init(dir: &Path, name: Option<&str>) -> miette::Result<PathBuf> {
    let manifest_path = dir.join(MANIFEST_NAME);
    if manifest_path.exists() {
        return Err(PantryError::Manifest {
            message: format!("{} already exists", manifest_path.display()),
        }
        .into());
    }

    let name = match name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("project")
            .to_string(),
    };
    let mut doc = DocumentMut::new();
    doc["name"] = value(name);
    doc["dependencies"] = Item::Table(Table::new());
    std::fs::write(&manifest_path, doc.to_string()).map_err(PantryError::Io)?;
    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantry_core::manifest::Manifest;

    #[test]
    fn init_writes_parsable_manifest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = init(tmp.path(), Some("demo")).unwrap();
        let manifest = Manifest::from_path(&path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn init_defaults_name_to_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("widgets");
        std::fs::create_dir(&dir).unwrap();
        let path = init(&dir, None).unwrap();
        let manifest = Manifest::from_path(&path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("widgets"));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_NAME), "name = \"keep\"\n").unwrap();
        assert!(init(tmp.path(), None).is_err());
        let content = std::fs::read_to_string(tmp.path().join(MANIFEST_NAME)).unwrap();
        assert_eq!(content, "name = \"keep\"\n");
    }
}
