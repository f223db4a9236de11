use std::fs;
use std::path::Path;

use pantry_core::dependency::Dependency;
use pantry_core::identifier::RecipeIdentifier;
use pantry_core::version::{SemanticVersion, VersionRequirement};
use pantry_resolver::cache::CachedSource;
use pantry_resolver::source::{DirectorySource, DEFAULT_SOURCE_DIR};
use pantry_resolver::{Event, FetchError, RecipeSource, Resolver};
use pantry_util::hash::sha256_bytes;
use tempfile::TempDir;

const CONFIG: &str = r#"
name = "Boost Config"
url = "https://github.com/boostorg/config"

[versions."1.70.0"]
location = { git = { url = "https://github.com/boostorg/config.git", commit = "4f3e0d1" } }

[versions."1.71.0"]
location = { git = { url = "https://github.com/boostorg/config.git", commit = "9a1b2c3" } }
"#;

const CORE: &str = r#"
name = "Boost Core"
url = "https://github.com/boostorg/core"

[versions."1.71.0"]
location = { git = { url = "https://github.com/boostorg/core.git", commit = "d00d" } }

[versions."1.71.0".dependencies]
"boost/config" = ">=1.70"
"#;

fn id(s: &str) -> RecipeIdentifier {
    RecipeIdentifier::parse(s).unwrap()
}

fn write_recipe(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn recipe_paths_follow_source_layout() {
    let root = Path::new("/recipes");
    assert_eq!(
        DirectorySource::recipe_path(root, &id("boost/config")),
        root.join("default/boost/config.toml")
    );
    assert_eq!(
        DirectorySource::recipe_path(root, &id("github+boost/config")),
        root.join("github/boost/config.toml")
    );
}

#[tokio::test]
async fn fetch_reads_hashes_and_parses_recipe() {
    let tmp = TempDir::new().unwrap();
    write_recipe(tmp.path(), "default/boost/config.toml", CONFIG);
    let source = DirectorySource::new(tmp.path());

    let mut events = Vec::new();
    let recipe = source
        .fetch(&id("boost/config"))
        .observe(|e| events.push(e))
        .await
        .unwrap();
    assert_eq!(recipe.name, "Boost Config");
    assert_eq!(recipe.versions.len(), 2);

    let path = tmp.path().join("default/boost/config.toml");
    assert_eq!(
        events,
        vec![
            Event::Fetching {
                recipe: id("boost/config")
            },
            Event::FileRead {
                path: path.clone(),
                bytes: CONFIG.len() as u64
            },
            Event::FileHashed {
                path,
                sha256: sha256_bytes(CONFIG.as_bytes())
            },
        ]
    );
}

#[tokio::test]
async fn sourced_identifiers_use_their_source_directory() {
    let tmp = TempDir::new().unwrap();
    write_recipe(tmp.path(), "github/boost/config.toml", CONFIG);
    let source = DirectorySource::new(tmp.path());

    assert!(source.fetch(&id("github+boost/config")).result().await.is_ok());
    assert!(source.fetch(&id("boost/config")).result().await.is_err());
}

#[tokio::test]
async fn roots_are_searched_in_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_recipe(second.path(), "default/boost/config.toml", CONFIG);
    write_recipe(second.path(), "default/boost/core.toml", CORE);
    write_recipe(
        first.path(),
        "default/boost/core.toml",
        &CORE.replace("Boost Core", "Patched Core"),
    );

    let source = DirectorySource::with_roots([first.path(), second.path()]);
    assert_eq!(source.roots().len(), 2);

    let core = source.fetch(&id("boost/core")).result().await.unwrap();
    assert_eq!(core.name, "Patched Core");
    let config = source.fetch(&id("boost/config")).result().await.unwrap();
    assert_eq!(config.name, "Boost Config");
}

#[tokio::test]
async fn unknown_organization_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("nobody/nothing"))
        .result()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotFound { .. }));
}

#[tokio::test]
async fn missing_file_in_known_organization_is_reported_with_path() {
    let tmp = TempDir::new().unwrap();
    write_recipe(tmp.path(), "default/boost/config.toml", CONFIG);
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("boost/core"))
        .result()
        .await
        .unwrap_err();
    match err {
        FetchError::ManifestMissing { path, .. } => {
            assert_eq!(path, tmp.path().join("default/boost/core.toml"));
        }
        other => panic!("expected missing manifest, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_recipe_is_invalid() {
    let tmp = TempDir::new().unwrap();
    write_recipe(tmp.path(), "default/boost/config.toml", "name = [unterminated");
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("boost/config"))
        .result()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::ManifestInvalid { .. }));
}

#[tokio::test]
async fn malformed_pinned_hash_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let doc = r#"
name = "zlib"
url = "https://zlib.net"

[versions."1.3.1"]
location = { archive = { url = "https://zlib.net/zlib-1.3.1.tar.gz", sha256 = "not-a-hash" } }
"#;
    write_recipe(tmp.path(), "default/madler/zlib.toml", doc);
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("madler/zlib"))
        .result()
        .await
        .unwrap_err();
    match err {
        FetchError::ManifestInvalid { reason, .. } => assert!(reason.contains("not-a-hash")),
        other => panic!("expected invalid manifest, got {other:?}"),
    }
}

#[tokio::test]
async fn recipe_without_versions_has_no_releases() {
    let tmp = TempDir::new().unwrap();
    write_recipe(
        tmp.path(),
        "default/boost/config.toml",
        "name = \"Boost Config\"\nurl = \"https://github.com/boostorg/config\"\n",
    );
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("boost/config"))
        .result()
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NoReleases { .. }));
}

#[tokio::test]
async fn cached_source_serves_repeat_resolutions_from_memory() {
    let tmp = TempDir::new().unwrap();
    write_recipe(tmp.path(), "default/boost/config.toml", CONFIG);
    write_recipe(tmp.path(), "default/boost/core.toml", CORE);
    let resolver = Resolver::new(CachedSource::new(DirectorySource::new(tmp.path())));

    let dependencies = vec![
        Dependency::new(id("boost/core"), VersionRequirement::Any),
        Dependency::new(
            id("boost/config"),
            VersionRequirement::parse(">=1.70").unwrap(),
        ),
    ];

    let mut reads = 0;
    let first = resolver
        .resolve(dependencies.clone())
        .observe(|e| {
            if matches!(e, Event::FileRead { .. }) {
                reads += 1;
            }
        })
        .await
        .unwrap();
    assert_eq!(reads, 2);
    assert_eq!(
        first.get(&id("boost/config")).unwrap().version,
        SemanticVersion::new(1, 71, 0)
    );

    let mut events = Vec::new();
    let second = resolver
        .resolve(dependencies)
        .observe(|e| events.push(e))
        .await
        .unwrap();
    assert_eq!(second, first);
    assert!(!events.iter().any(|e| matches!(e, Event::FileRead { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, Event::CacheHit { .. }))
            .count(),
        2
    );
}

#[tokio::test]
async fn versions_spelled_twice_are_invalid() {
    let tmp = TempDir::new().unwrap();
    let doc = r#"
name = "Boost Config"
url = "https://github.com/boostorg/config"

[versions."1"]
location = { git = { url = "https://github.com/boostorg/config.git", commit = "first" } }

[versions."1.0.0"]
location = { git = { url = "https://github.com/boostorg/config.git", commit = "second" } }
"#;
    write_recipe(tmp.path(), "default/boost/config.toml", doc);
    let err = DirectorySource::new(tmp.path())
        .fetch(&id("boost/config"))
        .result()
        .await
        .unwrap_err();
    match err {
        FetchError::ManifestInvalid { reason, .. } => {
            assert!(reason.contains("duplicate key '1.0.0'"), "got: {reason}");
        }
        other => panic!("expected invalid manifest, got {other:?}"),
    }
}

#[test]
fn default_directory_belongs_to_unsourced_identifiers() {
    assert!(RecipeIdentifier::parse("default+boost/config").is_err());
    let root = Path::new("/recipes");
    assert_eq!(
        DirectorySource::recipe_path(root, &id("boost/config")),
        root.join(DEFAULT_SOURCE_DIR).join("boost/config.toml")
    );
}
