//! Operation: resolve all dependencies and regenerate pantry.lock.

use std::path::Path;

use pantry_core::config::GlobalConfig;
use pantry_core::lockfile::{Lockfile, LOCKFILE_NAME};
use pantry_resolver::Event;

use crate::ops_resolve;

/// Resolve from scratch and write `pantry.lock` next to the manifest.
pub async fn lock<F>(
    project_root: &Path,
    config: &GlobalConfig,
    on_event: F,
) -> miette::Result<Lockfile>
where
    F: FnMut(Event),
{
    let resolved = ops_resolve::resolve(project_root, config, on_event).await?;
    let lockfile = resolved.to_lockfile();
    let lockfile_path = project_root.join(LOCKFILE_NAME);
    lockfile.write_to(&lockfile_path)?;
    tracing::info!(
        "Wrote {} with {} recipes",
        lockfile_path.display(),
        lockfile.packages.len()
    );
    Ok(lockfile)
}
