//! Handler for `pantry resolve`.

use miette::Result;

use pantry_core::lockfile::{Lockfile, LOCKFILE_NAME};
use pantry_ops::ops_resolve;
use pantry_util::progress;

pub async fn exec(verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;
    let config = super::load_config();

    let spinner = progress::spinner("Resolving dependencies");
    let outcome = ops_resolve::resolve(&project_root, &config, |event| {
        super::render_event(&spinner, &event, verbose)
    })
    .await;
    spinner.finish_and_clear();
    let resolved = outcome?;

    for (recipe, entry) in resolved.iter() {
        println!("{recipe} {}", entry.version);
    }

    let lockfile_path = project_root.join(LOCKFILE_NAME);
    if lockfile_path.is_file() {
        let lockfile = Lockfile::from_path(&lockfile_path)?;
        for drift in ops_resolve::lock_drift(&resolved, &lockfile) {
            match drift.locked {
                Some(locked) => progress::status_warn(
                    "Changed",
                    &format!("{} {locked} -> {}", drift.recipe, drift.resolved),
                ),
                None => progress::status_warn(
                    "Unlocked",
                    &format!("{} {}", drift.recipe, drift.resolved),
                ),
            }
        }
    } else {
        progress::status_info("Note", "no pantry.lock yet, run `pantry lock` to record this");
    }

    progress::status("Resolved", &format!("{} recipe(s)", resolved.len()));
    Ok(())
}
