//! Handler for `pantry remove`.

use miette::Result;

use pantry_core::manifest::MANIFEST_NAME;
use pantry_ops::ops_remove;
use pantry_util::progress;

pub fn exec(recipe: &str) -> Result<()> {
    let manifest_path = super::project_root()?.join(MANIFEST_NAME);
    let removed = ops_remove::remove_dependency(&manifest_path, recipe)?;
    progress::status("Removed", &removed.to_string());
    Ok(())
}
