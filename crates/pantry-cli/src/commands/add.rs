//! Handler for `pantry add`.

use miette::Result;

use pantry_core::manifest::MANIFEST_NAME;
use pantry_ops::ops_add::{self, AddOptions};
use pantry_util::progress;

pub fn exec(recipe: &str, requirement: Option<&str>) -> Result<()> {
    let manifest_path = super::project_root()?.join(MANIFEST_NAME);

    let dependency = ops_add::add_dependency(
        &manifest_path,
        &AddOptions {
            recipe: recipe.to_string(),
            requirement: requirement.map(|s| s.to_string()),
        },
    )?;

    progress::status(
        "Added",
        &format!("{} {} to [dependencies]", dependency.project, dependency.requirement),
    );
    Ok(())
}
