//! Handler for `pantry lock`.

use miette::Result;

use pantry_core::lockfile::LOCKFILE_NAME;
use pantry_ops::ops_lock;
use pantry_util::progress;

pub async fn exec(verbose: bool) -> Result<()> {
    let project_root = super::project_root()?;
    let config = super::load_config();

    let spinner = progress::spinner("Resolving dependencies");
    let outcome = ops_lock::lock(&project_root, &config, |event| {
        super::render_event(&spinner, &event, verbose)
    })
    .await;
    spinner.finish_and_clear();
    let lockfile = outcome?;

    progress::status(
        "Locked",
        &format!("{} recipe(s) in {LOCKFILE_NAME}", lockfile.packages.len()),
    );
    Ok(())
}
