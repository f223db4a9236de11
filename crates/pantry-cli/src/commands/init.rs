//! Handler for `pantry init`.

use miette::Result;

use pantry_ops::ops_init;
use pantry_util::errors::PantryError;
use pantry_util::progress;

pub fn exec(name: Option<&str>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(PantryError::Io)?;
    let manifest_path = ops_init::init(&cwd, name)?;
    progress::status("Created", &manifest_path.display().to_string());
    Ok(())
}
