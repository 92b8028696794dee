use crate::config;
use crate::errors::AppResult;
use crate::loader::DbLoader;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// Writes the config template when the file is missing. An existing file is
/// left untouched.
pub fn handle(loader: &DbLoader) -> AppResult<()> {
    let path = loader.config_path();

    if config::file_exists(path)? {
        warning(format!(
            "Config file already exists, not overwriting: {}",
            path.display()
        ));
        return Ok(());
    }

    config::init_file(path)?;
    success(format!("Config file created: {}", path.display()));
    info("Fill in the credentials, then run `dbloader connect`");
    Ok(())
}
