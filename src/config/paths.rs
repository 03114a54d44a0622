use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const ASTRARC_FILENAME: &str = ".astrarc";

/// `<home>/.astrarc`. Resolving the path never touches the filesystem.
pub fn default_config_file() -> AppResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AppError::Config("unable to resolve home directory".to_string()))?;
    Ok(home.join(ASTRARC_FILENAME))
}
