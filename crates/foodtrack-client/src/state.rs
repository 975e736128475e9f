use std::fs;
use std::path::{Path, PathBuf};

use crate::{ClientError, ClientResult};

pub const HOME_ENV_VAR: &str = "FOODTRACK_HOME";
pub const PURCHASES_FILE_NAME: &str = "purchases.csv";
pub const CONSUMPTION_FILE_NAME: &str = "consumption.csv";

/// Locations of the two append-only history files.
///
/// The store owns these paths; the forecasting core never sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub home: PathBuf,
    pub purchases: PathBuf,
    pub consumption: PathBuf,
}

impl StorePaths {
    pub fn in_home(home: &Path) -> Self {
        Self {
            home: home.to_path_buf(),
            purchases: home.join(PURCHASES_FILE_NAME),
            consumption: home.join(CONSUMPTION_FILE_NAME),
        }
    }
}

pub fn resolve_store_paths(home_override: Option<&Path>) -> ClientResult<StorePaths> {
    let home = resolve_data_home(home_override)?;
    Ok(StorePaths::in_home(&home))
}

pub fn resolve_data_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV_VAR) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".foodtrack")
            } else {
                return Err(ClientError::store_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for the history store.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_data_home(path: &Path) -> ClientResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> ClientError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return ClientError::history_write_failed(path, &error.to_string());
    }

    ClientError::store_init_failed(path, &error.to_string())
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::store_init_failed(path, &error.to_string()))
}
