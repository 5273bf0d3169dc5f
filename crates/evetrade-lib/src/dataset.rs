use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the static data database.
pub const DATASET_FILENAME: &str = "static_data.db";

/// Environment variable consulted when no explicit dataset path is given.
pub const DATASET_ENV_VAR: &str = "EVETRADE_DATASET";

/// Where a resolved dataset path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Explicit,
    Environment,
    PlatformDefault,
}

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "evetrade", "evetrade").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Locate the static data database.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `EVETRADE_DATASET` environment variable.
/// 3. Platform-specific project data directory.
///
/// A directory is joined with [`DATASET_FILENAME`]. The returned path must
/// exist; otherwise [`Error::DatasetNotFound`] is returned.
pub fn resolve_dataset(target: Option<&Path>) -> Result<PathBuf> {
    let (path, origin) = resolve_candidate(target, env::var_os(DATASET_ENV_VAR))?;
    debug!(path = %path.display(), ?origin, "resolved dataset path");
    if !path.is_file() {
        return Err(Error::DatasetNotFound { path });
    }
    Ok(path)
}

fn resolve_candidate(
    target: Option<&Path>,
    env_value: Option<OsString>,
) -> Result<(PathBuf, DatasetOrigin)> {
    if let Some(explicit) = target {
        return Ok((canonical_dataset_path(explicit), DatasetOrigin::Explicit));
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return Ok((
            canonical_dataset_path(Path::new(&value)),
            DatasetOrigin::Environment,
        ));
    }

    Ok((default_dataset_path()?, DatasetOrigin::PlatformDefault))
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        return path.join(DATASET_FILENAME);
    }
    path.to_path_buf()
}
