//! Location of the route catalog and traffic files on disk.
//!
//! Resolution order for each file:
//! 1. Explicit path argument when provided.
//! 2. `WAYFARER_ROUTES` / `WAYFARER_TRAFFIC` environment variables.
//! 3. Platform-specific project data directory.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the route catalog path.
pub const ROUTES_ENV: &str = "WAYFARER_ROUTES";
/// Environment variable overriding the traffic file path.
pub const TRAFFIC_ENV: &str = "WAYFARER_TRAFFIC";

const ROUTES_FILENAME: &str = "routes.txt";
const TRAFFIC_FILENAME: &str = "traffic.txt";

/// Resolved data files for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub routes: PathBuf,
    /// Traffic annotations are optional; `None` when no file exists.
    pub traffic: Option<PathBuf>,
}

/// Platform data directory for Wayfarer.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "wayfarer", "wayfarer").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve both data files.
///
/// The routes file must exist. An explicitly requested traffic file must
/// exist too; a traffic file found only by default lookup is optional.
pub fn resolve_data_paths(routes: Option<&Path>, traffic: Option<&Path>) -> Result<DataPaths> {
    resolve_with(routes, traffic, env::var_os(ROUTES_ENV), env::var_os(TRAFFIC_ENV))
}

fn resolve_with(
    routes: Option<&Path>,
    traffic: Option<&Path>,
    routes_env: Option<OsString>,
    traffic_env: Option<OsString>,
) -> Result<DataPaths> {
    let routes = match (routes, routes_env) {
        (Some(explicit), _) => explicit.to_path_buf(),
        (None, Some(from_env)) => PathBuf::from(from_env),
        (None, None) => default_data_dir()?.join(ROUTES_FILENAME),
    };
    if !routes.exists() {
        return Err(Error::DataFileNotFound { path: routes });
    }

    let traffic = match (traffic, traffic_env) {
        (Some(explicit), _) => Some(require_existing(explicit.to_path_buf())?),
        (None, Some(from_env)) => Some(require_existing(PathBuf::from(from_env))?),
        (None, None) => sibling_traffic_file(&routes),
    };

    debug!(
        routes = %routes.display(),
        traffic = ?traffic.as_ref().map(|path| path.display().to_string()),
        "resolved data paths"
    );
    Ok(DataPaths { routes, traffic })
}

fn require_existing(path: PathBuf) -> Result<PathBuf> {
    if path.exists() {
        Ok(path)
    } else {
        Err(Error::DataFileNotFound { path })
    }
}

fn sibling_traffic_file(routes: &Path) -> Option<PathBuf> {
    let candidate = routes.with_file_name(TRAFFIC_FILENAME);
    candidate.exists().then_some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn explicit_routes_path_wins_over_env() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("mine.txt");
        fs::write(&explicit, "A|B|1|1|1|1|1\n").unwrap();

        let paths = resolve_with(
            Some(&explicit),
            None,
            Some(OsString::from("/definitely/not/here.txt")),
            None,
        )
        .expect("resolves");
        assert_eq!(paths.routes, explicit);
        assert_eq!(paths.traffic, None);
    }

    #[test]
    fn sibling_traffic_file_is_discovered() {
        let dir = tempdir().unwrap();
        let routes = dir.path().join("routes.txt");
        let traffic = dir.path().join("traffic.txt");
        fs::write(&routes, "").unwrap();
        fs::write(&traffic, "").unwrap();

        let paths = resolve_with(None, None, Some(routes.clone().into_os_string()), None)
            .expect("resolves");
        assert_eq!(paths.traffic, Some(traffic));
    }

    #[test]
    fn missing_routes_file_is_reported() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        let err = resolve_with(Some(&missing), None, None, None).expect_err("missing");
        assert!(matches!(err, Error::DataFileNotFound { path } if path == missing));
    }

    #[test]
    fn explicit_traffic_file_must_exist() {
        let dir = tempdir().unwrap();
        let routes = dir.path().join("routes.txt");
        fs::write(&routes, "").unwrap();
        let err = resolve_with(Some(&routes), Some(&dir.path().join("nope.txt")), None, None)
            .expect_err("missing traffic");
        assert!(matches!(err, Error::DataFileNotFound { .. }));
    }
}
