//! Dataset location configuration
//!
//! Dataset filenames are resolved against a data directory that sits next to
//! the executable (`<exe_dir>/../data`). The `GREENLAND_VIZ_DATA_DIR`
//! environment variable overrides that directory.

use crate::errors::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Dataset used when no filename is given
pub const DEFAULT_DATASET: &str = "Greenland1km.nc";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "GREENLAND_VIZ_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub dataset_file: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory from the environment or the executable location.
    pub fn resolve(dataset_file: Option<&Path>) -> Result<Self> {
        let data_dir = match env::var_os(DATA_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        Ok(Self::with_data_dir(data_dir, dataset_file))
    }

    pub fn with_data_dir(data_dir: impl Into<PathBuf>, dataset_file: Option<&Path>) -> Self {
        Self {
            data_dir: data_dir.into(),
            dataset_file: dataset_file
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET)),
        }
    }

    /// Absolute dataset paths are used as given; relative ones join the data directory.
    pub fn dataset_path(&self) -> PathBuf {
        if self.dataset_file.is_absolute() {
            self.dataset_file.clone()
        } else {
            self.data_dir.join(&self.dataset_file)
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let exe = env::current_exe()?;
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(exe_dir.join("..").join("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_joins_data_dir() {
        let config = AppConfig::with_data_dir("/srv/data", None);
        assert_eq!(config.dataset_path(), PathBuf::from("/srv/data/Greenland1km.nc"));
    }

    #[test]
    fn relative_filename_joins_data_dir() {
        let config = AppConfig::with_data_dir("/srv/data", Some(Path::new("Greenland5km.nc")));
        assert_eq!(config.dataset_path(), PathBuf::from("/srv/data/Greenland5km.nc"));
    }

    #[test]
    fn absolute_filename_is_kept() {
        let config = AppConfig::with_data_dir("/srv/data", Some(Path::new("/tmp/g.nc")));
        assert_eq!(config.dataset_path(), PathBuf::from("/tmp/g.nc"));
    }

    #[test]
    fn resolve_prefers_env_then_falls_back_to_exe_dir() {
        // Only this test touches DATA_DIR_ENV
        let dir = env::temp_dir().join("greenland_viz_data");
        env::set_var(DATA_DIR_ENV, &dir);
        let config = AppConfig::resolve(None).unwrap();
        assert_eq!(config.data_dir, dir);
        assert_eq!(config.dataset_path(), dir.join(DEFAULT_DATASET));

        env::remove_var(DATA_DIR_ENV);
        let config = AppConfig::resolve(None).unwrap();
        let exe = env::current_exe().unwrap();
        assert!(config.data_dir.starts_with(exe.parent().unwrap()));
        assert!(config.dataset_path().ends_with("data/Greenland1km.nc"));
    }
}
