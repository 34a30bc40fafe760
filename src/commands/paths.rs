use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use crate::runtime::{Runtime, resolve_relative_path};

/// Directory name under the platform configuration directory.
const APP_DIR: &str = "bespoke";

/// Resolve the configuration root: an explicit directory wins over the
/// platform default `<config dir>/bespoke`.
///
/// A relative directory is anchored at the current directory, since store
/// paths derived from the root become symlink targets.
#[tracing::instrument(skip(runtime))]
pub fn config_root<R: Runtime>(runtime: &R, config_dir: Option<PathBuf>) -> Result<PathBuf> {
    let root = match config_dir {
        Some(path) if path.is_relative() => {
            let cwd = runtime.current_dir()?;
            resolve_relative_path(&cwd, &path)
        }
        Some(path) => path,
        None => default_config_root(runtime)?,
    };
    info!("Using configuration root: {}", root.display());
    Ok(root)
}

pub fn default_config_root<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let config_dir = runtime
        .config_dir()
        .context("Could not find the platform configuration directory; use --config-dir")?;
    Ok(config_dir.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;

    #[test]
    fn test_explicit_config_dir_wins() {
        // No expectations: the platform directory must not be consulted
        let runtime = MockRuntime::new();

        let root = config_root(&runtime, Some(PathBuf::from("/srv/bespoke"))).unwrap();

        assert_eq!(root, PathBuf::from("/srv/bespoke"));
    }

    #[test]
    fn test_relative_config_dir_is_anchored_at_current_dir() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_current_dir()
            .times(1)
            .returning(|| Ok(PathBuf::from("/home/user/work")));

        let root = config_root(&runtime, Some(PathBuf::from("./cfg"))).unwrap();

        assert_eq!(root, PathBuf::from("/home/user/work/cfg"));
    }

    #[test]
    fn test_default_config_root() {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_config_dir()
            .returning(|| Some(PathBuf::from("/home/user/.config")));

        let root = config_root(&runtime, None).unwrap();

        assert_eq!(root, PathBuf::from("/home/user/.config/bespoke"));
    }

    #[test]
    fn test_missing_platform_config_dir() {
        let mut runtime = MockRuntime::new();
        runtime.expect_config_dir().returning(|| None);

        let err = config_root(&runtime, None).unwrap_err();

        assert!(err.to_string().contains("--config-dir"));
    }
}
