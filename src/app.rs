use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::cli::output::OutputFormat;
use crate::config::Config;
use crate::error::{MallaError, Result};
use crate::store::ProgressStore;

/// Everything a command needs: root, config, catalog, and the progress
/// store, owned here and passed by reference to each command.
pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub catalog: Catalog,
    pub store: ProgressStore,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = Self::find_root()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| root.join("config.toml"));
        let config = Config::load(cli.config.as_deref(), &root)?;

        let catalog = match &config.catalog.path {
            Some(path) => Catalog::load_file(&resolve_against(&root, path))?,
            None => Catalog::builtin()?,
        };

        let store = ProgressStore::new(root.join(&config.storage.file));
        let output_format = cli.output_format(&config);

        Ok(Self {
            root,
            config_path,
            config,
            catalog,
            store,
            output_format,
            verbosity: cli.verbose,
        })
    }

    fn find_root() -> Result<PathBuf> {
        if let Ok(root) = std::env::var("MALLA_ROOT") {
            return Ok(PathBuf::from(root));
        }
        let cwd = std::env::current_dir()?;
        if let Some(found) = find_upwards(&cwd, ".malla") {
            return Ok(found);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| MallaError::Config("data directory not found".to_string()))?;
        Ok(data_dir.join("malla"))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
