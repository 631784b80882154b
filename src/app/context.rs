use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GatorError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
    pub config: Config,
    /// Where config changes are saved; `None` keeps them in memory only.
    pub config_path: Option<PathBuf>,
}

impl AppContext {
    pub fn new(config: Config, config_path: PathBuf) -> Result<Self> {
        let db_path = match config.db_path.clone() {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new()?);

        Ok(Self {
            store,
            fetcher,
            config,
            config_path: Some(config_path),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::in_memory_with_fetcher(Arc::new(HttpFetcher::new()?))
    }

    pub fn in_memory_with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);

        Ok(Self {
            store,
            fetcher,
            config: Config::default(),
            config_path: None,
        })
    }

    pub fn set_current_user(&mut self, name: &str) -> Result<()> {
        match &self.config_path {
            Some(path) => self.config.set_current_user(name, path)?,
            None => self.config.current_user_name = Some(name.to_string()),
        }
        Ok(())
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GatorError::Config("Could not find data directory".into()))?;
        let gator_dir = data_dir.join("gator");
        std::fs::create_dir_all(&gator_dir)?;
        Ok(gator_dir.join("gator.db"))
    }
}
