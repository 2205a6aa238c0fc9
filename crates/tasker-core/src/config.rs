use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 7540;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_WEB_DIR: &str = "./web";
pub const DEFAULT_DB_FILE: &str = "scheduler.db";
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Top-level config (tasker.toml + TASKER_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file; created along with its parent directory on first start.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Static front-end files served for every path the API does not claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_web_dir")]
    pub dir: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            dir: default_web_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Default page size for `GET /api/tasks`.
    #[serde(default = "default_list_limit")]
    pub limit: u32,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_web_dir() -> String {
    DEFAULT_WEB_DIR.to_string()
}
fn default_list_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}
/// `scheduler.db` next to the running executable.
fn default_db_path() -> String {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DB_FILE)))
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DB_FILE.to_string())
}

impl TaskerConfig {
    /// Load config from a TOML file with env var overrides.
    ///
    /// Later sources win:
    ///   1. Explicit path argument, else ~/.tasker/tasker.toml (a missing file is fine)
    ///   2. TASKER_* variables, `_` separating section and key (TASKER_SERVER_PORT)
    ///   3. TODO_PORT / TODO_DBFILE, kept for existing deployments
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: TaskerConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("TASKER_").split("_"))
            .merge(Env::raw().only(&["TODO_PORT"]).map(|_| "server.port".into()))
            .merge(Env::raw().only(&["TODO_DBFILE"]).map(|_| "database.path".into()))
            .extract()
            .map_err(|e| crate::error::TaskerError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.tasker/tasker.toml", home)
}
