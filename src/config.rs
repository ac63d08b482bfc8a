use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,

    // Spreadsheet locations
    pub import_path: PathBuf,
    pub export_path: PathBuf,
    pub sheet_name: String,

    pub secret_key: String,
    pub session_ttl: usize,

    pub admin_username: String,
    pub admin_password: String,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let secret_key = env::var("SECRET_KEY").context("SECRET_KEY must be set")?;
        if secret_key.trim().is_empty() {
            bail!("SECRET_KEY must not be empty");
        }

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 5000)?,
            database_path: var_or("DATABASE_PATH", "funcionarios.db").into(),

            import_path: var_or("IMPORT_PATH", "headcount 2.xlsx").into(),
            export_path: var_or("EXPORT_PATH", "funcionarios_filtrados.xlsx").into(),
            sheet_name: var_or("SHEET_NAME", "Planilha1"),

            secret_key,
            session_ttl: parse_var("SESSION_TTL", 28_800)?, // default 8 h

            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin"),

            log_dir: var_or("LOG_DIR", "logs"),
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in a scratch directory.
    pub fn for_tests(dir: &std::path::Path) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: dir.join("funcionarios.db"),
            import_path: dir.join("headcount.xlsx"),
            export_path: dir.join("export.xlsx"),
            sheet_name: "Planilha1".to_string(),
            secret_key: "test-secret".to_string(),
            session_ttl: 3600,
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
            log_dir: dir.join("logs").display().to_string(),
        }
    }
}
