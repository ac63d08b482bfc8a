use std::borrow::Cow;
use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use crate::auth::password::hash_password;
use crate::config::Config;
use crate::error::AppResult;

/// Connection factory for the local store.
///
/// Every operation calls [`Database::connect`] and closes the connection
/// before returning; nothing is pooled or kept between requests.
#[derive(Clone, Debug)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(path: &Path) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .pragma("case_sensitive_like", Cow::Borrowed("ON"));

        Self { options }
    }

    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Creates both tables if absent and seeds the admin user once.
    pub async fn ensure_schema(&self, admin_username: &str, admin_password: &str) -> AppResult<()> {
        let mut conn = self.connect().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usuarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL
            )
            "#,
        )
        .execute(&mut conn)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS funcionarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                funcionario TEXT,
                matricula TEXT,
                admissao TEXT,
                cpf TEXT,
                rg TEXT,
                nascimento TEXT,
                cargo TEXT,
                perfil TEXT,
                interno_volante TEXT,
                localidade TEXT,
                fila TEXT,
                field TEXT,
                email_corporativo TEXT,
                cel_corporativo TEXT,
                cel_pessoal TEXT,
                municipio TEXT,
                bairro TEXT,
                endereco TEXT,
                veiculo TEXT,
                placa TEXT,
                supervisor TEXT
            )
            "#,
        )
        .execute(&mut conn)
        .await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM usuarios WHERE username = ? LIMIT 1)",
        )
        .bind(admin_username)
        .fetch_one(&mut conn)
        .await?;

        if exists {
            debug!(username = admin_username, "Admin user already present");
        } else {
            let hashed = hash_password(admin_password)?;
            sqlx::query("INSERT INTO usuarios (username, password_hash) VALUES (?, ?)")
                .bind(admin_username)
                .bind(hashed)
                .execute(&mut conn)
                .await?;
            info!(username = admin_username, "Seeded admin user");
        }

        conn.close().await?;
        Ok(())
    }
}

pub async fn init_db(config: &Config) -> AppResult<Database> {
    let db = Database::new(&config.database_path);
    db.ensure_schema(&config.admin_username, &config.admin_password)
        .await?;
    info!(path = %config.database_path.display(), "Database ready");
    Ok(db)
}
