use sqlx::Connection;

use crate::db::Database;
use crate::error::AppResult;
use crate::model::user::User;

pub async fn find_by_username(db: &Database, username: &str) -> AppResult<Option<User>> {
    let mut conn = db.connect().await?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash
        FROM usuarios
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(&mut conn)
    .await?;

    conn.close().await?;
    Ok(user)
}
