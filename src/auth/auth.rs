use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};
use tracing::debug;

use crate::auth::{SESSION_COOKIE, jwt::verify_token, password::verify_password};
use crate::config::Config;
use crate::db::Database;
use crate::error::{AppError, AppResult};
use crate::repository::user::find_by_username;

/// The authenticated caller of a request.
///
/// Put into request extensions by the session middleware; taking it as a
/// handler argument is what makes a handler require login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<AuthUser>() {
            return ready(Ok(user.clone()));
        }

        let user = req
            .app_data::<Data<Config>>()
            .and_then(|config| session_user(req, config));

        ready(user.ok_or(AppError::Unauthenticated))
    }
}

/// Reads and verifies the session cookie.
pub fn session_user(req: &HttpRequest, config: &Config) -> Option<AuthUser> {
    let cookie = req.cookie(SESSION_COOKIE)?;

    match verify_token(cookie.value(), &config.secret_key) {
        Ok(claims) => Some(AuthUser {
            username: claims.sub,
        }),
        Err(e) => {
            debug!(error = %e, "Rejected session cookie");
            None
        }
    }
}

/// `Some` only when the user exists and the password matches its hash.
/// Unknown user and wrong password are indistinguishable to the caller.
pub async fn verify_credentials(
    db: &Database,
    username: &str,
    password: &str,
) -> AppResult<Option<AuthUser>> {
    let Some(user) = find_by_username(db, username).await? else {
        debug!("Invalid credentials: user not found");
        return Ok(None);
    };

    if !verify_password(password, &user.password_hash) {
        debug!(user_id = user.id, "Invalid credentials: password mismatch");
        return Ok(None);
    }

    Ok(Some(AuthUser {
        username: user.username,
    }))
}
