use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, http::header, web};
use tracing::{debug, info, instrument};

use crate::{
    auth::{SESSION_COOKIE, auth::verify_credentials, jwt::generate_session_token},
    config::Config,
    db::Database,
    error::{AppResult, login_redirect},
    models::LoginForm,
    views::{INVALID_CREDENTIALS, Views},
};

/// Login page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Login form", content_type = "text/html")
    ),
    tag = "Auth"
)]
pub async fn login_page(views: web::Data<Views>) -> AppResult<HttpResponse> {
    views.login(None)
}

/// Log in
#[utoipa::path(
    post,
    path = "/",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Logged in, session cookie set, redirected to the listing"),
        (status = 200, description = "Invalid credentials, login form rendered again", content_type = "text/html")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(db, config, views, form),
    fields(username = %form.username)
)]
pub async fn login(
    form: web::Form<LoginForm>,
    db: web::Data<Database>,
    config: web::Data<Config>,
    views: web::Data<Views>,
) -> AppResult<HttpResponse> {
    info!("Login request received");

    let user = match verify_credentials(db.get_ref(), &form.username, &form.password).await? {
        Some(user) => user,
        None => {
            info!("Invalid credentials");
            return views.login(Some(INVALID_CREDENTIALS));
        }
    };

    debug!("Generating session token");
    let token = generate_session_token(&user.username, &config.secret_key, config.session_ttl)?;

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(config.session_ttl as i64))
        .finish();

    info!("Login successful");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/funcionarios"))
        .cookie(cookie)
        .finish())
}

/// Log out
#[utoipa::path(
    get,
    path = "/logout",
    responses(
        (status = 303, description = "Session cookie cleared, redirected to login")
    ),
    tag = "Auth"
)]
pub async fn logout() -> HttpResponse {
    let mut removal = Cookie::build(SESSION_COOKIE, "").path("/").finish();
    removal.make_removal();

    let mut response = login_redirect();
    if let Err(e) = response.add_cookie(&removal) {
        debug!(error = %e, "Failed to attach removal cookie");
    }
    response
}
