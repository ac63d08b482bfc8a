use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use tracing::debug;

use crate::auth::auth::session_user;
use crate::config::Config;
use crate::error::login_redirect;

/// Gate for every employee route: a valid session cookie or a redirect to
/// the login page. The wrapped handler never runs for anonymous callers.
pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let user = {
        let config = req
            .app_data::<Data<Config>>()
            .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;
        session_user(req.request(), config)
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        None => {
            debug!(path = %req.path(), "No valid session, redirecting to login");
            Ok(req.into_response(login_redirect()))
        }
    }
}
