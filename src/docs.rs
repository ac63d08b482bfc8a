use crate::auth::SESSION_COOKIE;
use crate::models::LoginForm;
use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Funcionários",
        version = "0.1.0",
        description = r#"
## Employee records

Intranet record-keeper for the personnel table.

- **Employees**: list with a column filter, add, edit, delete
- **Export**: download the whole table as an `.xlsx` spreadsheet

Pages are HTML; forms post `application/x-www-form-urlencoded`.

### Session
`POST /` with valid credentials sets the `session` cookie. Every
`/funcionarios` route redirects to `/` without it.
"#,
    ),
    paths(
        crate::auth::handlers::login_page,
        crate::auth::handlers::login,
        crate::auth::handlers::logout,

        crate::api::employee::list_employees,
        crate::api::employee::add_form,
        crate::api::employee::create_employee,
        crate::api::employee::edit_form,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::export
    ),
    components(schemas(LoginForm)),
    modifiers(&SessionCookie),
    tags(
        (name = "Auth", description = "Login and logout"),
        (name = "Employee", description = "Employee record pages"),
    )
)]
pub struct ApiDoc;

struct SessionCookie;

impl Modify for SessionCookie {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
        }
    }
}
