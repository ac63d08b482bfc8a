use std::str::FromStr;

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use tracing::{debug, info};

use crate::{
    auth::auth::AuthUser,
    config::Config,
    db::Database,
    error::{AppError, AppResult},
    exporter::{XLSX_CONTENT_TYPE, export_employees},
    model::employee::EmployeeFilter,
    models::ListQuery,
    repository::employee as records,
    schema::Column,
    utils::db_utils::FieldValues,
    views::{FormAction, Views},
};

fn to_listing() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/funcionarios"))
        .finish()
}

impl ListQuery {
    /// A filter applies only when both parts are non-empty. A non-empty
    /// column that is not in the schema is rejected either way.
    pub fn to_filter(&self) -> AppResult<Option<EmployeeFilter>> {
        let column = match self.filtro.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                Column::from_str(name).map_err(|_| AppError::UnknownColumn(name.to_string()))?
            }
            _ => return Ok(None),
        };

        Ok(self
            .valor
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| EmployeeFilter {
                column,
                value: value.to_string(),
            }))
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/funcionarios",
    params(ListQuery),
    responses(
        (status = 200, description = "Employee table", content_type = "text/html"),
        (status = 303, description = "No session, redirected to login"),
        (status = 400, description = "Unknown filter column")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn list_employees(
    auth: AuthUser,
    db: web::Data<Database>,
    views: web::Data<Views>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let filter = query.to_filter()?;
    let employees = records::list_employees(db.get_ref(), filter.as_ref()).await?;

    debug!(
        count = employees.len(),
        column = ?filter.as_ref().map(|f| f.column),
        "Listing employees"
    );

    views.employee_list(&auth.username, &employees, filter.as_ref())
}

/// Blank employee form
#[utoipa::path(
    get,
    path = "/funcionarios/add",
    responses(
        (status = 200, description = "Blank form", content_type = "text/html"),
        (status = 303, description = "No session, redirected to login")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn add_form(_auth: AuthUser, views: web::Data<Views>) -> AppResult<HttpResponse> {
    views.employee_form(FormAction::Add, None)
}

/// Create employee
///
/// Form field names are column names; only schema columns are accepted.
#[utoipa::path(
    post,
    path = "/funcionarios/add",
    request_body(content = Object, content_type = "application/x-www-form-urlencoded",
        description = "Any subset of the employee columns, e.g. `funcionario=Ana&cargo=Analista`"),
    responses(
        (status = 303, description = "Created, redirected to the listing"),
        (status = 400, description = "Unknown column or no fields")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn create_employee(
    auth: AuthUser,
    db: web::Data<Database>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let fields = FieldValues::from_pairs(form.into_inner())?;
    let employee_id = records::create_employee(db.get_ref(), &fields).await?;

    info!(employee_id, user = %auth.username, "Employee created");
    Ok(to_listing())
}

/// Pre-filled employee form
#[utoipa::path(
    get,
    path = "/funcionarios/edit/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Form with current values", content_type = "text/html"),
        (status = 303, description = "No session, redirected to login"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn edit_form(
    _auth: AuthUser,
    db: web::Data<Database>,
    views: web::Data<Views>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();

    let employee = records::find_employee(db.get_ref(), employee_id)
        .await?
        .ok_or(AppError::NotFound(employee_id))?;

    views.employee_form(FormAction::Edit(employee_id), Some(&employee))
}

/// Update employee
///
/// Only the submitted columns change. An unknown id updates nothing and
/// still redirects to the listing.
#[utoipa::path(
    post,
    path = "/funcionarios/edit/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body(content = Object, content_type = "application/x-www-form-urlencoded",
        description = "Columns to change, e.g. `cargo=Supervisor`"),
    responses(
        (status = 303, description = "Updated (or no such id), redirected to the listing"),
        (status = 400, description = "Unknown column or no fields")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn update_employee(
    auth: AuthUser,
    db: web::Data<Database>,
    path: web::Path<i64>,
    form: web::Form<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();
    let fields = FieldValues::from_pairs(form.into_inner())?;

    let affected = records::update_employee(db.get_ref(), employee_id, &fields).await?;
    if affected == 0 {
        info!(employee_id, "Update matched no employee");
    } else {
        info!(employee_id, user = %auth.username, "Employee updated");
    }

    Ok(to_listing())
}

/// Delete employee
#[utoipa::path(
    get,
    path = "/funcionarios/delete/{id}",
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 303, description = "Deleted (or no such id), redirected to the listing")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn delete_employee(
    auth: AuthUser,
    db: web::Data<Database>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let employee_id = path.into_inner();

    let affected = records::delete_employee(db.get_ref(), employee_id).await?;
    if affected == 0 {
        info!(employee_id, "Delete matched no employee");
    } else {
        info!(employee_id, user = %auth.username, "Employee deleted");
    }

    Ok(to_listing())
}

/// Export employees
#[utoipa::path(
    get,
    path = "/funcionarios/export",
    responses(
        (status = 200, description = "Spreadsheet with every employee",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 303, description = "No session, redirected to login")
    ),
    tag = "Employee",
    security(("session_cookie" = []))
)]
pub async fn export(
    _auth: AuthUser,
    db: web::Data<Database>,
    config: web::Data<Config>,
) -> AppResult<HttpResponse> {
    export_employees(db.get_ref(), &config.export_path, &config.sheet_name).await?;

    let path = config.export_path.clone();
    let bytes = web::block(move || std::fs::read(path)).await??;

    let filename = config
        .export_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "funcionarios.xlsx".to_string());

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes))
}
