use actix_web::{
    HttpResponse, ResponseError,
    error::BlockingError,
    http::{StatusCode, header},
};
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("Coluna desconhecida: {0}")]
    UnknownColumn(String),

    #[error("Nenhum campo informado")]
    EmptyFields,

    #[error("Funcionário {0} não encontrado")]
    NotFound(i64),

    #[error("unknown spreadsheet header: {0}")]
    UnknownHeader(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("spreadsheet write error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing error: {0}")]
    Password(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("blocking task failed: {0}")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::UnknownColumn(_) | AppError::EmptyFields => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated => login_redirect(),
            AppError::UnknownColumn(_) | AppError::EmptyFields | AppError::NotFound(_) => {
                HttpResponse::build(self.status_code())
                    .content_type("text/plain; charset=utf-8")
                    .body(self.to_string())
            }
            other => {
                error!(error = %other, "Request failed");
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Something went wrong, Contact with system admin")
            }
        }
    }
}

/// 303 back to the login page.
pub fn login_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}
