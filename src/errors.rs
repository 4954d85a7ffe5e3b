use actix_web::body::BoxBody;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sqlx::error::ErrorKind;
use thiserror::Error as ThisError;

use crate::validation::ValidationError;
use crate::views;

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Registro duplicado: o CPF informado já existe no banco de dados.")]
    DuplicateKey,

    #[error("Referência inexistente: o cliente ou a conta informada não existe.")]
    ForeignKeyViolation,

    #[error("Registro não encontrado.")]
    NotFound,

    #[error("Erro ao conectar ao banco de dados: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Erro no banco de dados: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        if let Some(db_err) = value.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation => return StoreError::DuplicateKey,
                ErrorKind::ForeignKeyViolation => return StoreError::ForeignKeyViolation,
                _ => {}
            }
        }
        match value {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreError::Connection(value),
            _ => StoreError::Database(value),
        }
    }
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Validation(_) | StoreError::ForeignKeyViolation => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StoreError::DuplicateKey => StatusCode::CONFLICT,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(views::error_page(&self.to_string()))
    }
}
