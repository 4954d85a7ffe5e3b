use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpResponse};
use tracing::warn;

use crate::errors::StoreError;
use crate::services::AccountRecordStore;
use crate::validation::parse_amount;
use crate::{models, views};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

fn logged<T>(action: &'static str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if let Err(err) = &result {
        warn!(action, error = %err, "operation failed");
    }
    result
}

#[get("/")]
pub async fn index() -> HttpResponse {
    html(views::index_page())
}

#[post("/clientes")]
pub async fn create_customer(
    store: web::Data<AccountRecordStore>,
    input: web::Form<models::NewCustomerForm>,
) -> Result<HttpResponse, StoreError> {
    let agencia = logged(
        "create_customer",
        store
            .create_customer_with_account(input.cpf.trim(), &input.nome)
            .await,
    )?;
    Ok(html(views::message_page(
        "Cliente inserido",
        &format!(
            "Cliente {} e conta na agência {} inseridos com sucesso!",
            input.nome.trim(),
            agencia
        ),
    )))
}

#[get("/clientes")]
pub async fn query_customers(
    store: web::Data<AccountRecordStore>,
    query: web::Query<models::CustomerQuery>,
) -> Result<HttpResponse, StoreError> {
    let customers = logged("query_customers", store.query_customers(query.cpf()).await)?;
    Ok(html(views::customers_page(&customers)))
}

#[get("/telefones")]
pub async fn list_phones(
    store: web::Data<AccountRecordStore>,
    query: web::Query<models::PhoneLookup>,
) -> Result<HttpResponse, StoreError> {
    let cpf = query.cpf.trim();
    let phones = logged("list_phones", store.list_phones_for_customer(cpf).await)?;
    Ok(html(views::phones_page(cpf, &phones)))
}

#[post("/telefones/{id}/editar")]
pub async fn update_phone(
    store: web::Data<AccountRecordStore>,
    id: web::Path<i32>,
    input: web::Form<models::PhoneForm>,
) -> Result<HttpResponse, StoreError> {
    logged(
        "update_phone",
        store
            .update_phone(id.into_inner(), input.ddd.trim(), input.numero.trim())
            .await,
    )?;
    Ok(html(views::message_page(
        "Telefone atualizado",
        "Telefone atualizado com sucesso!",
    )))
}

#[post("/telefones/{id}/excluir")]
pub async fn delete_phone(
    store: web::Data<AccountRecordStore>,
    id: web::Path<i32>,
) -> Result<HttpResponse, StoreError> {
    logged("delete_phone", store.delete_phone(id.into_inner()).await)?;
    Ok(html(views::message_page(
        "Telefone excluído",
        "Telefone excluído com sucesso!",
    )))
}

#[post("/transacoes")]
pub async fn record_transaction(
    store: web::Data<AccountRecordStore>,
    input: web::Form<models::TransactionForm>,
) -> Result<HttpResponse, StoreError> {
    let valor = logged(
        "record_transaction",
        parse_amount(&input.valor).map_err(StoreError::from),
    )?;
    let transaction = logged(
        "record_transaction",
        store
            .record_transaction(&input.num_conta, valor, &input.tipo)
            .await,
    )?;
    Ok(html(views::transaction_page(&transaction)))
}

fn error_with_page(status: StatusCode, message: String) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        message.clone(),
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .body(views::error_page(&message)),
    )
    .into()
}

pub fn form_error_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _| error_with_page(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))
}

pub fn query_error_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _| error_with_page(StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))
}

/// Phone ids that are not integers can never name a row.
pub fn path_error_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _| {
        error_with_page(
            StatusCode::NOT_FOUND,
            format!("Identificador inválido: {err}"),
        )
    })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(create_customer)
        .service(query_customers)
        .service(list_phones)
        .service(update_phone)
        .service(delete_phone)
        .service(record_transaction)
        .app_data(form_error_config())
        .app_data(query_error_config())
        .app_data(path_error_config());
}
