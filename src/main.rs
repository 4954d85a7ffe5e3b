use actix_web::{web, App, HttpServer};
use std::net::TcpListener;
use tracing::{error, info};

use cadastro_bancario::config::Config;
use cadastro_bancario::services::AccountRecordStore;
use cadastro_bancario::{handlers, telemetry};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    telemetry::init(&config.log_level);

    let store = match connect(&config).await {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "could not reach the database");
            return Err(err.into());
        }
    };
    info!("database connection established");

    let address = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&address)?;
    info!(%address, "HTTP server listening");

    let state = web::Data::new(store.clone());
    HttpServer::new(move || App::new().app_data(state.clone()).configure(handlers::routes))
        .shutdown_timeout(60)
        .listen(listener)?
        .run()
        .await?;

    store.close().await;
    info!("server has shut down");
    Ok(())
}

async fn connect(config: &Config) -> Result<AccountRecordStore, cadastro_bancario::errors::StoreError> {
    let store = AccountRecordStore::connect(config).await?;
    store.ping().await?;
    Ok(store)
}
