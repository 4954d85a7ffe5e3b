use std::io;
use tracing::{error, info};

use cadastro_bancario::config::Config;
use cadastro_bancario::console::Console;
use cadastro_bancario::services::AccountRecordStore;
use cadastro_bancario::telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    telemetry::init(&config.log_level);

    let store = AccountRecordStore::connect(&config).await;
    let store = match store {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "could not reach the database");
            println!("Erro ao conectar ao banco de dados: {err}");
            println!("Verifique as credenciais (DB_USER, DB_PASSWORD, DB_NAME) no ambiente ou no arquivo .env.");
            return Err(err.into());
        }
    };
    if let Err(err) = store.ping().await {
        error!(error = %err, "database ping failed");
        return Err(err.into());
    }
    info!("database connection established");
    println!("Conexão com o banco de dados bem-sucedida!");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(&store, stdin.lock(), stdout.lock()).run().await?;

    store.close().await;
    Ok(())
}
