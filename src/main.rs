use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use taskmaster_client::api::ApiClient;
use taskmaster_client::cli::{Args, StoreKind};
use taskmaster_client::commands;
use taskmaster_client::config::ClientConfig;
use taskmaster_client::store::{CredentialStore, FileStore, KeychainStore};

#[tokio::main]
async fn main() -> ExitCode {
    // Shares VITE_APP_API_BASE_URL with the web frontend's .env when present
    let _ = dotenvy::dotenv();

    env_logger::init();
    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(ref url) = args.api_url {
        config = config.with_base_url(url);
    }
    log::debug!("Using API at {}", config.base_url);

    let store: Arc<dyn CredentialStore> = match args.store {
        StoreKind::Keychain => Arc::new(KeychainStore::new()),
        StoreKind::File => match args.credentials_file {
            Some(ref path) => Arc::new(FileStore::new(path)),
            None => match FileStore::default_location() {
                Ok(store) => Arc::new(store),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            },
        },
    };

    let client = match ApiClient::new(config, store) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut stdout = std::io::stdout().lock();
    match commands::run(&client, args.command, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Command failed: {:?}", e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
