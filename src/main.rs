//! finledger main entry point

use clap::Parser;
use finledger_api::{start_server, AppState};
use finledger_assistant::{ChatProvider, DeepSeekProvider, Gateway};
use finledger_config::{Config, ConfigError};
use finledger_core::{FileStore, LedgerStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "finledger")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal finance tracker with an AI assistant", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match Config::load(args.config.clone()) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound { path }) => {
            eprintln!("[WARN] Config file {} not found, using defaults", path);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.logging.level),
    )
    .init();

    // The hosting environment may dictate the port
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse() {
            config.server.port = port;
        }
    }

    log::info!(
        "Config loaded: state file={}, port={}",
        config.state_path().display(),
        config.server.port
    );

    let store = LedgerStore::open(Box::new(FileStore::new(config.state_path())));
    if store.recovered() {
        log::warn!("Persisted ledger data was malformed and has been discarded");
    }
    log::info!("Ledger loaded: {} transactions", store.len());

    let provider: Option<Arc<dyn ChatProvider>> =
        match std::env::var(&config.assistant.api_key_env) {
            Ok(key) if !key.trim().is_empty() => {
                Some(Arc::new(DeepSeekProvider::new(&config.assistant, key)))
            }
            _ => {
                log::warn!(
                    "{} is not set; assistant questions will report a configuration error",
                    config.assistant.api_key_env
                );
                None
            }
        };

    let state = AppState {
        store: Arc::new(RwLock::new(store)),
        gateway: Arc::new(Gateway::new(provider)),
        config: config.clone(),
    };

    let rt = Runtime::new()?;
    rt.block_on(start_server(config, state))?;

    Ok(())
}
