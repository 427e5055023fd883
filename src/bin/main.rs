use std::env;
use std::sync::Arc;

use alloy::primitives::Address;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use turnstile::address;
use turnstile::lock::{LockClient, LockReader, TicketChecker};
use turnstile::modules::check_api::{self, GateState};
use turnstile::modules::portal;
use url::Url;

// M3trik Lock on Gnosis Chain
const DEFAULT_LOCK_CONTRACT_ADDRESS: &str = "0x9340184741D938453bF66D77d551Cc04Ab2F4925";
const DEFAULT_RPC_URL: &str = "https://rpc.gnosischain.com";
const DEFAULT_PURCHASE_URL: &str =
    "https://app.metri.xyz/transfer/0x1145d7f127c438286cf499CD9e869253266672e1/crc/1";
const DEFAULT_SUPPORT_EMAIL: &str = "support@aboutcircles.com";

#[derive(Debug, Clone)]
struct GateSettings {
    port: u16,
    rpc_url: Url,
    lock_address: Address,
    purchase_url: String,
    support_email: String,
}

fn load_config() -> Result<GateSettings, Box<dyn std::error::Error>> {
    Ok(GateSettings {
        port: env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?,
        rpc_url: env::var("RPC_URL")
            .unwrap_or_else(|_| DEFAULT_RPC_URL.to_string())
            .parse()?,
        lock_address: address::normalize(
            &env::var("LOCK_CONTRACT_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_LOCK_CONTRACT_ADDRESS.to_string()),
        )?,
        purchase_url: env::var("PURCHASE_URL").unwrap_or_else(|_| DEFAULT_PURCHASE_URL.to_string()),
        support_email: env::var("SUPPORT_EMAIL")
            .unwrap_or_else(|_| DEFAULT_SUPPORT_EMAIL.to_string()),
    })
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    // Load configuration
    let settings = load_config()?;
    info!(
        "Checking keys on lock {} via {}",
        settings.lock_address, settings.rpc_url
    );

    // The portal reports which network it talks to
    let network = settings
        .rpc_url
        .host_str()
        .unwrap_or("unknown")
        .to_string();

    // Wire the chain reader and the check sequencer
    let reader: Arc<dyn LockReader> = Arc::new(LockClient::new(
        settings.rpc_url.clone(),
        settings.lock_address,
    ));
    let state = Arc::new(GateState {
        checker: TicketChecker::new(reader.clone()),
        reader,
        lock_address: settings.lock_address.to_checksum(None),
        network,
        purchase_url: settings.purchase_url.clone(),
        support_email: settings.support_email.clone(),
    });

    let app = Router::new()
        .route("/", get(portal::serve_page))
        .route("/healthz", get(check_api::health))
        .route("/api/v1/check", post(check_api::check_ticket))
        .route("/api/v1/gate", get(check_api::gate_info))
        .with_state(state);

    // Bind the server
    let listener = TcpListener::bind(format!("0.0.0.0:{}", settings.port)).await?;
    println!("Listening on: 0.0.0.0:{}", settings.port);

    axum::serve(listener, app).await?;
    Ok(())
}
