//! HTTP server command
//!
//! Wires the document store, rate client and upload dir together and
//! runs the web server until Ctrl+C/SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use wishlist_server::currency::ExchangeRateClient;
use wishlist_server::db::{create_lazy_pool, MemoryWishlistStore, PgWishlistStore, WishlistStore};
use wishlist_server::http::{run_server, AppState, ServerConfig};
use wishlist_server::UploadStore;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "WISHLIST_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// PostgreSQL URL of the wishlist store
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Keep wishlists in process memory instead of a database (ignores DATABASE_URL)
    #[arg(long)]
    pub in_memory: bool,

    /// Directory served as static files; uploads go to <dir>/uploads
    #[arg(long, env = "WISHLIST_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// API key for exchangerate-api.com (needed for non-USD items)
    #[arg(long, env = "EXCHANGE_RATE_API_KEY", hide_env_values = true)]
    pub exchange_rate_api_key: Option<String>,

    /// Base URL of the exchange-rate API
    #[arg(long, env = "EXCHANGE_RATE_BASE_URL", default_value = ExchangeRateClient::DEFAULT_BASE_URL)]
    pub exchange_rate_base_url: String,
}

fn build_store(args: &ServeArgs) -> Result<Arc<dyn WishlistStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store; wishlists are lost on exit");
        return Ok(Arc::new(MemoryWishlistStore::new()));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env or .env, or pass --in-memory")?;

    // connects on first request
    let pool = create_lazy_pool(database_url).context("Invalid database URL")?;
    Ok(Arc::new(PgWishlistStore::new(pool)))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store = build_store(&args)?;

    if args.exchange_rate_api_key.is_none() {
        tracing::warn!("EXCHANGE_RATE_API_KEY not set; only USD items can be added");
    }
    let rates = ExchangeRateClient::with_base_url(
        args.exchange_rate_api_key.clone(),
        &args.exchange_rate_base_url,
    )
    .context("Failed to build exchange rate client")?;

    let state = AppState::new(store, Arc::new(rates), UploadStore::new(args.public_dir.clone()));
    let config = ServerConfig { bind_addr: args.bind };

    // blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
