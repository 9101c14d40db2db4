use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::Request;
use clankfeed_core::providers::{NeynarProvider, RpcWallet};
use clankfeed_core::tip::LogNotifier;
use clankfeed_core::{channels, Config, FeedAssembler, TipController, TipOutcome};
use clankfeed_server::{router, AppState};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clankfeed")]
#[command(version, about = "Curated feed of @clanker token deployments", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/clankfeed/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
    /// Assemble the feed once and print it as JSON
    Feed,
    /// List known channels
    Channels,
    /// Tip the author of a post in the current feed
    Tip {
        /// Post id (cast hash)
        post_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clankfeed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { bind }) => serve(&config, bind).await,
        Some(Commands::Feed) => print_feed(&config).await,
        Some(Commands::Channels) => {
            for channel in channels::all() {
                println!("{:<28} {}", channel.id, channel.display_name);
            }
            Ok(())
        }
        Some(Commands::Tip { post_id }) => tip(&config, &post_id).await,
        None => {
            println!("No command specified. Try --help");
            Ok(())
        }
    }
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load()?,
    };
    config.apply_env();
    Ok(config)
}

fn feed_assembler(config: &Config) -> anyhow::Result<FeedAssembler> {
    let provider = NeynarProvider::from_config(&config.upstream)
        .context("No Neynar API key found (set NEYNAR_API_KEY)")?;
    Ok(FeedAssembler::new(Arc::new(provider), config.feed.clone()))
}

async fn serve(config: &Config, bind: Option<String>) -> anyhow::Result<()> {
    let bind_addr = bind.unwrap_or_else(|| config.server.bind_addr.clone());
    let state = AppState::from_config(config);

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    query = request.uri().query().unwrap_or("")
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting server");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn print_feed(config: &Config) -> anyhow::Result<()> {
    let feed = feed_assembler(config)?.assemble().await?;
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

async fn tip(config: &Config, post_id: &str) -> anyhow::Result<()> {
    let feed = feed_assembler(config)?.assemble().await?;
    let post = feed
        .posts
        .iter()
        .find(|post| post.id == post_id)
        .with_context(|| format!("post {} is not in the current feed", post_id))?;

    let wallet = RpcWallet::from_config(&config.tip)
        .context("No sender address configured (set CLANKFEED_FROM_ADDRESS)")?;
    let controller = TipController::new(
        Arc::new(wallet),
        Arc::new(LogNotifier::new()),
        config.tip.clone(),
    );

    match controller.tip(post).await? {
        TipOutcome::Confirmed { tx } => {
            println!("Tipped @{} with {} ({})", post.author.username, config.tip.amount_display(), tx);
            Ok(())
        }
        TipOutcome::Failed { reason, tx } => match tx {
            Some(tx) => anyhow::bail!("tip failed: {} ({})", reason, tx),
            None => anyhow::bail!("tip failed: {}", reason),
        },
    }
}
