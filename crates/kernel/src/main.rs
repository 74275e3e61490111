//! Cornice Kernel
//!
//! Serves role/permission-filtered navigation over HTTP, or renders it once
//! from the command line.
//!
//! Usage:
//!   cornice serve
//!   cornice render --menu sidebar --role moderator
//!   cornice check --path /settings/roles --permission role:management:view

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cornice_kernel::{AppState, AuthorizationContext, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Print a menu as a caller would see it, as JSON.
    Render {
        /// Menu name.
        #[arg(long, default_value = "sidebar")]
        menu: String,
        #[command(flatten)]
        caller: CallerArgs,
    },
    /// Decide whether a caller may open a page.
    Check {
        /// Page path, e.g. /settings/roles.
        #[arg(long)]
        path: String,
        #[command(flatten)]
        caller: CallerArgs,
    },
}

/// Roles and permissions to evaluate as.
#[derive(Args, Debug)]
struct CallerArgs {
    /// Role held by the caller (repeatable).
    #[arg(long = "role")]
    roles: Vec<String>,
    /// Permission held by the caller (repeatable).
    #[arg(long = "permission")]
    permissions: Vec<String>,
}

impl CallerArgs {
    fn context(&self) -> AuthorizationContext {
        AuthorizationContext::new(self.roles.iter().cloned(), self.permissions.iter().cloned())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    let state = AppState::new(&config).context("failed to initialize application state")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, state).await,
        Command::Render { menu, caller } => {
            let items = state
                .registry()
                .filtered(&menu, &caller.context())
                .with_context(|| format!("unknown menu '{menu}'"))?;
            println!("{}", serde_json::to_string_pretty(&*items)?);
            Ok(())
        }
        Command::Check { path, caller } => {
            let decision = state.guards().decide(&path, &caller.context());
            println!("{}", serde_json::to_string_pretty(&decision)?);
            Ok(())
        }
    }
}

async fn serve(config: &Config, state: AppState) -> Result<()> {
    info!(
        port = config.port,
        menus = state.registry().len(),
        guards = state.guards().len(),
        empty_groups = %config.empty_group_policy,
        "Starting Cornice kernel"
    );

    let app = cornice_kernel::routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    // Logs go to stderr so `render`/`check` output stays pipeable.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
