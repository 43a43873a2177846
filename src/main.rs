//! The REST API server binary for ledgerly.

use std::{
    env,
    net::SocketAddr,
    process::ExitCode,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use ledgerly::{
    AppState, build_router, graceful_shutdown,
    models::{PasswordHash, Username},
    stores::{
        UserStore,
        sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
    },
};

/// The REST API server for ledgerly.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Create a user with this username on startup if it does not exist.
    #[arg(long, requires = "initial_password")]
    initial_username: Option<String>,

    /// The password for the initial user.
    #[arg(long, requires = "initial_username")]
    initial_password: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let secret = match env::var("SECRET") {
        Ok(secret) => secret,
        Err(_) => {
            tracing::error!("The environment variable 'SECRET' must be set.");
            return ExitCode::FAILURE;
        }
    };

    let connection = match Connection::open(&args.db_path) {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not open the database at {}: {error}", args.db_path);
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = ledgerly::db::initialize(&connection) {
        tracing::error!("Could not initialize the database: {error}");
        return ExitCode::FAILURE;
    }

    let connection = Arc::new(Mutex::new(connection));
    let mut user_store = SQLiteUserStore::new(connection.clone());

    if let (Some(username), Some(password)) = (&args.initial_username, &args.initial_password) {
        seed_initial_user(&mut user_store, username, password);
    }

    let state = AppState::new(
        &secret,
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection.clone()),
        user_store,
    );

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Create the initial user account if it does not already exist.
///
/// Failures are logged but do not stop the server: an existing username
/// means the account was seeded on an earlier run.
fn seed_initial_user(user_store: &mut SQLiteUserStore, username: &str, password: &str) {
    let username = match Username::new(username) {
        Ok(username) => username,
        Err(error) => {
            tracing::error!("Could not seed the initial user: {error}");
            return;
        }
    };

    let password_hash = match PasswordHash::new(password, PasswordHash::DEFAULT_COST) {
        Ok(password_hash) => password_hash,
        Err(error) => {
            tracing::error!("Could not seed the initial user: {error}");
            return;
        }
    };

    match user_store.create(username, password_hash) {
        Ok(user) => tracing::info!("Created the initial user {}.", user.username()),
        Err(ledgerly::Error::DuplicateUsername) => {
            tracing::debug!("The initial user already exists.")
        }
        Err(error) => tracing::error!("Could not seed the initial user: {error}"),
    }
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(filter::LevelFilter::INFO))
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our
        // specific logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
