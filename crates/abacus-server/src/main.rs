// Copyright (c) 2025 Abacus Contributors. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Abacus dataset server binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use abacus_server::{create_app_state, create_router};

mod version;

/// Abacus server - HTTP server for the Abacus dataset store.
#[derive(Parser, Debug)]
#[command(
	name = "abacus-server",
	about = "Access-controlled dataset storage server",
	version
)]
struct Args {
	/// Path to the TOML config file (defaults to /etc/abacus/server.toml)
	#[arg(long, env = "ABACUS_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for abacus-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
	/// Hash a password for a config file user entry
	HashPassword {
		/// The plaintext password to hash
		password: String,
	},
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	// Handle subcommands that should not start the server
	match args.command {
		Some(Command::Version) => {
			println!("{}", version::format_version_info());
			return Ok(());
		}
		Some(Command::HashPassword { password }) => {
			let hash = abacus_server_auth::hash_password(&password)
				.map_err(|e| format!("failed to hash password: {e}"))?;
			println!("{hash}");
			return Ok(());
		}
		None => {}
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = match &args.config {
		Some(path) => abacus_server_config::load_config_with_file(path)?,
		None => abacus_server_config::load_config()?,
	};

	// Setup tracing
	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
			host = %config.http.host,
			port = config.http.port,
			base_dir = %config.storage.base_dir.display(),
			"starting abacus-server"
	);

	let state = create_app_state(&config);

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	// Run server with graceful shutdown
	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
