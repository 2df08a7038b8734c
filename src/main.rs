// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session Gate CLI.
//!
//! ```bash
//! session-gate login -n ana -p secret
//! session-gate navigate /admin
//! session-gate whoami
//! session-gate logout
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;

use session_gate::config::{GateConfig, AUTH_BASE_URL_ENV, PROFILE_DIR_ENV};
use session_gate::router::RouteMatch;
use session_gate::{telemetry, SessionGate};

#[derive(Parser)]
#[command(name = "session-gate")]
#[command(about = "Client session lifecycle and role-based route authorization", long_about = None)]
#[command(version)]
struct Cli {
    /// Profile directory holding the session
    #[arg(long, global = true, env = PROFILE_DIR_ENV)]
    profile_dir: Option<PathBuf>,

    /// Base URL of the credential API
    #[arg(long, global = true, env = AUTH_BASE_URL_ENV)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        name: String,

        #[arg(short, long, env = "SESSION_GATE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Register a user account, then log in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "SESSION_GATE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Drop the stored session
    Logout,

    /// Show the stored session
    Whoami,

    /// Resolve a navigation through the route guard
    Navigate {
        /// Destination path (e.g. /admin)
        path: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match GateConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    telemetry::init(config.log_format);

    if let Some(dir) = cli.profile_dir {
        config = config.with_profile_dir(dir);
    }
    if let Some(url) = cli.base_url.as_deref() {
        config = match config.with_base_url(url) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "Invalid base URL");
                return ExitCode::FAILURE;
            }
        };
    }

    let gate = match SessionGate::open(&config) {
        Ok(gate) => gate,
        Err(e) => {
            error!(error = %e, profile_dir = %config.profile_dir.display(), "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::Login { name, password } => match gate.auth.login(&name, &password).await {
            Some(session) => {
                println!("Logged in as {} ({})", session.identity, session.role);
                ExitCode::SUCCESS
            }
            None => {
                println!("Login failed");
                ExitCode::FAILURE
            }
        },
        Commands::Register {
            name,
            email,
            password,
        } => match gate.auth.register(&name, &email, &password).await {
            Some(session) => {
                println!("Registered and logged in as {} ({})", session.identity, session.role);
                ExitCode::SUCCESS
            }
            None => {
                println!("Registration failed");
                ExitCode::FAILURE
            }
        },
        Commands::Logout => {
            gate.auth.logout();
            println!("Logged out");
            ExitCode::SUCCESS
        }
        Commands::Whoami => match gate.auth.current_user() {
            Some(session) => {
                println!("{} ({})", session.identity, session.role);
                ExitCode::SUCCESS
            }
            None => {
                println!("Not logged in");
                ExitCode::FAILURE
            }
        },
        Commands::Navigate { path } => match gate.router.navigate(&path) {
            Ok(nav) => {
                for hop in &nav.redirects {
                    println!("-> {hop}");
                }
                match nav.route {
                    RouteMatch::View(view) => println!("{} ({view:?})", nav.path),
                    RouteMatch::NotFound => println!("{} (not found)", nav.path),
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(error = %e, "Navigation failed");
                ExitCode::FAILURE
            }
        },
    }
}
