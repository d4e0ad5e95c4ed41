//! # ProHub - project and task dashboard
//!
//! A terminal dashboard for projects, personal tasks and a notification feed,
//! backed by an in-memory store seeded with demo data, plus a placeholder REST
//! server.
//!
//! ## Key Features
//!
//! - **Snapshot store**: every change publishes a new immutable state version,
//!   so earlier snapshots stay valid and the last changes can be undone
//! - **Referential integrity**: tasks always point at an existing project and
//!   assignee; project task counters follow task adds, moves and deletes
//! - **Search and filters**: case-insensitive search across names, tags and
//!   people; "my tasks" filtered by status
//! - **Terminal dashboard**: login/signup, projects, my tasks, notifications,
//!   light and dark themes
//! - **Stub server**: static JSON endpoints for a future backend
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the dashboard
//! prohub ui
//!
//! # Skip the login screen
//! prohub ui --email john@example.com --password secret
//!
//! # List projects and tasks
//! prohub projects --search react
//! prohub tasks --assignee john@example.com --status progress
//!
//! # Run the stub server on $PORT (default 5000)
//! prohub serve
//! ```
//!
//! Projects and tasks are not persisted. The theme preference is kept in
//! `~/.prohub/preferences.json` and the dashboard logs to `~/.prohub/prohub.log`.

use clap::Parser;

pub mod auth;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod display;
pub mod error;
pub mod fields;
pub mod ids;
pub mod logging;
pub mod notification;
pub mod prefs;
pub mod project;
pub mod search;
pub mod seed;
pub mod server;
pub mod stats;
pub mod store;
pub mod task;
pub mod user;
pub mod validation;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod form;
    pub mod input;
    pub mod login;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::Commands;
use config::Config;
use logging::LogTarget;

fn main() {
    let cli = Cli::parse();

    let config = match Config::resolve(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to prepare data directory: {e}");
            std::process::exit(1);
        }
    };

    // The dashboard owns the terminal, so it logs to a file.
    let log_path = config.log_path();
    let target = match cli.command {
        Commands::Ui { .. } => LogTarget::File(&log_path),
        _ => LogTarget::Stderr,
    };
    let _guard = match logging::init(&config.log_level, target) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = cmd::run(cli.command, &config) {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
