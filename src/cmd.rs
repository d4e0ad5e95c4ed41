//! Command implementations for the CLI interface.
//!
//! The listing commands work against a freshly seeded store, the same data the
//! dashboard opens with. Only the theme survives between runs.

use clap::Subcommand;
use clap_complete::{generate, Shell};
use chrono::Local;
use tracing::{info, warn};

use crate::auth::AuthGate;
use crate::config::{Config, Environment, DEFAULT_HOST, DEFAULT_PORT};
use crate::display::*;
use crate::error::{Result, StoreError};
use crate::fields::*;
use crate::prefs::{JsonPreferences, PreferenceStore};
use crate::search::my_tasks;
use crate::server::{self, ServerConfig};
use crate::stats::{project_stats, task_stats};
use crate::store::Store;
use crate::task::Task;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the terminal dashboard.
    Ui {
        /// Sign in as this user instead of showing the login screen.
        #[arg(long, requires = "password")]
        email: Option<String>,
        /// Password for --email (any non-empty value is accepted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Run the placeholder REST server.
    Serve {
        /// Address to bind.
        #[arg(long, env = "PROHUB_HOST", default_value = DEFAULT_HOST)]
        host: String,
        /// Port to listen on.
        #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Deployment mode; production hides error details.
        #[arg(long, env = "PROHUB_ENV", value_enum, default_value_t = Environment::Development)]
        environment: Environment,
    },

    /// List projects with dashboard statistics.
    Projects {
        /// Case-insensitive search over name, tags and manager.
        #[arg(long, short)]
        search: Option<String>,
        /// Only projects with this priority.
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        /// Only projects with this status.
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
    },

    /// List tasks with dashboard statistics.
    Tasks {
        /// Case-insensitive search over name, tags, assignee and project.
        #[arg(long, short)]
        search: Option<String>,
        /// Only tasks assigned to the user with this email.
        #[arg(long)]
        assignee: Option<String>,
        /// Only tasks with this status.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
    },

    /// Show the notification feed, newest first.
    Notifications {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
    },

    /// Show or change the saved colour theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the saved theme.
    Show,
    /// Switch between light and dark.
    Toggle,
    /// Save a specific theme.
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
}

/// Dispatch a parsed command.
pub fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Ui { email, password } => cmd_ui(config, email, password),
        Commands::Serve { host, port, environment } => cmd_serve(host, port, environment),
        Commands::Projects { search, priority, status } => {
            cmd_projects(search, priority, status);
            Ok(())
        }
        Commands::Tasks { search, assignee, status } => cmd_tasks(search, assignee, status),
        Commands::Notifications { unread } => {
            cmd_notifications(unread);
            Ok(())
        }
        Commands::Theme { action } => cmd_theme(config, action.unwrap_or(ThemeAction::Show)),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Launch the terminal dashboard.
pub fn cmd_ui(config: &Config, email: Option<String>, password: Option<String>) -> Result<()> {
    let store = Store::demo(Box::new(JsonPreferences::new(config.data_dir())));
    let mut auth = AuthGate::new();
    if let (Some(email), Some(password)) = (email, password) {
        if let Err(e) = auth.login(&store, &email, &password) {
            warn!(%email, "Sign-in from the command line failed: {e}");
        }
    }
    run_tui(store, auth)
}

/// Run the stub server until Ctrl+C.
pub fn cmd_serve(host: String, port: u16, environment: Environment) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(ServerConfig { host, port, environment }))
}

/// List projects matching the filters.
pub fn cmd_projects(search: Option<String>, priority: Option<Priority>, status: Option<ProjectStatus>) {
    let store = Store::in_memory();
    let state = store.state();
    let projects: Vec<_> = store
        .search_projects(search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|p| priority.map_or(true, |pr| p.priority == pr))
        .filter(|p| status.map_or(true, |s| p.status == s))
        .collect();

    print_project_stats(&project_stats(&state.projects));
    println!();
    print_projects_table(state, &projects, Local::now().date_naive());
}

/// List tasks matching the filters.
pub fn cmd_tasks(search: Option<String>, assignee: Option<String>, status: Option<TaskStatus>) -> Result<()> {
    let store = Store::in_memory();
    let state = store.state();
    let query = search.as_deref().unwrap_or("");
    let now = Local::now().naive_local();

    let (tasks, scope): (Vec<&Task>, Vec<&Task>) = match assignee {
        Some(email) => {
            let user = state
                .user_by_email(&email)
                .ok_or(StoreError::UnknownUser(email.clone()))?;
            let scope = state.tasks.iter().filter(|t| t.assignee_id == user.id).collect();
            (my_tasks(state, &user.id, query, status), scope)
        }
        None => {
            let tasks = store
                .search_tasks(query)
                .into_iter()
                .filter(|t| status.map_or(true, |s| t.status == s))
                .collect();
            (tasks, state.tasks.iter().collect())
        }
    };

    print_task_stats(&task_stats(scope, now));
    println!();
    print_tasks_table(state, &tasks, now);
    Ok(())
}

/// Print the notification feed.
pub fn cmd_notifications(unread: bool) {
    let store = Store::in_memory();
    let notifications = if unread {
        store.unread_notifications()
    } else {
        store.state().notifications.iter().collect()
    };
    if notifications.is_empty() {
        println!("No notifications.");
        return;
    }
    print_notifications(&notifications);
}

/// Show, toggle or set the persisted theme.
pub fn cmd_theme(config: &Config, action: ThemeAction) -> Result<()> {
    let prefs = JsonPreferences::new(config.data_dir());
    match action {
        ThemeAction::Show => {
            let theme = prefs.load_theme().unwrap_or_default();
            println!("{}", format_theme(theme));
        }
        ThemeAction::Toggle => {
            let mut store = Store::demo(Box::new(prefs));
            let theme = store.toggle_theme();
            info!(?theme, "Theme toggled from the command line");
            println!("Theme set to {}", format_theme(theme));
        }
        ThemeAction::Set { theme } => {
            let mut store = Store::demo(Box::new(prefs));
            store.set_theme(theme);
            println!("Theme set to {}", format_theme(theme));
        }
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

