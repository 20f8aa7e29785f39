//! ResQTrack dashboard
//!
//! Headless entry point: initializes the data dashboard, optionally runs one
//! action given on the command line and prints the resulting view.

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use anyhow::{bail, Context};
use tracing::{error, info};
use url::Url;

use resqtrack::{
    config::Settings,
    dashboard::{DashboardEvent, DataDashboard, SelectedFile},
    models::Credentials,
    services::{ServiceFactory, UiOptions},
    ui::{ButtonRegistry, ConfirmDialog, Downloader, LoadingOverlay, ToastManager, UiHooks},
    utils::logging,
};

const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

const USAGE: &str = "\
Usage: resqtrack [COMMAND]

Commands:
  (none)                     Load and print the dashboard
  login <email> <password> [role]
  logout
  search <query>
  filter <service-type>
  import <dataset> <file>
  export <dataset>
  export-all
  delete-file <filename>
  clear <dataset>
  delete-entry <type> <id>
  help";

/// Action requested on the command line
enum Command {
    Show,
    Help,
    Login {
        email: String,
        password: String,
        role: Option<String>,
    },
    Logout,
    Event(DashboardEvent),
    Import {
        dataset: String,
        path: String,
    },
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let command = match args.as_slice() {
            [] => Command::Show,
            ["help" | "--help" | "-h"] => Command::Help,
            ["login", email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
                role: None,
            },
            ["login", email, password, role] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
                role: Some(role.to_string()),
            },
            ["logout"] => Command::Logout,
            ["search", query @ ..] => Command::Event(DashboardEvent::Search(query.join(" "))),
            ["filter", service_type] => Command::Event(DashboardEvent::FilterServiceType(service_type.to_string())),
            ["import", dataset, path] => Command::Import {
                dataset: dataset.to_string(),
                path: path.to_string(),
            },
            ["export", dataset] => Command::Event(DashboardEvent::Export(dataset.to_string())),
            ["export-all"] => Command::Event(DashboardEvent::ExportAll),
            ["delete-file", filename] => Command::Event(DashboardEvent::DeleteFile(filename.to_string())),
            ["clear", dataset] => Command::Event(DashboardEvent::ClearData(dataset.to_string())),
            ["delete-entry", entry_type, id] => Command::Event(DashboardEvent::DeleteEntry {
                entry_type: entry_type.to_string(),
                id: id.parse().with_context(|| format!("invalid entry id: {}", id))?,
            }),
            _ => bail!("unrecognized command\n\n{}", USAGE),
        };

        Ok(command)
    }
}

/// Asks on the terminal; anything but y/yes declines
struct ConsoleConfirm;

impl ConfirmDialog for ConsoleConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Prints download links instead of saving files
struct ConsoleDownloader;

impl Downloader for ConsoleDownloader {
    fn download(&self, url: &Url, filename: &str) {
        println!("Download {} from {}", filename, url);
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = ?e, "Unhandled error");
        eprintln!("{}", UNEXPECTED_ERROR_MESSAGE);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", resqtrack::info());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    if let Command::Help = command {
        println!("{}", USAGE);
        return Ok(());
    }

    // Initialize UI collaborators
    let toasts = Arc::new(ToastManager::new());
    let overlay = Arc::new(LoadingOverlay::new());
    let buttons = Arc::new(ButtonRegistry::new());
    let ui = UiHooks::new(toasts.clone(), overlay.clone(), buttons);

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(&settings, ui)?;

    let dashboard = DataDashboard::new(
        &services,
        settings.dashboard.clone(),
        Arc::new(ConsoleConfirm),
        Arc::new(ConsoleDownloader),
    );

    match &command {
        Command::Login { email, password, role } => {
            let mut credentials = Credentials::new(email.as_str(), password.as_str());
            if let Some(role) = role {
                credentials = credentials.with_role(role.as_str());
            }
            services.session.login(&credentials, UiOptions::default()).await?;
        }
        Command::Logout => services.session.logout()?,
        _ => {}
    }

    dashboard.init().await;

    match command {
        Command::Event(event) => {
            dashboard.dispatch(event).await;
        }
        Command::Import { dataset, path } => {
            let file = SelectedFile::from_path(&path)
                .await
                .with_context(|| format!("failed to read {}", path))?;
            dashboard
                .dispatch(DashboardEvent::Import { dataset, file: Some(file) })
                .await;
        }
        _ => {}
    }

    println!("{}", dashboard.state());

    for toast in toasts.drain() {
        println!("[{}] {}", toast.kind, toast.message);
    }

    info!(loading = ?overlay.counts(), "ResQTrack dashboard finished");
    Ok(())
}
