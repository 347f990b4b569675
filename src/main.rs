use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use leadbook::api::{Credentials, Lead, LeadApiClient};
use leadbook::config;
use leadbook::dashboard::DashboardState;
use leadbook::filters::{LeadColumn, LEAD_COLUMNS};
use leadbook::import;
use leadbook::logger::{self, LogLevel, LogTag};
use leadbook::session::{Session, SessionStore};

#[derive(Parser)]
#[command(name = "leadbook", version, about = "Lead management client")]
struct Cli {
    /// Configuration file (default: platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug-level log output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account and log in
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List leads, optionally filtered per column
    Leads {
        #[arg(long)]
        lead_id: Option<String>,
        #[arg(long)]
        lead_name: Option<String>,
        #[arg(long)]
        contact_information: Option<String>,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        interest_level: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        salesperson: Option<String>,
        /// Keep the list on screen, re-fetching every N seconds
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },
    /// Upload a CSV of leads
    Import {
        file: PathBuf,
        /// Parse the file locally and report what would be uploaded
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init(if cli.debug {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    match &cli.config {
        Some(path) => config::load_config_from_path(path).map_err(|e| anyhow!(e))?,
        None => config::load_config().map_err(|e| anyhow!(e))?,
    }

    let store = SessionStore::from_config();

    match cli.command {
        Command::Signup { username, password } => {
            let api = api_client()?;
            let session = api
                .create_account(&Credentials::new(username, password))
                .await?;
            store.save(&session).map_err(|e| anyhow!(e))?;
            println!("Account created. Logged in as {}.", session.username);
        }
        Command::Login { username, password } => {
            let api = api_client()?;
            let session = api.login(&Credentials::new(username, password)).await?;
            store.save(&session).map_err(|e| anyhow!(e))?;
            println!("Logged in as {}.", session.username);
        }
        Command::Logout => {
            store.clear().map_err(|e| anyhow!(e))?;
            logger::info(LogTag::Session, "session cleared");
            println!("Logged out.");
        }
        Command::Whoami => match store.load().map_err(|e| anyhow!(e))? {
            Some(session) => println!(
                "{} (logged in {})",
                session.username,
                session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => println!("Not logged in."),
        },
        Command::Leads {
            lead_id,
            lead_name,
            contact_information,
            source,
            interest_level,
            status,
            salesperson,
            watch,
        } => {
            let session = require_session(&store)?;
            let api = api_client()?;
            let (state, coordinator) = DashboardState::new(api, session);

            let flags: [(LeadColumn, Option<String>); 7] = [
                (LeadColumn::LeadId, lead_id),
                (LeadColumn::LeadName, lead_name),
                (LeadColumn::ContactInformation, contact_information),
                (LeadColumn::Source, source),
                (LeadColumn::InterestLevel, interest_level),
                (LeadColumn::Status, status),
                (LeadColumn::Salesperson, salesperson),
            ];
            for (column, value) in flags {
                if let Some(value) = value {
                    state.set_filter(column, value).await;
                }
            }

            match watch {
                None => {
                    let count = state.refresh_now().await?;
                    print_leads(&state.board.leads().await);
                    logger::debug(LogTag::Dashboard, &format!("{} leads displayed", count));
                }
                Some(secs) => {
                    if secs == 0 {
                        bail!("--watch interval must be at least 1 second");
                    }
                    tokio::spawn(coordinator.run());
                    state.request_refresh();
                    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
                    ticker.tick().await; // first tick is immediate
                    loop {
                        ticker.tick().await;
                        print_leads(&state.board.leads().await);
                        state.request_refresh();
                    }
                }
            }
        }
        Command::Import { file, dry_run } => {
            if dry_run {
                let name = file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                if !import::is_csv_file_name(name) {
                    bail!("'{}' is not a .csv file", file.display());
                }
                let bytes = std::fs::read(&file)
                    .with_context(|| format!("cannot read '{}'", file.display()))?;
                let preview = import::preview(&bytes)?;
                println!(
                    "{}: {} row(s), {} header(s)",
                    file.display(),
                    preview.records,
                    preview.headers.len()
                );
                if !preview.has_expected_headers() {
                    println!("Missing headers: {}", preview.missing_headers.join(", "));
                }
                return Ok(());
            }

            let session = require_session(&store)?;
            let api = api_client()?;
            let (state, _coordinator) = DashboardState::new(api, session);

            let summary = state.import(&file).await?;
            println!(
                "Imported {} lead(s), {} rejected by the server.",
                summary.success_count, summary.error_count
            );

            // Re-fetch so the import is reflected in what we report
            let total = state.refresh_now().await?;
            println!("The list now has {} lead(s).", total);
        }
    }

    Ok(())
}

fn api_client() -> Result<LeadApiClient> {
    LeadApiClient::from_config().map_err(|e| anyhow!(e))
}

fn require_session(store: &SessionStore) -> Result<Session> {
    store
        .load()
        .map_err(|e| anyhow!(e))?
        .ok_or_else(|| anyhow!("not logged in - run `leadbook login` first"))
}

fn print_leads(leads: &[Lead]) {
    if leads.is_empty() {
        println!("No leads.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(LEAD_COLUMNS.iter().map(|col| Cell::new(col.label())));

    for lead in leads {
        table.add_row(vec![
            &lead.lead_id,
            &lead.lead_name,
            &lead.contact_information,
            &lead.source,
            &lead.interest_level,
            &lead.status,
            &lead.salesperson,
        ]);
    }

    println!("{table}");
    println!("{} lead(s)", leads.len());
}
