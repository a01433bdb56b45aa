use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use hr_admin::api::{AppState, create_router};
use hr_admin::config::{ConfigLoader, Settings};
use hr_admin::error::AdminResult;
use hr_admin::report::ReportRenderer;
use hr_admin::service::HrService;
use hr_admin::store::Database;
use hr_admin::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "hr-admin",
    about = "HR administration backend: employees, contracts, transfers and leave",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Create or upgrade the database schema and exit
    Migrate,
    /// Render an employee's file information sheet
    Sheet(SheetArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct SheetArgs {
    /// Employee number
    employee_number: i64,
    /// Write the HTML to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Print date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> AdminResult<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    telemetry::init(&settings.log_level)?;

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => run_server(settings, args).await,
        Command::Migrate => run_migrate(&settings),
        Command::Sheet(args) => run_sheet(&settings, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn open_service(settings: &Settings) -> AdminResult<HrService> {
    let config = ConfigLoader::load(&settings.config_dir)?;
    let db = Database::open(&settings.database_path)?;
    Ok(HrService::new(db, config.config().clone()))
}

async fn run_server(mut settings: Settings, args: ServeArgs) -> AdminResult<()> {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    let addr = settings.socket_addr()?;

    let state = AppState::new(open_service(&settings)?, ReportRenderer::new()?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|err| {
        io::Error::new(err.kind(), format!("cannot bind {}: {}", addr, err))
    })?;

    info!(
        environment = ?settings.environment,
        %addr,
        database = %settings.database_path.display(),
        "HR administration backend ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_migrate(settings: &Settings) -> AdminResult<()> {
    let db = Database::open(&settings.database_path)?;
    info!(
        database = %settings.database_path.display(),
        version = db.schema_version()?,
        "Database schema is current"
    );
    Ok(())
}

fn run_sheet(settings: &Settings, args: SheetArgs) -> AdminResult<()> {
    let service = open_service(settings)?;
    let today = args.date.unwrap_or_else(|| Local::now().date_naive());
    let sheet = service.file_information_sheet(args.employee_number, today)?;
    let html = ReportRenderer::new()?.render_sheet(&sheet)?;

    match args.output {
        Some(path) => {
            fs::write(&path, html).map_err(|err| {
                io::Error::new(err.kind(), format!("cannot write {}: {}", path.display(), err))
            })?;
            info!(
                employee_number = args.employee_number,
                path = %path.display(),
                "File information sheet written"
            );
        }
        None => println!("{html}"),
    }
    Ok(())
}
