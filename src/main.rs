use std::path::PathBuf;
#[cfg(feature = "web")]
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use salary_dashboard::{
    analysis::{Analyzer, Session},
    config::AppConfig,
    io::{self, EXPORT_FILE_NAME},
    models::{Dataset, FilterSelection},
    visualization::{format_filter_options, format_records_table, print_dashboard, print_kpi_table},
    DataSource, RowPolicy,
};

#[derive(Parser)]
#[command(
    name = "salary-dashboard",
    about = "Salary Dashboard - Filter and summarize data-industry salaries",
    version,
    author
)]
struct Cli {
    /// TOML configuration file (defaults to ./salary-dashboard.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "salary_dashboard=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Path or http(s) URL of the salary CSV
    #[arg(short, long)]
    source: Option<String>,

    /// What to do with malformed rows: strict or lenient
    #[arg(long)]
    row_policy: Option<RowPolicy>,
}

#[derive(Args)]
struct FilterArgs {
    /// Years to keep (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    year: Option<Vec<i32>>,

    /// Seniority levels to keep
    #[arg(long, value_delimiter = ',')]
    seniority: Option<Vec<String>>,

    /// Contract types to keep
    #[arg(long, value_delimiter = ',')]
    contract: Option<Vec<String>>,

    /// Company sizes to keep
    #[arg(long, value_delimiter = ',')]
    company_size: Option<Vec<String>>,
}

impl FilterArgs {
    /// Omitted flags leave their dimension unconstrained.
    fn to_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::unconstrained();
        if let Some(years) = &self.year {
            selection = selection.with_years(years.iter().copied());
        }
        if let Some(levels) = &self.seniority {
            selection = selection.with_experience_levels(levels.iter().cloned());
        }
        if let Some(contracts) = &self.contract {
            selection = selection.with_contract_types(contracts.iter().cloned());
        }
        if let Some(sizes) = &self.company_size {
            selection = selection.with_company_sizes(sizes.iter().cloned());
        }
        selection
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable values of each filter
    Options {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Display the headline salary metrics
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Display every dashboard section as tables and text charts
    Report {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Number of detailed records to show
        #[arg(short, long, default_value = "20")]
        rows: usize,
    },

    /// Write the filtered records to a CSV file
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output file path
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Start the web API server
    #[cfg(feature = "web")]
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(config: &AppConfig, args: &SourceArgs) -> Result<Dataset> {
    let source: DataSource = match &args.source {
        Some(location) if location.trim().is_empty() => {
            bail!("--source must not be empty")
        }
        Some(location) => match location.parse() {
            Ok(source) => source,
            Err(never) => match never {},
        },
        None => config.source.data_source(),
    };
    let mut options = config.source.load_options();
    if let Some(policy) = args.row_policy {
        options.row_policy = policy;
    }

    let dataset = io::load_dataset(&source, &options)?;
    if dataset.skipped_rows() > 0 {
        eprintln!(
            "{}: skipped {} malformed row(s)",
            "Warning".yellow(),
            dataset.skipped_rows()
        );
    }
    Ok(dataset)
}

fn session(config: &AppConfig, args: &SourceArgs, filters: &FilterArgs) -> Result<Session> {
    let dataset = load(config, args)?;
    let mut session = Session::new(dataset.into(), config.dashboard.clone());
    session.set_selection(filters.to_selection());
    Ok(session)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());
    let config = AppConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Options { source } => {
            let dataset = load(&config, &source)?;
            print!("{}", format_filter_options(&dataset.filter_options()));
        }

        Commands::Summary { source, filters } => {
            let session = session(&config, &source, &filters)?;
            let view = session.view();
            println!(
                "\n{}",
                format!(
                    "Salary Summary: {} ({} of {} records)",
                    session.dataset().name,
                    view.len(),
                    session.dataset().len()
                )
                .bold()
                .cyan()
            );
            print_kpi_table(&Analyzer::new(&view).kpis());
        }

        Commands::Report {
            source,
            filters,
            rows,
        } => {
            if rows == 0 {
                bail!("--rows must be at least 1");
            }
            let session = session(&config, &source, &filters)?;
            println!(
                "\n{}",
                format!("Salary Dashboard: {}", session.dataset().name)
                    .bold()
                    .cyan()
            );
            print_dashboard(&session.recompute());
            print!("{}", format_records_table(&session.records(), rows));
        }

        Commands::Export {
            source,
            filters,
            output,
        } => {
            let session = session(&config, &source, &filters)?;
            let view = session.view();
            io::write_csv(&view, &output)?;
            println!(
                "{} Exported {} records -> {}",
                "Success:".green().bold(),
                view.len(),
                output.display()
            );
        }

        #[cfg(feature = "web")]
        Commands::Serve { source, host, port } => {
            let dataset = load(&config, &source)?;
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let state = salary_dashboard::web::AppState::new(
                Arc::new(dataset),
                config.dashboard.clone(),
                &server,
            );
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(salary_dashboard::web::start_server(
                state,
                &server.host,
                server.port,
            ))?;
        }
    }

    Ok(())
}
