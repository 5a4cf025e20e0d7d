//! Command implementations for the bikeshare CLI
//!
//! This module wires logging, configuration and the dataset registry to the
//! interactive explorer and the one-shot `stats` and `raw` commands.

use crate::aggregator;
use crate::cli::args::{Args, Commands, OutputFormat, RawArgs, SelectionArgs, StatsArgs};
use crate::cli::input::{self, Action};
use crate::cli::render;
use crate::config::Config;
use crate::error::BikeshareError;
use crate::models::{City, FilterSpec};
use crate::registry::DatasetRegistry;
use crate::session::Session;
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Main command runner
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let config = load_configuration(&args)?;
    debug!("Loaded configuration: {:?}", config);

    let registry = DatasetRegistry::from_config(&config);

    match args.command.clone().unwrap_or(Commands::Explore) {
        Commands::Explore => run_interactive(&registry, &config),
        Commands::Stats(stats_args) => run_stats(&registry, &stats_args, !args.quiet),
        Commands::Raw(raw_args) => run_raw(&registry, &config, &raw_args, !args.quiet),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bikeshare_explorer={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Load configuration using layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    if let Some(data_dir) = &args.data_dir {
        debug!("--data-dir overrides data directory: {}", data_dir.display());
        config = config.with_data_dir(data_dir);
    }
    if let Some(page_size) = args.page_size {
        debug!("--page-size overrides page size: {}", page_size);
        config = config.with_page_size(page_size);
    }

    config.validate()?;
    info!("Using data directory: {}", config.data_dir.display());
    Ok(config)
}

/// Open a session, showing a spinner while the dataset loads
fn open_session(
    registry: &DatasetRegistry,
    city: City,
    filter: FilterSpec,
    show_progress: bool,
) -> crate::Result<Session> {
    let spinner = show_progress.then(|| loading_spinner(city));
    let session = Session::open(registry, city, filter);

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    session
}

fn loading_spinner(city: City) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Loading {} trip data...", city));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn open_selection(
    registry: &DatasetRegistry,
    selection: &SelectionArgs,
    show_progress: bool,
) -> Result<Session> {
    let city = registry.resolve(&selection.city)?;
    let filter = selection.filter()?;
    open_session(registry, city, filter, show_progress)
        .with_context(|| format!("Failed to load {} dataset", city))
}

/// One-shot statistic reports
fn run_stats(registry: &DatasetRegistry, args: &StatsArgs, show_progress: bool) -> Result<()> {
    let session = open_selection(registry, &args.selection, show_progress)?;

    let reports: Vec<_> = args
        .family
        .families()
        .into_iter()
        .map(|family| aggregator::report(&session, family))
        .collect();

    match args.format {
        OutputFormat::Human => {
            render::print_load_notice(session.summary());
            for report in &reports {
                render::print_report(report);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

/// One page of raw records
fn run_raw(
    registry: &DatasetRegistry,
    config: &Config,
    args: &RawArgs,
    show_progress: bool,
) -> Result<()> {
    let session = open_selection(registry, &args.selection, show_progress)?;
    let rows = args.rows.unwrap_or(config.page_size);
    let page = session.page(args.offset, rows);

    match args.format {
        OutputFormat::Human => {
            render::print_load_notice(session.summary());
            render::print_inputs(session.city(), session.filter(), session.view().len());
            render::print_records(&session.view().schema, page, args.offset);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(page)?);
        }
    }
    Ok(())
}

/// Menu-driven exploration until the user exits
fn run_interactive(registry: &DatasetRegistry, config: &Config) -> Result<()> {
    let cities = registry.available_cities();
    if cities.is_empty() {
        bail!(
            "No city datasets found in {}",
            registry.data_dir().display()
        );
    }

    render::clear_screen();
    render::print_welcome();

    let mut session = prompt_session(registry, &cities)?;

    loop {
        render::clear_screen();
        render::print_load_notice(session.summary());
        render::print_inputs(session.city(), session.filter(), session.view().len());

        match input::prompt_action()? {
            Action::ViewRawData => browse_raw(&session, config.page_size)?,
            Action::Analyze(family) => {
                render::clear_screen();
                render::print_report(&aggregator::report(&session, family));
                input::wait_for_acknowledgment("")?;
            }
            Action::NewInputs => {
                let city = input::prompt_city(&cities)?;
                let filter = input::prompt_filter()?;
                if city == session.city() {
                    session.apply_filter(filter);
                } else if let Err(e) = change_city(&mut session, registry, city, filter) {
                    warn!("Keeping {} after failed load: {}", session.city(), e);
                    println!("Error: {}", e);
                    input::wait_for_acknowledgment("")?;
                }
            }
            Action::Exit => {
                if input::prompt_confirmation("Are you sure you want to exit?", false)? {
                    info!("Exiting explorer");
                    return Ok(());
                }
            }
        }
    }
}

fn change_city(
    session: &mut Session,
    registry: &DatasetRegistry,
    city: City,
    filter: FilterSpec,
) -> crate::Result<()> {
    let spinner = loading_spinner(city);
    let result = session.change_city(registry, city, filter);
    spinner.finish_and_clear();
    result
}

/// Ask for a city and filter until a dataset loads
fn prompt_session(registry: &DatasetRegistry, cities: &[City]) -> Result<Session> {
    loop {
        let city = input::prompt_city(cities)?;
        let filter = input::prompt_filter()?;

        match open_session(registry, city, filter, true) {
            Ok(session) => return Ok(session),
            // Io and Polars failures end the session
            Err(e)
                if e.is_recoverable()
                    || matches!(e, BikeshareError::DatasetUnreadable { .. }) =>
            {
                error!("Failed to load {}: {}", city, e);
                println!("Error: {}", e);
                println!("Please choose another city.");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// First and last page of the view, then further pages on request
fn browse_raw(session: &Session, page_size: usize) -> Result<()> {
    let schema = &session.view().schema;
    let total = session.view().len();

    render::clear_screen();
    render::print_inputs(session.city(), session.filter(), total);

    println!("First {} rows:", page_size);
    render::print_records(schema, session.page(0, page_size), 0);
    println!("Last {} rows:", page_size);
    render::print_records(
        schema,
        session.tail(page_size),
        total.saturating_sub(page_size),
    );

    let mut offset = page_size;
    while offset < total {
        let prompt = format!("View another {} rows?", page_size);
        if !input::prompt_confirmation(&prompt, false)? {
            break;
        }
        render::print_records(schema, session.page(offset, page_size), offset);
        offset += page_size;
    }

    if offset >= total {
        input::wait_for_acknowledgment("No more records.")?;
    }
    Ok(())
}
