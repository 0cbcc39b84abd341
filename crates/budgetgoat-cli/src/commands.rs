use crate::args::{Cli, Commands, PocketCommand, TxCommand};
use crate::config::{self, Config};
use crate::handlers;
use crate::types::OutputFormat;
use anyhow::{Context, Result, bail};
use budgetgoat_diagnostics::{DiagnosticsLogger, LoggerConfig};
use budgetgoat_ledger::Database;
use once_cell::sync::OnceCell;
use std::path::Path;

/// Process-lifetime logger. Constructed once at the entry point from the
/// loaded config; everything below `run` receives it by reference.
static DIAGNOSTICS: OnceCell<DiagnosticsLogger> = OnceCell::new();

fn init_logger(config: &Config) -> &'static DiagnosticsLogger {
    DIAGNOSTICS.get_or_init(|| {
        DiagnosticsLogger::new(
            LoggerConfig::default()
                .with_max_local_logs(config.logging.max_local_logs)
                .with_console_logging(config.logging.console),
        )
    })
}

pub fn run(cli: Cli) -> Result<()> {
    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref())?;

    // A corrupt config degrades to defaults; `doctor` surfaces the parse
    // failure rather than every command dying on it.
    let (config, config_error) = match Config::load_from(&data_dir.join("config.toml")) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    let logger = init_logger(&config);
    if let Some(err) = &config_error {
        logger.log_warning("Config", format!("using defaults: {:#}", err), None);
    }

    let format = cli.format;
    let dump_diagnostics = cli.diagnostics;

    let Some(command) = cli.command else {
        show_guidance(&data_dir);
        return Ok(());
    };

    let result = dispatch(command, &format, &data_dir, logger);

    if let Err(err) = &result {
        logger.log_error("Cli", err.as_ref(), None, None);
    }
    if dump_diagnostics {
        eprintln!("{}", logger.export_logs());
    }

    result
}

fn dispatch(
    command: Commands,
    format: &OutputFormat,
    data_dir: &Path,
    logger: &DiagnosticsLogger,
) -> Result<()> {
    match command {
        Commands::Init { refresh } => handlers::init::handle(data_dir, refresh, logger, format),

        Commands::Pocket { command } => {
            let db = open_db(data_dir)?;
            match command {
                PocketCommand::Add { name, target } => {
                    handlers::pocket::add(&db, logger, &name, target.as_deref(), format)
                }
                PocketCommand::List => handlers::pocket::list(&db, format),
                PocketCommand::Remove { pocket } => {
                    handlers::pocket::remove(&db, logger, &pocket, format)
                }
                PocketCommand::Target { pocket, target } => {
                    handlers::pocket::set_target(&db, logger, &pocket, &target, format)
                }
            }
        }

        Commands::Tx { command } => {
            let db = open_db(data_dir)?;
            match command {
                TxCommand::Add {
                    pocket,
                    amount,
                    withdraw,
                    note,
                    category,
                } => handlers::tx::add(
                    &db,
                    logger,
                    &pocket,
                    &amount,
                    withdraw,
                    note,
                    category,
                    format,
                ),
                TxCommand::List {
                    pocket,
                    month,
                    limit,
                } => handlers::tx::list(&db, pocket.as_deref(), month.as_deref(), limit, format),
                TxCommand::Remove { id } => handlers::tx::remove(&db, logger, &id, format),
                TxCommand::Export { output } => {
                    handlers::tx::export(&db, data_dir, logger, output.as_deref())
                }
            }
        }

        Commands::Report { month } => {
            let db = open_db(data_dir)?;
            handlers::report::handle(&db, month.as_deref(), format)
        }

        Commands::Prefs { command } => handlers::prefs::handle(data_dir, logger, command, format),

        Commands::Doctor => handlers::doctor::handle(data_dir, logger, format),
    }
}

fn open_db(data_dir: &Path) -> Result<Database> {
    if !data_dir.exists() {
        bail!(
            "data directory {} not found; run `budgetgoat init` first",
            data_dir.display()
        );
    }

    let db = Database::open(&data_dir.join("budgetgoat.db"))
        .with_context(|| format!("opening ledger database in {}", data_dir.display()))?;
    Ok(db)
}

fn show_guidance(data_dir: &Path) {
    println!("budgetgoat: track savings pockets and transactions");
    println!();
    if data_dir.exists() {
        println!("Data directory: {}", data_dir.display());
    } else {
        println!("Not initialized yet. Run `budgetgoat init` to get started.");
    }
    println!();
    println!("Common commands:");
    println!("  budgetgoat pocket add <name> [--target 500.00]");
    println!("  budgetgoat tx add <pocket> 25.00 [--withdraw] [--category food]");
    println!("  budgetgoat report");
    println!("  budgetgoat doctor");
    println!();
    println!("Run `budgetgoat --help` for the full command list.");
}
