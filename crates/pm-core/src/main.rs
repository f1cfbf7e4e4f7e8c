//! procman - interactive process list, filter, and kill.
//!
//! Entry point handling:
//! - the interactive list (`run`, the default)
//! - one-shot listing and termination for scripts
//! - shell completions

use clap::{Args, CommandFactory, Parser, Subcommand};
use pm_common::{Error, OutputFormat, ProcessId, StructuredError};
use pm_core::action::{KillSignal, SignalTerminator, Terminator};
use pm_core::collect::{OwnerFilter, ProcfsSource};
use pm_core::config::{RunConfig, DEFAULT_BLINK_MS};
use pm_core::exit_codes::ExitCode;
use pm_core::list::filter;
use pm_core::logging::{event_names, generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use pm_core::output::{render_kill, render_list, KillReport, ListReport};
use std::path::PathBuf;

/// Interactive process list with live filtering and one-click kill
#[derive(Parser)]
#[command(name = "procman")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format for non-interactive commands
    #[arg(long, short = 'f', global = true, default_value = "md")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log line format
    #[arg(long, global = true, env = "PROCMAN_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive process list (default)
    Run(RunArgs),

    /// Print the filtered process list and exit
    List(ListArgs),

    /// Send a termination signal to one process
    Kill(KillArgs),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Signal the kill button sends
    #[arg(long, env = "PROCMAN_SIGNAL", default_value = "kill", value_parser = parse_signal)]
    signal: KillSignal,

    /// Record kill requests without signalling
    #[arg(long)]
    dry_run: bool,

    /// Cursor blink period in milliseconds (0 disables blinking)
    #[arg(long, env = "PROCMAN_BLINK_MS", default_value_t = DEFAULT_BLINK_MS)]
    blink_ms: u64,

    /// Show every user's processes
    #[arg(long)]
    all_users: bool,

    /// Write logs here; the interactive list logs nothing otherwise
    #[arg(long, env = "PROCMAN_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl From<&RunArgs> for RunConfig {
    fn from(args: &RunArgs) -> Self {
        RunConfig {
            signal: args.signal,
            dry_run: args.dry_run,
            blink_ms: args.blink_ms,
            all_users: args.all_users,
            log_file: args.log_file.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring filter
    #[arg(long)]
    query: Option<String>,

    /// Show every user's processes
    #[arg(long)]
    all_users: bool,
}

#[derive(Args, Debug)]
struct KillArgs {
    /// Target process id
    pid: u32,

    /// Signal to send
    #[arg(long, env = "PROCMAN_SIGNAL", default_value = "kill", value_parser = parse_signal)]
    signal: KillSignal,
}

/// `procman` with no subcommand: run options from env and defaults only.
#[derive(Parser)]
#[command(name = "procman")]
struct BareRun {
    #[command(flatten)]
    args: RunArgs,
}

impl RunArgs {
    fn from_env() -> Result<Self, Error> {
        BareRun::try_parse_from(["procman"])
            .map(|bare| bare.args)
            .map_err(|e| Error::InvalidArgument(e.to_string()))
    }
}

fn parse_signal(raw: &str) -> Result<KillSignal, String> {
    raw.parse()
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let command = match cli.command {
        Some(command) => command,
        None => match RunArgs::from_env() {
            Ok(args) => Commands::Run(args),
            Err(err) => {
                report_error(&cli.global, &err);
                std::process::exit(ExitCode::for_error(&err).as_i32());
            }
        },
    };
    let log_config = log_config_for(&cli.global, &command);
    if let Err(err) = init_logging(&log_config) {
        let err = Error::Io(err);
        report_error(&cli.global, &err);
        std::process::exit(ExitCode::for_error(&err).as_i32());
    }

    let run_id = generate_run_id();
    let span = tracing::info_span!("run", run_id = %run_id, command = command_name(&command));
    let _guard = span.enter();
    tracing::debug!(target: event_names::RUN_STARTED, "command started");

    let result = match &command {
        Commands::Run(args) => run_interactive(args),
        Commands::List(args) => run_list(&cli.global, &run_id, args),
        Commands::Kill(args) => run_kill(&cli.global, &run_id, args),
        Commands::Completions { shell } => {
            print_completions(*shell);
            Ok(ExitCode::Clean)
        }
        Commands::Version => {
            print_version(&cli.global);
            Ok(ExitCode::Clean)
        }
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => {
            report_error(&cli.global, &err);
            ExitCode::for_error(&err)
        }
    };
    tracing::debug!(target: event_names::RUN_FINISHED, exit_code = exit_code.as_i32(), "command finished");

    std::process::exit(exit_code.as_i32());
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Run(_) => "run",
        Commands::List(_) => "list",
        Commands::Kill(_) => "kill",
        Commands::Completions { .. } => "completions",
        Commands::Version => "version",
    }
}

fn log_config_for(global: &GlobalOpts, command: &Commands) -> LogConfig {
    let cli_level = if global.quiet {
        Some(LogLevel::Error)
    } else {
        match global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    let mut config = LogConfig::from_env(cli_level, global.log_format);

    // Stderr belongs to the terminal UI while it runs.
    if let Commands::Run(args) = command {
        config = match &args.log_file {
            Some(path) => config.with_file(Some(path.clone())),
            None => config.with_level(LogLevel::Off),
        };
    }
    config
}

fn report_error(global: &GlobalOpts, err: &Error) {
    if global.format.is_machine() {
        eprintln!("{}", StructuredError::from(err).to_json());
    } else {
        eprintln!("{}", err.to_human());
    }
}

fn owner_filter(all_users: bool) -> OwnerFilter {
    if all_users {
        OwnerFilter::Any
    } else {
        OwnerFilter::CurrentUser
    }
}

// ============================================================================
// Command implementations
// ============================================================================

#[cfg(feature = "ui")]
fn run_interactive(args: &RunArgs) -> Result<ExitCode, Error> {
    let config = RunConfig::from(args);
    pm_core::tui::run_tui(&config)?;
    Ok(ExitCode::Clean)
}

#[cfg(not(feature = "ui"))]
fn run_interactive(args: &RunArgs) -> Result<ExitCode, Error> {
    let _config = RunConfig::from(args);
    Err(Error::CapabilityMissing(
        "interactive list requires a build with the `ui` feature".to_string(),
    ))
}

fn run_list(global: &GlobalOpts, run_id: &str, args: &ListArgs) -> Result<ExitCode, Error> {
    let source = ProcfsSource::new().with_owner(owner_filter(args.all_users));
    let scan = source.scan();
    let query = args.query.clone().unwrap_or_default();
    let processes: Vec<_> = filter(&scan.processes, &query)
        .into_iter()
        .cloned()
        .collect();

    let no_matches = args.query.is_some() && processes.is_empty();
    let report = ListReport {
        run_id: run_id.to_string(),
        query: args.query.clone(),
        total: scan.processes.len(),
        processes,
        scan: scan.metadata,
    };
    print!("{}", render_list(&report, global.format)?);

    Ok(if no_matches {
        ExitCode::NoMatches
    } else {
        ExitCode::Clean
    })
}

fn run_kill(global: &GlobalOpts, run_id: &str, args: &KillArgs) -> Result<ExitCode, Error> {
    let pid = ProcessId(args.pid);
    let mut terminator = SignalTerminator::new(args.signal);
    let result = terminator.terminate(pid);

    let report = KillReport {
        run_id: run_id.to_string(),
        pid,
        signal: args.signal,
        delivered: result.is_ok(),
        error: result.as_ref().err().map(|e| e.to_string()),
    };

    match result {
        Ok(()) => {
            print!("{}", render_kill(&report, global.format)?);
            Ok(ExitCode::ActionOk)
        }
        Err(err) => {
            if global.format.is_machine() {
                print!("{}", render_kill(&report, global.format)?);
            }
            Err(err.into())
        }
    }
}

fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "procman", &mut std::io::stdout());
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            let info = serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "ui": cfg!(feature = "ui"),
            });
            println!("{info}");
        }
        _ => println!("procman {}", env!("CARGO_PKG_VERSION")),
    }
}
