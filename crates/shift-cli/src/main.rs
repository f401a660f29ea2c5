mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    config::ConfigSubcommand, ng::NgSubcommand, pattern::PatternSubcommand,
    staff::StaffSubcommand, template::TemplateSubcommand, weekly::WeeklySubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shifts",
    about = "Staff shift roster: staff, daily assignments, templates, weekly patterns and NG shifts",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding .shifts/ (default: nearest ancestor with .shifts/, else $HOME)
    #[arg(long, global = true, env = "SHIFTS_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .shifts/ with a default config
    Init,

    /// Manage the staff roster
    Staff {
        #[command(subcommand)]
        subcommand: StaffSubcommand,
    },

    /// Assign, list and remove daily shifts
    Pattern {
        #[command(subcommand)]
        subcommand: PatternSubcommand,
    },

    /// Save and apply snapshots of the calendar
    Template {
        #[command(subcommand)]
        subcommand: TemplateSubcommand,
    },

    /// Record shifts a staff member must not work on a weekday
    Ng {
        #[command(subcommand)]
        subcommand: NgSubcommand,
    },

    /// Manage per-weekday shift patterns
    Weekly {
        #[command(subcommand)]
        subcommand: WeeklySubcommand,
    },

    /// Revert the most recent assignment change
    Undo,

    /// Re-apply the most recently undone change
    Redo,

    /// Per-staff shift counts for a month
    Summary { year: i32, month: u32 },

    /// Day-by-day assignments for a month
    Calendar { year: i32, month: u32 },

    /// Delete all stored roster data
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Inspect and validate .shifts/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Staff { subcommand } => cmd::staff::run(&root, subcommand, cli.json),
        Commands::Pattern { subcommand } => cmd::pattern::run(&root, subcommand, cli.json),
        Commands::Template { subcommand } => cmd::template::run(&root, subcommand, cli.json),
        Commands::Ng { subcommand } => cmd::ng::run(&root, subcommand, cli.json),
        Commands::Weekly { subcommand } => cmd::weekly::run(&root, subcommand, cli.json),
        Commands::Undo => cmd::history::undo(&root, cli.json),
        Commands::Redo => cmd::history::redo(&root, cli.json),
        Commands::Summary { year, month } => cmd::summary::summary(&root, year, month, cli.json),
        Commands::Calendar { year, month } => cmd::summary::calendar(&root, year, month, cli.json),
        Commands::Reset { yes } => cmd::reset::run(&root, yes, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
