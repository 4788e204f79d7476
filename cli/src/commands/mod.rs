mod config_cmd;
mod generate_package;
mod pre_delivery_checklist;
mod validate_distribution;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use generate_package::run_generate_package;
pub use pre_delivery_checklist::run_pre_delivery_checklist;
pub use validate_distribution::run_validate_distribution;

/// Exit codes named in the component design: 0 ok, 1 fatal failure, 2
/// validation failure. A command returns one of these directly rather than
/// letting `main` infer it from an `anyhow::Error`, so a validation failure
/// (expected, operator-actionable) is distinguishable from a fatal one
/// (unexpected, a bug or a missing file).
pub const EXIT_OK: i32 = 0;
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_VALIDATION_FAILURE: i32 = 2;

#[derive(Parser)]
#[command(name = "planforge")]
#[command(about = "Operator command-line surface for the training package pipeline", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "PLANFORGE_CLI_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full ten-stage pipeline for one athlete
    GeneratePackage {
        /// Athlete identifier (matches the directory under the athletes root)
        athlete_id: String,
    },

    /// Re-run the distribution validator against already-generated artifacts
    ValidateDistribution {
        /// Athlete identifier
        athlete_id: String,
    },

    /// Emit a human-readable checklist of pass/fail gates before delivery
    PreDeliveryChecklist {
        /// Athlete identifier
        athlete_id: String,
    },

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Dispatches to the selected command and returns the process exit
    /// code it reports, rather than a bare `Result<()>` — a fatal error
    /// (`Err`) and a clean-but-failed validation result both need to reach
    /// `main` distinguishably.
    pub async fn execute(self) -> Result<i32> {
        if self.verbose {
            tracing::info!("verbose mode enabled");
        }

        match self.command {
            Commands::GeneratePackage { athlete_id } => run_generate_package(&athlete_id).await,
            Commands::ValidateDistribution { athlete_id } => run_validate_distribution(&athlete_id).await,
            Commands::PreDeliveryChecklist { athlete_id } => run_pre_delivery_checklist(&athlete_id).await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config().map(|_| EXIT_OK),
                ConfigSubcommands::Init { force } => config_cmd::init_config(force).map(|_| EXIT_OK),
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(EXIT_OK)
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
