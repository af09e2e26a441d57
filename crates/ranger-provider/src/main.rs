//! `ranger-provider` command line front end.
//!
//! Drives every provider operation from JSON documents and prints a JSON
//! response `{"state": ..., "diagnostics": [...]}` on stdout. The process
//! exits with status 1 whenever an error diagnostic was produced.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use ranger_provider::host::{self, HostResponse, PolicyOperation};
use ranger_provider::logging::init_logging;
use ranger_provider::{AttrValue, ProviderConfig, RangerProvider};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "ranger-provider", version, about = "Manage Apache Ranger policies declaratively")]
struct Cli {
    /// Ranger admin URL; falls back to RANGER_HOST
    #[arg(long, global = true)]
    host: Option<String>,
    /// Falls back to RANGER_USERNAME
    #[arg(long, global = true)]
    username: Option<String>,
    /// Falls back to RANGER_PASSWORD
    #[arg(long, global = true)]
    password: Option<String>,
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the provider, resource and data source schemas
    Schema,
    /// Manage a ranger_policy resource
    #[command(subcommand)]
    Policy(PolicyCommand),
    /// Look up a ranger_service by name
    Service {
        #[arg(long)]
        name: String,
    },
}

#[derive(Debug, Subcommand)]
enum PolicyCommand {
    Create(PlanArgs),
    Read(StateArgs),
    Update {
        #[command(flatten)]
        plan: PlanArgs,
        #[command(flatten)]
        state: StateArgs,
    },
    Delete(StateArgs),
}

#[derive(Debug, Args)]
struct PlanArgs {
    /// Planned configuration as JSON, `-` for stdin
    #[arg(long)]
    plan: String,
}

#[derive(Debug, Args)]
struct StateArgs {
    /// Prior state as JSON, `-` for stdin
    #[arg(long)]
    state: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("{}", e);
    }

    let provider = RangerProvider::new(env!("CARGO_PKG_VERSION"));
    let provider_config = ProviderConfig {
        host: AttrValue::from_option(cli.host),
        username: AttrValue::from_option(cli.username),
        password: AttrValue::from_option(cli.password),
    };

    let response = match cli.command {
        Command::Schema => {
            let document = provider.schema_document();
            println!("{}", serde_json::to_string_pretty(&document)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Policy(command) => {
            let operation = policy_operation(command)?;
            match provider.configure(&provider_config) {
                Ok(configured) => host::run_policy(&configured, operation).await,
                Err(diags) => HostResponse::failed(diags, operation.prior_state()),
            }
        }
        Command::Service { name } => match provider.configure(&provider_config) {
            Ok(configured) => host::read_service(&configured, &name).await,
            Err(diags) => HostResponse::failed(diags, serde_json::Value::Null),
        },
    };

    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.has_error() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn policy_operation(command: PolicyCommand) -> anyhow::Result<PolicyOperation> {
    let operation = match command {
        PolicyCommand::Create(args) => PolicyOperation::Create {
            plan: host::load_document(&args.plan)?,
        },
        PolicyCommand::Read(args) => PolicyOperation::Read {
            state: host::load_document(&args.state)?,
        },
        PolicyCommand::Update { plan, state } => PolicyOperation::Update {
            plan: host::load_document(&plan.plan)?,
            state: host::load_document(&state.state)?,
        },
        PolicyCommand::Delete(args) => PolicyOperation::Delete {
            state: host::load_document(&args.state)?,
        },
    };
    Ok(operation)
}
