//! portreg - port registry CLI
//!
//! Manages static port assignments across local projects.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use portreg::output::{render_assignments_json, render_assignments_table, render_blocked_table};
use portreg::{PortStatus, PortregError, Registry};

#[derive(Parser)]
#[command(name = "portreg")]
#[command(version)]
#[command(about = "A port registry tool to manage port assignments")]
#[command(long_about = "portreg helps developers manage port assignments across multiple projects
to avoid conflicts. It uses static port assignment stored in a JSON registry file.")]
struct Cli {
    /// Path to registry file (defaults to ~/.portreg.json)
    #[arg(long, short, global = true, env = portreg::locator::REGISTRY_ENV_VAR)]
    registry: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the registry file with default blocked ports
    Init,
    /// Assign a port to a project (next available from 3100 if no port given)
    Assign {
        /// Specific port to assign
        #[arg(long, short, value_parser = clap::value_parser!(u16).range(1..))]
        port: Option<u16>,
        /// Description for the port assignment
        #[arg(long, short)]
        description: Option<String>,
        /// Project path (defaults to current directory)
        #[arg(long)]
        path: Option<String>,
    },
    /// Release a port assignment
    Unassign {
        /// Port number to release
        port: u16,
    },
    /// Display all assigned ports
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },
    /// Show whether a port is available
    Check {
        /// Port number to check
        port: u16,
    },
    /// Display blocked ports and ranges
    Blocked,
    /// Print the version number
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListFormat {
    Table,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    portreg::logging::init_cli_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            match hint(&e) {
                Some(hint) => eprintln!("Error: {}. {}", e, hint),
                None => eprintln!("Error: {}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> portreg::Result<ExitCode> {
    let registry_path = cli.registry;

    match cli.command {
        Commands::Init => handle_init(&mut open(registry_path)?)?,
        Commands::Assign {
            port,
            description,
            path,
        } => handle_assign(&mut open(registry_path)?, port, description, path)?,
        Commands::Unassign { port } => handle_unassign(&mut open(registry_path)?, port)?,
        Commands::List { format } => handle_list(&open(registry_path)?, format)?,
        Commands::Check { port } => return Ok(handle_check(&open(registry_path)?, port)),
        Commands::Blocked => {
            let registry = open(registry_path)?;
            print!("{}", render_blocked_table(registry.blocked_ports()));
        }
        Commands::Version => println!("v{}", portreg::VERSION),
    }

    Ok(ExitCode::SUCCESS)
}

/// Load the registry from the override path or ~/.portreg.json
fn open(registry_path: Option<PathBuf>) -> portreg::Result<Registry> {
    let path = portreg::resolve_registry_path(registry_path)?;
    tracing::debug!(path = %path.display(), "using registry");
    Registry::load(path)
}

/// Contextual advice for errors the user can resolve by inspecting the registry
fn hint(err: &PortregError) -> Option<&'static str> {
    match err {
        PortregError::PortAlreadyAssigned { .. } | PortregError::PortNotAssigned(_) => {
            Some("Use 'portreg list' to see all assignments")
        }
        PortregError::ParseError(_) => Some("Fix or remove the registry file"),
        _ => None,
    }
}

/// Handle `portreg init`
fn handle_init(registry: &mut Registry) -> portreg::Result<()> {
    registry.init()?;
    println!("Initialized registry at {}", registry.path().display());
    Ok(())
}

/// Handle `portreg assign [--port N]`
fn handle_assign(
    registry: &mut Registry,
    port: Option<u16>,
    description: Option<String>,
    path: Option<String>,
) -> portreg::Result<()> {
    // Unset project path means the current directory
    let path = path.or_else(|| {
        std::env::current_dir()
            .ok()
            .map(|dir| dir.to_string_lossy().into_owned())
    });

    let assigned = match port {
        Some(port) => {
            registry.assign_port(port, description.clone(), path)?;
            port
        }
        None => registry.assign_next_available(description.clone(), path)?,
    };

    match description.filter(|d| !d.is_empty()) {
        Some(description) => println!("Assigned port {} to {}", assigned, description),
        None => println!("Assigned port {}", assigned),
    }
    Ok(())
}

/// Handle `portreg unassign <port>`
fn handle_unassign(registry: &mut Registry, port: u16) -> portreg::Result<()> {
    registry.unassign_port(port)?;
    println!("Unassigned port {}", port);
    Ok(())
}

/// Handle `portreg list`
fn handle_list(registry: &Registry, format: ListFormat) -> portreg::Result<()> {
    let assignments = registry.list_assignments();
    match format {
        ListFormat::Json => println!("{}", render_assignments_json(assignments)?),
        ListFormat::Table => print!("{}", render_assignments_table(assignments)),
    }
    Ok(())
}

/// Handle `portreg check <port>`
fn handle_check(registry: &Registry, port: u16) -> ExitCode {
    match registry.status(port) {
        PortStatus::Available => {
            println!("Port {} is available", port);
            ExitCode::SUCCESS
        }
        PortStatus::Assigned(assignment) => {
            match assignment.description.as_deref() {
                Some(description) => println!("Port {} is assigned to {}", port, description),
                None => println!("Port {} is assigned", port),
            }
            ExitCode::FAILURE
        }
        PortStatus::Blocked(rule) => {
            match rule.description.as_deref() {
                Some(description) => {
                    println!("Port {} is blocked by {} ({})", port, rule.spec, description)
                }
                None => println!("Port {} is blocked by {}", port, rule.spec),
            }
            ExitCode::FAILURE
        }
    }
}
