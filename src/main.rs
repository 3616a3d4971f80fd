use std::{
    io::{self, Read},
    path::PathBuf,
};

use clap::{Parser as ClapParser, Subcommand};
use esfilter::{
    RegistryConfig,
    cli::{self, CheckOptions, CheckResult, CliError},
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "esfilter")]
#[command(about = "esfilter - compile filter expressions into search queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an expression against a field registry
    Check {
        /// The expression to compile (reads from stdin if not provided)
        expression: Option<String>,

        /// JSON file describing the searchable fields
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't compile
        #[arg(long)]
        syntax_only: bool,
    },

    /// Show the tokens and postfix order of an expression
    Explain {
        /// The expression to explain (reads from stdin if not provided)
        expression: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expression,
            registry,
            pretty,
            syntax_only,
        } => run_check(expression, registry, pretty, syntax_only),
        Commands::Explain { expression } => run_explain(expression),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    expression: Option<String>,
    registry: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let expression = read_expression(expression)?;

    let registry = match registry {
        Some(path) if !syntax_only => Some(RegistryConfig::from_path(&path)?),
        _ => None,
    };

    let options = CheckOptions {
        expression,
        registry,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)
            } else {
                serde_json::to_string(&output)
            }
            .unwrap_or_default();
            println!("{}", json);
        }
    }
    Ok(())
}

fn run_explain(expression: Option<String>) -> Result<(), CliError> {
    let expression = read_expression(expression)?;
    print!("{}", cli::explain(expression.trim())?);
    Ok(())
}
