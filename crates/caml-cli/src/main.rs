//! CAML query renderer
//!
//! Reads a JSON query definition from a file or stdin and prints the CAML
//! markup on stdout.

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caml_core::config::CamlConfig;
use caml_query::{Query, QueryDefinition};

#[derive(Debug, Parser)]
#[command(name = "caml")]
#[command(version, about = "Render a JSON query definition as CAML markup", long_about = None)]
struct Cli {
    /// Query definition file (stdin when omitted)
    file: Option<PathBuf>,

    /// Sort by this field, overriding the definition
    #[arg(long)]
    order_by: Option<String>,

    /// Sort descending (with --order-by)
    #[arg(long, requires = "order_by")]
    descending: bool,

    /// Reject filters whose value count does not fit their operator
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = CamlConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config);

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), file = ?cli.file, "Rendering query");

    let input = read_input(cli.file.as_ref())?;
    let query = build_query(&cli, &config, &input)?;
    println!("{}", query.query_text());

    Ok(())
}

/// Initialize tracing/logging on stderr so stdout only carries markup
fn init_tracing(config: &CamlConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read query definition from stdin")?;
            Ok(input)
        }
    }
}

/// Ordering precedence: command line, then the definition, then the environment
fn build_query(cli: &Cli, config: &CamlConfig, input: &str) -> anyhow::Result<Query> {
    let definition = QueryDefinition::from_json_str(input).context("Invalid query definition")?;

    let strict = cli.strict || config.strict_arity;
    let mut query = if strict {
        definition.build_strict()
    } else {
        definition.build()
    }
    .context("Failed to build query")?;

    if let Some(field) = &cli.order_by {
        query.set_order_by(field.clone(), !cli.descending);
    } else if !query.is_ordered() {
        if let Some(default) = &config.order_by {
            debug!(field = %default.field, "Applying default ordering");
            query.set_order_by(default.field.clone(), default.ascending);
        }
    }

    Ok(query)
}
