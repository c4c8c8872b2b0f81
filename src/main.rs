//! router-configurator CLI.
//!
//! Loads a routing config file, applies it to an in-memory router and prints
//! the resulting scope tree as JSON.
//!
//! ```text
//! routes.toml ─▶ loader ─▶ ConfigProcessor ─▶ Router ─▶ ScopeSnapshot (stdout)
//! ```

use std::path::PathBuf;

use clap::Parser;

use router_configurator::config::loader::{load_routing_file, load_settings};
use router_configurator::config::{ConfigValue, Settings};
use router_configurator::observability::logging;
use router_configurator::{
    ConfigProcessor, Handler, HandlerRegistry, Router, RouterConfigurator,
};

#[derive(Parser)]
#[command(name = "router-configurator")]
#[command(
    about = "Apply a declarative routing config and print the route table",
    long_about = None
)]
struct Cli {
    /// Routing config file (.toml or .json).
    #[arg(short, long)]
    config: PathBuf,

    /// Tool settings file (.toml).
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Deepest allowed group nesting.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log level when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        settings.processor.max_depth = max_depth;
    }
    if let Some(level) = cli.log_level {
        settings.observability.log_level = level;
    }

    logging::init(&settings.observability.log_level);

    tracing::info!(
        config = ?cli.config,
        max_depth = settings.processor.max_depth,
        "router-configurator v0.1.0 starting"
    );

    let config = load_routing_file(&cli.config)?;

    let handlers = builtin_handlers();
    tracing::debug!(handlers = handlers.len(), "Built-in handlers registered");

    let processor = ConfigProcessor::new()
        .with_handlers(handlers)
        .with_options(settings.processor);
    tracing::debug!(max_depth = processor.options().max_depth, "Processor ready");

    let mut router = Router::new();
    if let Err(e) = processor.process_config(&mut router, &config) {
        tracing::error!(error = %e, "Routing config rejected");
        return Err(e.into());
    }

    let snapshot = router.snapshot();
    let output = if cli.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", output);

    tracing::info!("Done");
    Ok(())
}

/// Handlers that config files can name in `filter` and `resolver` fields.
fn builtin_handlers() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("allow", Handler::new("allow", |_| ConfigValue::Bool(true)));
    registry.register("deny", Handler::new("deny", |_| ConfigValue::Bool(false)));
    registry.register(
        "identity",
        Handler::new("identity", |args| args.first().cloned().unwrap_or_default()),
    );
    registry
}
