use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use crate::app::{App, HeadlessHost};
use crate::config::AppConfig;
use crate::logging::init_tracing;

/// Bootstrap the application store and apply mutations to it.
#[derive(Debug, Parser)]
#[command(name = "slicestore", version)]
pub struct Cli {
    /// Config file (defaults to the user config directory).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Element id to mount the application on.
    #[arg(long, value_name = "ID")]
    pub mount: Option<String>,

    /// Report mutations that leave state unchanged.
    #[arg(long)]
    pub strict: bool,

    /// Log every committed mutation.
    #[arg(long)]
    pub log_mutations: bool,

    /// Mutations applied in order, as `type=payload` (e.g. `foo/addBar=a`).
    #[arg(value_name = "MUTATION", value_parser = parse_mutation)]
    pub mutations: Vec<MutationArg>,
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(mount) = &self.mount {
            config.app.mount_point = mount.clone();
        }
        if self.strict {
            config.store.strict = true;
        }
        if self.log_mutations {
            config.store.log_mutations = true;
        }
    }
}

/// Load config, bootstrap and mount the application, apply the mutations
/// in order and return the resulting root state.
pub fn run(cli: &Cli) -> Result<Value> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .context("load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("validate configuration")?;

    init_tracing(&config.logging.level);

    let app = App::bootstrap(&config).context("bootstrap application")?;
    let mounted = app
        .mount(&HeadlessHost, &config.app.mount_point)
        .context("mount application")?;

    for mutation in &cli.mutations {
        mounted
            .root()
            .commit(&mutation.mutation_type, mutation.payload.clone())
            .with_context(|| format!("commit '{}'", mutation.mutation_type))?;
    }

    mounted.store().root_state().context("snapshot state")
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationArg {
    pub mutation_type: String,
    pub payload: Value,
}

/// Parse `type=payload`. The payload is read as JSON and falls back to a
/// plain string; a bare `type` carries a null payload.
pub fn parse_mutation(raw: &str) -> Result<MutationArg, String> {
    let (mutation_type, payload) = match raw.split_once('=') {
        Some((mutation_type, payload)) => (
            mutation_type,
            serde_json::from_str(payload).unwrap_or_else(|_| Value::String(payload.to_string())),
        ),
        None => (raw, Value::Null),
    };

    if mutation_type.is_empty() {
        return Err(format!("missing mutation type in '{raw}'"));
    }

    Ok(MutationArg {
        mutation_type: mutation_type.to_string(),
        payload,
    })
}
