use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use flowexpr::template::{parse, Evaluator};
use flowexpr::ContextSnapshot;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evaluate workflow configuration templates", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a template to its string form
    Render {
        /// Template string, e.g. 'Hello {{ $json "User" "name" }}'
        #[arg(short, long)]
        template: String,

        /// Path to a JSON context snapshot file
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
    /// Evaluate a template and print the resolved value as JSON
    Eval {
        /// Template string
        #[arg(short, long)]
        template: String,

        /// Path to a JSON context snapshot file
        #[arg(short, long)]
        context: Option<PathBuf>,
    },
    /// Check template syntax without evaluating it
    Check {
        /// Template string
        #[arg(short, long)]
        template: String,
    },
    /// List all registered helpers
    Helpers,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Render { template, context } => {
            let snapshot = load_snapshot(context.as_deref())?;
            let evaluator = Evaluator::new()?;
            println!("{}", evaluator.render(&template, &snapshot)?);
        }
        Commands::Eval { template, context } => {
            let snapshot = load_snapshot(context.as_deref())?;
            let evaluator = Evaluator::new()?;
            let value = evaluator.evaluate(&template, &snapshot)?;
            println!("{}", serde_json::to_string_pretty(&value.to_json())?);
        }
        Commands::Check { template } => {
            parse(&template)?;
            println!("ok");
        }
        Commands::Helpers => {
            let evaluator = Evaluator::new()?;
            for name in evaluator.registry().names() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Load a context snapshot from a JSON file shaped as
/// `{ "<node>": { "output": ..., "metadata": {...} } }`; no file means an
/// empty snapshot.
fn load_snapshot(path: Option<&Path>) -> Result<ContextSnapshot> {
    let Some(path) = path else {
        return Ok(ContextSnapshot::empty());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading context file {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&raw).context("parsing context JSON")?;
    Ok(ContextSnapshot::from_json(json)?)
}
