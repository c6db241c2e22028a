//! cmdforge - Inspect, check and run declaratively defined commands
//!
//! Commands come from two places: the built-in demo set and an optional JSON
//! manifest. Every invocation goes through the command's validator first.

mod builtins;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cmdforge_core::{Attributes, CommandDescriptor, CommandRegistry, ExecuteFn, FieldConfig};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmdforge")]
#[command(about = "Inspect, check and run declaratively defined commands")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    cmdforge list                                   # All known commands
    cmdforge show create_user                       # Usage, fields and example
    cmdforge check echo --body hi                   # Exit 0 if valid, 1 if not
    cmdforge run echo --attr prefix='Hi ' --body you
    cmdforge run multiply --attr factor=3 --body '[1, 2, 3]'

MANIFEST:
    Extra commands are read from --manifest, then $CMDFORGE_MANIFEST,
    then ~/.config/cmdforge/commands.json. Manifest commands echo their
    validated input back as JSON.

VALUES:
    Attribute and body values are parsed as JSON when possible,
    otherwise taken as plain strings."#)]
struct Cli {
    /// Path to a JSON command manifest
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all registered commands
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show usage, declared fields and the example for a command
    Show {
        /// Command name
        name: String,
    },

    /// Print a command's example as JSON
    Example {
        /// Command name
        name: String,
    },

    /// Validate input against a command (exits 0=valid, 1=invalid)
    #[command(after_help = "Example: cmdforge check create_user --attr username=jo --body a@b.com")]
    Check {
        /// Command name
        name: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Validate and execute a command, printing its JSON result
    #[command(after_help = "Example: cmdforge run echo --attr prefix='Hi ' --body you")]
    Run {
        /// Command name
        name: String,

        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Attribute as KEY=VALUE (repeatable)
    #[arg(short, long = "attr", value_name = "KEY=VALUE")]
    attr: Vec<String>,

    /// Body value
    #[arg(short, long)]
    body: Option<String>,
}

impl InputArgs {
    fn parse(&self) -> Result<(Attributes, Option<Value>)> {
        let mut attributes = Attributes::new();
        for pair in &self.attr {
            let (key, value) = parse_attr(pair)?;
            attributes.insert(key, value);
        }
        Ok((attributes, self.body.as_deref().map(parse_value)))
    }
}

/// JSON if it parses, otherwise the raw string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn parse_attr(pair: &str) -> Result<(String, Value)> {
    let Some((key, value)) = pair.split_once('=') else {
        bail!("Invalid attribute '{}'. Expected KEY=VALUE", pair);
    };
    if key.is_empty() {
        bail!("Invalid attribute '{}'. Attribute name is empty", pair);
    }
    Ok((key.to_string(), parse_value(value)))
}

/// Execute function for manifest commands: echo the validated input
fn echo_input(name: &str) -> ExecuteFn<Value> {
    let name = name.to_string();
    Arc::new(move |attributes: &Attributes, body: Option<&Value>| {
        json!({
            "command": name,
            "attributes": attributes,
            "body": body.cloned().unwrap_or(Value::Null),
        })
    })
}

fn build_registry(manifest: Option<&std::path::Path>) -> Result<CommandRegistry> {
    let mut registry: CommandRegistry = builtins::all().into_iter().collect();
    let manifest = config::load_manifest(manifest)?;
    registry.extend(manifest.define_all(echo_input));
    Ok(registry)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = build_registry(cli.manifest.as_deref())?;

    match cli.command {
        Some(Commands::List { json }) => cmd_list(&registry, json),
        Some(Commands::Show { name }) => cmd_show(&registry, &name),
        Some(Commands::Example { name }) => cmd_example(&registry, &name),
        Some(Commands::Check { name, input }) => cmd_check(&registry, &name, &input),
        Some(Commands::Run { name, input }) => cmd_run(&registry, &name, &input),
        None => cmd_help(),
    }
}

fn cmd_help() -> Result<()> {
    println!("cmdforge - Inspect, check and run declaratively defined commands");
    println!();
    println!("Run 'cmdforge --help' for usage information");
    Ok(())
}

fn lookup<'a>(registry: &'a CommandRegistry, name: &str) -> Result<&'a CommandDescriptor> {
    registry.get(name).with_context(|| {
        format!("Unknown command '{}'. Available: {}", name, registry.names().join(", "))
    })
}

fn cmd_list(registry: &CommandRegistry, json: bool) -> Result<()> {
    if json {
        let entries: Vec<Value> = registry
            .iter()
            .map(|command| {
                json!({
                    "name": command.name(),
                    "description": command.description(),
                    "usage": command.usage(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if registry.is_empty() {
        println!("No commands registered.");
        return Ok(());
    }

    let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for command in registry.iter() {
        println!("  {:width$}  {}", command.name(), command.description(), width = width);
    }
    Ok(())
}

fn field_line(config: &FieldConfig) -> String {
    let presence = if config.optional { "optional" } else { "required" };
    let mut line = presence.to_string();
    if let Some(rule) = config.validate.as_ref().and_then(|p| p.rule()) {
        line.push_str(&format!(", {}", rule));
    } else if config.validate.is_some() {
        line.push_str(", custom check");
    }
    if let Some(default) = &config.default {
        line.push_str(&format!(", default {}", default));
    }
    match &config.description {
        Some(description) => format!("({}) {}", line, description),
        None => format!("({})", line),
    }
}

fn cmd_show(registry: &CommandRegistry, name: &str) -> Result<()> {
    let command = lookup(registry, name)?;

    println!("{} - {}", command.name(), command.description());
    println!();
    println!("Usage: {}", command.usage());

    if !command.attributes().is_empty() {
        println!();
        println!("Attributes:");
        for (key, config) in command.attributes() {
            println!("  {}  {}", key, field_line(config));
        }
    }

    println!();
    println!("Body: {}", field_line(command.body()));
    println!();
    println!("Example ({}):", command.example().description);
    println!("{}", serde_json::to_string_pretty(command.example())?);
    Ok(())
}

fn cmd_example(registry: &CommandRegistry, name: &str) -> Result<()> {
    let command = lookup(registry, name)?;
    println!("{}", serde_json::to_string_pretty(command.example())?);
    Ok(())
}

fn cmd_check(registry: &CommandRegistry, name: &str, input: &InputArgs) -> Result<()> {
    let command = lookup(registry, name)?;
    let (attributes, body) = input.parse()?;

    if command.validate(&attributes, body.as_ref()) {
        println!("valid");
        Ok(())
    } else {
        println!("invalid");
        std::process::exit(1);
    }
}

fn cmd_run(registry: &CommandRegistry, name: &str, input: &InputArgs) -> Result<()> {
    let (attributes, body) = input.parse()?;
    let result = registry.dispatch(name, &attributes, body.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
