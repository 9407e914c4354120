mod definition;
mod simulate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use command_help_render::{HelpBuilder, HelpConfig, HelpText, default_parsing_errors_handler};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use definition::CommandDefinition;
use simulate::build_outcome;

#[derive(Debug, Parser)]
#[command(name = "help-render", version)]
#[command(about = "Render help screens from command definition files")]
struct Cli {
    /// Log rendering decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the help screen a program would print for a failed parse.
    Render(RenderArgs),
    /// Check a definition file for duplicate or missing names.
    Validate(ValidateArgs),
    /// Print the default render configuration as YAML.
    ConfigTemplate,
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Command definition file (YAML, or JSON with a .json extension).
    #[arg(long)]
    definition: PathBuf,
    /// Render configuration file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override the maximum display width.
    #[arg(long)]
    width: Option<usize>,
    /// List verbs instead of the top-level options.
    #[arg(long)]
    verbs: bool,
    /// Simulated parse error, as KIND or KIND:ARG. Repeatable.
    #[arg(long = "error", value_name = "KIND[:ARG]")]
    errors: Vec<String>,
    /// Simulate `help <VERB>`.
    #[arg(long, value_name = "VERB")]
    help_verb: Option<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Command definition file.
    #[arg(long)]
    definition: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Render(args) => run_render(args),
        Command::Validate(args) => run_validate(args),
        Command::ConfigTemplate => run_config_template(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

// ---------------------------------------------------------------------------
// render command
// ---------------------------------------------------------------------------

fn run_render(args: RenderArgs) -> Result<(), String> {
    let definition = CommandDefinition::load(&args.definition)?;

    let mut config = match &args.config {
        Some(path) => HelpConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => HelpConfig::default(),
    };
    if let Some(width) = args.width {
        config.max_display_width = width;
    }

    let problems = definition.validate(config.auto_help || config.auto_version);
    if let Some(problem) = problems.first() {
        return Err(format!("Invalid definition: {problem}"));
    }

    let outcome = build_outcome(&definition, &args.errors, args.help_verb.as_deref())?;
    debug!(
        errors = outcome.errors().len(),
        verbs = outcome.choices.len(),
        "Simulated parse outcome"
    );

    let builder = HelpBuilder::new(config, definition.help_defaults());
    let built = if args.verbs {
        let errors = outcome.errors();
        builder.auto_build_with(
            &outcome,
            |help| default_parsing_errors_handler(help, errors),
            |example| example,
            true,
        )
    } else {
        builder.auto_build(&outcome)
    };
    let help: HelpText = built.map_err(|err| err.to_string())?;

    println!("{}", help.finalize());
    Ok(())
}

// ---------------------------------------------------------------------------
// validate command
// ---------------------------------------------------------------------------

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let definition = CommandDefinition::load(&args.definition)?;
    let problems = definition.validate(true);
    if !problems.is_empty() {
        let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
        return Err(format!("Invalid definition: {}", messages.join("; ")));
    }
    println!(
        "Validated '{}': {} specification(s), {} verb(s).",
        definition.program,
        definition.specifications.len(),
        definition.verbs.len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// config-template command
// ---------------------------------------------------------------------------

fn run_config_template() -> Result<(), String> {
    let yaml = serde_yaml::to_string(&HelpConfig::default())
        .map_err(|err| format!("Failed to serialize config: {err}"))?;
    print!("{yaml}");
    Ok(())
}
