mod cmd;
mod logging;
mod math;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cdoc", version, about = "Render parameterised calculation documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template and its parameters to HTML
    Render(RenderArgs),

    /// List parameters referenced by a template
    Vars(VarsArgs),

    /// Evaluate a single parameter to its rendered text
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template file: markdown with ${name} placeholders and math fences
    #[arg(long)]
    pub template: PathBuf,

    /// Parameter definitions (YAML mapping of name to definition)
    #[arg(long)]
    pub params: PathBuf,

    /// Stored input values (YAML mapping of name to value)
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct VarsArgs {
    /// Template file to scan
    #[arg(long)]
    pub template: PathBuf,

    /// When given, flag referenced parameters missing from the model
    #[arg(long)]
    pub params: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Parameter name to evaluate
    #[arg(long)]
    pub name: String,

    /// Parameter definitions (YAML mapping of name to definition)
    #[arg(long)]
    pub params: PathBuf,

    /// Stored input values (YAML mapping of name to value)
    #[arg(long)]
    pub values: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => cmd::render::run(&args),
        Commands::Vars(args) => cmd::vars::run(&args),
        Commands::Eval(args) => cmd::eval::run(&args),
    }
}
