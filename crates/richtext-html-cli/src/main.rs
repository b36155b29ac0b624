use anyhow::{Context, Result};
use clap::Parser;
use richtext_html_config::Config;
use richtext_html_engine::{Options, convert_json};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "richtext-html",
    version,
    about = "Convert a raw rich-text JSON document to HTML"
)]
struct Args {
    /// Raw document JSON; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file to use in place of ~/.config/richtext-html/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Put each block and list item on its own indented line
    #[arg(long)]
    pretty: bool,
}

fn load_options(args: &Args) -> Result<Options> {
    let config = match &args.config {
        Some(path) => {
            let config = Config::load_from_path(path)?;
            if config.is_none() {
                anyhow::bail!("Config file '{}' does not exist", path.display());
            }
            config
        }
        None => Config::load()?,
    };

    let mut options = config.unwrap_or_default().apply(Options::default());
    if args.pretty {
        options.pretty_print = true;
    }
    log::debug!("conversion options: {options:?}");
    Ok(options)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file '{}'", path.display())),
        _ => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("Failed to read document from stdin")?;
            Ok(json)
        }
    }
}

fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{html}\n"))
            .with_context(|| format!("Failed to write output file '{}'", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{html}").context("Failed to write to stdout")
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = load_options(args)?;
    let json = read_input(args.input.as_deref())?;
    let html = convert_json(&json, &options).context("Failed to convert document")?;
    write_output(args.output.as_deref(), &html)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    run(&args)
}
