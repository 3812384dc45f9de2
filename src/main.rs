use clap::Parser;
use mdscript::config::Config;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mdscript",
    about = "Extract bash code blocks from Markdown into an executable script"
)]
struct Cli {
    /// Markdown document to read
    input: PathBuf,

    /// Script file to write
    output: PathBuf,

    /// Code block language to extract (repeatable, default: from config or bash)
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn load_config(cli: &Cli) -> Config {
    let loaded = if let Some(ref config_path) = cli.config {
        Some(Config::load(config_path))
    } else {
        ["mdscript.config.json", "config/mdscript.config.json"]
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file())
            .map(|p| Config::load(&p))
    };
    match loaded {
        Some(result) => result.unwrap_or_else(|e| die(&e.to_string())),
        None => Config::default(),
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdscript=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(&cli);

    // CLI overrides
    if !cli.languages.is_empty() {
        config.languages = cli.languages.clone();
    }

    if let Err(e) = mdscript::compile_file(&cli.input, &cli.output, &config) {
        die(&e.to_string());
    }
}
