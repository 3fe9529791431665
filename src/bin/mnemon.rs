use clap::{command, Parser};
use mnemon::{config::SessionConfig, Session};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "mnemon.json")]
    config: PathBuf,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = if cli.config.exists() {
        SessionConfig::from_file(&cli.config)?
    } else {
        SessionConfig::default()
    };
    info!("config loaded.");
    debug!("config: {:?}", config);

    let mut session = Session::new(config);
    let interactive = cli.script.is_none();
    let reader: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut stdout = io::stdout();
    if interactive {
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            writeln!(stdout, "{}", session.respond(line))?;
        }
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
