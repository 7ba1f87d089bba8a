use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use keyevolve::config::Config;
use keyevolve::corpus;
use keyevolve::error::KeResult;
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory of .txt files forming the corpus.
    #[arg(global = true, short, long, default_value = "data/corpus")]
    corpus: String,

    /// Inline corpus text; takes precedence over --corpus.
    #[arg(global = true, short, long)]
    text: Option<String>,

    /// JSON config file; explicit command line values win over it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Search(cmd::search::SearchArgs),
    Validate(cmd::validate::ValidateArgs),
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli, &matches) {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli, matches: &ArgMatches) -> KeResult<()> {
    info!("🚀 Initializing KeyEvolve...");

    let (cli_config, sub_name) = match &cli.command {
        Commands::Search(args) => (&args.config, "search"),
        Commands::Validate(args) => (&args.config, "validate"),
    };

    let config = match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading Config from: {}", path);
            let mut file_config = Config::load_from_file(path)?;
            if let Some(sub_matches) = matches.subcommand_matches(sub_name) {
                file_config.merge_from_cli(cli_config, sub_matches);
            }
            file_config
        }
        None => cli_config.clone(),
    };
    config.validate()?;

    let text = match &cli.text {
        Some(t) => t.clone(),
        None => {
            info!("📂 Loading Corpus: {}", cli.corpus);
            corpus::load_corpus_dir(&cli.corpus)?
        }
    };
    let corpus: Arc<str> = Arc::from(text);

    match &cli.command {
        Commands::Search(args) => cmd::search::run(args, &config, corpus),
        Commands::Validate(args) => cmd::validate::run(args, &config, &corpus),
    }
}
