#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "shelf: hybrid document retrieval engine",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> output::OutputMode {
        output::resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Lifecycle",
        about = "Create the document repository",
        after_help = "EXAMPLES:\n    # Initialize in the current directory\n    shelf init"
    )]
    Init(cmd::init::InitArgs),

    #[command(next_help_heading = "Lifecycle")]
    Import(cmd::import::ImportArgs),

    #[command(next_help_heading = "Read")]
    Search(cmd::search::SearchArgs),

    #[command(next_help_heading = "Read")]
    Keywords(cmd::keywords::KeywordsArgs),

    #[command(next_help_heading = "Read")]
    List(cmd::list::ListArgs),

    #[command(next_help_heading = "Read")]
    Show(cmd::show::ShowArgs),

    #[command(next_help_heading = "Read")]
    Catalog(cmd::catalog::CatalogArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SHELF_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "shelf=debug,info"
        } else {
            "shelf=info,warn"
        })
    });

    let format = env::var("SHELF_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so `--json` output on stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &project_root),
        Commands::Search(ref args) => cmd::search::run_search(args, output, &project_root),
        Commands::Keywords(ref args) => cmd::keywords::run_keywords(args, output, &project_root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::Catalog(ref args) => cmd::catalog::run_catalog(args, output, &project_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_before_subcommand() {
        let cli = Cli::parse_from(["shelf", "--json", "list"]);
        assert!(cli.json);
    }

    #[test]
    fn json_flag_after_subcommand() {
        let cli = Cli::parse_from(["shelf", "list", "--json"]);
        assert!(cli.json);
    }

    #[test]
    fn verbose_flag_parsed() {
        let cli = Cli::parse_from(["shelf", "-v", "list"]);
        assert!(cli.verbose);
    }

    #[test]
    fn init_subcommand_parses() {
        let cli = Cli::parse_from(["shelf", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn import_subcommand_parses() {
        let cli = Cli::parse_from(["shelf", "import", "documents.json"]);
        assert!(matches!(cli.command, Commands::Import(_)));
    }

    #[test]
    fn search_subcommand_parses() {
        let cli = Cli::parse_from(["shelf", "search", "scholarship"]);
        assert!(matches!(cli.command, Commands::Search(_)));
    }

    #[test]
    fn search_without_query_parses() {
        let cli = Cli::parse_from(["shelf", "search", "--doc-type", "Policy"]);
        assert!(matches!(cli.command, Commands::Search(_)));
    }

    #[test]
    fn show_subcommand_parses() {
        let cli = Cli::parse_from(["shelf", "show", "7"]);
        assert!(matches!(cli.command, Commands::Show(_)));
    }

    #[test]
    fn catalog_subcommand_parses() {
        let cli = Cli::parse_from(["shelf", "catalog", "types"]);
        assert!(matches!(cli.command, Commands::Catalog(_)));
    }

    #[test]
    fn all_subcommands_listed() {
        let subcommands = [
            vec!["shelf", "init"],
            vec!["shelf", "import", "x.json"],
            vec!["shelf", "search", "q"],
            vec!["shelf", "keywords", "UGC,regulation"],
            vec!["shelf", "list"],
            vec!["shelf", "show", "1"],
            vec!["shelf", "catalog", "departments"],
        ];
        for args in &subcommands {
            let result = Cli::try_parse_from(args.iter());
            assert!(
                result.is_ok(),
                "Failed to parse: {:?} — error: {:?}",
                args,
                result.err()
            );
        }
    }
}
