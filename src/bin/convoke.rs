use std::io::IsTerminal;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use convoke::docs::render::render;
use convoke::docs::tree::build_tree;
use convoke::theme;

#[derive(Parser, Debug)]
#[command(
    name = "convoke",
    about = "Compose plugin command groups into a single CLI"
)]
struct Cli {
    /// Path to the manifest file (auto-detected if not specified)
    #[arg(short, long)]
    manifest: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the nested help document for the composed CLI
    Docs {
        /// Disable ANSI styling
        #[arg(long)]
        plain: bool,
    },
    /// Resolve every plugin in the manifest and report failures
    Check,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    convoke::logger::init();
    let cli = Cli::parse();

    let (manifest, cwd, _) = convoke::load_manifest(cli.manifest.as_deref())?;

    match cli.command.unwrap_or(Commands::Docs { plain: false }) {
        Commands::Docs { plain } => {
            let aggregation = convoke::compose(&manifest, &cwd);
            let tree = build_tree(&aggregation.root)?;
            let blocks = render(&tree);

            let styled = !plain && std::io::stdout().is_terminal();
            let mut stdout = std::io::stdout().lock();
            theme::write_blocks(&mut stdout, &blocks, styled)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check => {
            let aggregation = convoke::compose(&manifest, &cwd);
            let total = manifest.plugins.len();
            let failed = aggregation.failures.len();
            let resolved = total - failed;
            eprintln!("{resolved} of {total} plugins resolved");
            if failed > 0 {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
