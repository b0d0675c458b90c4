use anyhow::Result;
use clap::{Parser, Subcommand};
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for fftwtools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    /// fmt followed by clippy
    Analyze,
    Bench {
        /// Criterion filter, e.g. `effort`
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    match cli.command {
        Commands::Build => run(build_command(&cfg)),
        Commands::Test => run(test_command(&cfg)),
        Commands::Clippy => run(clippy_command()),
        Commands::Fmt => run(fmt_command()),
        Commands::Analyze => {
            run(fmt_command())?;
            run(clippy_command())
        }
        Commands::Bench { filter } => run(bench_command(filter.as_deref())),
    }
}
