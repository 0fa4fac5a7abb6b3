mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "labelcrop",
    version,
    about = "Crop marketplace shipping labels and summarise SKUs and orders"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop label PDFs and export SKU / order CSVs
    Process {
        /// Label PDF file(s)
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output folder (must exist)
        #[arg(short = 'O', long = "out", value_name = "DIR")]
        out_dir: PathBuf,

        /// Only crop, skip SKU extraction and CSV export
        #[arg(long)]
        lite: bool,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Worker threads for page extraction (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Text extraction backend
        #[arg(short, long, value_enum, default_value_t = Backend::Pdftotext)]
        backend: Backend,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show what is extracted from each page, without writing files
    Inspect {
        /// Label PDF file
        input_file: PathBuf,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Worker threads for page extraction (overrides config)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Text extraction backend
        #[arg(short, long, value_enum, default_value_t = Backend::Pdftotext)]
        backend: Backend,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Crop label PDFs only
    Crop {
        /// Label PDF file(s)
        #[arg(required = true)]
        input_files: Vec<PathBuf>,

        /// Output folder (must exist)
        #[arg(short = 'O', long = "out", value_name = "DIR")]
        out_dir: PathBuf,

        /// JSON config file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the default configuration as JSON
    Config,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// poppler's pdftotext (best layout fidelity)
    Pdftotext,
    /// built-in lopdf text extraction
    Lopdf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input_files,
            out_dir,
            lite,
            config,
            workers,
            backend,
            output,
        } => commands::process::run(
            input_files,
            out_dir,
            lite,
            config,
            workers,
            backend,
            &output,
        ),
        Commands::Inspect {
            input_file,
            config,
            workers,
            backend,
            output,
        } => commands::inspect::run(input_file, config, workers, backend, &output),
        Commands::Crop {
            input_files,
            out_dir,
            config,
        } => commands::crop::run(input_files, out_dir, config),
        Commands::Config => commands::config::print_default(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_process_defaults() {
        let cli = Cli::parse_from(["labelcrop", "process", "a.pdf", "b.pdf", "--out", "out"]);
        match cli.command {
            Commands::Process {
                input_files,
                out_dir,
                lite,
                workers,
                backend,
                output,
                ..
            } => {
                assert_eq!(input_files.len(), 2);
                assert_eq!(out_dir, PathBuf::from("out"));
                assert!(!lite);
                assert_eq!(workers, None);
                assert_eq!(backend, Backend::Pdftotext);
                assert_eq!(output, "table");
            }
            _ => panic!("expected process"),
        }
    }

    #[test]
    fn parse_inspect_with_lopdf_backend() {
        let cli = Cli::parse_from(["labelcrop", "inspect", "a.pdf", "--backend", "lopdf"]);
        match cli.command {
            Commands::Inspect { backend, .. } => assert_eq!(backend, Backend::Lopdf),
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn parse_inspect_with_config_and_workers() {
        let cli = Cli::parse_from([
            "labelcrop", "inspect", "a.pdf", "--config", "job.json", "--workers", "2",
        ]);
        match cli.command {
            Commands::Inspect {
                config, workers, ..
            } => {
                assert_eq!(config, Some(PathBuf::from("job.json")));
                assert_eq!(workers, Some(2));
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn process_requires_input() {
        assert!(Cli::try_parse_from(["labelcrop", "process", "--out", "out"]).is_err());
    }
}
