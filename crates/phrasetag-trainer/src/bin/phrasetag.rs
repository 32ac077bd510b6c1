//! Phrasetag CLI
//!
//! Prepares training and inference corpora for an ingredient phrase tagger,
//! and reads the tagger's decoded output back into structured ingredients.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phrasetag_core::{import_tagged_output, EnglishSingularizer, PartitionConfig, Translator};
use phrasetag_trainer::{
    generate_training_file, load_records, prepare, save_records, write_feature_corpus,
    PrepareConfig,
};
use tracing::info;

/// CLI arguments
#[derive(Parser)]
#[command(name = "phrasetag")]
#[command(about = "Build tagger corpora from labelled ingredient phrases")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split labelled records into training and testing CSV files
    Partition {
        /// Labelled records (CSV)
        #[arg(short, long, env = "LABELLED_DATA_FILE")]
        input: PathBuf,

        /// Output file for training records
        #[arg(long)]
        training_out: PathBuf,

        /// Output file for testing records
        #[arg(long)]
        testing_out: PathBuf,

        /// Fraction of records used for training
        #[arg(short = 't', long, env = "TRAINING_DATA_PERCENT", default_value_t = 0.9)]
        training_fraction: f64,

        /// Maximum number of records to use (0 for all)
        #[arg(short = 'n', long, env = "LABELLED_EXAMPLE_COUNT", default_value_t = 0)]
        max_records: i64,
    },
    /// Generate a training corpus from labelled records
    Generate {
        /// Labelled records (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Corpus file to write
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Partition labels and generate both corpora
    Prepare {
        /// Labelled records (CSV)
        #[arg(short, long, env = "LABELLED_DATA_FILE")]
        data_path: PathBuf,

        /// Directory for all generated files
        #[arg(short, long, env = "OUTPUT_DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Fraction of records used for training
        #[arg(short = 't', long, env = "TRAINING_DATA_PERCENT", default_value_t = 0.9)]
        training_fraction: f64,

        /// Maximum number of records to use (0 for all)
        #[arg(short = 'n', long, env = "LABELLED_EXAMPLE_COUNT", default_value_t = 1000)]
        max_records: i64,
    },
    /// Write untagged feature lines for raw phrases, one phrase per line
    Export {
        /// Phrase file; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file; writes stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert tagger output into JSON lines
    Import {
        /// Tagger output; reads stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file; writes stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(path: Option<&PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Partition {
            input,
            training_out,
            testing_out,
            training_fraction,
            max_records,
        } => {
            let config = PartitionConfig::new()
                .with_training_fraction(training_fraction)
                .with_max_records(max_records);
            config.validate()?;

            let records = load_records(&input)?;
            let split = config.split(records)?;
            save_records(&training_out, &split.training)?;
            save_records(&testing_out, &split.testing)?;
            info!(
                training = split.training.len(),
                testing = split.testing.len(),
                "partition complete"
            );
        }
        Commands::Generate { input, output } => {
            let translator = Translator::new()?;
            let records = load_records(&input)?;
            let lines = generate_training_file(&translator, &records, &output)?;
            info!(records = records.len(), lines, path = %output.display(), "corpus written");
        }
        Commands::Prepare {
            data_path,
            output_dir,
            training_fraction,
            max_records,
        } => {
            let config = PrepareConfig::new(data_path)
                .with_output_dir(output_dir)
                .with_partition(
                    PartitionConfig::new()
                        .with_training_fraction(training_fraction)
                        .with_max_records(max_records),
                );
            let summary = prepare(&config)?;
            info!(?summary, "prepare complete");
        }
        Commands::Export { input, output } => {
            let translator = Translator::new()?;
            let reader = open_input(input.as_ref())?;
            let writer = open_output(output.as_ref())?;
            let phrases = write_feature_corpus(&translator, reader, writer)?;
            info!(phrases, "export complete");
        }
        Commands::Import { input, output } => {
            let reader = open_input(input.as_ref())?;
            let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
            let ingredients =
                import_tagged_output(lines.iter().map(String::as_str), &EnglishSingularizer);

            let mut writer = open_output(output.as_ref())?;
            for ingredient in &ingredients {
                serde_json::to_writer(&mut writer, ingredient)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
            info!(ingredients = ingredients.len(), "import complete");
        }
    }

    Ok(())
}
