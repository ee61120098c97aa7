use anyhow::Context;
use clap::{Parser, Subcommand};
use flatdoc::{
    flatten, normalize_key_with, structure, Denormalizer, FlatDocument, Map, Normalizer,
    SchemaDefinition, TypeDescriptor, Value,
};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Normalize documents for flat, four-type search stores and back
#[derive(Parser, Debug)]
#[command(name = "flatdoc")]
#[command(about = "Schema-driven document normalization", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Path delimiter used by the store
    #[arg(long, global = true, default_value_t = '_')]
    delimiter: char,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a document (or an array of documents) against a schema
    Normalize {
        /// Schema file mapping field names to text, date, number or geolocation
        #[arg(short, long)]
        schema: PathBuf,

        /// Input JSON file, stdin when omitted
        input: Option<PathBuf>,
    },
    /// Denormalize a flat document (or an array of them) against a model
    Denormalize {
        /// Model file holding a type descriptor
        #[arg(short, long)]
        model: PathBuf,

        /// Input JSON file, stdin when omitted
        input: Option<PathBuf>,
    },
    /// Flatten a nested document without a schema
    Flatten {
        /// Input JSON file, stdin when omitted
        input: Option<PathBuf>,
    },
    /// Re-nest a flat document along delimiter boundaries
    Structure {
        /// Input JSON file, stdin when omitted
        input: Option<PathBuf>,
    },
    /// Print the canonical form of field names
    Key {
        #[arg(required = true)]
        raw: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("flatdoc v{}", env!("CARGO_PKG_VERSION"));

    let output = match args.command {
        Command::Normalize { schema, input } => {
            let schema = SchemaDefinition::load(&schema)
                .with_context(|| format!("loading schema {}", schema.display()))?;
            info!(fields = schema.len(), "schema loaded");

            let normalizer = Normalizer::with_delimiter(args.delimiter);
            match read_input(input.as_deref())? {
                Value::List(documents) => {
                    let normalized = normalizer.normalize_all(documents, &schema)?;
                    Value::List(normalized.into_iter().map(Value::from).collect())
                }
                document => Value::from(normalizer.normalize(document, &schema)?),
            }
        }
        Command::Denormalize { model, input } => {
            let descriptor: TypeDescriptor = serde_json::from_reader(BufReader::new(
                File::open(&model).with_context(|| format!("opening model {}", model.display()))?,
            ))
            .with_context(|| format!("parsing model {}", model.display()))?;
            info!(model = %descriptor.type_name(), "model loaded");

            let denormalizer = Denormalizer::with_delimiter(args.delimiter);
            match read_input(input.as_deref())? {
                Value::List(documents) => Value::List(
                    documents
                        .into_iter()
                        .map(|document| {
                            denormalizer.denormalize(FlatDocument::try_from(document)?, &descriptor)
                        })
                        .collect::<flatdoc::Result<Vec<_>>>()?,
                ),
                document => {
                    denormalizer.denormalize(FlatDocument::try_from(document)?, &descriptor)?
                }
            }
        }
        Command::Flatten { input } => {
            let entries = flatten(read_input(input.as_deref())?, args.delimiter)?;
            Value::Map(entries.into_iter().collect::<Map>())
        }
        Command::Structure { input } => {
            let flat = FlatDocument::try_from(read_input(input.as_deref())?)?;
            Value::Map(structure(flat, args.delimiter))
        }
        Command::Key { raw } => {
            let mut stdout = io::stdout().lock();
            for key in raw {
                writeln!(stdout, "{}", normalize_key_with(&key, args.delimiter))?;
            }
            return Ok(());
        }
    };

    write_output(&output, args.pretty)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Value> {
    let mut data = Vec::new();
    match path {
        Some(path) if path != Path::new("-") => {
            File::open(path)
                .with_context(|| format!("opening input {}", path.display()))?
                .read_to_end(&mut data)?;
        }
        _ => {
            io::stdin().lock().read_to_end(&mut data)?;
        }
    }

    debug!(bytes = data.len(), "input read");
    Ok(Value::from_json_slice(&data)?)
}

fn write_output(value: &Value, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
