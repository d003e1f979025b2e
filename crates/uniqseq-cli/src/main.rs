mod logging;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use logging::{LogFormat, init_logging};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;
use uniqseq_combine::{CombinerOptions, ConfigError, IdentifierCombiner};
use uniqseq_core::{BijectiveGenerator, MultiGenerator, RatioPicker, SequenceError, TupleGenerator};

/// Most lines printed when `--count` is not given.
const MAX_DEFAULT_COUNT: u64 = 1_000_000;

/// Lines printed by `identifiers` when `--count` is not given.
const DEFAULT_IDENTIFIER_COUNT: u64 = 10;

#[derive(Debug, Error)]
enum CliError {
    #[error("sequence error: {0}")]
    Sequence(#[from] SequenceError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(name = "uniqseq", version, about = "Unique sequences and identifiers")]
struct Cli {
    /// Print a JSON array instead of one value per line.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    /// Format of the diagnostics written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shuffled, non-repeating integers from one range.
    Sequence(SequenceArgs),
    /// Non-repeating tuples over several ranges.
    Tuples(TupleArgs),
    /// Tuples over every ordering of the ranges.
    Permutations(MultiArgs),
    /// Tuples over every subset of the ranges, in every order.
    Combinations(CombinationArgs),
    /// Unique logins and e-mail addresses.
    Identifiers(IdentifierArgs),
    /// Print the JSON schema of the identifier configuration file.
    ConfigSchema,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Number of distinct values.
    #[arg(long)]
    size: u64,
    /// Desired step; the nearest coprime step at or above it is used.
    #[arg(long)]
    step: Option<u64>,
    /// Reject `--step` instead of adjusting it when it is not coprime with the size.
    #[arg(long, default_value_t = false, requires = "step")]
    exact_step: bool,
    /// Value added to every output.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,
    #[arg(long)]
    count: Option<u64>,
}

#[derive(Args, Debug)]
struct TupleArgs {
    /// Comma-separated dimension sizes.
    #[arg(long, value_delimiter = ',', required = true)]
    sizes: Vec<u64>,
    #[arg(long)]
    count: Option<u64>,
}

#[derive(Args, Debug)]
struct MultiArgs {
    #[command(flatten)]
    tuple: TupleArgs,
    /// Seed for the ordering selector.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct CombinationArgs {
    #[command(flatten)]
    multi: MultiArgs,
    /// Smallest subset size.
    #[arg(long, default_value_t = 1)]
    min_len: usize,
}

#[derive(Args, Debug)]
struct IdentifierArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    surname: String,
    #[arg(long)]
    count: Option<u64>,
    /// Share of e-mail addresses among the output, from 0 to 1.
    #[arg(long, default_value_t = 0.0)]
    email_ratio: f64,
    /// Build e-mail addresses from the full name instead of the strategies.
    #[arg(long, default_value_t = false)]
    full_name: bool,
    /// Combiner configuration file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed; overrides the one from the configuration file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_format).map_err(CliError::Logging)?;

    let rows = match cli.command {
        Command::Sequence(args) => run_sequence(args)?,
        Command::Tuples(args) => run_tuples(args),
        Command::Permutations(args) => {
            let generator = MultiGenerator::permutation(&args.tuple.sizes);
            run_multi(generator, &args)
        }
        Command::Combinations(args) => {
            let generator =
                MultiGenerator::combination_with_min(&args.multi.tuple.sizes, args.min_len);
            run_multi(generator, &args.multi)
        }
        Command::Identifiers(args) => run_identifiers(args)?,
        Command::ConfigSchema => {
            let schema = CombinerOptions::json_schema()?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            return Ok(());
        }
    };

    print_rows(&rows, cli.json)
}

/// One generated value: its text line and its JSON form.
struct Row {
    text: String,
    json: Value,
}

fn run_sequence(args: SequenceArgs) -> Result<Vec<Row>, CliError> {
    let mut generator = match args.step {
        Some(step) if args.exact_step => {
            BijectiveGenerator::from_parts(args.size, step, args.offset)?
        }
        step => BijectiveGenerator::with_options(args.size, step, args.offset),
    };
    info!(
        size = generator.size(),
        step = generator.step(),
        offset = generator.offset(),
        "sequence generator ready"
    );

    let count = resolve_count(args.count, &BigUint::from(generator.size()));
    Ok((0..count)
        .map(|_| {
            let value = generator.next();
            Row {
                text: value.to_string(),
                json: json!(value),
            }
        })
        .collect())
}

fn run_tuples(args: TupleArgs) -> Vec<Row> {
    let mut generator = TupleGenerator::new(&args.sizes);
    info!(size = %generator.size(), step = %generator.step(), "tuple generator ready");

    let count = resolve_count(args.count, generator.size());
    (0..count)
        .map(|_| {
            let values = generator.next();
            Row {
                text: join(values),
                json: json!(values),
            }
        })
        .collect()
}

fn run_multi(generator: MultiGenerator, args: &MultiArgs) -> Vec<Row> {
    let mut generator = match args.seed {
        Some(seed) => generator.seeded(seed),
        None => generator,
    };
    info!(
        size = %generator.size(),
        orderings = generator.orderings().count(),
        "multi generator ready"
    );

    let count = resolve_count(args.tuple.count, generator.size());
    (0..count)
        .map(|_| {
            let (ordering, values) = generator.next();
            Row {
                text: format!("{} {}", join(ordering), join(values)),
                json: json!({ "ordering": ordering, "values": values }),
            }
        })
        .collect()
}

fn run_identifiers(args: IdentifierArgs) -> Result<Vec<Row>, CliError> {
    let mut options = match &args.config {
        Some(path) => CombinerOptions::load(path)?,
        None => CombinerOptions::default(),
    };
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    let mut combiner = IdentifierCombiner::new(&options);
    let mut kinds = match options.seed {
        Some(seed) => RatioPicker::with_seed(true, false, args.email_ratio, seed),
        None => RatioPicker::new(true, false, args.email_ratio),
    };
    let full_name = format!("{} {}", args.name, args.surname);

    let count = args.count.unwrap_or(DEFAULT_IDENTIFIER_COUNT);
    let rows = (0..count)
        .map(|_| {
            let value = match (kinds.next(), args.full_name) {
                (true, true) => combiner.email_for_full_name(&full_name),
                (true, false) => combiner.email(&args.name, &args.surname),
                (false, _) => combiner.login(&args.name, &args.surname),
            };
            Row {
                json: json!(value),
                text: value,
            }
        })
        .collect();
    info!(
        logins = combiner.issued_logins(),
        emails = combiner.issued_emails(),
        "identifiers issued"
    );
    Ok(rows)
}

fn resolve_count(count: Option<u64>, space: &BigUint) -> u64 {
    count.unwrap_or_else(|| space.to_u64().unwrap_or(u64::MAX).min(MAX_DEFAULT_COUNT))
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn print_rows(rows: &[Row], as_json: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if as_json {
        let values: Vec<&Value> = rows.iter().map(|row| &row.json).collect();
        serde_json::to_writer_pretty(&mut out, &values)?;
        writeln!(out)?;
    } else {
        for row in rows {
            writeln!(out, "{}", row.text)?;
        }
    }
    out.flush()?;
    Ok(())
}
