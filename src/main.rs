//! trial-report CLI
//!
//! Reads the trial logs of a results directory and prints one artifact per
//! invocation: a console summary, a LaTeX (or plain-text) table, learning
//! curves, or dataset statistics. Report text goes to stdout; logs go to
//! stderr and are filtered with `RUST_LOG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trial_report::config::ReportConfig;
use trial_report::curves::{build_learning_curves, plot::plot_learning_curves, sparkline};
use trial_report::dataset::{InteractionStats, Interactions};
use trial_report::loader::read_results;
use trial_report::report::{
    dataset_table, hyperparameter_table, performance_table, LatexBooktabs, PlainText,
    TableRenderer,
};
use trial_report::summary::summarize_trials;
use trial_report::trial::{DatasetResultSet, ModelClass};

/// Reporting for recommender hyperparameter searches
///
/// Examples:
///   trial-report results summary
///   trial-report results performance > performance.tex
///   trial-report results curves --output curves.png
///   trial-report results datasets --dataset Amazon=amazon.csv
#[derive(Parser, Debug)]
#[command(name = "trial-report")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Directory holding `<variant>_trials_<dataset>.json` files
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// JSON report configuration (datasets, component counts, precision)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// File prefix of the sequence-model trials
    #[arg(long, default_value = "sequence")]
    sequence_variant: String,

    /// File prefix of the factorization-model trials
    #[arg(long, default_value = "factorization")]
    factorization_variant: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Best trial by validation and by test, per dataset and family
    Summary {
        /// Variant to summarize (defaults to both)
        #[arg(long)]
        variant: Option<String>,
    },

    /// Best test MRR per model and dataset
    Performance {
        #[arg(short, long, value_enum, default_value_t = Format::Latex)]
        format: Format,
    },

    /// Best test MRR per number of mixture components
    Hyperparameters {
        #[arg(short, long, value_enum, default_value_t = Format::Latex)]
        format: Format,
    },

    /// Best-so-far test MRR against search iterations
    Curves {
        /// Write a PNG / SVG figure instead of terminal sparklines
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Users, items, density and skew of interaction datasets
    Datasets {
        /// `LABEL=FILE[:USERSxITEMS]`; FILE is a CSV with user_id and item_id
        /// columns, the optional suffix fixes the full matrix shape
        #[arg(short, long = "dataset", value_name = "LABEL=FILE[:USERSxITEMS]", value_parser = parse_dataset_arg, required = true)]
        datasets: Vec<DatasetArg>,

        #[arg(short, long, value_enum, default_value_t = Format::Latex)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// LaTeX booktabs markup
    Latex,
    /// Aligned plain text
    Text,
}

impl Format {
    fn renderer(self) -> Box<dyn TableRenderer> {
        match self {
            Self::Latex => Box::new(LatexBooktabs::new()),
            Self::Text => Box::new(PlainText),
        }
    }
}

/// One `--dataset` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DatasetArg {
    label: String,
    file: PathBuf,
    shape: Option<(usize, usize)>,
}

fn parse_shape(shape: &str) -> Option<(usize, usize)> {
    let (users, items) = shape.split_once('x')?;
    Some((users.parse().ok()?, items.parse().ok()?))
}

fn parse_dataset_arg(arg: &str) -> std::result::Result<DatasetArg, String> {
    let (label, rest) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=FILE[:USERSxITEMS], got {arg:?}"))?;
    // A trailing `:NxM` is a shape only when it parses as one
    let (file, shape) = match rest.rsplit_once(':') {
        Some((file, suffix)) => match parse_shape(suffix) {
            Some(shape) => (file, Some(shape)),
            None => (rest, None),
        },
        None => (rest, None),
    };
    if label.is_empty() || file.is_empty() {
        return Err(format!("expected LABEL=FILE[:USERSxITEMS], got {arg:?}"));
    }
    Ok(DatasetArg {
        label: label.to_string(),
        file: PathBuf::from(file),
        shape,
    })
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig> {
    match path {
        Some(path) => ReportConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ReportConfig::default()),
    }
}

fn load(dir: &Path, variant: &str) -> Result<DatasetResultSet> {
    read_results(dir, variant)
        .with_context(|| format!("reading {variant} trials from {}", dir.display()))
}

fn print_summary(results: &DatasetResultSet, variant: &str) {
    println!("== {variant} ==");
    for dataset in results.datasets() {
        println!("{dataset}");
        for family in summarize_trials(results.collection(dataset)) {
            println!("  {family}");
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trial_report=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let precision = config.float_precision();

    match cli.command {
        Command::Summary { variant } => {
            let variants = variant.map_or_else(
                || vec![cli.sequence_variant.clone(), cli.factorization_variant.clone()],
                |v| vec![v],
            );
            for variant in &variants {
                print_summary(&load(&cli.path, variant)?, variant);
            }
        }
        Command::Performance { format } => {
            let sequence = load(&cli.path, &cli.sequence_variant)?;
            let factorization = load(&cli.path, &cli.factorization_variant)?;
            let table = performance_table(&sequence, &factorization, &config);
            println!("{}", format.renderer().render_composite(&table, precision));
        }
        Command::Hyperparameters { format } => {
            let sequence = load(&cli.path, &cli.sequence_variant)?;
            let factorization = load(&cli.path, &cli.factorization_variant)?;
            let table = hyperparameter_table(&sequence, &factorization, &config);
            println!("{}", format.renderer().render_composite(&table, precision));
        }
        Command::Curves { output } => {
            let sequence = load(&cli.path, &cli.sequence_variant)?;
            let factorization = load(&cli.path, &cli.factorization_variant)?;
            let grid = build_learning_curves(&sequence, &factorization, &config);
            match output {
                Some(path) => plot_learning_curves(&grid, &path)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => {
                    let titles = ModelClass::ALL.map(ModelClass::caption);
                    print!(
                        "{}",
                        sparkline::render_grid(&grid, &titles, sparkline::DEFAULT_WIDTH)
                    );
                }
            }
        }
        Command::Datasets { datasets, format } => {
            let loaded = datasets
                .iter()
                .map(|arg| -> Result<(&str, Interactions)> {
                    let mut interactions = Interactions::from_csv(&arg.file)
                        .with_context(|| format!("reading {}", arg.file.display()))?;
                    if let Some((num_users, num_items)) = arg.shape {
                        interactions = interactions
                            .with_shape(num_users, num_items)
                            .with_context(|| format!("dataset {}", arg.label))?;
                    }
                    info!(dataset = arg.label.as_str(), shape = ?arg.shape, "loaded interactions");
                    Ok((arg.label.as_str(), interactions))
                })
                .collect::<Result<Vec<_>>>()?;
            let rows: Vec<(&str, &dyn InteractionStats)> = loaded
                .iter()
                .map(|(label, interactions)| (*label, interactions as &dyn InteractionStats))
                .collect();
            println!("{}", format.renderer().render_table(&dataset_table(&rows), precision));
        }
    }

    Ok(())
}
