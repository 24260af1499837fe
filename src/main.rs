use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use hbfw::prelude::*;
use hbfw::research::{
    DataSource,
    ExperimentConfig,
    LoggerBuilder,
    run_experiment,
};

#[derive(Parser)]
#[command(
    name = "hbfw",
    version,
    about = "Frank-Wolfe with heavy-ball momentum for constrained logistic regression"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one variant and write its per-iteration trace as CSV
    Run {
        /// Input .csv or SVMLight/LIBSVM file
        #[arg(long)]
        data: PathBuf,
        /// File format (default: guessed from the extension)
        #[arg(long)]
        format: Option<FileFormat>,
        /// Target column of a CSV file
        #[arg(long)]
        target: Option<String>,
        /// The CSV file has a header row
        #[arg(long)]
        has_header: bool,
        /// Constraint set: l1, l2, n_supp, or simplex
        #[arg(long, default_value = "l1")]
        constraint: ConstraintType,
        /// Radius of the constraint set
        #[arg(long, default_value_t = 10.0)]
        radius: f64,
        /// Algorithm: fw, wfw, or ufw
        #[arg(long, default_value = "wfw")]
        variant: Variant,
        /// Step size rule: pf, s, or ds
        #[arg(long, default_value = "pf")]
        step_size: StepSize,
        /// Number of iterations
        #[arg(long, default_value_t = 500)]
        iterations: usize,
        /// Stop once the Frank-Wolfe gap is below this value (0: never)
        #[arg(long, default_value_t = 0.0)]
        tolerance: f64,
        /// Fraction of the examples held out for the test error
        #[arg(long, default_value_t = 0.0)]
        test_ratio: f64,
        /// Seed of the train/test shuffle
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print a log row every N iterations
        #[arg(long, default_value_t = 100)]
        print_every: usize,
        /// Output .csv trace
        #[arg(short, long, default_value = "run.csv")]
        output: PathBuf,
        /// Save the final weights as JSON
        #[arg(long, value_name = "PATH")]
        weights: Option<PathBuf>,
    },
    /// Run every variant and step size, then plot the objective values
    Compare(CompareArgs),
    /// Write a random binary classification sample in SVMLight format
    Synthetic {
        /// Number of examples
        #[arg(long, default_value_t = 1_000)]
        rows: usize,
        /// Number of features
        #[arg(long, default_value_t = 20)]
        cols: usize,
        /// Probability of flipping a label
        #[arg(long, default_value_t = 0.05)]
        noise: f64,
        /// Random seed
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            data, format, target, has_header,
            constraint, radius, variant, step_size,
            iterations, tolerance, test_ratio, seed, print_every,
            output, weights,
        } => {
            let source = DataSource::File { path: data, format, target, has_header };
            let run = RunArgs {
                source, constraint, radius, variant, step_size,
                iterations, tolerance, test_ratio, seed, print_every,
                output, weights,
            };
            run_single(run)
        },
        Command::Compare(args) => compare(args),
        Command::Synthetic { rows, cols, noise, seed, output } => {
            synthetic(rows, cols, noise, seed, output)
        },
    };

    if let Err(e) = result {
        eprintln!("{} {e}", "error:".bold().red());
        process::exit(1);
    }
}

struct RunArgs {
    source: DataSource,
    constraint: ConstraintType,
    radius: f64,
    variant: Variant,
    step_size: StepSize,
    iterations: usize,
    tolerance: f64,
    test_ratio: f64,
    seed: u64,
    print_every: usize,
    output: PathBuf,
    weights: Option<PathBuf>,
}

fn run_single(args: RunArgs) -> hbfw::Result<()> {
    let sample = args.source.load()?;
    let (train, test) = if args.test_ratio > 0.0 {
        let (train, test) = sample.train_test_split(args.test_ratio, args.seed)?;
        (train, Some(test))
    } else {
        (sample, None)
    };

    let objective = LogisticLoss::new(&train)?;
    let constraint = args.constraint.build(args.radius, train.shape().1)?;
    let optimizer = FrankWolfe::init(objective, constraint)
        .variant(args.variant)
        .step_size(args.step_size)
        .max_iter(args.iterations)
        .tolerance(args.tolerance);

    let mut builder = LoggerBuilder::new()
        .optimizer(optimizer)
        .loss_function(zero_one_loss::<LinearClassifier>)
        .train_sample(&train)
        .print_every(args.print_every);
    if let Some(test) = test.as_ref() {
        builder = builder.test_sample(test);
    }
    let mut logger = builder.build()?;
    let x = logger.run(&args.output)?;

    if let Some(path) = args.weights {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &LinearClassifier::new(x))?;
        writer.flush()?;
    }
    println!("Trace written to {}", args.output.display().to_string().bold());
    Ok(())
}

#[derive(Args)]
struct CompareArgs {
    /// JSON experiment config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Input file (overrides the config's data source)
    #[arg(long)]
    data: Option<PathBuf>,
    /// File format of `--data` (default: guessed from the extension)
    #[arg(long, requires = "data")]
    format: Option<FileFormat>,
    /// Target column of a CSV file
    #[arg(long, requires = "data")]
    target: Option<String>,
    /// The `--data` CSV file has a header row
    #[arg(long, requires = "data")]
    has_header: bool,
    /// Number of iterations (overrides the config)
    #[arg(long)]
    iterations: Option<usize>,
    /// Output directory (overrides the config)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
}

impl CompareArgs {
    /// Loads `--config` (or the defaults) and applies the other flags on top.
    fn into_config(self) -> hbfw::Result<ExperimentConfig> {
        let mut config = match self.config {
            Some(path) => ExperimentConfig::from_file(path)?,
            None => ExperimentConfig::default(),
        };
        if let Some(path) = self.data {
            config.data = DataSource::File {
                path,
                format: self.format,
                target: self.target,
                has_header: self.has_header,
            };
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        Ok(config)
    }
}

fn compare(args: CompareArgs) -> hbfw::Result<()> {
    let config = args.into_config()?;
    let summaries = run_experiment(&config)?;

    println!(
        "{:<6}\t{:<5}\t{:>12}\t{:>12}\t{:>8}",
        "ALGO".bold().red(),
        "STEP".bold().magenta(),
        "OBJ.".bold().blue(),
        "FW GAP".bold().yellow(),
        "TRAIN".bold().green(),
    );
    for s in &summaries {
        println!(
            "{:<6}\t{:<5}\t{:>12.6}\t{:>12.3e}\t{:>8.4}",
            s.variant.to_string(),
            s.step_size.short_name(),
            s.final_objective,
            s.final_gap,
            s.train_error,
        );
    }
    println!("Results written to {}", config.output_dir.display().to_string().bold());
    Ok(())
}

fn synthetic(
    rows: usize,
    cols: usize,
    noise: f64,
    seed: u64,
    output: PathBuf,
) -> hbfw::Result<()>
{
    let sample = Sample::synthetic(rows, cols, noise, seed)?;
    sample.to_svmlight(&output)?;
    println!(
        "Wrote {rows} x {cols} sample to {}",
        output.display().to_string().bold(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_config(args: &[&str]) -> ExperimentConfig {
        let cli = Cli::try_parse_from(
            ["hbfw", "compare"].iter().chain(args)
        ).unwrap();
        match cli.command {
            Command::Compare(args) => args.into_config().unwrap(),
            _ => panic!("expected the compare subcommand"),
        }
    }

    #[test]
    fn headerless_csv_keeps_its_first_row() {
        let config = compare_config(
            &["--data", "points.csv", "--target", "Feat. [3]"]
        );
        assert_eq!(
            config.data,
            DataSource::File {
                path: "points.csv".into(),
                format: None,
                target: Some("Feat. [3]".into()),
                has_header: false,
            },
        );
    }

    #[test]
    fn header_flag_and_format_reach_the_data_source() {
        let config = compare_config(&[
            "--data", "heart.txt", "--format", "csv",
            "--target", "disease", "--has-header", "--iterations", "40",
        ]);
        assert_eq!(config.iterations, 40);
        assert_eq!(
            config.data,
            DataSource::File {
                path: "heart.txt".into(),
                format: Some(FileFormat::Csv),
                target: Some("disease".into()),
                has_header: true,
            },
        );
    }

    #[test]
    fn header_flag_needs_a_data_file() {
        assert!(
            Cli::try_parse_from(["hbfw", "compare", "--has-header"]).is_err()
        );
    }
}
