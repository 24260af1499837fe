use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use serde::{Serialize, Deserialize};

use crate::{
    Sample,
    classifier::{LinearClassifier, zero_one_loss},
    error::Result,
    objective::LogisticLoss,
    optimizer::{FrankWolfe, StepSize, Variant},
};
use super::{
    ExperimentConfig,
    LoggerBuilder,
    plot::{self, Curve, Scale},
};

pub const SUMMARY_FILE: &str = "summary.json";
pub const OBJECTIVE_PLOT: &str = "loss.svg";
pub const SUBOPTIMALITY_PLOT: &str = "suboptimality.svg";


/// The outcome of a single `(variant, step size)` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub variant: Variant,
    pub step_size: StepSize,
    pub iterations: usize,
    pub final_objective: f64,
    pub best_objective: f64,
    pub final_gap: f64,
    pub best_gap: f64,
    pub train_error: f64,
    pub test_error: Option<f64>,
    pub time_millis: u128,
    /// The per-iteration CSV of this run.
    pub trace: PathBuf,
}


/// Runs every `(variant, step size)` pair of `config`.
///
/// `config.output_dir` receives
/// - `<variant>_<step size>.csv` for each run (see [`super::Logger`]),
/// - `summary.json` with one [`RunSummary`] per run, and
/// - `loss.svg` / `suboptimality.svg` comparing the runs,
///   unless `config.plot` is `false`.
pub fn run_experiment(config: &ExperimentConfig) -> Result<Vec<RunSummary>> {
    config.validate()?;

    let sample = config.data.load()?;
    let (train, test) = if config.test_ratio > 0f64 {
        let (train, test) = sample.train_test_split(config.test_ratio, config.seed)?;
        (train, Some(test))
    } else {
        (sample, None)
    };

    fs::create_dir_all(&config.output_dir)?;

    let mut summaries = Vec::new();
    let mut curves = Vec::new();
    for &variant in &config.variants {
        for &step_size in &config.step_sizes {
            let (summary, values) = run_once(
                config, &train, test.as_ref(), variant, step_size,
            )?;
            curves.push(Curve::new(format!("{variant} ({step_size})"), values));
            summaries.push(summary);
        }
    }

    let path = config.output_dir.join(SUMMARY_FILE);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &summaries)?;
    writer.flush()?;

    if config.plot {
        let title = format!(
            "Logistic loss, {} (R = {})", config.constraint, config.radius
        );
        plot::loss_curves(
            config.output_dir.join(OBJECTIVE_PLOT),
            &title, &curves, Scale::Objective,
        )?;
        plot::loss_curves(
            config.output_dir.join(SUBOPTIMALITY_PLOT),
            &title, &curves, Scale::Suboptimality,
        )?;
    }

    Ok(summaries)
}


fn run_once(
    config: &ExperimentConfig,
    train: &Sample,
    test: Option<&Sample>,
    variant: Variant,
    step_size: StepSize,
) -> Result<(RunSummary, Vec<f64>)>
{
    let objective = LogisticLoss::new(train)?;
    let constraint = config.constraint.build(config.radius, train.shape().1)?;
    let optimizer = FrankWolfe::init(objective, constraint)
        .variant(variant)
        .step_size(step_size)
        .max_iter(config.iterations)
        .tolerance(config.tolerance);

    let mut builder = LoggerBuilder::new()
        .optimizer(optimizer)
        .loss_function(zero_one_loss::<LinearClassifier>)
        .train_sample(train)
        .print_every(config.print_every.unwrap_or(usize::MAX));
    if let Some(test) = test {
        builder = builder.test_sample(test);
    }
    if let Some(secs) = config.time_limit_secs {
        builder = builder.time_limit_as_secs(secs);
    }
    let mut logger = builder.build()?;

    let trace = config.output_dir
        .join(format!("{}_{}.csv", variant.short_name(), step_size.short_name()));

    let now = Instant::now();
    let x = logger.run(&trace)?;
    let time_millis = now.elapsed().as_millis();

    let f = LinearClassifier::new(x);
    let train_error = zero_one_loss(train, &f);
    let test_error = test.map(|test| zero_one_loss(test, &f));

    let history = logger.into_optimizer().into_history();
    let summary = RunSummary {
        variant,
        step_size,
        iterations: history.iterations(),
        final_objective: history.last_objective().unwrap_or(f64::NAN),
        best_objective: history.best_objective().unwrap_or(f64::NAN),
        final_gap: history.fw_gaps.last().copied().unwrap_or(f64::NAN),
        best_gap: history.best_gap().unwrap_or(f64::NAN),
        train_error,
        test_error,
        time_millis,
        trace,
    };
    Ok((summary, history.objective_values))
}
