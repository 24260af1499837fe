use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::{
    Sample,
    SampleReader,
    FileFormat,
    constants::{DEFAULT_ITERATIONS, DEFAULT_RADIUS, DEFAULT_TOLERANCE},
    constraint::ConstraintType,
    error::{FwError, Result},
    optimizer::{StepSize, Variant},
};


/// Where the examples of an experiment come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum DataSource {
    /// A CSV or SVMLight file.
    File {
        path: PathBuf,
        #[serde(default)]
        format: Option<FileFormat>,
        /// Target column name. CSV only.
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        has_header: bool,
    },
    /// A random sample, see [`Sample::synthetic`].
    Synthetic {
        n_sample: usize,
        n_feature: usize,
        #[serde(default)]
        noise: f64,
        #[serde(default)]
        seed: u64,
    },
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Synthetic {
            n_sample: 1_000,
            n_feature: 20,
            noise: 0.05,
            seed: 0,
        }
    }
}

impl DataSource {
    /// Loads the sample with labels mapped to `{-1, +1}`.
    pub fn load(&self) -> Result<Sample> {
        match self {
            Self::File { path, format, target, has_header } => {
                let format = format.unwrap_or_else(|| FileFormat::from_path(path));
                let mut reader: SampleReader<&Path, &str> = SampleReader::new()
                    .file(path.as_path())
                    .format(format)
                    .has_header(*has_header)
                    .normalize_labels(true);
                if let Some(target) = target {
                    reader = reader.target_feature(target.as_str());
                }
                reader.read()
            },
            Self::Synthetic { n_sample, n_feature, noise, seed } => {
                Sample::synthetic(*n_sample, *n_feature, *noise, *seed)
            },
        }
    }
}


/// An experiment that runs every pair of
/// `variants × step_sizes` on the logistic loss.
///
/// Every field has a default, so a JSON file needs to name
/// only what differs:
/// ```json
/// {
///     "data": { "kind": "file", "path": "mushrooms.txt" },
///     "constraint": "l1",
///     "radius": 10.0,
///     "iterations": 1000,
///     "step_sizes": ["pf", "ds"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub data: DataSource,
    /// Fraction of the examples held out for the test error.
    /// `0` uses the whole sample for training.
    pub test_ratio: f64,
    /// Seed of the train/test shuffle.
    pub seed: u64,
    pub constraint: ConstraintType,
    pub radius: f64,
    pub iterations: usize,
    pub tolerance: f64,
    pub variants: Vec<Variant>,
    pub step_sizes: Vec<StepSize>,
    pub output_dir: PathBuf,
    /// Print a log row every `print_every` iterations.
    /// `None` keeps the console quiet.
    pub print_every: Option<usize>,
    pub time_limit_secs: Option<u64>,
    /// Draw `loss.svg` and `suboptimality.svg`.
    pub plot: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            data: DataSource::default(),
            test_ratio: 0f64,
            seed: 0,
            constraint: ConstraintType::L1,
            radius: DEFAULT_RADIUS,
            iterations: DEFAULT_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            variants: Variant::ALL.to_vec(),
            step_sizes: StepSize::ALL.to_vec(),
            output_dir: PathBuf::from("output"),
            print_every: None,
            time_limit_secs: None,
            plot: true,
        }
    }
}

impl ExperimentConfig {
    /// Reads a JSON config.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Writes `self` as pretty-printed JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Checks the ranges that are not checked
    /// by the optimizer itself.
    pub fn validate(&self) -> Result<()> {
        if self.variants.is_empty() || self.step_sizes.is_empty() {
            return Err(FwError::InvalidParameter(
                "an experiment needs at least one variant and one step size"
                    .into()
            ));
        }
        if !(0f64..1f64).contains(&self.test_ratio) {
            return Err(FwError::InvalidParameter(format!(
                "test ratio must be in [0, 1). got {}.", self.test_ratio
            )));
        }
        if self.print_every == Some(0) {
            return Err(FwError::InvalidParameter(
                "`print_every` must be positive".into()
            ));
        }
        Ok(())
    }
}
