use crate::{
    Sample,
    error::{FwError, Result},
};
use super::Logger;

/// Console rows are printed every this many iterations by default.
const DEFAULT_ROUND: usize = 100;

/// Assembles a [`Logger`].
///
/// An optimizer, a loss function and a training sample are required.
/// The test sample is optional; without it the `TestError` column is `NaN`.
/// There is no time limit unless one is set.
///
/// # Example
/// ```no_run
/// use hbfw::prelude::*;
/// use hbfw::research::LoggerBuilder;
///
/// let sample = Sample::from_svmlight("mushrooms.txt")
///     .unwrap()
///     .normalize_binary_target()
///     .unwrap();
/// let (train, test) = sample.train_test_split(0.2, 0).unwrap();
///
/// let objective = LogisticLoss::new(&train).unwrap();
/// let constraint = ConstraintType::L1.build(10.0, train.shape().1).unwrap();
/// let optimizer = FrankWolfe::init(objective, constraint)
///     .variant(Variant::Weighted)
///     .step_size(StepSize::DirectionallySmooth)
///     .max_iter(500);
///
/// let mut logger = LoggerBuilder::new()
///     .optimizer(optimizer)
///     .loss_function(zero_one_loss::<LinearClassifier>)
///     .train_sample(&train)
///     .test_sample(&test)
///     .time_limit_as_secs(300)
///     .print_every(50)
///     .build()
///     .unwrap();
///
/// let x = logger.run("wfw_ds.csv").unwrap();
/// ```
pub struct LoggerBuilder<'a, O, G> {
    optimizer: Option<O>,
    loss_func: Option<G>,
    train: Option<&'a Sample>,
    test: Option<&'a Sample>,
    time_limit: u128,
    round: usize,
}


impl<O, G> Default for LoggerBuilder<'_, O, G> {
    fn default() -> Self {
        Self {
            optimizer: None,
            loss_func: None,
            train: None,
            test: None,
            time_limit: u128::MAX,
            round: DEFAULT_ROUND,
        }
    }
}


impl<'a, O, G> LoggerBuilder<'a, O, G> {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn optimizer(mut self, optimizer: O) -> Self {
        self.optimizer = Some(optimizer);
        self
    }


    /// Error measure evaluated on the current iterate after every step.
    pub fn loss_function(mut self, loss_func: G) -> Self {
        self.loss_func = Some(loss_func);
        self
    }


    pub fn train_sample(mut self, train: &'a Sample) -> Self {
        self.train = Some(train);
        self
    }


    pub fn test_sample(mut self, test: &'a Sample) -> Self {
        self.test = Some(test);
        self
    }


    /// Stop once the time spent in `step` exceeds `millis`.
    pub fn time_limit_as_millis(mut self, millis: u128) -> Self {
        self.time_limit = millis;
        self
    }


    /// Same as [`LoggerBuilder::time_limit_as_millis`], in seconds.
    pub fn time_limit_as_secs(self, secs: u64) -> Self {
        self.time_limit_as_millis((secs as u128).saturating_mul(1_000))
    }


    /// Print a console row every `every` iterations.
    /// `usize::MAX` turns the console output off; the CSV is still written.
    pub fn print_every(mut self, every: usize) -> Self {
        self.round = every;
        self
    }


    /// Fails if a required part is missing or `print_every(0)` was given.
    pub fn build(self) -> Result<Logger<'a, O, G>> {
        let missing = |what: &str| {
            FwError::InvalidParameter(format!("`LoggerBuilder` needs a {what}"))
        };
        if self.round == 0 {
            return Err(FwError::InvalidParameter(
                "`print_every` must be positive".into()
            ));
        }

        Ok(Logger {
            optimizer: self.optimizer.ok_or_else(|| missing("optimizer"))?,
            loss_func: self.loss_func.ok_or_else(|| missing("loss function"))?,
            train: self.train.ok_or_else(|| missing("training sample"))?,
            test: self.test,
            time_limit: self.time_limit,
            round: self.round,
        })
    }
}
