use std::fs;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use hbfw::prelude::*;
use hbfw::research::{
    DataSource,
    ExperimentConfig,
    LoggerBuilder,
    RunSummary,
    run_experiment,
};


/// Tests for the logger and the experiment runner.
#[cfg(test)]
pub mod research_tests {
    use super::*;

    #[test]
    fn logger_writes_one_row_per_iterate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.csv");

        let sample = Sample::synthetic(120, 6, 0.05, 11).unwrap();
        let (train, test) = sample.train_test_split(0.25, 0).unwrap();

        let objective = LogisticLoss::new(&train).unwrap();
        let optimizer = FrankWolfe::init(objective, L1Ball::new(4.0))
            .variant(Variant::Uniform)
            .step_size(StepSize::Smooth)
            .max_iter(25);

        let mut logger = LoggerBuilder::new()
            .optimizer(optimizer)
            .loss_function(zero_one_loss::<LinearClassifier>)
            .train_sample(&train)
            .test_sample(&test)
            .print_every(usize::MAX)
            .build()
            .unwrap();
        let x = logger.run(&path).unwrap();
        assert_eq!(x.len(), 6);

        let text = fs::read_to_string(&path).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "Iteration,ObjectiveValue,FwGap,StepSize,TrainError,TestError,Time"
        );
        assert_eq!(lines.len(), 1 + 26);
        assert!(lines[1].starts_with("0,"));
        assert!(lines[26].starts_with("25,"));

        let history = logger.optimizer().history();
        let last = lines[26].split(',').nth(1).unwrap().parse::<f64>().unwrap();
        assert_eq!(Some(last), history.last_objective());
    }

    /// Sleeps for a fixed time in every step and never converges.
    struct Sleeper {
        x: Vec<f64>,
        nap: Duration,
        cap: usize,
    }

    impl Optimizer for Sleeper {
        fn name(&self) -> &str { "Sleeper" }
        fn preprocess(&mut self) -> hbfw::Result<()> { Ok(()) }
        fn step(&mut self, iteration: usize) -> ControlFlow<usize> {
            if iteration >= self.cap {
                return ControlFlow::Break(iteration);
            }
            thread::sleep(self.nap);
            ControlFlow::Continue(())
        }
        fn postprocess(&mut self) -> Vec<f64> { self.x.clone() }
        fn current_iterate(&self) -> &[f64] { &self.x }
        fn current_objective(&self) -> f64 { 0f64 }
    }

    #[test]
    fn time_limit_counts_sub_millisecond_steps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slow.csv");
        let sample = Sample::synthetic(20, 3, 0.0, 4).unwrap();

        let sleeper = Sleeper {
            x: vec![0f64; 3],
            nap: Duration::from_micros(300),
            cap: 100_000,
        };
        let mut logger = LoggerBuilder::new()
            .optimizer(sleeper)
            .loss_function(zero_one_loss::<LinearClassifier>)
            .train_sample(&sample)
            .time_limit_as_millis(5)
            .print_every(usize::MAX)
            .build()
            .unwrap();
        logger.run(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let last = text.lines().last().unwrap();
        let fields = last.split(',').collect::<Vec<_>>();
        let steps = fields[0].parse::<usize>().unwrap();
        let millis = fields[6].parse::<u128>().unwrap();

        // Each step takes at least 300µs, so 6ms are spent within 20 steps.
        assert!(steps <= 20, "ran {steps} steps past a 5ms limit");
        assert!(millis > 5, "stopped at {millis}ms");
    }

    #[test]
    fn builder_rejects_zero_print_interval() {
        let sample = Sample::synthetic(10, 2, 0.0, 0).unwrap();
        let objective = LogisticLoss::new(&sample).unwrap();
        let logger = LoggerBuilder::new()
            .optimizer(FrankWolfe::init(objective, L1Ball::new(1.0)))
            .loss_function(zero_one_loss::<LinearClassifier>)
            .train_sample(&sample)
            .print_every(0)
            .build();
        assert!(matches!(logger, Err(FwError::InvalidParameter(_))));
    }

    #[test]
    fn builder_requires_an_optimizer() {
        let sample = Sample::synthetic(10, 2, 0.0, 0).unwrap();
        let logger = LoggerBuilder::<FrankWolfe<LogisticLoss, L1Ball>, _>::new()
            .loss_function(zero_one_loss::<LinearClassifier>)
            .train_sample(&sample)
            .build();
        assert!(logger.is_err());
    }

    #[test]
    fn experiment_writes_traces_and_summary() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExperimentConfig {
            data: DataSource::Synthetic {
                n_sample: 150, n_feature: 5, noise: 0.05, seed: 1,
            },
            test_ratio: 0.2,
            constraint: ConstraintType::L2,
            radius: 3.0,
            iterations: 20,
            variants: vec![Variant::Vanilla, Variant::Uniform],
            step_sizes: vec![StepSize::ParameterFree, StepSize::DirectionallySmooth],
            output_dir: dir.path().to_path_buf(),
            plot: false,
            ..Default::default()
        };

        let summaries = run_experiment(&config).unwrap();
        assert_eq!(summaries.len(), 4);
        for summary in &summaries {
            assert_eq!(summary.iterations, 20);
            assert!(summary.trace.exists());
            assert!(summary.test_error.is_some());
            assert!(summary.best_objective <= summary.final_objective);
        }
        assert!(dir.path().join("fw_pf.csv").exists());
        assert!(dir.path().join("ufw_ds.csv").exists());

        let json = fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let read: Vec<RunSummary> = serde_json::from_str(&json).unwrap();
        assert_eq!(read.len(), 4);
        assert_eq!(read[1].variant, Variant::Vanilla);
        assert_eq!(read[1].step_size, StepSize::DirectionallySmooth);
    }

    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("experiment.json");

        let config = ExperimentConfig {
            constraint: ConstraintType::Simplex,
            iterations: 42,
            ..Default::default()
        };
        config.to_file(&path).unwrap();
        let read = ExperimentConfig::from_file(&path).unwrap();
        assert_eq!(read, config);
    }
}
