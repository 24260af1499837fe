use colored::Colorize;

use crate::{
    Sample,
    classifier::LinearClassifier,
    error::Result,
    optimizer::Optimizer,
};

use std::fs::File;
use std::io::{prelude::*, BufWriter};
use std::path::Path;
use std::time::{Duration, Instant};
use std::ops::ControlFlow;

const COLUMN: usize = 10;
const DIGITS: usize = 5;
const BANNER: usize = 64;
const KEY_WIDTH: usize = 24;
const HEADER: &str
    = "Iteration,ObjectiveValue,FwGap,StepSize,TrainError,TestError,Time\n";

/// Runs an [`Optimizer`] and records, for every iteration,
/// the objective value, the Frank-Wolfe gap, the step size,
/// the train/test error of `sign(aᵀx)` and the cumulative running time.
///
/// Build one with [`LoggerBuilder`](super::LoggerBuilder).
pub struct Logger<'a, O, G> {
    pub(super) optimizer: O,
    pub(super) loss_func: G,
    pub(super) train: &'a Sample,
    pub(super) test: Option<&'a Sample>,
    pub(super) time_limit: u128,
    pub(super) round: usize,
}

/// One row of the trace.
/// `gap` and `step` are `None` for the initial point.
struct Record {
    iter: usize,
    objective: f64,
    gap: Option<f64>,
    step: Option<f64>,
    train: f64,
    test: f64,
    millis: u128,
}

impl Record {
    fn write_csv<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let blank = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            self.iter,
            self.objective,
            blank(self.gap),
            blank(self.step),
            self.train,
            self.test,
            self.millis,
        )
    }

    fn print(&self, tag: colored::ColoredString) {
        let num = |v: f64| format!("{v:>COLUMN$.DIGITS$}");
        println!(
            "{tag} {} {} {} {} {} {}",
            format!("{:>COLUMN$}", self.iter).red(),
            num(self.objective).blue(),
            num(self.gap.unwrap_or(f64::NAN)).magenta(),
            num(self.train).green(),
            num(self.test).yellow(),
            time_format(self.millis).cyan(),
        );
    }
}

impl<'a, O, G> Logger<'a, O, G> {
    /// The wrapped optimizer.
    /// Use this to read the history after [`Logger::run`].
    pub fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Consumes `self` and returns the optimizer.
    pub fn into_optimizer(self) -> O {
        self.optimizer
    }
}

impl<O, G> Logger<'_, O, G>
    where O: Optimizer,
          G: Fn(&Sample, &LinearClassifier) -> f64,
{
    fn print_columns() {
        let head = [
            ("ITER", "red"), ("OBJECTIVE", "blue"), ("FW GAP", "magenta"),
            ("TRAIN ERR", "green"), ("TEST ERR", "yellow"), ("TIME", "cyan"),
        ];
        let line = head.iter()
            .map(|(name, color)| {
                format!("{name:>COLUMN$}").bold().color(*color).to_string()
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("      {line}");
    }

    fn print_settings(&self) {
        let (n_sample, n_feature) = self.train.shape();
        let limit = match self.time_limit {
            u128::MAX => "none".to_string(),
            ms => time_format(ms).trim().to_string(),
        };

        let mut entries = vec![
            ("Optimizer".to_string(), self.optimizer.name().to_string()),
        ];
        entries.extend(
            self.optimizer.info()
                .into_iter()
                .flatten()
                .map(|(key, val)| (format!("  {key}"), val))
        );
        entries.push(
            ("Sample (rows x cols)".into(), format!("{n_sample} x {n_feature}"))
        );
        entries.push(("Time limit".into(), limit));

        println!("\n{:=>BANNER$}", "");
        println!("{:^BANNER$}", "SETTINGS".bold());
        println!("{:->BANNER$}", "");
        for (key, val) in entries {
            let width = BANNER - KEY_WIDTH - 2;
            println!("  {key:<KEY_WIDTH$}{:>width$}", val.bold().green());
        }
        println!("{:=>BANNER$}\n", "");
    }

    fn record(&self, iter: usize, millis: u128, initial: bool) -> Record {
        let f = LinearClassifier::new(
            self.optimizer.current_iterate().to_vec()
        );
        let train = (self.loss_func)(self.train, &f);
        let test = self.test
            .map_or(f64::NAN, |test| (self.loss_func)(test, &f));
        let (gap, step) = if initial {
            (None, None)
        } else {
            (
                Some(self.optimizer.current_gap()),
                Some(self.optimizer.current_step_size()),
            )
        };
        Record {
            iter,
            objective: self.optimizer.current_objective(),
            gap,
            step,
            train,
            test,
            millis,
        }
    }

    /// Run the optimizer to completion (or until the time limit)
    /// and write the trace to `filename`.
    ///
    /// The CSV has one row for the initial point (iteration `0`)
    /// followed by one row per completed iteration.
    /// Only the time spent inside [`Optimizer::step`] is counted.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P) -> Result<Vec<f64>> {
        let mut file = BufWriter::new(File::create(filename)?);
        file.write_all(HEADER.as_bytes())?;

        self.optimizer.preprocess()?;
        let verbose = self.round != usize::MAX;
        if verbose {
            self.print_settings();
            Self::print_columns();
        }
        self.record(0, 0, true).write_csv(&mut file)?;

        // Steps often take less than a millisecond,
        // so sum exact durations and truncate only when reporting.
        let mut elapsed = Duration::ZERO;
        for iter in 0.. {
            let clock = Instant::now();
            let flow = self.optimizer.step(iter);
            elapsed += clock.elapsed();
            let millis = elapsed.as_millis();

            let record = self.record(iter + 1, millis, false);
            record.write_csv(&mut file)?;

            let timed_out = millis > self.time_limit;
            let finished = matches!(flow, ControlFlow::Break(_));
            if !verbose {
                if timed_out || finished { break; }
                continue;
            }

            if timed_out {
                record.print("[TLE]".bold().bright_red());
                println!();
                break;
            }
            if record.iter % self.round == 0 {
                record.print("[LOG]".bold().magenta());
            }
            if finished {
                record.print("[FIN]".bold().bright_green());
                println!();
                break;
            }
        }
        file.flush()?;

        Ok(self.optimizer.postprocess())
    }
}

/// Formats a duration given in milliseconds with two units,
/// e.g. `0.042s`, `12.500s`, `03m 07s`, `01h 02m`.
fn time_format(millis: u128) -> String {
    let (h, m, s, ms) = (
        millis / 3_600_000,
        millis / 60_000 % 60,
        millis / 1_000 % 60,
        millis % 1_000,
    );
    match (h, m) {
        (0, 0) => format!("{s:>2}.{ms:0>3}s"),
        (0, _) => format!("{m:0>2}m {s:0>2}s"),
        _      => format!("{h:0>2}h {m:0>2}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_format_picks_two_units() {
        assert_eq!(time_format(42), " 0.042s");
        assert_eq!(time_format(12_500), "12.500s");
        assert_eq!(time_format(187_000), "03m 07s");
        assert_eq!(time_format(3_720_000), "01h 02m");
    }

    #[test]
    fn initial_record_leaves_gap_and_step_blank() {
        let record = Record {
            iter: 0, objective: 0.5, gap: None, step: None,
            train: 0.25, test: f64::NAN, millis: 0,
        };
        let mut out = Vec::new();
        record.write_csv(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0,0.5,,,0.25,NaN,0\n");
    }
}
