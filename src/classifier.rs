//! A linear classifier `x ↦ sign(aᵀx)` built from an optimized weight vector.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::Sample;

/// A trait that defines the function used to predict labels.
pub trait Classifier {
    /// Computes the confidence of the `row`-th example in `sample`.
    fn confidence(&self, sample: &Sample, row: usize) -> f64;

    /// Predicts the label of the `row`-th example in `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> i64 {
        if self.confidence(sample, row) >= 0f64 { 1 } else { -1 }
    }

    /// Predicts the labels of all examples.
    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|i| self.predict(sample, i))
            .collect()
    }
}

/// The weight vector returned by an optimizer.
/// You can read/write this struct by `serde`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights, }
    }

    /// Computes all confidences at once, i.e., `Ax`.
    pub fn confidence_all(&self, sample: &Sample) -> Vec<f64> {
        sample.matvec(&self.weights[..])
    }
}

impl Classifier for LinearClassifier {
    fn confidence(&self, sample: &Sample, row: usize) -> f64 {
        sample.features()
            .iter()
            .zip(&self.weights)
            .map(|(feat, w)| w * feat[row])
            .sum()
    }

    fn predict_all(&self, sample: &Sample) -> Vec<i64> {
        self.confidence_all(sample)
            .into_iter()
            .map(|c| if c >= 0f64 { 1 } else { -1 })
            .collect()
    }
}

/// The fraction of misclassified examples.
/// Returns `NaN` for an empty sample.
pub fn zero_one_loss<H>(sample: &Sample, f: &H) -> f64
    where H: Classifier,
{
    let n_sample = sample.shape().0 as f64;

    let target = sample.target();

    f.predict_all(sample)
        .into_par_iter()
        .zip(target)
        .map(|(hx, &y)| if hx as f64 != y { 1f64 } else { 0f64 })
        .sum::<f64>()
        / n_sample
}
