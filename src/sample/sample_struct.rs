use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::collections::{BTreeMap, HashMap};
use std::ops::Index;

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use super::feature::*;
use crate::error::{FwError, Result};

/// Struct `Sample` holds a labeled batch sample with dense/sparse columns.
/// The columns form the design matrix `A` (`n_sample × n_feature`)
/// and `target` is the label vector `y`.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}

impl Sample {
    /// Construct a sample from dense rows and labels.
    pub fn from_rows<T>(rows: T, target: Vec<f64>) -> Result<Self>
        where T: AsRef<[Vec<f64>]>,
    {
        let rows = rows.as_ref();
        let n_sample = rows.len();
        if n_sample != target.len() {
            return Err(FwError::DimensionMismatch {
                expected: n_sample,
                got: target.len(),
            });
        }
        let n_feature = rows.first().map(|r| r.len()).unwrap_or(0);

        let mut features = (1..=n_feature)
            .map(|j| Feature::dense(format!("Feat. [{j}]")))
            .collect::<Vec<_>>();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_feature {
                return Err(FwError::Parse {
                    line: i + 1,
                    message: format!(
                        "expected {n_feature} columns, got {}", row.len()
                    ),
                });
            }
            features.iter_mut()
                .zip(row)
                .for_each(|(feat, &x)| { feat.append((i, x)); });
        }

        let name_to_index = index_by_name(&features);
        Ok(Self { name_to_index, features, target, n_sample, n_feature, })
    }

    /// Loads a comma-separated file of numbers.
    ///
    /// Every column, the label column included, becomes a feature.
    /// Without a header row the columns are named
    /// `Feat. [1]`, `Feat. [2]`, and so on.
    /// Pick the label column afterwards with [`Sample::set_target`].
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        Self::from_reader(BufReader::new(File::open(file)?), has_header)
    }

    /// Read a CSV from any buffered reader.
    pub fn from_reader<R>(reader: R, has_header: bool) -> Result<Self>
        where R: BufRead,
    {
        let mut lines = reader.lines().enumerate();

        let mut features = Vec::new();
        if has_header {
            if let Some((_, line)) = lines.next() {
                features = line?.split(',')
                    .map(|name| Feature::dense(name.trim()))
                    .collect::<Vec<_>>();
            }
        }
        let mut n_sample = 0_usize;

        for (i, line) in lines {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let xs = line.split(',')
                .map(|x| {
                    x.trim().parse::<f64>()
                        .map_err(|_| FwError::Parse {
                            line: i + 1,
                            message: format!("non-numerical value `{x}`"),
                        })
                })
                .collect::<Result<Vec<_>>>()?;

            // No header: name the columns after the first data row.
            if features.is_empty() {
                features = (1..=xs.len())
                    .map(|j| Feature::dense(format!("Feat. [{j}]")))
                    .collect::<Vec<_>>();
            }

            if xs.len() != features.len() {
                return Err(FwError::Parse {
                    line: i + 1,
                    message: format!(
                        "expected {} columns, got {}",
                        features.len(), xs.len(),
                    ),
                });
            }

            features.iter_mut()
                .zip(xs)
                .for_each(|(feat, x)| { feat.append((n_sample, x)); });
            n_sample += 1;
        }

        let name_to_index = index_by_name(&features);
        Ok(Self {
            name_to_index,
            n_feature: features.len(),
            features,
            target: Vec::new(),
            n_sample,
        })
    }

    /// Builds a sample from a `polars` frame of features and a label series.
    /// Every column is cast to `f64`. Null values are rejected.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let n_sample = data.height();
        let n_feature = data.width();
        let target = series_to_vec(&target)?;
        if target.len() != n_sample {
            return Err(FwError::DimensionMismatch {
                expected: n_sample,
                got: target.len(),
            });
        }

        let mut features = Vec::with_capacity(n_feature);
        for series in data.get_columns() {
            features.push(Feature::from_vals(series.name(), series_to_vec(series)?));
        }

        let name_to_index = index_by_name(&features);
        Ok(Self { name_to_index, features, target, n_sample, n_feature, })
    }

    /// Loads a LIBSVM/SVMLight file (`label idx:val idx:val ...` per line)
    /// into sparse columns.
    ///
    /// Index `i` fills column `i`. Columns that never receive a non-zero
    /// value are dropped afterwards, which makes 0-based and 1-based files
    /// produce the same matrix. Text after `#` is ignored.
    pub fn from_svmlight<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = File::open(file)?;
        Self::from_svmlight_reader(BufReader::new(file))
    }

    /// Read a SVMLight format text from any buffered reader.
    pub fn from_svmlight_reader<R: BufRead>(reader: R) -> Result<Self> {
        // Only indices that occur get a column.
        let mut columns: BTreeMap<usize, Feature> = BTreeMap::new();
        let mut target = Vec::new();
        let mut n_sample = 0_usize;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            // Drop trailing comments.
            let line = line.split('#').next().unwrap_or("");
            let mut tokens = line.split_whitespace();
            let Some(y) = tokens.next() else { continue; };
            let y = y.parse::<f64>()
                .map_err(|_| FwError::Parse {
                    line: lineno + 1,
                    message: format!("invalid target value `{y}`"),
                })?;
            target.push(y);

            for token in tokens {
                let (col, x) = parse_pair(token)
                    .ok_or_else(|| FwError::Parse {
                        line: lineno + 1,
                        message: format!("invalid `index:value` pair `{token}`"),
                    })?;

                columns.entry(col)
                    .or_insert_with(|| Feature::sparse(format!("Feat. [{col}]"), 0))
                    .append((n_sample, x));
            }
            n_sample += 1;
        }

        let features = columns.into_values()
            .filter(|feat| !feat.is_empty())
            .map(|mut feat| { feat.set_size(n_sample); feat })
            .collect::<Vec<_>>();

        Ok(Self {
            name_to_index: index_by_name(&features),
            n_feature: features.len(),
            features,
            target,
            n_sample,
        })
    }

    /// Write `self` as a SVMLight format file (1-indexed).
    pub fn to_svmlight<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = File::create(file)?;
        let mut writer = BufWriter::new(file);
        for i in 0..self.n_sample {
            let (x, y) = self.at(i);
            write!(writer, "{y}")?;
            for (j, xj) in x.into_iter().enumerate() {
                if xj != 0f64 {
                    write!(writer, " {}:{xj}", j + 1)?;
                }
            }
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Generates a random binary classification sample.
    ///
    /// Each feature is drawn from the standard normal distribution,
    /// and each label is `sign(aᵢᵀw*)` for a hidden Gaussian `w*`,
    /// flipped with probability `noise`.
    pub fn synthetic(
        n_sample: usize,
        n_feature: usize,
        noise: f64,
        seed: u64,
    ) -> Result<Self>
    {
        if !(0f64..=1f64).contains(&noise) {
            return Err(FwError::InvalidParameter(format!(
                "label noise must be in [0, 1]. got {noise}."
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let hidden = (0..n_feature)
            .map(|_| rng.sample::<f64, _>(StandardNormal))
            .collect::<Vec<_>>();

        let mut rows = Vec::with_capacity(n_sample);
        let mut target = Vec::with_capacity(n_sample);
        for _ in 0..n_sample {
            let row = (0..n_feature)
                .map(|_| rng.sample::<f64, _>(StandardNormal))
                .collect::<Vec<_>>();
            let score = row.iter()
                .zip(&hidden)
                .map(|(a, w)| a * w)
                .sum::<f64>();
            let mut y = if score >= 0f64 { 1f64 } else { -1f64 };
            if rng.gen_bool(noise) { y = -y; }
            rows.push(row);
            target.push(y);
        }
        Self::from_rows(rows, target)
    }

    /// The label vector `y`.
    pub fn target(&self) -> &[f64] {
        &self.target
    }

    /// Distinct labels, smallest first.
    pub fn unique_target(&self) -> Vec<f64> {
        let mut labels = self.target.clone();
        labels.sort_by(f64::total_cmp);
        labels.dedup();
        labels
    }

    /// The columns of `A`.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Moves the column named `target` out of `A` and uses it as `y`.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| FwError::MissingTarget(target.to_string()))?;

        self.target = self.features.remove(pos).into_vals();
        self.n_feature -= 1;
        self.name_to_index = index_by_name(&self.features);

        Ok(self)
    }

    /// Map the labels to `{-1, +1}`.
    /// Labels equal to `positive` become `+1`, the others `-1`.
    pub fn binarize_target(mut self, positive: f64) -> Self {
        self.target.iter_mut()
            .for_each(|y| {
                *y = if *y == positive { 1f64 } else { -1f64 };
            });
        self
    }

    /// Map a two-class target to `{-1, +1}`.
    /// The larger label becomes `+1`.
    /// LIBSVM's `mushrooms` uses `{1, 2}`, for example.
    pub fn normalize_binary_target(self) -> Result<Self> {
        let labels = self.unique_target();
        match labels[..] {
            [_, positive] => Ok(self.binarize_target(positive)),
            _ => Err(FwError::InvalidLabels(format!(
                "expected exactly 2 distinct labels, got {}: {labels:?}",
                labels.len(),
            ))),
        }
    }

    /// `(n_sample, n_feature)`, the shape of `A`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }

    /// Row `i` of `A` together with its label.
    pub fn at(&self, i: usize) -> (Vec<f64>, f64) {
        let row = self.features.iter().map(|feat| feat[i]).collect();
        (row, self.target[i])
    }

    /// Returns `Ax`, the vector of scores `aᵢᵀx`.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(x.len(), self.n_feature, "matvec: dimension mismatch");
        let n_sample = self.n_sample;
        self.features.par_iter()
            .zip(x.par_iter())
            .fold(
                || vec![0f64; n_sample],
                |mut acc, (feat, &xj)| {
                    feat.add_scaled_to(xj, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0f64; n_sample],
                |mut a, b| {
                    a.iter_mut()
                        .zip(b)
                        .for_each(|(ai, bi)| { *ai += bi; });
                    a
                },
            )
    }

    /// Returns `Aᵀv`.
    pub fn transposed_matvec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            v.len(), self.n_sample,
            "transposed_matvec: dimension mismatch",
        );
        self.features.par_iter()
            .map(|feat| feat.dot(v))
            .collect()
    }

    /// Returns `‖A‖²_F`.
    pub fn squared_frobenius_norm(&self) -> f64 {
        self.features.par_iter()
            .map(|feat| feat.squared_norm())
            .sum()
    }

    fn push_example(&mut self, row: usize, x: Vec<f64>, y: f64) {
        for (col, v) in self.features.iter_mut().zip(x) {
            col.append((row, v));
        }
        self.target.push(y);
    }

    /// Partitions the rows listed in `ix`.
    /// `ix[start..end]` forms the second (test) sample,
    /// the remaining entries the first (train) one.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        assert!(start <= end && end <= ix.len(), "invalid split range");

        let test_size = end - start;
        let train_size = ix.len() - test_size;

        let mut train = self.empty_like(train_size);
        let mut test  = self.empty_like(test_size);

        let train_ix = ix[..start].iter().chain(&ix[end..]);
        for (row, &ii) in train_ix.enumerate() {
            let (x, y) = self.at(ii);
            train.push_example(row, x, y);
        }

        for (row, &ii) in ix[start..end].iter().enumerate() {
            let (x, y) = self.at(ii);
            test.push_example(row, x, y);
        }

        (train, test)
    }

    /// Shuffle the examples with `seed` and split them into
    /// train/test samples. `test_ratio` of the examples go to the test one.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64)
        -> Result<(Sample, Sample)>
    {
        if !(0f64..1f64).contains(&test_ratio) {
            return Err(FwError::InvalidParameter(format!(
                "test ratio must be in [0, 1). got {test_ratio}."
            )));
        }
        let mut ix = (0..self.n_sample).collect::<Vec<_>>();
        let mut rng = StdRng::seed_from_u64(seed);
        ix.shuffle(&mut rng);

        let test_size = (self.n_sample as f64 * test_ratio).round() as usize;
        Ok(self.split(ix, 0, test_size))
    }

    fn empty_like(&self, n_sample: usize) -> Self {
        let features = self.features.iter()
            .map(|feat| {
                if feat.is_sparse() {
                    Feature::sparse(feat.name(), n_sample)
                } else {
                    Feature::dense(feat.name())
                }
            })
            .collect();
        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target: Vec::with_capacity(n_sample),
            n_sample,
            n_feature: self.n_feature,
        }
    }
}

fn index_by_name(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect()
}

fn series_to_vec(series: &Series) -> Result<Vec<f64>> {
    let series = series.cast(&DataType::Float64)?;
    series.f64()?
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| FwError::InvalidParameter(format!(
            "column `{}` contains null values", series.name()
        )))
}

/// `"7:0.25"` gives `Some((7, 0.25))`.
fn parse_pair(token: &str) -> Option<(usize, f64)> {
    let (col, val) = token.split_once(':')?;
    Some((col.parse().ok()?, val.parse().ok()?))
}

impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    /// Panics when no column has this name.
    fn index(&self, name: S) -> &Feature {
        match self.name_to_index.get(name.as_ref()) {
            Some(&k) => &self.features[k],
            None => panic!("no feature named `{}`", name.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled_csv(text: &str) -> Sample {
        Sample::from_reader(text.as_bytes(), true)
            .unwrap()
            .set_target("label")
            .unwrap()
    }

    #[test]
    fn csv_label_column_may_sit_anywhere() {
        let sample = labeled_csv(
            "height,label,weight\n\
             1.5,1,60\n\
             1.8,-1,82.5\n\
             \n\
             1.6,1,0\n"
        );
        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.target(), &[1.0, -1.0, 1.0]);
        assert_eq!(sample["weight"][2], 0.0);
        assert_eq!(sample.at(1), (vec![1.8, 82.5], -1.0));
    }

    #[test]
    fn test_from_reader_rejects_text() {
        let bytes = b"a,class\n0.1,1\nfoo,-1";
        let reader = BufReader::new(&bytes[..]);
        let err = Sample::from_reader(reader, true).unwrap_err();
        assert!(matches!(err, FwError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_missing_target() {
        let bytes = b"a,b\n0.1,1\n";
        let reader = BufReader::new(&bytes[..]);
        let err = Sample::from_reader(reader, true)
            .unwrap()
            .set_target("class")
            .unwrap_err();
        assert!(matches!(err, FwError::MissingTarget(_)));
    }

    #[test]
    fn test_from_svmlight_reader() {
        let text = b"\
            2 1:1 3:0.5\n\
            1 2:1\n\
            \n\
            2 3:-1 # comment\n";
        let sample = Sample::from_svmlight_reader(&text[..]).unwrap();
        // Column 0 never appears and is removed.
        assert_eq!(sample.shape(), (3, 3));
        assert_eq!(sample.target(), &[2.0, 1.0, 2.0]);
        assert_eq!(sample.at(0).0, vec![1.0, 0.0, 0.5]);
        assert_eq!(sample.at(2).0, vec![0.0, 0.0, -1.0]);

        let sample = sample.normalize_binary_target().unwrap();
        assert_eq!(sample.target(), &[1.0, -1.0, 1.0]);
    }

    #[test]
    fn svmlight_allocates_only_occurring_columns() {
        let text = b"1 1:1\n-1 3000000:1 7:0\n";
        let sample = Sample::from_svmlight_reader(&text[..]).unwrap();
        assert_eq!(sample.shape(), (2, 2));
        assert_eq!(sample.at(0), (vec![1.0, 0.0], 1.0));
        assert_eq!(sample.at(1), (vec![0.0, 1.0], -1.0));
        assert_eq!(sample["Feat. [3000000]"].nnz(), 1);
    }

    #[test]
    fn test_svmlight_bad_pair() {
        let text = b"1 1:0.5 oops\n";
        let err = Sample::from_svmlight_reader(&text[..]).unwrap_err();
        assert!(matches!(err, FwError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_matvec() {
        let rows = vec![
            vec![1.0, 2.0],
            vec![0.0, -1.0],
            vec![3.0, 0.5],
        ];
        let sample = Sample::from_rows(rows, vec![1.0, -1.0, 1.0]).unwrap();

        assert_eq!(sample.matvec(&[1.0, 1.0]), vec![3.0, -1.0, 3.5]);
        assert_eq!(sample.transposed_matvec(&[1.0, 1.0, 1.0]), vec![4.0, 1.5]);
        assert_eq!(sample.squared_frobenius_norm(), 1.0 + 4.0 + 1.0 + 9.0 + 0.25);
    }

    #[test]
    fn test_train_test_split() {
        let sample = Sample::synthetic(50, 3, 0.0, 7).unwrap();
        let (train, test) = sample.train_test_split(0.2, 1).unwrap();
        assert_eq!(train.shape(), (40, 3));
        assert_eq!(test.shape(), (10, 3));
        assert_eq!(train.target().len(), 40);
        assert_eq!(test.target().len(), 10);
    }

    #[test]
    fn test_synthetic_is_reproducible() {
        let a = Sample::synthetic(20, 4, 0.1, 3).unwrap();
        let b = Sample::synthetic(20, 4, 0.1, 3).unwrap();
        assert_eq!(a.target(), b.target());
        assert_eq!(a.at(5), b.at(5));
        assert!(a.target().iter().all(|&y| y == 1.0 || y == -1.0));
    }

    #[test]
    fn test_from_dataframe() {
        let frame = DataFrame::new(vec![
            Series::new("dose", &[0.5, 1.0, 2.0, 4.0]),
            Series::new("count", &[3_i32, 0, 7, 1]),
        ]).unwrap();
        let labels = Series::new("label", &[-1_i64, -1, 1, 1]);

        let sample = Sample::from_dataframe(frame, labels).unwrap();
        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample.at(2), (vec![2.0, 7.0], 1.0));
        assert_eq!(sample["count"][1], 0.0);
    }
}
