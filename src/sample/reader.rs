use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use super::sample_struct::Sample;
use crate::error::{FwError, Result};

/// The file formats `SampleReader` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Comma separated values. The target column is given by name.
    Csv,
    /// `label index:value ...` lines (LIBSVM datasets).
    Svmlight,
}

impl FileFormat {
    /// Guess the format from the file extension.
    /// Everything except `.csv` is read as SVMLight,
    /// since LIBSVM files come with arbitrary extensions.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let is_csv = path.as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv { Self::Csv } else { Self::Svmlight }
    }
}

impl FromStr for FileFormat {
    type Err = FwError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "svmlight" | "libsvm" | "svm" => Ok(Self::Svmlight),
            _ => Err(FwError::InvalidParameter(format!(
                "unknown file format `{s}`. use csv or svmlight."
            ))),
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Svmlight => "svmlight",
        };
        write!(f, "{name}")
    }
}

/// Loads a [`Sample`] from disk.
///
/// The format follows the file extension unless [`SampleReader::format`]
/// is given. CSV files need the label column via
/// [`SampleReader::target_feature`]; SVMLight files carry their labels.
///
/// ```no_run
/// use hbfw::SampleReader;
/// let sample = SampleReader::new()
///     .file("data/heart.csv")
///     .has_header(true)
///     .target_feature("disease")
///     .normalize_labels(true)
///     .read()
///     .unwrap();
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    format: Option<FileFormat>,
    normalize_labels: bool,
}

impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S> SampleReader<P, S> {
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
            format: None,
            normalize_labels: false,
        }
    }

    /// Whether the first CSV line holds column names. Off by default.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }

    /// Force the file format instead of guessing it from the extension.
    pub fn format(mut self, format: FileFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Map a two-class target to `{-1, +1}` after reading.
    /// See [`Sample::normalize_binary_target`].
    pub fn normalize_labels(mut self, flag: bool) -> Self {
        self.normalize_labels = flag;
        self
    }
}

impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}

impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Name of the CSV column holding the labels.
    /// Ignored for SVMLight files.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}

impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Fails when no file was given, or when a CSV file
    /// has no label column set.
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| FwError::InvalidParameter(
                "the file name for csv/svmlight is not set".into()
            ))?;
        let file = file.as_ref();
        let format = self.format
            .unwrap_or_else(|| FileFormat::from_path(file));

        let sample = match format {
            FileFormat::Csv => {
                let target = self.target
                    .ok_or_else(|| FwError::InvalidParameter(
                        "target (class) column is not specified. \
                         use `SampleReader::target_feature`.".into()
                    ))?;
                Sample::from_csv(file, self.has_header)?
                    .set_target(target.as_ref())?
            },
            FileFormat::Svmlight => Sample::from_svmlight(file)?,
        };

        if self.normalize_labels {
            sample.normalize_binary_target()
        } else {
            Ok(sample)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("a/b.csv"), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("a/b.CSV"), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("mushrooms"), FileFormat::Svmlight);
        assert_eq!(FileFormat::from_path("x.svm"), FileFormat::Svmlight);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("LibSVM".parse::<FileFormat>().unwrap(), FileFormat::Svmlight);
        assert!("parquet".parse::<FileFormat>().is_err());
    }

    #[test]
    fn test_read_without_file() {
        let reader: SampleReader<&str, &str> = SampleReader::new();
        assert!(reader.read().is_err());
    }
}
