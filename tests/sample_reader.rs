use std::fs;

use hbfw::prelude::*;


/// Tests for reading CSV / SVMLight files.
#[cfg(test)]
pub mod sample_reader_tests {
    use super::*;

    #[test]
    fn csv_with_header_and_two_class_labels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.csv");
        fs::write(&path, "a,b,class\n1.0,0.5,2\n-1.0,0.0,1\n\n0.0,2.0,2\n")
            .unwrap();

        let sample = SampleReader::new()
            .file(&path)
            .has_header(true)
            .target_feature("class")
            .normalize_labels(true)
            .read()
            .unwrap();

        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.target(), &[1.0, -1.0, 1.0]);
        assert_eq!(sample["b"][2], 2.0);
    }

    #[test]
    fn csv_without_target_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy.csv");
        fs::write(&path, "a,b\n1.0,0.5\n").unwrap();

        let err = SampleReader::new()
            .file(&path)
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap_err();
        assert!(matches!(err, FwError::MissingTarget(_)), "{err}");
    }

    #[test]
    fn svmlight_drops_empty_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toy");
        let text = "\
            # comment line\n\
            1 1:0.5 3:1.0\n\
            2 3:-2.0   # trailing comment\n\
            \n\
            1 1:1.5\n";
        fs::write(&path, text).unwrap();

        let sample: Sample = SampleReader::<_, &str>::new()
            .file(&path)
            .normalize_labels(true)
            .read()
            .unwrap();

        // Columns `0` and `2` never appear.
        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.target(), &[-1.0, 1.0, -1.0]);

        let (x, _) = sample.at(1);
        assert_eq!(x, vec![0.0, -2.0]);
    }

    #[test]
    fn synthetic_sample_survives_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("synthetic.svm");

        let sample = Sample::synthetic(40, 5, 0.1, 3).unwrap();
        sample.to_svmlight(&path).unwrap();

        let read = Sample::from_svmlight(&path).unwrap();
        assert_eq!(read.shape(), sample.shape());
        assert_eq!(read.target(), sample.target());
        for i in 0..40 {
            let (a, _) = sample.at(i);
            let (b, _) = read.at(i);
            assert!(a.iter().zip(&b).all(|(u, v)| (u - v).abs() < 1e-12));
        }
    }

    #[test]
    fn malformed_svmlight_reports_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken");
        fs::write(&path, "1 1:0.5\n-1 2=0.3\n").unwrap();

        let err = Sample::from_svmlight(&path).unwrap_err();
        assert!(matches!(err, FwError::Parse { line: 2, .. }), "{err}");
    }
}
