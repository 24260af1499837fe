use std::ops::Index;

use crate::constants::BUFFER_SIZE;

/// Storage of one column.
/// Sparse entries are `(row, value)` pairs with strictly increasing rows
/// and no explicit zeros.
#[derive(Debug, Clone)]
enum Column {
    Dense(Vec<f64>),
    Sparse {
        entries: Vec<(usize, f64)>,
        n_rows:  usize,
    },
}

/// A named column `a_j` of the design matrix `A`.
///
/// The optimizer only touches columns through [`Feature::dot`]
/// (one entry of `Aᵀ v`) and [`Feature::add_scaled_to`]
/// (accumulating `A x` column by column),
/// so both layouts cost `O(nnz)` per product.
#[derive(Debug, Clone)]
pub struct Feature {
    name:   String,
    column: Column,
}

impl Feature {
    /// An empty dense column.
    pub fn dense<T: ToString>(name: T) -> Self {
        let column = Column::Dense(Vec::with_capacity(BUFFER_SIZE));
        Self { name: name.to_string(), column, }
    }

    /// An empty sparse column spanning `n_rows` rows.
    pub fn sparse<T: ToString>(name: T, n_rows: usize) -> Self {
        let column = Column::Sparse { entries: Vec::new(), n_rows, };
        Self { name: name.to_string(), column, }
    }

    /// A dense column holding `vals`.
    pub fn from_vals<T: ToString>(name: T, vals: Vec<f64>) -> Self {
        Self { name: name.to_string(), column: Column::Dense(vals), }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.column, Column::Sparse { .. })
    }

    /// Consumes the column and returns all of its rows, zeros included.
    pub fn into_vals(self) -> Vec<f64> {
        match self.column {
            Column::Dense(vals) => vals,
            Column::Sparse { entries, n_rows, } => {
                let mut dense = vec![0f64; n_rows];
                for (row, v) in entries {
                    dense[row] = v;
                }
                dense
            },
        }
    }

    /// Pushes the value of row `row`.
    ///
    /// Rows must arrive in increasing order.
    /// A dense column stores every value and ignores `row`;
    /// a sparse column skips zeros and grows to cover `row`.
    pub fn append(&mut self, (row, val): (usize, f64)) {
        match &mut self.column {
            Column::Dense(vals) => vals.push(val),
            Column::Sparse { entries, n_rows, } => {
                *n_rows = (*n_rows).max(row + 1);
                if val != 0f64 {
                    entries.push((row, val));
                }
            },
        }
    }

    /// Fixes the number of rows of a sparse column.
    pub(crate) fn set_size(&mut self, size: usize) {
        if let Column::Sparse { n_rows, .. } = &mut self.column {
            *n_rows = size;
        }
    }

    /// Number of rows the column spans.
    pub fn len(&self) -> usize {
        match &self.column {
            Column::Dense(vals) => vals.len(),
            Column::Sparse { n_rows, .. } => *n_rows,
        }
    }

    /// `true` when nothing was ever stored in the column.
    /// An all-zero sparse column is empty, an all-zero dense one is not.
    pub fn is_empty(&self) -> bool {
        match &self.column {
            Column::Dense(vals) => vals.is_empty(),
            Column::Sparse { entries, .. } => entries.is_empty(),
        }
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        match &self.column {
            Column::Dense(vals) => vals.iter().filter(|v| **v != 0f64).count(),
            Column::Sparse { entries, .. } => entries.len(),
        }
    }

    /// `⟨a_j, v⟩`.
    pub fn dot(&self, v: &[f64]) -> f64 {
        match &self.column {
            Column::Dense(vals) => {
                vals.iter()
                    .zip(v)
                    .map(|(a, b)| a * b)
                    .sum()
            },
            Column::Sparse { entries, .. } => {
                entries.iter()
                    .map(|&(row, a)| a * v[row])
                    .sum()
            },
        }
    }

    /// `out += alpha * a_j`.
    pub fn add_scaled_to(&self, alpha: f64, out: &mut [f64]) {
        if alpha == 0f64 { return; }
        match &self.column {
            Column::Dense(vals) => {
                for (o, a) in out.iter_mut().zip(vals) {
                    *o += alpha * a;
                }
            },
            Column::Sparse { entries, .. } => {
                for &(row, a) in entries {
                    out[row] += alpha * a;
                }
            },
        }
    }

    /// `‖a_j‖²`.
    pub fn squared_norm(&self) -> f64 {
        let square = |a: &f64| a * a;
        match &self.column {
            Column::Dense(vals) => vals.iter().map(square).sum(),
            Column::Sparse { entries, .. } => {
                entries.iter().map(|(_, a)| square(a)).sum()
            },
        }
    }
}

impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, row: usize) -> &f64 {
        const ZERO: f64 = 0f64;
        match &self.column {
            Column::Dense(vals) => &vals[row],
            Column::Sparse { entries, .. } => {
                entries.binary_search_by_key(&row, |&(r, _)| r)
                    .map_or(&ZERO, |p| &entries[p].1)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Column `(0, -2, 0, 0, 1.5, 0, 4)` stored sparsely.
    fn spiky() -> Feature {
        let mut f = Feature::sparse("spiky", 7);
        [(1, -2.0), (2, 0.0), (4, 1.5), (6, 4.0)]
            .into_iter()
            .for_each(|entry| f.append(entry));
        f
    }

    #[test]
    fn sparse_skips_explicit_zeros() {
        let f = spiky();
        assert!(f.is_sparse());
        assert_eq!(f.len(), 7);
        assert_eq!(f.nnz(), 3);
        assert_eq!(f[1], -2.0);
        assert_eq!(f[2], 0.0);
        assert_eq!(f[5], 0.0);
    }

    #[test]
    fn sparse_expands_to_all_rows() {
        assert_eq!(
            spiky().into_vals(),
            vec![0.0, -2.0, 0.0, 0.0, 1.5, 0.0, 4.0],
        );
    }

    #[test]
    fn sparse_grows_past_declared_size() {
        let mut f = Feature::sparse("late", 0);
        f.append((3, 1.0));
        assert_eq!(f.len(), 4);
        f.set_size(10);
        assert_eq!(f.len(), 10);
    }

    #[test]
    fn zero_dense_column_is_not_empty() {
        let mut dense = Feature::dense("zeros");
        assert!(dense.is_empty());
        dense.append((0, 0.0));
        assert!(!dense.is_empty());
        assert_eq!(dense.nnz(), 0);

        let mut sparse = Feature::sparse("zeros", 1);
        sparse.append((0, 0.0));
        assert!(sparse.is_empty());
    }

    #[test]
    fn layouts_agree_on_products() {
        let sparse = spiky();
        let dense = Feature::from_vals("dense", sparse.clone().into_vals());
        assert!(!dense.is_sparse());

        let v = [3.0, 1.0, -1.0, 2.0, 2.0, 5.0, 0.5];
        // -2 * 1 + 1.5 * 2 + 4 * 0.5
        assert_eq!(sparse.dot(&v), 3.0);
        assert_eq!(dense.dot(&v), 3.0);
        assert_eq!(sparse.squared_norm(), 22.25);
        assert_eq!(dense.squared_norm(), 22.25);

        let mut from_sparse = vec![1.0; 7];
        let mut from_dense = vec![1.0; 7];
        sparse.add_scaled_to(-0.5, &mut from_sparse);
        dense.add_scaled_to(-0.5, &mut from_dense);
        assert_eq!(from_sparse, from_dense);
        assert_eq!(from_sparse, vec![1.0, 2.0, 1.0, 1.0, 0.25, 1.0, -1.0]);
    }
}
