//! Provides some helper functions on dense vectors.
use rayon::prelude::*;

/// Compute the inner-product of the given two slices.
#[inline(always)]
pub fn inner_product(v1: &[f64], v2: &[f64]) -> f64 {
    assert_eq!(
        v1.len(), v2.len(),
        "inner product of vectors with different lengths",
    );
    v1.into_par_iter()
        .zip(v2)
        .map(|(a, b)| a * b)
        .sum::<f64>()
}

/// Returns `‖v‖₁`.
#[inline(always)]
pub fn l1_norm(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi.abs()).sum::<f64>()
}

/// Returns `‖v‖₂²`.
#[inline(always)]
pub fn squared_l2_norm(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum::<f64>()
}

/// Returns `‖v‖₂`.
#[inline(always)]
pub fn l2_norm(v: &[f64]) -> f64 {
    squared_l2_norm(v).sqrt()
}

/// Returns `a - b`.
#[inline(always)]
pub fn difference(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter()
        .zip(b)
        .map(|(ai, bi)| ai - bi)
        .collect()
}

/// Returns the convex combination `(1 - λ) x + λ v`.
#[inline(always)]
pub fn interior_point(stepsize: f64, x: &[f64], v: &[f64]) -> Vec<f64> {
    x.iter()
        .zip(v)
        .map(|(xi, vi)| (1f64 - stepsize) * xi + stepsize * vi)
        .collect()
}

/// Overwrites `g` by `δ grad + (1 - δ) g`.
#[inline(always)]
pub fn blend_into(delta: f64, grad: &[f64], g: &mut [f64]) {
    g.iter_mut()
        .zip(grad)
        .for_each(|(gi, di)| {
            *gi = delta * di + (1f64 - delta) * *gi;
        });
}

/// Numerically stable `log(1 + exp(z))`.
#[inline(always)]
pub fn softplus(z: f64) -> f64 {
    if z > 0f64 {
        z + (-z).exp().ln_1p()
    } else {
        z.exp().ln_1p()
    }
}

/// Numerically stable logistic sigmoid `1 / (1 + exp(-z))`.
#[inline(always)]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0f64 {
        1f64 / (1f64 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1f64 + e)
    }
}

/// Returns the index of the first maximal element by `key`.
pub(crate) fn argmax_by<F>(v: &[f64], key: F) -> Option<usize>
    where F: Fn(f64) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, &vi) in v.iter().enumerate() {
        let k = key(vi);
        match best {
            Some((_, b)) if k <= b => {},
            _ => { best = Some((i, k)); },
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softplus_matches_naive_formula() {
        for z in [-30f64, -2.5, 0.0, 1.0, 4.0] {
            let naive = (1f64 + z.exp()).ln();
            assert!((softplus(z) - naive).abs() < 1e-12, "z = {z}");
        }
        // Does not overflow for large inputs.
        assert!((softplus(1_000f64) - 1_000f64).abs() < 1e-12);
    }

    #[test]
    fn sigmoid_is_symmetric() {
        for z in [-800f64, -3.0, 0.0, 0.5, 800.0] {
            let s = sigmoid(z) + sigmoid(-z);
            assert!((s - 1f64).abs() < 1e-12);
        }
        assert_eq!(sigmoid(0f64), 0.5);
    }

    #[test]
    fn argmax_keeps_first_tie() {
        let v = [1.0, -3.0, 3.0, 2.0];
        assert_eq!(argmax_by(&v, f64::abs), Some(1));
        assert_eq!(argmax_by(&v, |x| x), Some(2));
        assert_eq!(argmax_by(&[], |x| x), None);
    }

    #[test]
    fn blend_moves_towards_gradient() {
        let mut g = vec![0.0, 2.0];
        blend_into(0.5, &[2.0, 0.0], &mut g);
        assert_eq!(g, vec![1.0, 1.0]);
    }
}
