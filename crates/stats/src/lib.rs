//! Statistical helper functions for growing-season indicators.
//!
//! Missing values are represented as `NaN` throughout. Reducers skip them;
//! comparisons against a threshold treat them as "not extreme".

/// R's default quantile algorithm (type=7).
///
/// Linear interpolation between order statistics, the same estimator as
/// NumPy's default `linear` method.
///
/// **Expects pre-sorted input** (caller's responsibility).
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn quantile_type7(sorted: &[f64], p: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "quantile_type7: input must not be empty"
    );
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Sorted copy of the non-missing values of `data`.
pub fn sorted_present(data: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = data.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Type-7 quantile of the non-missing values of `data`.
///
/// Returns `None` when every value is missing (or `data` is empty).
pub fn nan_quantile(data: &[f64], p: f64) -> Option<f64> {
    let sorted = sorted_present(data);
    if sorted.is_empty() {
        return None;
    }
    Some(quantile_type7(&sorted, p))
}

/// Sum of the non-missing values. Returns `+0.0` if none are present.
pub fn nan_sum(data: &[f64]) -> f64 {
    // `Iterator::sum` over no floats yields -0.0.
    data.iter().filter(|v| !v.is_nan()).fold(0.0, |acc, v| acc + v)
}

/// Number of `true` entries.
pub fn count_true(flags: &[bool]) -> usize {
    flags.iter().filter(|&&f| f).count()
}

/// Length of the longest run of consecutive `true` entries.
///
/// Single pass, no look-ahead. Returns 0 for empty or all-`false` input.
pub fn longest_run(flags: &[bool]) -> usize {
    let mut max_len = 0;
    let mut current = 0;
    for &flag in flags {
        if flag {
            current += 1;
            max_len = max_len.max(current);
        } else {
            current = 0;
        }
    }
    max_len
}
