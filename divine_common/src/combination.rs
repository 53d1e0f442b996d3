//! Binomial coefficients and lexicographic combination unranking.

use crate::error::DivinationError;
use crate::result::Result;

/// `C(n, k)`, or `None` if it does not fit in a `u64`.
pub fn binomial(n: usize, k: usize) -> Option<u64> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc == C(n, i) here, so the division is exact.
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > u64::MAX as u128 {
            return None;
        }
    }
    Some(acc as u64)
}

/// The `index`-th `k`-subset of `0..n` in lexicographic order, ascending.
///
/// Index 0 is `[0, 1, .., k - 1]`; index `C(n, k) - 1` is
/// `[n - k, .., n - 1]`. Works from the top of the ranking down, so no
/// combination list is ever materialised.
pub fn nth_combination(n: usize, k: usize, index: u64) -> Result<Vec<usize>> {
    if k == 0 || k > n {
        return Err(DivinationError::Combination(format!(
            "cannot choose {} of {}",
            k, n
        )));
    }
    let total = binomial(n, k).ok_or_else(|| {
        DivinationError::Combination(format!("C({}, {}) overflows u64", n, k))
    })?;
    if index >= total {
        return Err(DivinationError::Combination(format!(
            "index {} out of range for C({}, {}) = {}",
            index, n, k, total
        )));
    }

    let mut remaining = total - 1 - index;
    let mut upper = n;
    let mut picked = Vec::with_capacity(k);
    for left in (1..=k).rev() {
        // Largest x below `upper` whose C(x, left) still fits in `remaining`.
        // Overflowing coefficients are larger than any u64 and never fit.
        let (x, below) = (0..upper)
            .rev()
            .find_map(|x| binomial(x, left).filter(|&c| c <= remaining).map(|c| (x, c)))
            .ok_or_else(|| {
                DivinationError::Combination(format!("no position left for index {}", index))
            })?;
        picked.push(n - 1 - x);
        remaining -= below;
        upper = x;
    }
    Ok(picked)
}
