//! Bounded search for charge-neutral stoichiometries.
//!
//! For oxidation states `q_1..q_n` and a coefficient bound `t`, a stoichiometry is a tuple
//! `c` in `{1..=t}^n` with `sum(c_i * q_i) == 0`. Counting *distinct ratios* keeps only
//! primitive tuples (`gcd(c) == 1`), so `(1, 2)` and `(2, 4)` count once.

/// Whether `sum(coefficients[i] * oxidation_states[i])` is zero.
///
/// Slices of different lengths are never neutral.
pub fn is_neutral(oxidation_states: &[i32], coefficients: &[u32]) -> bool {
    oxidation_states.len() == coefficients.len()
        && oxidation_states
            .iter()
            .zip(coefficients)
            .map(|(&q, &c)| q as i64 * c as i64)
            .sum::<i64>()
            == 0
}

pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Number of charge-neutral coefficient tuples with every coefficient in `1..=threshold`.
///
/// An empty state list or a zero threshold yields `0`.
pub fn count_neutral_ratios(oxidation_states: &[i32], threshold: u32, distinct_ratios: bool) -> u64 {
    if oxidation_states.is_empty() || threshold == 0 {
        return 0;
    }

    let (suffix_min, suffix_max) = suffix_bounds(oxidation_states, threshold);
    let search = RatioSearch {
        states: oxidation_states,
        threshold,
        distinct_ratios,
        suffix_min: &suffix_min,
        suffix_max: &suffix_max,
    };
    search.count_from(0, 0, 0)
}

/// For each position `i`, the smallest and largest charge reachable by positions `i..`.
fn suffix_bounds(states: &[i32], threshold: u32) -> (Vec<i64>, Vec<i64>) {
    let n = states.len();
    let t = threshold as i64;
    let mut min = vec![0i64; n + 1];
    let mut max = vec![0i64; n + 1];
    for i in (0..n).rev() {
        let q = states[i] as i64;
        let (lo, hi) = if q >= 0 { (q, q * t) } else { (q * t, q) };
        min[i] = min[i + 1] + lo;
        max[i] = max[i + 1] + hi;
    }
    (min, max)
}

struct RatioSearch<'a> {
    states: &'a [i32],
    threshold: u32,
    distinct_ratios: bool,
    suffix_min: &'a [i64],
    suffix_max: &'a [i64],
}

impl RatioSearch<'_> {
    fn count_from(&self, depth: usize, charge: i64, running_gcd: u32) -> u64 {
        if depth == self.states.len() {
            let primitive = !self.distinct_ratios || running_gcd == 1;
            return (charge == 0 && primitive) as u64;
        }
        if charge + self.suffix_min[depth] > 0 || charge + self.suffix_max[depth] < 0 {
            return 0;
        }

        let q = self.states[depth] as i64;
        (1..=self.threshold)
            .map(|c| self.count_from(depth + 1, charge + q * c as i64, gcd(running_gcd, c)))
            .sum()
    }
}
