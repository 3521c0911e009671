//! Points: partial variable→{0,1} assignments.
//!
//! Grounded in `examples/original_source/src/boolexpr/point.py`, which
//! represents a point as a plain mapping from variable index to a Python
//! bool. A `BTreeMap` is used here rather than a `HashMap` so that
//! `iter_points` enumerates assignments in a fixed, reproducible order —
//! useful for the exhaustive small-space tests this crate leans on.

use std::collections::BTreeMap;

/// A partial assignment of Boolean values to variable indices.
pub type Point = BTreeMap<u32, bool>;

/// Enumerates every total assignment of the given variables, in ascending
/// binary-counter order with `vars[0]` as the most significant bit.
///
/// `examples/original_source`'s `boolexpr/espresso.py`-adjacent utilities
/// and `math.py`'s `num2point` drive the same enumeration from an integer
/// counter; this is the same idea expressed as an iterator instead of an
/// index/modulus dance.
pub fn iter_points(vars: &[u32]) -> impl Iterator<Item = Point> + '_ {
    let n = vars.len();
    (0u64..(1u64 << n)).map(move |mask| {
        let mut point = Point::new();
        for (i, &v) in vars.iter().enumerate() {
            let bit = (mask >> (n - 1 - i)) & 1;
            point.insert(v, bit == 1);
        }
        point
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn iter_points_covers_every_assignment() {
        let vars = vec![1, 2, 3];
        let points: Vec<_> = iter_points(&vars).collect();
        assert_eq!(points.len(), 8);
        let mut seen: std::collections::HashSet<Vec<bool>> = std::collections::HashSet::new();
        for p in &points {
            let tuple: Vec<bool> = vars.iter().map(|v| p[v]).collect();
            seen.insert(tuple);
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn iter_points_empty_vars_yields_one_empty_point() {
        let vars: Vec<u32> = vec![];
        let points: Vec<_> = iter_points(&vars).collect();
        assert_eq!(points.len(), 1);
        assert!(points[0].is_empty());
    }
}
