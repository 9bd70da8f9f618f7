//! Cantor pairing of node-id pairs.
//!
//! The pairing maps an ordered pair of non-negative integers onto a single
//! integer, which lets [`crate::graph::EdgeWeights`] key an ordered node pair
//! with one `u64`.

/// Maps `(k1, k2)` to `(k1 + k2)(k1 + k2 + 1) / 2 + k2`.
///
/// Returns `None` when the result does not fit in a `u64`.
///
/// # Examples
/// ```
/// use mistree_core::index::cantor_pair;
///
/// assert_eq!(cantor_pair(3, 5), Some(41));
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "the even factor of a triangular number halves exactly"
)]
pub fn cantor_pair(k1: u64, k2: u64) -> Option<u64> {
    let sum = k1.checked_add(k2)?;
    let next = sum.checked_add(1)?;
    // One of `sum` and `sum + 1` is even, so halve that one before multiplying.
    let triangle = if sum % 2 == 0 {
        (sum / 2).checked_mul(next)?
    } else {
        sum.checked_mul(next / 2)?
    };
    triangle.checked_add(k2)
}

/// Inverts [`cantor_pair`].
///
/// Every `u64` is the pairing of exactly one `(k1, k2)`; the intermediate
/// arithmetic runs in `u128` so the inverse is exact across the whole range.
///
/// # Examples
/// ```
/// use mistree_core::index::uncantor_pair;
///
/// assert_eq!(uncantor_pair(41), (3, 5));
/// ```
#[must_use]
#[expect(
    clippy::integer_division,
    reason = "the inverse floors the triangular root by definition"
)]
pub fn uncantor_pair(z: u64) -> (u64, u64) {
    let wide = u128::from(z);
    let w = ((8 * wide + 1).isqrt() - 1) / 2;
    let t = (w * w + w) / 2;
    let k2 = wide - t;
    let k1 = w - k2;
    // Both components are bounded by `w`, which is below 2^33 for any u64 input.
    (narrow(k1), narrow(k2))
}

fn narrow(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

/// Pairs two equally long columns element by element.
///
/// Returns `None` when the columns differ in length or any pairing overflows.
#[must_use]
pub fn cantor_pairs(k1: &[u64], k2: &[u64]) -> Option<Vec<u64>> {
    if k1.len() != k2.len() {
        return None;
    }
    k1.iter()
        .zip(k2)
        .map(|(&left, &right)| cantor_pair(left, right))
        .collect()
}

/// Inverts a column of pairings into two columns.
#[must_use]
pub fn uncantor_pairs(z: &[u64]) -> (Vec<u64>, Vec<u64>) {
    z.iter().map(|&value| uncantor_pair(value)).unzip()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 5, 41)]
    #[case(1, 4, 19)]
    #[case(2, 5, 33)]
    #[case(3, 6, 51)]
    fn pairs_known_values(#[case] k1: u64, #[case] k2: u64, #[case] expected: u64) {
        assert_eq!(cantor_pair(k1, k2), Some(expected));
        assert_eq!(uncantor_pair(expected), (k1, k2));
    }

    #[test]
    fn pairs_columns() {
        let paired = cantor_pairs(&[1, 2, 3], &[4, 5, 6]).expect("columns pair");
        assert_eq!(paired, vec![19, 33, 51]);
        assert_eq!(uncantor_pairs(&paired), (vec![1, 2, 3], vec![4, 5, 6]));
    }

    #[test]
    fn rejects_mismatched_columns() {
        assert_eq!(cantor_pairs(&[1, 2], &[3]), None);
    }

    #[test]
    fn reports_overflow() {
        assert_eq!(cantor_pair(u64::MAX, 1), None);
        assert_eq!(cantor_pair(u64::MAX / 2, u64::MAX / 2), None);
    }

    #[test]
    fn inverts_largest_value() {
        let (k1, k2) = uncantor_pair(u64::MAX);
        assert_eq!(cantor_pair(k1, k2), Some(u64::MAX));
    }

    proptest! {
        #[test]
        fn round_trips_node_pairs(k1 in 0_u64..(1 << 31), k2 in 0_u64..(1 << 31)) {
            let paired = cantor_pair(k1, k2).expect("node-sized ids never overflow");
            prop_assert_eq!(uncantor_pair(paired), (k1, k2));
        }
    }
}
