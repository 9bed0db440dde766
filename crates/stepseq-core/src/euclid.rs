//! Euclidean distribution and cyclic shifting

/// Default number of steps in a fresh sequence
pub const DEFAULT_STEPS: usize = 16;

/// Default number of hits for a generated pattern
pub const DEFAULT_HITS: usize = 4;

// ============================================================================
// Modulo
// ============================================================================

/// Sign-preserving remainder.
///
/// Non-negative `a` behaves like `rem_euclid`. Negative `a` yields a value in
/// `[-b, -1]`, so `modulo(-5, 4) == -1` and `modulo(-4, 4) == -4`.
/// `b` must be positive.
pub fn modulo(a: i64, b: i64) -> i64 {
    let r = a.rem_euclid(b);
    if a < 0 { r - b } else { r }
}

// ============================================================================
// Shift
// ============================================================================

/// Rotate `values` in place so the element at position `len - amount`
/// (wrapping) becomes the first element. Positive amounts move values
/// toward the end, negative amounts toward the start.
pub fn rotate<T>(values: &mut [T], amount: i64) {
    if amount == 0 || values.is_empty() {
        return;
    }

    let m = modulo(amount, values.len() as i64);
    if m >= 0 {
        values.rotate_right(m as usize);
    } else {
        values.rotate_left(m.unsigned_abs() as usize);
    }
}

/// Copying version of [`rotate`]
///
/// # Example
/// ```
/// use stepseq_core::shift_seq;
/// assert_eq!(shift_seq(&[1, 2, 3, 4, 5], 2), vec![4, 5, 1, 2, 3]);
/// assert_eq!(shift_seq(&[1, 2, 3, 4, 5], -7), vec![3, 4, 5, 1, 2]);
/// ```
pub fn shift_seq<T: Clone>(values: &[T], amount: i64) -> Vec<T> {
    let mut shifted = values.to_vec();
    rotate(&mut shifted, amount);
    shifted
}

// ============================================================================
// Euclidean Distributor
// ============================================================================

/// Spread `hits` onsets as evenly as possible over `steps` positions
///
/// # Arguments
/// * `steps` - Total number of steps in the pattern (e.g., 16)
/// * `hits` - Number of hits to distribute, clamped to `steps`
/// * `shift` - Rotate the finished pattern (see [`rotate`])
///
/// # Returns
/// Vec of bools where true = hit, false = rest
///
/// # Example
/// ```
/// use stepseq_core::distribute;
/// let pattern = distribute(8, 4, 0);
/// assert_eq!(pattern, vec![true, false, true, false, true, false, true, false]);
/// ```
pub fn distribute(steps: usize, hits: usize, shift: i64) -> Vec<bool> {
    if steps == 0 {
        return vec![];
    }

    if hits == 0 {
        return vec![false; steps];
    }

    if hits >= steps {
        return vec![true; steps];
    }

    // Bjorklund's algorithm: hits first, rests after, then fold groups taken
    // from the tail onto the leading groups until one remainder is left.
    let mut groups: Vec<Vec<bool>> = (0..steps).map(|i| vec![i < hits]).collect();
    let mut steps = steps;
    let mut hits = hits;

    while hits > 1 {
        let quotient = steps / hits;
        let remainder = steps % hits;

        for _ in 1..quotient {
            for j in 0..hits {
                if let Some(tail) = groups.pop() {
                    groups[j].extend(tail);
                }
            }
        }

        hits = remainder;
        steps = groups.len();
    }

    let mut pattern: Vec<bool> = groups.into_iter().flatten().collect();
    rotate(&mut pattern, shift);
    pattern
}
