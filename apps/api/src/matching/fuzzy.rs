//! Partial-ratio string similarity on a 0–100 scale.
//!
//! The shorter string is slid across the longer one; each equal-length window is
//! scored with the Indel ratio `2·LCS / (|a| + |b|)` and the best window wins. A
//! string contained in the other therefore scores 100. The Indel ratio only counts
//! insertions and deletions, so a transposition (`kubernetse`) costs two edits out
//! of twenty characters rather than two substitutions out of ten.

/// Returns the best-aligning substring similarity of `a` and `b`, rounded to an integer.
/// Either string empty → 0.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };

    if long.contains(short) {
        return 100;
    }

    let short_chars: Vec<char> = short.chars().collect();
    let long_chars: Vec<char> = long.chars().collect();
    let window_len = short_chars.len();

    let best = long_chars
        .windows(window_len)
        .map(|window| indel_ratio(&short_chars, window))
        .fold(0.0_f64, f64::max);

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}

/// `2·LCS / (|a| + |b|)` in `[0, 1]`.
fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * longest_common_subsequence(a, b) as f64 / total as f64
}

/// Single-row dynamic programming over `b`.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}
