//! Longest-common-substring similarity between canonical keys.
//!
//! The score counts the characters matched by repeatedly taking the longest
//! common substring and recursing on what lies to its left and to its right.
//! Characters are compared byte-wise; keys produced by the normalizer are
//! ASCII.

/// Longest common run found by [`common_substring`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommonSubstring {
    /// Length of the run, 0 when the inputs share no character
    pub len: usize,
    /// Start of the run in the first input
    pub pos_a: usize,
    /// Start of the run in the second input
    pub pos_b: usize,
}

/// Find the longest run shared by `a` and `b`.
///
/// Among runs of equal length the one starting earliest in `a` wins, and
/// within that the one starting earliest in `b`.
pub fn common_substring(a: &str, b: &str) -> CommonSubstring {
    longest_run(a.as_bytes(), b.as_bytes())
}

/// Percentage in `[0, 100]` of characters of `a` and `b` covered by common
/// substrings. Symmetric in its arguments; two empty strings score 0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let total_len = a.len() + b.len();
    if total_len == 0 {
        return 0.0;
    }

    // The tie-break in `longest_run` depends on argument order, so both
    // orders are scored and the larger count kept.
    let matched = matched_len(a, b).max(matched_len(b, a));
    matched as f64 * 200.0 / total_len as f64
}

/// Total characters matched by the recursive longest-common-substring split
pub fn matched_chars(a: &str, b: &str) -> usize {
    matched_len(a.as_bytes(), b.as_bytes())
}

fn matched_len(a: &[u8], b: &[u8]) -> usize {
    let mut total = 0;
    let mut pending = vec![(a, b)];

    while let Some((a, b)) = pending.pop() {
        if a.is_empty() || b.is_empty() {
            continue;
        }
        let run = longest_run(a, b);
        if run.len == 0 {
            continue;
        }
        total += run.len;
        pending.push((&a[..run.pos_a], &b[..run.pos_b]));
        pending.push((&a[run.pos_a + run.len..], &b[run.pos_b + run.len..]));
    }

    total
}

fn longest_run(a: &[u8], b: &[u8]) -> CommonSubstring {
    let mut best = CommonSubstring::default();

    for i in 0..a.len() {
        // No later start in `a` can produce a strictly longer run
        if a.len() - i <= best.len {
            break;
        }
        for j in 0..b.len() {
            let len = a[i..]
                .iter()
                .zip(&b[j..])
                .take_while(|(x, y)| x == y)
                .count();
            if len > best.len {
                best = CommonSubstring {
                    len,
                    pos_a: i,
                    pos_b: j,
                };
            }
        }
    }

    best
}
