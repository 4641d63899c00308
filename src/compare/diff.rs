//! LCS sequence alignment
//!
//! Classic longest-common-subsequence diff over ordered text units,
//! implemented directly (dynamic programming over suffixes) so tie-break
//! behavior stays reproducible: matches are taken at the earliest possible
//! position and ties between delete/insert favor consuming the before side
//! first. Alignment is purely content+order based; bounding boxes play no
//! part in it.

/// Kind of an aligned opcode, mirroring classic line-diff semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// `a[a_start..a_end] == b[b_start..b_end]`
    Equal,
    /// Units on both sides, pairwise different
    Replace,
    /// Units only on the before side
    Delete,
    /// Units only on the after side
    Insert,
}

/// One opcode over half-open ranges of the two input sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOp {
    pub tag: DiffTag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Equal,
    Delete,
    Insert,
}

/// Align two ordered sequences of text units and return the opcode list.
///
/// Opcodes cover both sequences completely and appear in sequence order.
/// Adjacent runs of deletes and inserts between two matches are coalesced
/// into a single `Replace` opcode.
pub fn diff_slices(a: &[&str], b: &[&str]) -> Vec<DiffOp> {
    let n = a.len();
    let m = b.len();

    // dp[i][j] = LCS length of a[i..] and b[j..]
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            dp[i][j] = if a[i] == b[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }

    // Forward walk emits matches at their earliest position.
    let mut steps = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if a[i] == b[j] {
            steps.push(Step::Equal);
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            steps.push(Step::Delete);
            i += 1;
        } else {
            steps.push(Step::Insert);
            j += 1;
        }
    }
    steps.extend(std::iter::repeat(Step::Delete).take(n - i));
    steps.extend(std::iter::repeat(Step::Insert).take(m - j));

    coalesce(&steps)
}

/// Fold the step list into opcodes, merging delete+insert runs into replaces.
fn coalesce(steps: &[Step]) -> Vec<DiffOp> {
    let mut ops = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let mut k = 0;

    while k < steps.len() {
        match steps[k] {
            Step::Equal => {
                let (a_start, b_start) = (i, j);
                while k < steps.len() && steps[k] == Step::Equal {
                    i += 1;
                    j += 1;
                    k += 1;
                }
                ops.push(DiffOp {
                    tag: DiffTag::Equal,
                    a_start,
                    a_end: i,
                    b_start,
                    b_end: j,
                });
            }
            Step::Delete | Step::Insert => {
                let (a_start, b_start) = (i, j);
                while k < steps.len() && steps[k] != Step::Equal {
                    match steps[k] {
                        Step::Delete => i += 1,
                        Step::Insert => j += 1,
                        Step::Equal => unreachable!(),
                    }
                    k += 1;
                }
                let tag = if i > a_start && j > b_start {
                    DiffTag::Replace
                } else if i > a_start {
                    DiffTag::Delete
                } else {
                    DiffTag::Insert
                };
                ops.push(DiffOp {
                    tag,
                    a_start,
                    a_end: i,
                    b_start,
                    b_end: j,
                });
            }
        }
    }

    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(ops: &[DiffOp]) -> Vec<DiffTag> {
        ops.iter().map(|op| op.tag).collect()
    }

    #[test]
    fn test_identical_sequences() {
        let a = ["one", "two", "three"];
        let ops = diff_slices(&a, &a);
        assert_eq!(tags(&ops), vec![DiffTag::Equal]);
        assert_eq!(ops[0].a_end, 3);
        assert_eq!(ops[0].b_end, 3);
    }

    #[test]
    fn test_both_empty() {
        let ops = diff_slices(&[], &[]);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_pure_insert() {
        let ops = diff_slices(&["a", "b"], &["a", "x", "b"]);
        assert_eq!(
            tags(&ops),
            vec![DiffTag::Equal, DiffTag::Insert, DiffTag::Equal]
        );
        let ins = ops[1];
        assert_eq!((ins.a_start, ins.a_end), (1, 1));
        assert_eq!((ins.b_start, ins.b_end), (1, 2));
    }

    #[test]
    fn test_pure_delete() {
        let ops = diff_slices(&["a", "x", "b"], &["a", "b"]);
        assert_eq!(
            tags(&ops),
            vec![DiffTag::Equal, DiffTag::Delete, DiffTag::Equal]
        );
    }

    #[test]
    fn test_replace_in_middle() {
        let ops = diff_slices(&["a", "old", "b"], &["a", "new", "b"]);
        assert_eq!(
            tags(&ops),
            vec![DiffTag::Equal, DiffTag::Replace, DiffTag::Equal]
        );
        let rep = ops[1];
        assert_eq!((rep.a_start, rep.a_end), (1, 2));
        assert_eq!((rep.b_start, rep.b_end), (1, 2));
    }

    #[test]
    fn test_one_side_empty() {
        let ops = diff_slices(&[], &["a", "b"]);
        assert_eq!(tags(&ops), vec![DiffTag::Insert]);
        assert_eq!((ops[0].b_start, ops[0].b_end), (0, 2));

        let ops = diff_slices(&["a", "b"], &[]);
        assert_eq!(tags(&ops), vec![DiffTag::Delete]);
        assert_eq!((ops[0].a_start, ops[0].a_end), (0, 2));
    }

    #[test]
    fn test_uneven_replace() {
        // two units collapse into one
        let ops = diff_slices(&["a", "x", "y", "b"], &["a", "z", "b"]);
        assert_eq!(
            tags(&ops),
            vec![DiffTag::Equal, DiffTag::Replace, DiffTag::Equal]
        );
        let rep = ops[1];
        assert_eq!(rep.a_end - rep.a_start, 2);
        assert_eq!(rep.b_end - rep.b_start, 1);
    }

    #[test]
    fn test_earliest_alignment_on_repeats() {
        // "a" matches at its first possible position
        let ops = diff_slices(&["a"], &["a", "x", "a"]);
        assert_eq!(tags(&ops), vec![DiffTag::Equal, DiffTag::Insert]);
    }

    #[test]
    fn test_opcodes_cover_both_sequences() {
        let a = ["p", "q", "r", "s"];
        let b = ["q", "r", "t", "u", "s"];
        let ops = diff_slices(&a, &b);
        assert_eq!(ops.first().unwrap().a_start, 0);
        assert_eq!(ops.last().unwrap().a_end, a.len());
        assert_eq!(ops.last().unwrap().b_end, b.len());
        for pair in ops.windows(2) {
            assert_eq!(pair[0].a_end, pair[1].a_start);
            assert_eq!(pair[0].b_end, pair[1].b_start);
        }
    }
}
