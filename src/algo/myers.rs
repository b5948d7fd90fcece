//! Myers Diff Algorithm for token sequences
//!
//! Linear-space variant: a forward and a reverse search meet in a middle
//! snake, then the problem is bisected into the prefix and suffix
//! partitions around it and each is solved independently.
//!
//! # Algorithm Choice
//!
//! | Variant | Time | Space |
//! |---------|------|-------|
//! | Greedy + trace | O((n+m)*d) | O(d*(n+m)) |
//! | **Linear space (bisection)** | O((n+m)*d) | O(min(n,m)) |
//!
//! The edit script is exactly minimal: its length equals the edit distance
//! (insertions plus deletions), and matching runs are never emitted.
//!
//! # Tie-breaks
//!
//! Each round `h` runs one forward step then one backward step. When the
//! furthest-reaching paths on diagonals `k-1` and `k+1` are tied, the
//! forward search extends from `k-1` (lower diagonal) and the backward
//! search, working in mirrored coordinates, from the higher diagonal. The
//! resulting indices for ambiguous edits are part of the output contract.
//!
//! # References
//!
//! - Myers, E.W. "An O(ND) Difference Algorithm and Its Variations" (1986)
//! - Elder, R. "Myers Diff Algorithm - Code & Interactive Visualization"

// =============================================================================
// Public Types
// =============================================================================

/// Edit operation in a diff sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Delete the element at `from_idx` of the old sequence
    Delete { from_idx: usize },
    /// Add the element at `to_idx` of the new sequence
    Add { to_idx: usize },
}

impl Edit {
    pub fn is_delete(&self) -> bool {
        matches!(self, Edit::Delete { .. })
    }

    pub fn is_add(&self) -> bool {
        matches!(self, Edit::Add { .. })
    }
}

/// Result of a sequence diff
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditScript {
    pub edits: Vec<Edit>,
    pub stats: EditStats,
}

/// Statistics from diff computation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EditStats {
    pub added: usize,
    pub deleted: usize,
}

impl EditStats {
    /// Edit distance: insertions plus deletions
    pub fn edit_count(&self) -> usize {
        self.added + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.edit_count() == 0
    }
}

// =============================================================================
// Main API
// =============================================================================

/// Compute the minimal edit script turning `from` into `to`
///
/// Tokens only need `PartialEq`; the engine never looks at what they mean.
pub fn diff_sequences<T: PartialEq>(from: &[T], to: &[T]) -> EditScript {
    let mut edits = Vec::new();
    // Quick paths are the base cases of the recursion
    bisect(from, to, 0, 0, &mut edits);

    let deleted = edits.iter().filter(|e| e.is_delete()).count();
    EditScript {
        stats: EditStats {
            added: edits.len() - deleted,
            deleted,
        },
        edits,
    }
}

// =============================================================================
// Myers Algorithm Core
// =============================================================================

/// Solve one partition; `i`/`j` are the offsets of `e`/`f` in the originals.
fn bisect<T: PartialEq>(e: &[T], f: &[T], i: usize, j: usize, out: &mut Vec<Edit>) {
    let (n, m) = (e.len(), f.len());

    if n == 0 {
        out.extend((0..m).map(|k| Edit::Add { to_idx: j + k }));
        return;
    }
    if m == 0 {
        out.extend((0..n).map(|k| Edit::Delete { from_idx: i + k }));
        return;
    }

    let (ni, mi) = (n as isize, m as isize);
    let total = ni + mi;
    // Diagonal buffers are circular; negative diagonals wrap around
    let z = 2 * ni.min(mi) + 2;
    let w = ni - mi;
    let wrap = |k: isize| k.rem_euclid(z) as usize;

    // g: forward furthest x per diagonal, p: backward furthest (mirrored) x
    let mut g = vec![0isize; z as usize];
    let mut p = vec![0isize; z as usize];

    for h in 0..=(total / 2 + total % 2) {
        for forward in [true, false] {
            let (c, d) = if forward { (&mut g, &p) } else { (&mut p, &g) };
            // o = 1 for the forward pass, 0 for the backward pass
            let o: isize = if forward { 1 } else { 0 };

            let mut k = -(h - 2 * (h - mi).max(0));
            let k_max = h - 2 * (h - ni).max(0);
            while k <= k_max {
                let mut a = if k == -h || (k != h && c[wrap(k - 1)] < c[wrap(k + 1)]) {
                    c[wrap(k + 1)]
                } else {
                    c[wrap(k - 1)] + 1
                };
                let mut b = a - k;
                let (s, t) = (a, b);

                // Follow the snake (backward pass reads both inputs reversed)
                while a < ni && b < mi {
                    let (x, y) = if forward {
                        (a as usize, b as usize)
                    } else {
                        ((ni - a - 1) as usize, (mi - b - 1) as usize)
                    };
                    if e[x] != f[y] {
                        break;
                    }
                    a += 1;
                    b += 1;
                }
                c[wrap(k)] = a;

                let zk = w - k;
                if total % 2 == o && zk >= -(h - o) && zk <= h - o && c[wrap(k)] + d[wrap(zk)] >= ni {
                    // Middle snake found: (x, y) ends the prefix, (u, v) starts the suffix
                    let (dist, x, y, u, v) = if forward {
                        (2 * h - 1, s, t, a, b)
                    } else {
                        (2 * h, ni - a, mi - b, ni - s, mi - t)
                    };
                    let (x, y, u, v) = (x as usize, y as usize, u as usize, v as usize);

                    if dist > 1 || (x != u && y != v) {
                        bisect(&e[..x], &f[..y], i, j, out);
                        bisect(&e[u..], &f[v..], i + u, j + v, out);
                    } else if m > n {
                        bisect(&[], &f[n..], i + n, j + n, out);
                    } else if m < n {
                        bisect(&e[m..], &[], i + m, j + m, out);
                    }
                    return;
                }
                k += 2;
            }
        }
    }

    unreachable!("middle snake search exhausted without overlap");
}

// =============================================================================
// Tests
// =============================================================================
