//! 1-D squared Euclidean distance transform by lower envelope of parabolas.
//!
//! Reference: Distance Transforms of Sampled Functions (P. Felzenszwalb,
//! D. Huttenlocher): <http://cs.brown.edu/people/pfelzens/dt-final.pdf>.
//!
//! Each finite input cell `f[k]` is an upward-opening unit parabola rooted
//! at `k` with vertex height `f[k]`; the routine replaces every cell with
//! the height of the lower envelope at that index, i.e.
//! `min over k of (q - k)^2 + f[k]`. Infinite cells contribute no parabola:
//! a row with no finite cell is left untouched, and a row with some finite
//! cells ends up finite everywhere.

/// Scratch buffers for one worker running the 1-D transform.
///
/// `v` holds vertex indices of the envelope parabolas, `z` the break points
/// between consecutive parabolas, `h` the vertex heights (cached because the
/// evaluation pass overwrites the row in place). Invariant after Part 1:
/// `v` and the populated prefix of `z` are strictly increasing.
#[derive(Clone, Debug)]
pub struct Envelope {
    v: Vec<usize>,
    z: Vec<f32>,
    h: Vec<f32>,
}

impl Envelope {
    /// Scratch sized for rows of up to `capacity` cells.
    pub fn new(capacity: usize) -> Self {
        Self {
            v: vec![0; capacity],
            z: vec![0.0; capacity],
            h: vec![0.0; capacity],
        }
    }

    /// In-place 1-D transform of one row.
    pub fn transform_row(&mut self, f: &mut [f32]) {
        let n = f.len();
        debug_assert!(n <= self.v.len(), "row longer than envelope scratch");
        if n <= 1 {
            return;
        }
        // Leading +inf cells carry no parabola; start the envelope at the
        // first finite vertex. A fully infinite row stays infinite.
        let Some(offset) = f.iter().position(|value| value.is_finite()) else {
            return;
        };

        // Part 1: build the lower envelope as vertices and break points.
        self.v[0] = offset;
        self.h[0] = f[offset];
        let mut k = 0usize;
        for q in (offset + 1)..n {
            if !f[q].is_finite() {
                continue;
            }
            // Intersection of the candidate parabola at q with the current
            // rightmost envelope parabola; back up while it undercuts
            // earlier break points.
            let mut s = parabola_intersect(f, self.v[k], q);
            while k > 0 && s <= self.z[k - 1] {
                k -= 1;
                s = parabola_intersect(f, self.v[k], q);
            }
            self.z[k] = s;
            k += 1;
            self.v[k] = q;
            self.h[k] = f[q];
        }

        // Part 2: evaluate the envelope at every cell.
        let mut j = 0usize;
        for (q, cell) in f.iter_mut().enumerate() {
            while j < k && self.z[j] < q as f32 {
                j += 1;
            }
            let d = q as f32 - self.v[j] as f32;
            *cell = d * d + self.h[j];
        }
    }
}

/// x-coordinate where the parabolas rooted at `p` and `q` intersect.
/// Only ever called with finite vertex heights and `p < q`.
#[inline]
fn parabola_intersect(f: &[f32], p: usize, q: usize) -> f32 {
    let fp = p as f32;
    let fq = q as f32;
    ((f[q] - f[p]) + (fq * fq - fp * fp)) / (2.0 * (fq - fp))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f32 = f32::INFINITY;

    fn transform(mut row: Vec<f32>) -> Vec<f32> {
        let mut env = Envelope::new(row.len());
        env.transform_row(&mut row);
        row
    }

    fn brute_force(row: &[f32]) -> Vec<f32> {
        (0..row.len())
            .map(|q| {
                row.iter()
                    .enumerate()
                    .map(|(k, &fk)| (q as f32 - k as f32).powi(2) + fk)
                    .fold(INF, f32::min)
            })
            .collect()
    }

    fn assert_rows_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len());
        for (idx, (&a, &e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < 1e-4 || (a == INF && e == INF),
                "cell {idx}: got {a}, expected {e}"
            );
        }
    }

    #[test]
    fn single_seed_row() {
        assert_eq!(
            transform(vec![INF, INF, 0.0, INF, INF]),
            vec![4.0, 1.0, 0.0, 1.0, 4.0]
        );
    }

    #[test]
    fn all_seeds_row() {
        assert_eq!(
            transform(vec![0.0, 0.0, 0.0, 0.0, 0.0]),
            vec![0.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn no_seeds_row_is_untouched() {
        assert_eq!(
            transform(vec![INF, INF, INF, INF, INF]),
            vec![INF, INF, INF, INF, INF]
        );
    }

    #[test]
    fn two_symmetric_seeds() {
        assert_eq!(
            transform(vec![0.0, INF, INF, INF, 0.0]),
            vec![0.0, 1.0, 4.0, 1.0, 0.0]
        );
    }

    #[test]
    fn trailing_and_leading_seed() {
        assert_eq!(
            transform(vec![INF, 0.0, INF, INF, INF]),
            vec![1.0, 0.0, 1.0, 4.0, 9.0]
        );
        assert_eq!(
            transform(vec![INF, INF, INF, INF, 0.0]),
            vec![16.0, 9.0, 4.0, 1.0, 0.0]
        );
    }

    #[test]
    fn increasing_heights() {
        let row = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        assert_rows_close(&transform(row.clone()), &brute_force(&row));
    }

    #[test]
    fn mixed_finite_heights() {
        let row = vec![2.2, 1.0, 3.6, 3.5, 2.7];
        assert_rows_close(&transform(row.clone()), &[2.0, 1.0, 2.0, 3.5, 2.7]);
    }

    #[test]
    fn decreasing_heights() {
        let row = vec![4.4, 3.3, 2.2, 1.1, 0.0];
        assert_rows_close(&transform(row.clone()), &[4.3, 3.2, 2.1, 1.0, 0.0]);
    }

    #[test]
    fn finite_heights_match_brute_force() {
        let row = vec![7.0, 0.5, 9.0, 9.0, 0.25, 16.0, 3.0, 1.0];
        assert_rows_close(&transform(row.clone()), &brute_force(&row));
    }

    #[test]
    fn interior_infinities_are_filled() {
        let row = vec![INF, 4.0, INF, INF, 0.0, INF];
        assert_rows_close(&transform(row.clone()), &brute_force(&row));
    }

    #[test]
    fn idempotent_on_seeded_rows() {
        let rows: [&[f32]; 4] = [
            &[0.0, INF, INF, 0.0, INF],
            &[INF, INF, 0.0, INF, INF],
            &[0.0; 5],
            &[INF, 0.0, INF, 0.0, INF],
        ];
        for row in rows {
            let once = transform(row.to_vec());
            let twice = transform(once.clone());
            assert_eq!(once, twice, "seeded row {row:?}");
        }
    }

    #[test]
    fn outputs_are_bounded_by_some_source_parabola() {
        let row = vec![INF, 3.0, INF, 0.0, 8.0, INF, 2.0];
        let out = transform(row.clone());
        for (q, &value) in out.iter().enumerate() {
            assert!(value >= 0.0);
            let attained = row
                .iter()
                .enumerate()
                .filter(|(_, fk)| fk.is_finite())
                .any(|(k, &fk)| ((q as f32 - k as f32).powi(2) + fk - value).abs() < 1e-4);
            assert!(attained, "cell {q} value {value} matches no parabola");
        }
    }

    #[test]
    fn short_rows_are_no_ops() {
        assert_eq!(transform(vec![]), Vec::<f32>::new());
        assert_eq!(transform(vec![5.0]), vec![5.0]);
        assert_eq!(transform(vec![INF]), vec![INF]);
    }
}
