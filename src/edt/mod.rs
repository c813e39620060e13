//! 2-D exact Euclidean distance transform.
//!
//! Separable Felzenszwalb–Huttenlocher scheme: the 1-D lower-envelope
//! routine runs over every row, the field is transposed, the routine runs
//! over the rows of the transpose (the original columns), and the transpose
//! back applies the square root. O(W·H) per field.
//!
//! Rows never touch each other's cells, so each 1-D pass is row-parallel
//! with private scratch per worker; the only synchronization points are the
//! joins between passes.
pub mod envelope;
pub mod transpose;

pub use envelope::Envelope;

use crate::image::FieldF32;
use serde::Deserialize;

/// Controls whether the transform runs sequentially or with Rayon.
///
/// Small fields are cheaper to process in place than to split across
/// workers; `min_pixels_for_parallel` gates the switch.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct ParallelEdtOptions {
    enabled: bool,
    min_pixels_for_parallel: usize,
}

impl ParallelEdtOptions {
    /// Construct explicit options.
    pub fn new(enabled: bool, min_pixels_for_parallel: usize) -> Self {
        Self {
            enabled,
            min_pixels_for_parallel: min_pixels_for_parallel.max(1),
        }
    }

    /// Disable parallel execution regardless of field size.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_pixels_for_parallel: usize::MAX,
        }
    }

    /// Returns true when a field of `pixel_count` cells should use Rayon.
    pub fn should_parallelize(&self, pixel_count: usize) -> bool {
        self.enabled && pixel_count >= self.min_pixels_for_parallel
    }
}

impl Default for ParallelEdtOptions {
    fn default() -> Self {
        Self {
            enabled: cfg!(feature = "parallel"),
            min_pixels_for_parallel: 4096,
        }
    }
}

/// Replace every cell of `field` with the true Euclidean distance to its
/// nearest seed (cells that started at 0.0).
///
/// `scratch` must have the transposed shape (`scratch.w == field.h`,
/// `scratch.h == field.w`); its prior contents are overwritten. Cells with
/// no reachable seed anywhere in the field remain `+inf`.
pub fn distance_transform(
    field: &mut FieldF32,
    scratch: &mut FieldF32,
    opts: &ParallelEdtOptions,
) {
    debug_assert_eq!(field.w, scratch.h, "scratch is not the transposed shape");
    debug_assert_eq!(field.h, scratch.w, "scratch is not the transposed shape");
    if field.w == 0 || field.h == 0 {
        return;
    }

    transform_rows(field, opts);
    transpose::transpose(field, scratch, opts);
    transform_rows(scratch, opts);
    transpose::transpose_sqrt(scratch, field, opts);
}

/// Run the 1-D routine over every row of `field` independently.
fn transform_rows(field: &mut FieldF32, opts: &ParallelEdtOptions) {
    let w = field.w;
    if w == 0 {
        return;
    }

    if opts.should_parallelize(w * field.h) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            field
                .data
                .par_chunks_mut(w)
                .for_each_init(|| Envelope::new(w), |env, row| env.transform_row(row));
            return;
        }
    }

    let mut env = Envelope::new(w);
    for row in field.data.chunks_mut(w) {
        env.transform_row(row);
    }
}
