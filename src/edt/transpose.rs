//! Out-of-place transposition between a field and its H x W twin.
//!
//! The separable 2-D transform runs the 1-D routine over rows twice; the
//! second pass must see the original columns as rows, so the field is
//! transposed between passes and transposed back afterwards. The return
//! trip also applies the element-wise square root that turns squared
//! distances into true Euclidean distances. Writes are disjoint per output
//! row, so both loops parallelize without locks.
use super::ParallelEdtOptions;
use crate::image::FieldF32;

/// `dst[x][y] = src[y][x]`.
pub fn transpose(src: &FieldF32, dst: &mut FieldF32, opts: &ParallelEdtOptions) {
    transpose_map(src, dst, opts, |v| v);
}

/// `dst[x][y] = sqrt(src[y][x])`. `sqrt(+inf)` stays `+inf`.
pub fn transpose_sqrt(src: &FieldF32, dst: &mut FieldF32, opts: &ParallelEdtOptions) {
    transpose_map(src, dst, opts, f32::sqrt);
}

fn transpose_map(
    src: &FieldF32,
    dst: &mut FieldF32,
    opts: &ParallelEdtOptions,
    map: impl Fn(f32) -> f32 + Sync,
) {
    debug_assert_eq!(src.w, dst.h, "destination is not the transposed shape");
    debug_assert_eq!(src.h, dst.w, "destination is not the transposed shape");
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 {
        return;
    }

    if opts.should_parallelize(w * h) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            dst.data
                .par_chunks_mut(h)
                .enumerate()
                .for_each(|(x, out_row)| {
                    for (y, cell) in out_row.iter_mut().enumerate() {
                        *cell = map(src.data[y * w + x]);
                    }
                });
            return;
        }
    }

    for (x, out_row) in dst.data.chunks_mut(h).enumerate() {
        for (y, cell) in out_row.iter_mut().enumerate() {
            *cell = map(src.data[y * w + x]);
        }
    }
}
