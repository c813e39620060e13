//! Collapse the two one-sided distance fields into one signed field.
use crate::image::FieldF32;

/// Combine the inside-seeded and outside-seeded distance fields.
///
/// `inside[p]` is the distance to the nearest inside pixel (0 for inside
/// pixels), `outside[p]` the distance to the nearest outside pixel. The
/// signed value is
///
/// ```text
/// s[p] = d_in - max(0, d_out - 1)
/// ```
///
/// so outside pixels carry their positive distance to the shape and inside
/// pixels the negated distance to the complement, less a 1-px bias that
/// centers the zero crossing on the inside boundary row. The bias applies
/// only to the `d_out` branch.
///
/// Writes through the `inside` buffer and returns it; no pixel has both
/// fields infinite (every pixel seeds exactly one side), so the
/// subtraction never forms `inf - inf`.
pub fn combine(mut inside: FieldF32, outside: &FieldF32) -> FieldF32 {
    debug_assert_eq!(inside.w, outside.w);
    debug_assert_eq!(inside.h, outside.h);
    for (signed, &d_out) in inside.data.iter_mut().zip(&outside.data) {
        *signed -= (d_out - 1.0).max(0.0);
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f32 = f32::INFINITY;

    fn field(w: usize, h: usize, data: Vec<f32>) -> FieldF32 {
        FieldF32 {
            w,
            h,
            stride: w,
            data,
        }
    }

    #[test]
    fn outside_pixels_keep_unbiased_distance() {
        // Outside pixel: d_in = 3, d_out = 0.
        let inside = field(1, 1, vec![3.0]);
        let outside = field(1, 1, vec![0.0]);
        assert_eq!(combine(inside, &outside).data, vec![3.0]);
    }

    #[test]
    fn inside_pixels_get_biased_negative_distance() {
        // Inside pixels at depths 1, 2 and 3 from the boundary.
        let inside = field(3, 1, vec![0.0, 0.0, 0.0]);
        let outside = field(3, 1, vec![1.0, 2.0, 3.0]);
        assert_eq!(combine(inside, &outside).data, vec![0.0, -1.0, -2.0]);
    }

    #[test]
    fn sign_law_holds() {
        // d_in = 0 exactly where d_out > 0 and vice versa.
        let inside = field(4, 1, vec![0.0, 0.0, 1.0, 2.0]);
        let outside = field(4, 1, vec![2.0, 1.0, 0.0, 0.0]);
        let signed = combine(inside, &outside);
        assert!(signed.data[0] <= 0.0 && signed.data[1] <= 0.0);
        assert!(signed.data[2] >= 0.0 && signed.data[3] >= 0.0);
    }

    #[test]
    fn fully_full_image_goes_to_negative_infinity() {
        // Every pixel inside: the outside field never found a seed.
        let inside = field(2, 1, vec![0.0, 0.0]);
        let outside = field(2, 1, vec![INF, INF]);
        let signed = combine(inside, &outside);
        assert!(signed.data.iter().all(|v| *v == -INF));
    }

    #[test]
    fn fully_empty_image_goes_to_positive_infinity() {
        let inside = field(2, 1, vec![INF, INF]);
        let outside = field(2, 1, vec![0.0, 0.0]);
        let signed = combine(inside, &outside);
        assert!(signed.data.iter().all(|v| *v == INF));
    }
}
