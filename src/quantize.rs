//! Map the signed field onto bytes.
use crate::error::SdfError;
use crate::image::{FieldF32, Raster8};

/// Clamp every signed distance into the spread window and remap linearly
/// onto `[0, 255]`.
///
/// The window is `[-spread, spread]`, or `[0, spread]` when `asymmetric`.
/// Rounding is ties-to-even; infinities saturate at the window edges.
/// `spread` must be positive.
pub fn quantize(signed: &FieldF32, spread: u32, asymmetric: bool) -> Result<Raster8, SdfError> {
    if spread == 0 {
        return Err(SdfError::InvalidArguments(
            "spread must be a positive integer".to_string(),
        ));
    }
    let spread = spread as f32;
    let (lo, hi) = if asymmetric {
        (0.0, spread)
    } else {
        (-spread, spread)
    };
    let scale = 255.0 / (hi - lo);

    let mut data = Vec::new();
    data.try_reserve_exact(signed.data.len())
        .map_err(|_| SdfError::OutOfMemory {
            bytes: signed.data.len(),
        })?;
    data.extend(
        signed
            .data
            .iter()
            .map(|&v| ((v.clamp(lo, hi) - lo) * scale).round_ties_even() as u8),
    );

    Ok(Raster8 {
        w: signed.w,
        h: signed.h,
        data,
    })
}
