//! Thresholding and seeding: from decoded bytes to the float fields the
//! distance transform runs on.
//!
//! The thresholder reads one channel of the interleaved decode and splits
//! pixels into inside/outside. The seed builder turns the mask into a float
//! field with 0.0 at seed cells and +inf everywhere else; both polarities
//! are needed, one per side of the signed field.
use crate::error::SdfError;
use crate::image::{FieldF32, ImageU8};
use serde::Deserialize;

/// Which byte of the 2-channel (luminance, alpha) decode to threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelSelector {
    Luminance,
    #[default]
    Alpha,
}

impl ChannelSelector {
    /// Byte offset within an interleaved pixel.
    #[inline]
    pub fn offset(&self) -> usize {
        match self {
            Self::Luminance => 0,
            Self::Alpha => 1,
        }
    }
}

/// Per-pixel inside/outside classification, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub w: usize,
    pub h: usize,
    pub data: Vec<bool>,
}

impl Mask {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }
}

/// Classify every pixel of `image` as inside (`true`) or outside.
///
/// A pixel is inside when its selected byte exceeds middle grey (127),
/// flipped by `invert`. The 127 cutoff is fixed; changing it would break
/// reproducibility against existing outputs.
pub fn threshold(image: &ImageU8<'_>, channel: ChannelSelector, invert: bool) -> Mask {
    let offset = channel.offset();
    let stride = image.channels;
    let data = (0..image.pixels())
        .map(|i| (image.data[i * stride + offset] > 127) ^ invert)
        .collect();
    Mask {
        w: image.w,
        h: image.h,
        data,
    }
}

/// Which mask value counts as a seed for a one-sided transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedPolarity {
    SeedsAreTrue,
    SeedsAreFalse,
}

/// Build the seeded field for one side: 0.0 at seed cells, +inf elsewhere.
pub fn seed_field(mask: &Mask, polarity: SeedPolarity) -> Result<FieldF32, SdfError> {
    let seed_value = matches!(polarity, SeedPolarity::SeedsAreTrue);
    let mut field = FieldF32::try_new(mask.w, mask.h, f32::INFINITY)?;
    for (cell, &inside) in field.data.iter_mut().zip(&mask.data) {
        if inside == seed_value {
            *cell = 0.0;
        }
    }
    Ok(field)
}
