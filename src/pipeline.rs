//! Generator pipeline driving image → signed distance field end-to-end.
//!
//! The [`SdfGenerator`] exposes a simple API: feed a decoded 2-channel view
//! and get the quantized single-channel SDF back, optionally with a timing
//! trace. Internally it coordinates thresholding, seeding of the two
//! one-sided fields, the pair of 2-D Euclidean distance transforms (run
//! concurrently when the parallel feature is active), the signed combine
//! and the byte quantization.
//!
//! Typical usage:
//! ```no_run
//! use sdfgen::{SdfGenerator, SdfParams};
//! use sdfgen::image::ImageU8;
//!
//! # fn example(view: ImageU8) {
//! let generator = SdfGenerator::new(SdfParams::default());
//! let report = generator.process_with_diagnostics(&view).unwrap();
//! println!("latency: {:.3} ms", report.trace.timings.total_ms);
//! # }
//! ```
use crate::combine::combine;
use crate::diagnostics::{InputDescriptor, PipelineTrace, SdfReport, TimingBreakdown};
use crate::edt::{distance_transform, ParallelEdtOptions};
use crate::error::SdfError;
use crate::image::{FieldF32, ImageU8, Raster8};
use crate::mask::{seed_field, threshold, ChannelSelector, SeedPolarity};
use crate::quantize::quantize;
use log::debug;
use serde::Deserialize;
use std::time::Instant;

/// Generator-wide parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct SdfParams {
    /// Which decoded channel the thresholder reads.
    pub channel: ChannelSelector,
    /// Count values below middle grey as inside instead of above.
    pub invert: bool,
    /// Half-width of the distance window, in pixels. Must be positive.
    pub spread: u32,
    /// Map `[0, spread]` onto the byte range instead of `[-spread, spread]`.
    pub asymmetric: bool,
    /// Parallel execution policy for the distance transforms.
    pub parallel: ParallelEdtOptions,
}

impl Default for SdfParams {
    fn default() -> Self {
        Self {
            channel: ChannelSelector::Alpha,
            invert: false,
            spread: 4,
            asymmetric: false,
            parallel: ParallelEdtOptions::default(),
        }
    }
}

/// Signed distance field generator orchestrating threshold, seeding, the
/// two-sided Euclidean distance transform, combine and quantization.
pub struct SdfGenerator {
    params: SdfParams,
}

impl SdfGenerator {
    /// Create a generator with the supplied parameters.
    pub fn new(params: SdfParams) -> Self {
        Self { params }
    }

    /// Run the pipeline, returning only the output raster.
    pub fn process(&self, image: &ImageU8<'_>) -> Result<Raster8, SdfError> {
        Ok(self.process_with_diagnostics(image)?.image)
    }

    /// Run the pipeline and capture a per-stage timing trace.
    pub fn process_with_diagnostics(&self, image: &ImageU8<'_>) -> Result<SdfReport, SdfError> {
        self.validate(image)?;
        debug!(
            "SdfGenerator::process start w={} h={} channel={:?} spread={}",
            image.w, image.h, self.params.channel, self.params.spread
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let threshold_start = Instant::now();
        let mask = threshold(image, self.params.channel, self.params.invert);
        timings.push("threshold", elapsed_ms(threshold_start));
        let inside_pixels = mask.data.iter().filter(|&&inside| inside).count();

        // All working buffers are allocated up front: the two seeded fields
        // and one transposed twin per side.
        let seed_start = Instant::now();
        let mut inside = seed_field(&mask, SeedPolarity::SeedsAreTrue)?;
        let mut outside = seed_field(&mask, SeedPolarity::SeedsAreFalse)?;
        let mut inside_twin = FieldF32::try_new(mask.h, mask.w, f32::INFINITY)?;
        let mut outside_twin = FieldF32::try_new(mask.h, mask.w, f32::INFINITY)?;
        timings.push("seed", elapsed_ms(seed_start));

        let edt_start = Instant::now();
        self.transform_sides(
            &mut inside,
            &mut inside_twin,
            &mut outside,
            &mut outside_twin,
        );
        timings.push("edt", elapsed_ms(edt_start));

        let combine_start = Instant::now();
        let signed = combine(inside, &outside);
        timings.push("combine", elapsed_ms(combine_start));

        let quantize_start = Instant::now();
        let out = quantize(&signed, self.params.spread, self.params.asymmetric)?;
        timings.push("quantize", elapsed_ms(quantize_start));

        timings.total_ms = elapsed_ms(total_start);
        debug!(
            "SdfGenerator::process done inside_pixels={} latency_ms={:.3}",
            inside_pixels, timings.total_ms
        );

        Ok(SdfReport {
            image: out,
            trace: PipelineTrace {
                input: InputDescriptor {
                    width: image.w,
                    height: image.h,
                    channels: image.channels,
                },
                timings,
                inside_pixels,
            },
        })
    }

    /// Run the two independent per-side transforms, overlapping them when
    /// the parallel policy allows.
    fn transform_sides(
        &self,
        inside: &mut FieldF32,
        inside_twin: &mut FieldF32,
        outside: &mut FieldF32,
        outside_twin: &mut FieldF32,
    ) {
        let opts = &self.params.parallel;
        if opts.should_parallelize(inside.data.len()) {
            #[cfg(feature = "parallel")]
            {
                rayon::join(
                    || distance_transform(inside, inside_twin, opts),
                    || distance_transform(outside, outside_twin, opts),
                );
                return;
            }
        }
        distance_transform(inside, inside_twin, opts);
        distance_transform(outside, outside_twin, opts);
    }

    fn validate(&self, image: &ImageU8<'_>) -> Result<(), SdfError> {
        if self.params.spread == 0 {
            return Err(SdfError::InvalidArguments(
                "spread must be a positive integer".to_string(),
            ));
        }
        if self.params.channel.offset() >= image.channels {
            return Err(SdfError::InvalidArguments(format!(
                "image has {} channel(s), {:?} channel unavailable",
                image.channels, self.params.channel
            )));
        }
        let expected = image
            .pixels()
            .checked_mul(image.channels)
            .filter(|&len| len == image.data.len());
        if expected.is_none() {
            return Err(SdfError::InvalidArguments(format!(
                "image buffer holds {} bytes, expected {}x{}x{}",
                image.data.len(),
                image.w,
                image.h,
                image.channels
            )));
        }
        Ok(())
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
