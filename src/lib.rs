#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;

// Pipeline stages – public so each piece is usable on its own.
pub mod combine;
pub mod edt;
pub mod mask;
pub mod quantize;

// --- High-level re-exports -------------------------------------------------

// Main entry points: generator + parameters.
pub use crate::error::SdfError;
pub use crate::pipeline::{SdfGenerator, SdfParams};

// Diagnostics returned alongside the output raster.
pub use crate::diagnostics::{PipelineTrace, SdfReport};

// Frequently used stage types.
pub use crate::edt::ParallelEdtOptions;
pub use crate::image::{FieldF32, ImageU8, OutputFormat, Raster8};
pub use crate::mask::{ChannelSelector, SeedPolarity};
