//! Decoding and encoding at the pipeline boundary.
//!
//! - `decode_image`: read a PNG/JPEG/etc. from a path or stdin into a
//!   2-channel grayscale+alpha buffer.
//! - `OutputFormat`: the four supported output encodings, derivable from a
//!   name or a filename.
//! - `encode_image`: serialize a `Raster8` into an in-memory byte buffer.
//! - `write_output`: write the encoded bytes to a path or stdout.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! Decoder behavior: the forced grayscale+alpha conversion collapses RGB
//! sources to luminance with the `image` crate's Rec.601-style weights and
//! synthesizes an opaque (0xFF) alpha channel when the source has none.
//! Channel 0 is luminance, channel 1 alpha.
use crate::error::SdfError;
use crate::image::{ImageU8, Raster8};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageFormat};
use log::trace;
use serde::Serialize;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

/// Owned 2-channel (luminance, alpha) raster produced by the decoder.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view over the interleaved bytes.
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            channels: 2,
            data: &self.data,
        }
    }
}

/// Decode an image into the forced grayscale+alpha layout. `"-"` reads the
/// encoded bytes from stdin.
pub fn decode_image(input: &str) -> Result<DecodedImage, SdfError> {
    let dynimg = if input == "-" {
        trace!("loading image from stdin");
        let mut bytes = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .map_err(SdfError::InputIo)?;
        image::load_from_memory(&bytes).map_err(SdfError::Decode)?
    } else {
        trace!("loading image from {input}");
        image::open(Path::new(input)).map_err(SdfError::Decode)?
    };

    let img = dynimg.to_luma_alpha8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    trace!("decoded image w={width} h={height} channels=2");
    Ok(DecodedImage {
        width,
        height,
        data,
    })
}

/// Output encodings supported by `encode_image`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Tga,
    Bmp,
}

impl OutputFormat {
    /// Derive the format from a name by case-insensitive substring search.
    pub fn parse(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        let pairs = [
            ("png", Self::Png),
            ("jpeg", Self::Jpeg),
            ("jpg", Self::Jpeg),
            ("tga", Self::Tga),
            ("bmp", Self::Bmp),
        ];
        pairs
            .iter()
            .find(|(tag, _)| lower.contains(tag))
            .map(|&(_, format)| format)
    }

    /// Like [`Self::parse`], falling back to PNG when nothing matches.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::Png)
    }

    /// Infer the format from an output filename's extension.
    pub fn from_path(path: &str) -> Self {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_name)
            .unwrap_or(Self::Png)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Tga => "tga",
            Self::Bmp => "bmp",
        }
    }
}

/// Encode a single-channel raster entirely in memory. `quality` applies to
/// JPEG only (1..=100).
pub fn encode_image(
    raster: &Raster8,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>, SdfError> {
    trace!(
        "encoding {}x{} raster as {} (quality {quality})",
        raster.w,
        raster.h,
        format.as_str()
    );
    let mut bytes = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
            encoder
                .encode(
                    &raster.data,
                    raster.w as u32,
                    raster.h as u32,
                    ExtendedColorType::L8,
                )
                .map_err(SdfError::Encode)?;
        }
        OutputFormat::Png | OutputFormat::Tga | OutputFormat::Bmp => {
            let image_format = match format {
                OutputFormat::Png => ImageFormat::Png,
                OutputFormat::Tga => ImageFormat::Tga,
                _ => ImageFormat::Bmp,
            };
            let gray =
                GrayImage::from_raw(raster.w as u32, raster.h as u32, raster.data.clone())
                    .ok_or_else(|| {
                        SdfError::InvalidArguments("output raster size mismatch".to_string())
                    })?;
            DynamicImage::ImageLuma8(gray)
                .write_to(&mut Cursor::new(&mut bytes), image_format)
                .map_err(SdfError::Encode)?;
        }
    }
    Ok(bytes)
}

/// Write encoded bytes to a path, or to stdout when the path is `"-"`.
pub fn write_output(output: &str, bytes: &[u8]) -> Result<(), SdfError> {
    if output == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes).map_err(SdfError::OutputIo)?;
        stdout.flush().map_err(SdfError::OutputIo)
    } else {
        fs::write(Path::new(output), bytes).map_err(SdfError::OutputIo)
    }
}

/// Serialize a value as pretty JSON to `path`.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), SdfError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| SdfError::InvalidArguments(format!("failed to serialize report: {e}")))?;
    fs::write(path, json).map_err(SdfError::OutputIo)
}
