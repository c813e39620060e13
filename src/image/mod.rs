//! Image module: lightweight owned buffers, read-only views, and I/O.
//!
//! Components
//! - `u8`: read-only `ImageU8<'a>` view over interleaved 8-bit buffers and
//!   the owned single-channel `Raster8` output buffer.
//! - `f32`: owned `FieldF32` buffer for the distance fields (row-major,
//!   stride==w, may hold +inf sentinels).
//! - `io`: decoding to the forced grayscale+alpha layout, encoding of the
//!   finished field, JSON report writing.
//!
//! Design goals
//! - Keep hot loops simple and cache-friendly via row access.
//! - Make ownership explicit: views borrow the decoded bytes; `FieldF32`
//!   owns and is mutated in place by the transform.
pub mod f32;
pub mod io;
pub mod u8;

pub use self::f32::FieldF32;
pub use self::io::{
    decode_image, encode_image, write_json_file, write_output, DecodedImage, OutputFormat,
};
pub use self::u8::{ImageU8, Raster8};
