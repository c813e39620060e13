//! Owned single-channel f32 field in row-major layout (stride == width).
//!
//! Backing storage for the distance transform. Cells may hold
//! `f32::INFINITY` to mean "no seed information yet"; the transform
//! replaces sentinels with finite squared distances wherever a seed is
//! reachable. Allocation is fallible so that an oversized image surfaces
//! as an error instead of an abort.
use crate::error::SdfError;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldF32 {
    /// Field width in cells
    pub w: usize,
    /// Field height in cells
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order, length exactly `w * h`
    pub data: Vec<f32>,
}

impl FieldF32 {
    /// Construct a field of size `w × h` with every cell set to `fill`.
    pub fn try_new(w: usize, h: usize, fill: f32) -> Result<Self, SdfError> {
        let len = w
            .checked_mul(h)
            .ok_or(SdfError::OutOfMemory { bytes: usize::MAX })?;
        let bytes = len.saturating_mul(std::mem::size_of::<f32>());
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| SdfError::OutOfMemory { bytes })?;
        data.resize(len, fill);
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }

    #[inline]
    /// Get the cell value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    /// Set the cell value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data[..self.w * self.h]
    }
}
