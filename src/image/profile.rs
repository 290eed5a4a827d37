//! Owned binary profile raster in row-major layout (stride == width).
//!
//! Pixels hold [`BACKGROUND`] or [`HIT`]; the scanner never writes other
//! values, but the raster itself is a plain 8-bit gray buffer so it can be
//! handed to any image writer.
use super::traits::{ImageView, ImageViewMut};

pub const BACKGROUND: u8 = 0;
pub const HIT: u8 = 255;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileImage {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<u8>,
}

impl ProfileImage {
    /// All-background raster of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![BACKGROUND; w * h],
        }
    }

    #[inline]
    pub fn is_hit(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y) != BACKGROUND
    }

    #[inline]
    pub fn mark_hit(&mut self, x: usize, y: usize) {
        self.set_pixel(x, y, HIT);
    }

    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != BACKGROUND).count()
    }

    /// Coordinates of every hit pixel, row by row.
    pub fn hits(&self) -> impl Iterator<Item = [usize; 2]> + '_ {
        let w = self.w;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != BACKGROUND)
            .map(move |(i, _)| [i % w, i / w])
    }
}

impl ImageView for ProfileImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        Some(&self.data)
    }
}

impl ImageViewMut for ProfileImage {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }
}
