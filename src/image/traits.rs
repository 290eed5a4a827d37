use std::ops::Range;

/// Read access to a row-major single-channel raster.
pub trait ImageView {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn row(&self, y: usize) -> &[Self::Pixel];

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Self::Pixel {
        self.row(y)[x]
    }

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows {
            image: self,
            ys: 0..self.height(),
        }
    }

    /// Whole raster when rows are stored back to back.
    fn as_slice(&self) -> Option<&[Self::Pixel]> {
        None
    }
}

pub trait ImageViewMut: ImageView {
    fn row_mut(&mut self, y: usize) -> &mut [Self::Pixel];

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, value: Self::Pixel) {
        self.row_mut(y)[x] = value;
    }
}

/// Top-to-bottom row iterator of an [`ImageView`].
pub struct Rows<'a, I: ImageView> {
    image: &'a I,
    ys: Range<usize>,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [I::Pixel];

    fn next(&mut self) -> Option<Self::Item> {
        let image = self.image;
        self.ys.next().map(|y| image.row(y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ys.size_hint()
    }
}

impl<I: ImageView> ExactSizeIterator for Rows<'_, I> {}
