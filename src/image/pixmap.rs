//! RGB image whose pixels live in a grid allocated by a method suite.
use super::Rgb;
use crate::error::{GridError, Result};
use crate::methods::{GridHandle, MapFn, MethodSuite};
use crate::transform::{self, Transform};

/// Sample ceiling of images built in memory.
pub const DEFAULT_MAXVAL: u16 = 255;

#[derive(Debug)]
pub struct Pixmap {
    suite: MethodSuite<Rgb>,
    pixels: GridHandle<Rgb>,
    maxval: u16,
}

impl Pixmap {
    /// Allocate a black `width`x`height` image with [`DEFAULT_MAXVAL`].
    pub fn new(suite: MethodSuite<Rgb>, width: usize, height: usize) -> Result<Self> {
        let pixels = suite.new_grid(width, height)?;
        Ok(Self::from_grid(suite, pixels))
    }

    /// Wrap pixels previously allocated by `suite`.
    pub fn from_grid(suite: MethodSuite<Rgb>, pixels: GridHandle<Rgb>) -> Self {
        Self {
            suite,
            pixels,
            maxval: DEFAULT_MAXVAL,
        }
    }

    /// Set the largest sample value the pixels are measured against.
    pub fn with_maxval(mut self, maxval: u16) -> Result<Self> {
        if maxval == 0 {
            return Err(GridError::InvalidParameter(
                "maxval must be at least 1".to_string(),
            ));
        }
        self.maxval = maxval;
        Ok(self)
    }

    /// Allocate an image and fill it with `f(col, row)`.
    pub fn from_fn<F>(suite: MethodSuite<Rgb>, width: usize, height: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut pixmap = Self::new(suite, width, height)?;
        suite
            .map_default()
            .apply(&mut pixmap.pixels, &mut (), |col, row, px, _| *px = f(col, row))?;
        Ok(pixmap)
    }

    /// Diagonal colour ramp, handy for benchmarks and smoke tests.
    pub fn gradient(suite: MethodSuite<Rgb>, width: usize, height: usize) -> Result<Self> {
        let w = width.max(1);
        let h = height.max(1);
        Self::from_fn(suite, width, height, |col, row| {
            Rgb::new(
                (col * 255 / w) as u16,
                (row * 255 / h) as u16,
                ((col + row) * 255 / (w + h)) as u16,
            )
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.suite.width(&self.pixels)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.suite.height(&self.pixels)
    }

    #[inline]
    pub fn maxval(&self) -> u16 {
        self.maxval
    }

    #[inline]
    pub fn suite(&self) -> &MethodSuite<Rgb> {
        &self.suite
    }

    #[inline]
    pub fn pixels(&self) -> &GridHandle<Rgb> {
        &self.pixels
    }

    pub fn get(&self, col: usize, row: usize) -> Result<Rgb> {
        self.suite.at(&self.pixels, col, row).copied()
    }

    pub fn set(&mut self, col: usize, row: usize, px: Rgb) -> Result<()> {
        *self.suite.at_mut(&mut self.pixels, col, row)? = px;
        Ok(())
    }

    /// Replace the pixels with their transformed copy, walking the
    /// destination with the suite's default traversal.
    pub fn transform(self, transform: Transform) -> Result<Self> {
        let map = self.suite.map_default();
        self.transform_with(map, transform)
    }

    /// Like [`Pixmap::transform`] with an explicit traversal.
    pub fn transform_with(self, map: MapFn<Rgb>, transform: Transform) -> Result<Self> {
        let Self {
            suite,
            pixels,
            maxval,
        } = self;
        let pixels = transform::apply_with(&suite, map, pixels, transform)?;
        Ok(Self {
            suite,
            pixels,
            maxval,
        })
    }

    /// Raw samples in row-major order, three per pixel.
    pub fn samples(&self) -> Result<Vec<u16>> {
        let (w, h) = (self.width(), self.height());
        let mut out = Vec::with_capacity(w * h * 3);
        for row in 0..h {
            for col in 0..w {
                out.extend_from_slice(&self.get(col, row)?.to_array());
            }
        }
        Ok(out)
    }
}
