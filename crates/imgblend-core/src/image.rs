//! Image buffer type.
//!
//! [`Image`] is an owned grid of [`Rgba8`] pixels, stored interleaved and
//! row-major, top-to-bottom:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The buffer lives behind an [`Arc`], so cloning an image is cheap and
//! mutation goes through copy-on-write. Blending never mutates its inputs:
//! it allocates a fresh output image and fills it.
//!
//! # Usage
//!
//! ```rust
//! use imgblend_core::{Image, Rgba8};
//!
//! let mut img = Image::new(4, 3);
//! img.set_pixel(1, 2, Rgba8::opaque(255, 0, 0));
//! assert_eq!(img.pixel(1, 2), Rgba8::opaque(255, 0, 0));
//! assert_eq!(img.pixel(0, 0), Rgba8::transparent());
//! ```
//!
//! # Origin
//!
//! An image may carry an origin (where its top-left corner sits in some
//! larger canvas). Pixel access is always relative to the image itself,
//! with coordinates in `[0, width) x [0, height)`.

use crate::{Error, Rect, Result, Rgba8};
use std::sync::Arc;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Owned RGBA8 image buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    /// Pixel data buffer (Arc for cheap cloning)
    data: Arc<Vec<u8>>,
    /// Image width in pixels
    width: u32,
    /// Image height in pixels
    height: u32,
    /// Top-left corner in canvas coordinates
    origin: (i32, i32),
}

impl Image {
    /// Creates a new image filled with transparent black.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgblend_core::Image;
    ///
    /// let img = Image::new(1920, 1080);
    /// assert_eq!(img.dimensions(), (1920, 1080));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: Arc::new(vec![0; len]),
            width,
            height,
            origin: (0, 0),
        }
    }

    /// Creates an image from interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height * 4`.
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            origin: (0, 0),
        })
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel.to_array());
        }
        Self {
            data: Arc::new(data),
            width,
            height,
            origin: (0, 0),
        }
    }

    /// Creates an image by evaluating `f(x, y)` for every pixel in row-major order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgblend_core::{Image, Rgba8};
    ///
    /// let ramp = Image::from_fn(256, 1, |x, _| Rgba8::gray(x as u8, 255));
    /// assert_eq!(ramp.pixel(200, 0).r, 200);
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgba8,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        Self {
            data: Arc::new(data),
            width,
            height,
            origin: (0, 0),
        }
    }

    /// Returns the same image placed at a different origin.
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the origin of the top-left corner.
    #[inline]
    pub fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns a rectangle covering the entire image.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw interleaved bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns a mutable reference to the raw bytes (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// Consumes the image and returns its bytes.
    pub fn into_data(self) -> Vec<u8> {
        Arc::try_unwrap(self.data).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Number of bytes in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let o = self.pixel_offset(x, y);
        Rgba8::new(self.data[o], self.data[o + 1], self.data[o + 2], self.data[o + 3])
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Returns the pixel at (x, y), or [`Error::OutOfBounds`].
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Rgba8> {
        self.get_pixel(x, y)
            .ok_or_else(|| Error::out_of_bounds(x, y, self.width, self.height))
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgba8) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let o = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[o..o + CHANNELS].copy_from_slice(&pixel.to_array());
    }

    /// Returns a row of pixels as interleaved bytes.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }

    /// Returns a mutable row of interleaved bytes.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        assert!(y < self.height, "row {y} out of bounds for height {}", self.height);
        let start = y as usize * self.row_len();
        let len = self.row_len();
        &mut self.data_mut()[start..start + len]
    }

    /// Iterates over all pixels with their coordinates, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba8)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgba8) -> Rgba8,
    {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(CHANNELS) {
            let px = f(Rgba8::new(chunk[0], chunk[1], chunk[2], chunk[3]));
            chunk.copy_from_slice(&px.to_array());
        }
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("origin", &self.origin)
            .finish()
    }
}
