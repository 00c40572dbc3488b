// buffer.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! RGBA8 pixel buffer
use crate::error::{Error, Result};
use pix::rgb::{Rgb, SRgb8};

/// Number of bytes per pixel
const CHANNELS: usize = 4;

/// Alpha value of a fully opaque pixel
pub const OPAQUE: u8 = 255;

/// Owned buffer of RGBA8 pixels in row-major order.
///
/// The byte length is always `width * height * 4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel bytes
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new zero-filled (fully transparent black) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        PixelBuffer {
            width,
            height,
            data: vec![0; len],
        }
    }

    /// Create a buffer from existing RGBA8 bytes.
    pub fn with_u8_buffer(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != width as usize * height as usize * CHANNELS {
            return Err(Error::InvalidBufferSize);
        }
        Ok(PixelBuffer {
            width,
            height,
            data,
        })
    }

    /// Get the width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel bytes
    pub fn as_u8_slice(&self) -> &[u8] {
        &self.data
    }

    /// Convert into the pixel bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of a pixel, or `None` if out of bounds
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Get the RGBA channels of a pixel.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut rgba = [0; CHANNELS];
        rgba.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(rgba)
    }

    /// Check whether a pixel is fully opaque
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        self.offset(x, y)
            .map_or(false, |i| self.data[i + 3] == OPAQUE)
    }

    /// Set a pixel to an opaque color.
    ///
    /// Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, clr: SRgb8) {
        if let Some(i) = self.offset(x, y) {
            self.data[i] = u8::from(Rgb::red(clr));
            self.data[i + 1] = u8::from(Rgb::green(clr));
            self.data[i + 2] = u8::from(Rgb::blue(clr));
            self.data[i + 3] = OPAQUE;
        }
    }

    /// Iterate over rows of RGBA bytes
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = (self.width as usize * CHANNELS).max(1);
        self.data.chunks_exact(stride)
    }
}
