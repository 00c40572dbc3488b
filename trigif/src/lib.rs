// lib.rs      trigif crate.
//
// Copyright (c) 2026  Douglas Lau
//
//! Triangle rasterizer producing frames for animated GIFs.
//!
//! Frames are drawn into a [PixelBuffer] with [draw_line], [draw_triangle]
//! or [fill_triangle], then submitted to an [Animation], which hands them
//! to the `gift` encoder.
//!
//! ## Example
//! ```
//! use pix::rgb::SRgb8;
//! use trigif::{draw_triangle, Animation, PixelBuffer, Settings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut anim = Animation::new(Settings::new(64, 64))?;
//! for (i, clr) in [SRgb8::new(255, 0, 0), SRgb8::new(0, 0, 255)]
//!     .into_iter()
//!     .enumerate()
//! {
//!     let mut buf = PixelBuffer::new(64, 64);
//!     draw_triangle(&mut buf, clr);
//!     anim.add_frame(i as u32, &buf, i as f64 * 0.1)?;
//! }
//! let mut gif = Vec::new();
//! anim.finish(&mut gif)?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

#[macro_use]
extern crate log;

mod anim;
mod buffer;
mod error;
mod raster;

pub use crate::anim::{Animation, Repeat, Settings};
pub use crate::buffer::PixelBuffer;
pub use crate::error::{Error, Result};
pub use crate::raster::{
    draw_line, draw_triangle, fill_triangle, Line, Point, Triangle,
};
