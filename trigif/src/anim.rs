// anim.rs
//
// Copyright (c) 2026  Douglas Lau
//
//! Animation frames handed to the GIF encoder
use crate::buffer::{PixelBuffer, OPAQUE};
use crate::error::{Error, Result};
use gift::{Encoder, Step};
use pix::{
    gray::Gray8,
    rgb::{Rgb, SRgb8},
    Palette, Raster,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Maximum number of palette entries in a GIF
const PALETTE_CAPACITY: usize = 256;

/// Largest screen dimension allowed by GIF
const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Animation repeat behavior
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    /// Loop forever
    #[default]
    Infinite,
    /// Play one time, without looping
    Once,
    /// Repeat a number of times after the first play
    Times(u16),
}

/// Animation settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settings {
    /// Screen width
    width: u32,
    /// Screen height
    height: u32,
    /// Quality (1-100)
    quality: u8,
    /// Repeat behavior
    repeat: Repeat,
    /// Matte color for pixels which are not opaque
    matte: SRgb8,
}

/// Frame converted to indexed color
struct IndexedFrame {
    /// Indexed raster
    raster: Raster<Gray8>,
    /// Palette for the raster
    palette: Palette,
    /// Presentation timestamp (seconds)
    pts: f64,
}

/// Animated GIF builder.
///
/// Frames are submitted in order with presentation timestamps, then the
/// animation is finished into a writer.
pub struct Animation {
    /// Animation settings
    settings: Settings,
    /// Queued frames
    frames: Vec<IndexedFrame>,
}

impl Repeat {
    /// Get the GIF loop count, or `None` for no looping
    fn loop_count(self) -> Option<u16> {
        match self {
            Repeat::Infinite => Some(0),
            Repeat::Once | Repeat::Times(0) => None,
            Repeat::Times(n) => Some(n),
        }
    }
}

impl Settings {
    /// Create settings for a screen size
    pub fn new(width: u32, height: u32) -> Self {
        Settings {
            width,
            height,
            quality: 100,
            repeat: Repeat::default(),
            matte: SRgb8::default(),
        }
    }

    /// Adjust the quality (1-100).
    ///
    /// Below 100, similar colors in a frame may share a palette entry.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Adjust the repeat behavior
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Adjust the matte color
    pub fn with_matte(mut self, matte: SRgb8) -> Self {
        self.matte = matte;
        self
    }

    /// Get the screen width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the screen height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the quality
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Get the repeat behavior
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// Get the matte color
    pub fn matte(&self) -> SRgb8 {
        self.matte
    }

    /// Check that settings are usable
    fn validate(&self) -> Result<()> {
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&self.width) || !valid.contains(&self.height) {
            return Err(Error::InvalidDimensions(self.width, self.height));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(Error::InvalidQuality(self.quality));
        }
        Ok(())
    }
}

/// Palette threshold for quality 50-99
fn palette_threshold_fine(v: usize) -> SRgb8 {
    let i = (v.min(255) / 16) as u8;
    SRgb8::new(i, i, i)
}

/// Palette threshold below quality 50
fn palette_threshold_coarse(v: usize) -> SRgb8 {
    let i = (v.min(255) / 8) as u8;
    SRgb8::new(i * 2, i * 2, i * 2)
}

/// Blend one channel with the matte
fn blend(c: u8, m: u8, a: u8) -> u8 {
    let a = u32::from(a);
    ((u32::from(c) * a + u32::from(m) * (255 - a) + 127) / 255) as u8
}

/// Convert a centisecond duration, rounded and saturated
fn delay_cs(secs: f64) -> u16 {
    (secs * 100.0).round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl Animation {
    /// Create a new animation.
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        debug!(
            "animation {}x{} quality {} {:?}",
            settings.width, settings.height, settings.quality, settings.repeat
        );
        if settings.quality < 100 {
            info!("similar colors merged at quality {}", settings.quality);
        }
        Ok(Animation {
            settings,
            frames: Vec::new(),
        })
    }

    /// Get the settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get the number of frames added
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frames have been added
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Add a frame.
    ///
    /// * `index` Frame number, starting at 0 with no gaps.
    /// * `buf` Pixels, with the same size as the animation.
    /// * `pts` Presentation timestamp in seconds.
    pub fn add_frame(
        &mut self,
        index: u32,
        buf: &PixelBuffer,
        pts: f64,
    ) -> Result<()> {
        let expected = self.frames.len() as u32;
        if index != expected {
            return Err(Error::FrameOrder {
                expected,
                actual: index,
            });
        }
        if buf.width() != self.settings.width
            || buf.height() != self.settings.height
        {
            return Err(Error::FrameDimensions);
        }
        let last = self.frames.last().map_or(0.0, |f| f.pts);
        if !pts.is_finite() || pts < last {
            return Err(Error::InvalidTimestamp(pts));
        }
        let (raster, palette) = self.make_indexed(buf)?;
        debug!(
            "frame {} at {:.3}s: {} colors",
            index,
            pts,
            palette.len()
        );
        self.frames.push(IndexedFrame {
            raster,
            palette,
            pts,
        });
        Ok(())
    }

    /// Map a buffer to indexed color over the matte
    fn make_indexed(
        &self,
        buf: &PixelBuffer,
    ) -> Result<(Raster<Gray8>, Palette)> {
        let mut palette = Palette::new(PALETTE_CAPACITY);
        match self.settings.quality {
            100 => (),
            50..=99 => palette.set_threshold_fn(palette_threshold_fine),
            _ => palette.set_threshold_fn(palette_threshold_coarse),
        }
        let m = self.settings.matte;
        let (mr, mg, mb) = (
            u8::from(Rgb::red(m)),
            u8::from(Rgb::green(m)),
            u8::from(Rgb::blue(m)),
        );
        let mut raster = Raster::with_clear(buf.width(), buf.height());
        let mut last: Option<([u8; 4], u8)> = None;
        for (y, row) in buf.rows().enumerate() {
            for (x, p) in row.chunks_exact(4).enumerate() {
                let rgba = [p[0], p[1], p[2], p[3]];
                let idx = match last {
                    Some((prev, idx)) if prev == rgba => idx,
                    _ => {
                        let clr = if rgba[3] == OPAQUE {
                            SRgb8::new(rgba[0], rgba[1], rgba[2])
                        } else {
                            SRgb8::new(
                                blend(rgba[0], mr, rgba[3]),
                                blend(rgba[1], mg, rgba[3]),
                                blend(rgba[2], mb, rgba[3]),
                            )
                        };
                        let idx =
                            palette.set_entry(clr).ok_or(Error::TooManyColors)?
                                as u8;
                        last = Some((rgba, idx));
                        idx
                    }
                };
                *raster.pixel_mut(x as i32, y as i32) = Gray8::new(idx);
            }
        }
        Ok((raster, palette))
    }

    /// Get the delay of each frame, in centiseconds.
    ///
    /// The last frame repeats the delay before it.
    fn delays(&self) -> Vec<Option<u16>> {
        let mut delays: Vec<Option<u16>> = self
            .frames
            .windows(2)
            .map(|w| Some(delay_cs(w[1].pts - w[0].pts)))
            .collect();
        if !self.frames.is_empty() {
            delays.push(delays.last().copied().flatten());
        }
        delays
    }

    /// Finish the animation, encoding all frames into a writer.
    pub fn finish<W: Write>(self, mut writer: W) -> Result<()> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        let delays = self.delays();
        let n_frames = self.frames.len();
        {
            let mut enc = Encoder::new(&mut writer).into_step_enc();
            if let Some(count) = self.settings.repeat.loop_count() {
                enc = enc.with_loop_count(count);
            }
            for (frame, delay) in self.frames.into_iter().zip(delays) {
                let step = Step::with_indexed(frame.raster, frame.palette)
                    .with_delay_time_cs(delay);
                enc.encode_step(&step)?;
            }
        }
        writer.flush()?;
        info!("encoded {} frames", n_frames);
        Ok(())
    }

    /// Finish the animation, encoding all frames into a file.
    pub fn finish_file<P: AsRef<Path>>(self, path: P) -> Result<()> {
        if self.frames.is_empty() {
            return Err(Error::NoFrames);
        }
        let path = path.as_ref();
        let file = BufWriter::new(File::create(path)?);
        self.finish(file)?;
        info!("wrote {}", path.display());
        Ok(())
    }
}
