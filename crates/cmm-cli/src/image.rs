//! PNG reading and writing for conversion.
//!
//! Only RGB and RGBA at 8 or 16 bits are accepted; grayscale and palette
//! images have no matching RGB profile and are rejected.

use anyhow::{Context, Result, bail};
use cmm_core::Format;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Interleaved samples in native byte order.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

/// A decoded PNG with its embedded ICC profile, if any.
#[derive(Debug, Clone)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub alpha: bool,
    pub samples: Samples,
    pub icc: Option<Vec<u8>>,
}

impl Image {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The lcms format matching this image's layout.
    pub fn format(&self) -> Format {
        match (&self.samples, self.alpha) {
            (Samples::U8(_), false) => Format::RGB_8,
            (Samples::U8(_), true) => Format::RGBA_8,
            (Samples::U16(_), false) => Format::RGB_16,
            (Samples::U16(_), true) => Format::RGBA_16,
        }
    }
}

pub fn read(path: &Path) -> Result<Image> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    let icc = reader.info().icc_profile.as_ref().map(|data| data.to_vec());

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    buf.truncate(info.buffer_size());

    let alpha = match info.color_type {
        png::ColorType::Rgb => false,
        png::ColorType::Rgba => true,
        other => bail!("{}: unsupported color type {:?}, need RGB or RGBA", path.display(), other),
    };
    let samples = match info.bit_depth {
        png::BitDepth::Eight => Samples::U8(buf),
        png::BitDepth::Sixteen => Samples::U16(
            buf.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect(),
        ),
        other => bail!("{}: unsupported bit depth {:?}", path.display(), other),
    };

    Ok(Image { width: info.width, height: info.height, alpha, samples, icc })
}

pub fn write(path: &Path, image: &Image) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(if image.alpha { png::ColorType::Rgba } else { png::ColorType::Rgb });
    encoder.set_compression(png::Compression::default());

    let bytes = match &image.samples {
        Samples::U8(data) => {
            encoder.set_depth(png::BitDepth::Eight);
            data.clone()
        }
        Samples::U16(data) => {
            encoder.set_depth(png::BitDepth::Sixteen);
            data.iter().flat_map(|v| v.to_be_bytes()).collect()
        }
    };

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer
        .write_image_data(&bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.finish().with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
