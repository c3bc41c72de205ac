//! PNG decoding to [`Raster`] and indexed PNG encoding of [`RetroImage`].

use std::io::Cursor;

use retro_quant::{Raster, RetroImage, Rgb};

use crate::error::RenderError;

/// Dimension ceiling checked before the pixel buffer is allocated.
#[derive(Debug, Clone, Copy)]
pub struct DecodeLimits {
    pub max_width: u32,
    pub max_height: u32,
}

/// Decode a PNG into an RGB raster.
///
/// Accepts every PNG color type and bit depth: palettes are expanded,
/// 16-bit channels stripped to 8 bits, grayscale replicated to RGB, and
/// alpha composited against white.
pub fn decode_png(bytes: &[u8], limits: Option<DecodeLimits>) -> Result<Raster, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if let Some(limits) = limits {
        if width > limits.max_width || height > limits.max_height {
            return Err(RenderError::ImageTooLarge {
                width,
                height,
                max_width: limits.max_width,
                max_height: limits.max_height,
            });
        }
    }

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    let (w, h) = (width as usize, height as usize);
    let raster = match frame.color_type {
        png::ColorType::Rgb => Raster::from_rgb_bytes(w, h, data)?,
        png::ColorType::Rgba => Raster::new(
            w,
            h,
            data.chunks_exact(4)
                .map(|p| composite_on_white(p[0], p[1], p[2], p[3]))
                .collect(),
        )?,
        png::ColorType::Grayscale => {
            Raster::new(w, h, data.iter().map(|&v| Rgb::new(v, v, v)).collect())?
        }
        png::ColorType::GrayscaleAlpha => Raster::new(
            w,
            h,
            data.chunks_exact(2)
                .map(|p| composite_on_white(p[0], p[0], p[0], p[1]))
                .collect(),
        )?,
        png::ColorType::Indexed => {
            return Err(RenderError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    tracing::debug!(
        width,
        height,
        color_type = ?frame.color_type,
        "Decoded PNG"
    );

    Ok(raster)
}

/// Alpha-composite a pixel against white.
fn composite_on_white(r: u8, g: u8, b: u8, a: u8) -> Rgb {
    match a {
        255 => Rgb::new(r, g, b),
        0 => Rgb::new(255, 255, 255),
        _ => {
            let af = a as u16;
            let blend = |c: u8| ((c as u16 * af + 255 * (255 - af)) / 255) as u8;
            Rgb::new(blend(r), blend(g), blend(b))
        }
    }
}

/// Encode a converted image as an indexed PNG.
///
/// The bit depth is the smallest that fits the palette (1, 2, 4 or 8
/// bits). With `optimize`, the result is recompressed with oxipng; if that
/// fails the unoptimized bytes are returned.
pub fn encode_indexed_png(image: &RetroImage, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let width = image.width() as u32;
    let height = image.height() as u32;

    let (depth, bits) = match image.palette().len() {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    };
    let plte: Vec<u8> = image
        .palette()
        .colors()
        .iter()
        .flat_map(|c| c.to_bytes())
        .collect();
    let packed = if bits == 8 {
        image.indices().to_vec()
    } else {
        pack_rows(image.indices(), image.width(), bits)
    };

    // Fast settings; oxipng picks filters and compression afterwards
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(depth);
        encoder.set_palette(plte);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&packed)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            Ok(optimized)
        }
        Err(e) => {
            tracing::warn!(%e, "oxipng failed, returning unoptimized PNG");
            Ok(png_bytes)
        }
    }
}

/// Pack indices at `bits` per pixel (1, 2 or 4), most significant first.
/// Each row is padded to a whole byte.
fn pack_rows(indices: &[u8], width: usize, bits: u8) -> Vec<u8> {
    let per_byte = usize::from(8 / bits);
    indices
        .chunks(width)
        .flat_map(|row| row.chunks(per_byte))
        .map(|group| {
            group.iter().enumerate().fold(0u8, |byte, (slot, &idx)| {
                byte | idx << (8 - bits * (slot as u8 + 1))
            })
        })
        .collect()
}
