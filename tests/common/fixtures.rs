//! Test fixtures: small PNG images built in memory.

/// Encode raw 8-bit pixel data as a PNG
pub fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf
}

/// RGB gradient: red across, green down, constant blue
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width.max(2).saturating_sub(1)).min(255) as u8);
            data.push((y * 255 / height.max(2).saturating_sub(1)).min(255) as u8);
            data.push(96);
        }
    }
    encode_png(width, height, png::ColorType::Rgb, &data)
}

/// Two-colour checkerboard with 1-pixel squares
pub fn checkerboard_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    encode_png(width, height, png::ColorType::Rgb, &data)
}

/// Decode a PNG into (width, height, RGB bytes)
pub fn decode_rgb(png_bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let raster = retro8::rendering::decode_png(png_bytes, None).expect("valid PNG");
    (
        raster.width() as u32,
        raster.height() as u32,
        raster.to_rgb_bytes(),
    )
}

/// Distinct RGB colours in a decoded image
pub fn distinct_colors(rgb: &[u8]) -> usize {
    let mut colors: Vec<[u8; 3]> = rgb.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
    colors.sort_unstable();
    colors.dedup();
    colors.len()
}
