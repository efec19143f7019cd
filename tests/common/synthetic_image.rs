use mountain_blocks::image::RgbaBuffer;

/// Generates a solid-colour RGBA image.
pub fn solid_rgba(width: usize, height: usize, px: [u8; 4]) -> RgbaBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut img = RgbaBuffer::new(width, height);
    img.fill_rect(0, 0, width, height, px);
    img
}

/// Opaque white square of the given edge length.
pub fn white_square(size: usize) -> RgbaBuffer {
    solid_rgba(size, size, [255, 255, 255, 255])
}

/// Horizontal greyscale ramp from black to white.
pub fn grey_ramp(width: usize, height: usize) -> RgbaBuffer {
    assert!(width > 1 && height > 0, "ramp needs at least two columns");
    let mut img = RgbaBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 255) / (width - 1)) as u8;
            img.set(x, y, [v, v, v, 255]);
        }
    }
    img
}
