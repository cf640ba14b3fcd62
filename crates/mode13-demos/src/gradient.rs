//! Animated RGB gradient: `r = frame + x`, `g = frame + y`, `b = frame`,
//! each wrapping at 256.

/// Fills an RGBA8 buffer with gradient frame `frame`.
pub fn fill(pixels: &mut [u8], width: u32, frame: u32) {
    let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(pixels);
    let width = width as usize;
    if width == 0 {
        return;
    }

    for (y, row) in texels.chunks_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            *px = [
                frame.wrapping_add(x as u32) as u8,
                frame.wrapping_add(y as u32) as u8,
                frame as u8,
                255,
            ];
        }
    }
}
