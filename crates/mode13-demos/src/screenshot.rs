use std::path::Path;

use anyhow::{ensure, Context, Result};
use mode13_engine::BYTES_PER_PIXEL;

/// Writes an RGBA8 frame buffer to `path` as PNG.
pub fn save_png(path: impl AsRef<Path>, width: u32, height: u32, pixels: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    ensure!(
        pixels.len() == expected,
        "frame buffer holds {} bytes, {width}x{height} needs {expected}",
        pixels.len()
    );

    image::save_buffer(path, pixels, width, height, image::ExtendedColorType::Rgba8)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_png_reads_back() {
        let path = std::env::temp_dir().join(format!("mode13-shot-{}.png", std::process::id()));
        let pixels: Vec<u8> = (0..4 * 3 * 4).map(|i| i as u8).collect();

        save_png(&path, 4, 3, &pixels).unwrap();
        let img = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).ok();

        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.as_raw(), &pixels);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let path = std::env::temp_dir().join("mode13-never-written.png");
        let err = save_png(&path, 4, 4, &[0; 10]).unwrap_err();
        assert!(err.to_string().contains("needs 64"));
        assert!(!path.exists());
    }
}
