//! Escape-time Mandelbrot renderer.

use rayon::prelude::*;

pub const MAX_ITERATIONS: u32 = 1000;

/// Default vertical extent of the view in fractal units.
const HOME_HEIGHT: f32 = 5.0;

/// Visible region of the complex plane.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub center_x: f32,
    pub center_y: f32,
    /// Vertical extent; horizontal extent is `height * aspect`.
    pub height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            height: HOME_HEIGHT,
        }
    }
}

impl Camera {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Halves the extent, moving the center halfway towards the cursor.
    pub fn zoom_in(&mut self, mouse: (i32, i32), width: u32, height: u32) {
        self.pan_towards(mouse, width, height, 0.5);
        self.height *= 0.5;
    }

    /// Doubles the extent, moving the center away from the cursor.
    pub fn zoom_out(&mut self, mouse: (i32, i32), width: u32, height: u32) {
        self.pan_towards(mouse, width, height, -0.5);
        self.height *= 2.0;
    }

    fn pan_towards(&mut self, mouse: (i32, i32), width: u32, height: u32, factor: f32) {
        let aspect = width as f32 / height as f32;
        let px = mouse.0 as f32 / width as f32;
        let py = mouse.1 as f32 / height as f32;
        self.center_x += (px - 0.5) * self.height * aspect * factor;
        self.center_y += (py - 0.5) * self.height * factor;
    }
}

/// Normalized escape time in `[0, 1]`, or `None` for points inside the set.
pub fn escape_time(x: f32, y: f32) -> Option<f32> {
    let (cx, cy) = (x as f64, y as f64);
    let (mut z, mut zi) = (0.0f64, 0.0f64);

    for i in 0..MAX_ITERATIONS {
        let next = z * z - zi * zi + cx;
        zi = 2.0 * z * zi + cy;
        z = next;

        if z * z + zi * zi > 4.0 {
            return Some(i as f32 / (MAX_ITERATIONS - 1) as f32);
        }
    }
    None
}

/// Six-band palette: deep blue → cyan → green → yellow → orange → red → dark red.
pub fn palette(t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let c = |v: f32| v as u8;

    if t < 0.16 {
        let k = t / 0.16;
        [0, c(k * 128.0), c(64.0 + k * 191.0)]
    } else if t < 0.33 {
        let k = (t - 0.16) / 0.17;
        [0, c(128.0 + k * 127.0), c(255.0 - k * 255.0)]
    } else if t < 0.5 {
        let k = (t - 0.33) / 0.17;
        [c(k * 255.0), 255, 0]
    } else if t < 0.67 {
        let k = (t - 0.5) / 0.17;
        [255, c(255.0 - k * 100.0), 0]
    } else if t < 0.84 {
        let k = (t - 0.67) / 0.17;
        [255, c(155.0 - k * 155.0), 0]
    } else {
        let k = (t - 0.84) / 0.16;
        [c(255.0 - k * 128.0), 0, 0]
    }
}

/// Color of one point; the set itself is black.
pub fn shade(x: f32, y: f32) -> [u8; 4] {
    match escape_time(x, y) {
        Some(t) => {
            let [r, g, b] = palette(t);
            [r, g, b, 255]
        }
        None => [0, 0, 0, 255],
    }
}

/// Renders the camera's view into an RGBA8 buffer, rows in parallel.
pub fn render(pixels: &mut [u8], width: u32, height: u32, camera: &Camera) {
    if width == 0 || height == 0 {
        return;
    }
    let aspect = width as f32 / height as f32;
    let stride = width as usize * 4;

    pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(iy, row)| {
            let py = (iy as f32 + 0.5) / height as f32;
            let pos_y = camera.center_y + (py - 0.5) * camera.height;

            let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(row);
            for (ix, px) in texels.iter_mut().enumerate() {
                let pct_x = (ix as f32 + 0.5) / width as f32;
                let pos_x = camera.center_x + (pct_x - 0.5) * camera.height * aspect;
                *px = shade(pos_x, pos_y);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── iteration ─────────────────────────────────────────────────────────

    #[test]
    fn origin_is_inside_the_set() {
        assert_eq!(escape_time(0.0, 0.0), None);
        assert_eq!(escape_time(-1.0, 0.0), None);
    }

    #[test]
    fn far_points_escape_immediately() {
        assert_eq!(escape_time(3.0, 0.0), Some(0.0));
        let t = escape_time(0.5, 0.5).unwrap();
        assert!(t > 0.0 && t < 1.0);
    }

    // ── palette ───────────────────────────────────────────────────────────

    #[test]
    fn palette_band_edges() {
        assert_eq!(palette(0.0), [0, 0, 64]);
        assert_eq!(palette(0.5), [255, 255, 0]);
        let [r, g, b] = palette(1.0);
        assert!((126..=127).contains(&r), "r = {r}");
        assert_eq!((g, b), (0, 0));
        assert_eq!(palette(-3.0), palette(0.0));
        assert_eq!(palette(7.0), palette(1.0));
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn zoom_in_at_center_only_scales() {
        let mut cam = Camera::default();
        cam.zoom_in((512, 384), 1024, 768);
        assert_eq!(cam.center_x, 0.0);
        assert_eq!(cam.center_y, 0.0);
        assert_eq!(cam.height, 2.5);
    }

    #[test]
    fn zoom_out_backs_away_from_the_cursor() {
        let mut cam = Camera::default();
        cam.zoom_in((768, 192), 1024, 768);
        let (zx, zy) = (cam.center_x, cam.center_y);
        assert!(zx > 0.0 && zy < 0.0);

        cam.zoom_out((768, 192), 1024, 768);
        assert!(cam.center_x > 0.0 && cam.center_x < zx);
        assert!(cam.center_y < 0.0 && cam.center_y > zy);
        assert_eq!(cam.height, HOME_HEIGHT);

        cam.zoom_in((0, 0), 1024, 768);
        cam.reset();
        assert_eq!(cam, Camera::default());
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_matches_per_pixel_shading() {
        let (w, h) = (16u32, 12u32);
        let mut pixels = vec![0u8; (w * h * 4) as usize];
        let cam = Camera::default();
        render(&mut pixels, w, h, &cam);

        // Center pixel of the default view sits near the origin: black.
        let i = ((h / 2 * w + w / 2) * 4) as usize;
        assert_eq!(&pixels[i..i + 4], &[0, 0, 0, 255]);
        // Corner is far outside the set.
        assert_ne!(&pixels[0..4], &[0, 0, 0, 255]);
        assert!(pixels.chunks_exact(4).all(|p| p[3] == 255));
    }
}
