/// Bytes per pixel in the frame buffer (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Owned RGBA8 frame buffer.
///
/// Invariants:
/// - `data.len() == width * height * BYTES_PER_PIXEL`
/// - rows are tightly packed (`stride == width * 4`), top row first
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocates a zeroed buffer.
    ///
    /// Returns `None` when either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        let len = byte_len(width, height)?;
        Some(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns `true` when the buffer already has the given dimensions.
    #[inline]
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    /// Reallocates the buffer for new dimensions.
    ///
    /// Same dimensions keep the existing allocation untouched. Otherwise the old
    /// storage is released and contents are not preserved. Returns `false` (and
    /// leaves the buffer unchanged) when either dimension is zero.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.matches(width, height) {
            return true;
        }

        let Some(len) = byte_len(width, height) else {
            return false;
        };

        // Release before allocating so peak memory stays at one frame.
        self.data = Vec::new();
        self.data = vec![0; len];
        self.width = width;
        self.height = height;
        true
    }

    /// Releases the storage. The buffer reports `0 × 0` afterwards.
    pub fn release(&mut self) {
        self.data = Vec::new();
        self.width = 0;
        self.height = 0;
    }
}

fn byte_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}
