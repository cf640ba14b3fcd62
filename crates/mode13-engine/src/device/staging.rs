use std::sync::mpsc;

use crate::core::Error;
use crate::pixels::BYTES_PER_PIXEL;

/// Row layout of a frame inside the staging buffer.
///
/// Buffer-to-texture copies need `bytes_per_row` aligned to
/// `wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`, so tightly packed frame rows are
/// spread out with trailing padding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UploadLayout {
    pub width: u32,
    pub height: u32,
    pub unpadded_bytes_per_row: u32,
    pub padded_bytes_per_row: u32,
}

impl UploadLayout {
    pub fn new(width: u32, height: u32) -> Self {
        let unpadded_bytes_per_row = width * BYTES_PER_PIXEL as u32;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;
        Self {
            width,
            height,
            unpadded_bytes_per_row,
            padded_bytes_per_row,
        }
    }

    /// Size of the staging buffer in bytes.
    #[inline]
    pub fn buffer_size(&self) -> u64 {
        self.padded_bytes_per_row as u64 * self.height as u64
    }

    /// Size of the tightly packed source frame in bytes.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.unpadded_bytes_per_row as usize * self.height as usize
    }

    /// Copies a tightly packed frame into padded rows. Padding bytes are left as-is.
    pub fn copy_rows(&self, src: &[u8], dst: &mut [u8]) {
        let row = self.unpadded_bytes_per_row as usize;
        let padded = self.padded_bytes_per_row as usize;
        if row == 0 {
            return;
        }

        for (src_row, dst_row) in src.chunks_exact(row).zip(dst.chunks_mut(padded)) {
            dst_row[..row].copy_from_slice(src_row);
        }
    }

    pub(crate) fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

/// CPU-writable upload buffer holding one padded frame.
pub struct StagingBuffer {
    buffer: wgpu::Buffer,
    layout: UploadLayout,
}

impl StagingBuffer {
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let layout = UploadLayout::new(width, height);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mode13 staging buffer"),
            size: layout.buffer_size(),
            usage: wgpu::BufferUsages::MAP_WRITE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        Self { buffer, layout }
    }

    #[inline]
    pub fn layout(&self) -> UploadLayout {
        self.layout
    }

    /// Maps the buffer for writing, copies `pixels` in and unmaps.
    ///
    /// The buffer must not be in use by an unfinished submission; the caller
    /// waits on the frame fence first.
    pub fn write(&self, device: &wgpu::Device, pixels: &[u8]) -> Result<(), Error> {
        let slice = self.buffer.slice(..);

        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Write, move |result| {
            let _ = tx.send(result);
        });

        device.poll(wgpu::PollType::wait_indefinitely())?;

        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(Error::MapStaging(e.to_string())),
            Err(_) => return Err(Error::MapStaging("map callback dropped".into())),
        }

        {
            let mut mapped = slice.get_mapped_range_mut();
            self.layout.copy_rows(pixels, &mut mapped);
        }
        self.buffer.unmap();

        Ok(())
    }

    /// Records the staging → texture copy.
    pub fn copy_to_texture(&self, encoder: &mut wgpu::CommandEncoder, texture: &wgpu::Texture) {
        encoder.copy_buffer_to_texture(
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.layout.padded_bytes_per_row),
                    rows_per_image: Some(self.layout.height),
                },
            },
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            self.layout.extent(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pad_to_copy_alignment() {
        let l = UploadLayout::new(320, 200);
        assert_eq!(l.unpadded_bytes_per_row, 1280);
        assert_eq!(l.padded_bytes_per_row, 1280);

        let l = UploadLayout::new(100, 3);
        assert_eq!(l.unpadded_bytes_per_row, 400);
        assert_eq!(l.padded_bytes_per_row, 512);
        assert_eq!(l.buffer_size(), 512 * 3);
        assert_eq!(l.frame_size(), 400 * 3);
    }

    #[test]
    fn copy_rows_places_each_row_at_padded_offset() {
        let l = UploadLayout::new(3, 2);
        let src: Vec<u8> = (0..24).collect();
        let mut dst = vec![0xAAu8; l.buffer_size() as usize];

        l.copy_rows(&src, &mut dst);

        assert_eq!(&dst[..12], &src[..12]);
        assert!(dst[12..256].iter().all(|&b| b == 0xAA));
        assert_eq!(&dst[256..268], &src[12..24]);
    }

    #[test]
    fn copy_rows_ignores_short_source() {
        let l = UploadLayout::new(2, 2);
        let src = [1u8; 8];
        let mut dst = vec![0u8; l.buffer_size() as usize];
        l.copy_rows(&src, &mut dst);
        assert_eq!(&dst[..8], &[1; 8]);
        assert!(dst[256..].iter().all(|&b| b == 0));
    }
}
