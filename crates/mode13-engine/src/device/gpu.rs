use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::core::Error;

use super::blit::BlitPass;
use super::fence::Fence;
use super::staging::{StagingBuffer, UploadLayout};
use super::surface::{self, TargetDesc, UploadPath};
use super::{GpuInit, SurfaceErrorAction};

/// Result of one `Gpu::present` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentOutcome {
    Presented,
    /// Nothing was shown this frame; try again next frame.
    Skipped,
    /// Presentation cannot continue.
    Fatal,
}

/// Per-size upload resources: the staging buffer and the texture it feeds.
struct FrameTarget {
    staging: StagingBuffer,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl FrameTarget {
    /// Fails without creating anything when the size is beyond the device's
    /// texture or buffer limits.
    fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<Self, Error> {
        let limits = device.limits();
        let max_dim = limits.max_texture_dimension_2d;
        if width > max_dim
            || height > max_dim
            || UploadLayout::new(width, height).buffer_size() > limits.max_buffer_size
        {
            return Err(Error::FrameTooLarge { width, height });
        }

        let staging = StagingBuffer::new(device, width, height);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("mode13 frame texture"),
            size: staging.layout().extent(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC
                | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self {
            staging,
            texture,
            view,
        })
    }
}

/// Owns the wgpu objects behind the presenter.
///
/// Field order is drop order: per-frame resources go first, then the surface,
/// then the device.
pub struct Gpu {
    blit: BlitPass,
    frame: Option<FrameTarget>,
    fence: Fence,

    surface: wgpu::Surface<'static>,
    queue: wgpu::Queue,
    device: wgpu::Device,
    adapter: wgpu::Adapter,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,
    /// Present modes the surface reported at init.
    present_modes: Vec<wgpu::PresentMode>,
    /// Format of the uploaded frame texture.
    frame_format: wgpu::TextureFormat,

    /// Current drawable size in physical pixels (may be zero while minimized).
    size: PhysicalSize<u32>,
    needs_reconfigure: bool,
}

impl Gpu {
    /// Creates the GPU context for `window` and allocates upload resources
    /// for a `frame_size` buffer.
    pub async fn new(
        window: Arc<Window>,
        init: &GpuInit,
        frame_size: (u32, u32),
        vsync: bool,
    ) -> Result<Self, Error> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("mode13 device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats).ok_or(Error::NoSurfaceFormat)?;
        let frame_format = surface::frame_texture_format(format);
        let tearing = surface::tearing_supported(&caps.present_modes);

        let config = wgpu::SurfaceConfiguration {
            usage: surface::surface_usage(caps.usages),
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface::choose_present_mode(&caps.present_modes, vsync),
            alpha_mode: surface::choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        log::info!(
            "surface: {format:?}, {:?}, tearing {}",
            config.present_mode,
            if tearing { "supported" } else { "unsupported" }
        );

        surface.configure(&device, &config);

        let mut blit = BlitPass::new(&device, format);
        let frame = FrameTarget::new(&device, frame_format, frame_size.0, frame_size.1)?;
        blit.bind(&device, &frame.view);

        Ok(Self {
            blit,
            frame: Some(frame),
            fence: Fence::new(),
            surface,
            queue,
            device,
            adapter,
            config,
            present_modes: caps.present_modes,
            frame_format,
            size,
            needs_reconfigure: false,
        })
    }

    /// The surface can present without waiting for vblank.
    pub fn tearing_supported(&self) -> bool {
        surface::tearing_supported(&self.present_modes)
    }

    /// Records a new drawable size; the surface is reconfigured on the next present.
    ///
    /// A zero size (minimized window) is remembered but never configured.
    /// Sizes beyond the device's texture limit are clamped.
    pub fn resize_surface(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let max_dim = self.device.limits().max_texture_dimension_2d;
        let (width, height) = (new_size.width.min(max_dim), new_size.height.min(max_dim));
        if self.config.width != width || self.config.height != height {
            self.config.width = width;
            self.config.height = height;
            self.needs_reconfigure = true;
        }
    }

    /// Updates the vsync preference; the present mode changes on the next present.
    pub fn set_vsync(&mut self, vsync: bool) {
        let mode = surface::choose_present_mode(&self.present_modes, vsync);
        if mode != self.config.present_mode {
            log::debug!("present mode {:?} -> {mode:?}", self.config.present_mode);
            self.config.present_mode = mode;
            self.needs_reconfigure = true;
        }
    }

    /// Blocks until all submitted work has finished.
    pub fn wait_idle(&mut self) -> Result<(), Error> {
        self.fence.wait(&self.device)?;
        self.device.poll(wgpu::PollType::wait_indefinitely())?;
        Ok(())
    }

    /// Recreates the staging buffer and frame texture for a new buffer size.
    ///
    /// On error the previous frame resources stay in place.
    pub fn resize_frame(&mut self, width: u32, height: u32) -> Result<(), Error> {
        self.wait_idle()?;

        let frame = FrameTarget::new(&self.device, self.frame_format, width, height)?;
        self.blit.bind(&self.device, &frame.view);
        self.frame = Some(frame);

        log::debug!("frame resources recreated at {width}x{height}");
        Ok(())
    }

    /// Uploads `pixels` and presents them.
    ///
    /// Waits for the previous frame first, so at most one frame is in flight
    /// and the staging buffer is never overwritten while the GPU reads it.
    pub fn present(&mut self, window: &Window, pixels: &[u8]) -> PresentOutcome {
        if let Err(e) = self.fence.wait(&self.device) {
            log::error!("waiting for previous frame failed: {e}");
            return PresentOutcome::Fatal;
        }

        if self.size.width == 0 || self.size.height == 0 {
            return PresentOutcome::Skipped;
        }

        if self.needs_reconfigure {
            self.surface.configure(&self.device, &self.config);
            self.needs_reconfigure = false;
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                return match self.handle_surface_error(e) {
                    SurfaceErrorAction::Fatal => PresentOutcome::Fatal,
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        PresentOutcome::Skipped
                    }
                };
            }
        };

        if surface_texture.suboptimal {
            self.needs_reconfigure = true;
        }

        let Some(frame) = self.frame.as_ref() else {
            return PresentOutcome::Skipped;
        };

        let layout = frame.staging.layout();
        if pixels.len() != layout.frame_size() {
            log::warn!(
                "frame buffer holds {} bytes, upload expects {}",
                pixels.len(),
                layout.frame_size()
            );
            return PresentOutcome::Skipped;
        }

        if let Err(e) = frame.staging.write(&self.device, pixels) {
            log::error!("frame upload failed: {e}");
            return PresentOutcome::Fatal;
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("mode13 frame encoder"),
            });

        frame.staging.copy_to_texture(&mut encoder, &frame.texture);

        let target = TargetDesc {
            usage: self.config.usage,
            format: self.config.format,
            size: (self.config.width, self.config.height),
        };
        match surface::choose_upload_path(target, self.frame_format, (layout.width, layout.height)) {
            UploadPath::Copy => encoder.copy_texture_to_texture(
                frame.texture.as_image_copy(),
                surface_texture.texture.as_image_copy(),
                layout.extent(),
            ),
            UploadPath::Blit => {
                let view = surface_texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                self.blit.draw(&mut encoder, &view);
            }
        }

        let index = self.queue.submit(std::iter::once(encoder.finish()));
        self.fence.signal(index);

        window.pre_present_notify();
        surface_texture.present();

        PresentOutcome::Presented
    }

    /// Converts an acquire error into an action, reconfiguring when the
    /// surface was lost or went stale.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::for_error(&err);
        log::warn!("surface error: {err} ({action:?})");

        if action == SurfaceErrorAction::Reconfigured && self.size.width > 0 && self.size.height > 0 {
            self.surface.configure(&self.device, &self.config);
            self.needs_reconfigure = false;
        }
        action
    }

    /// Waits for the GPU and drops the per-frame resources. Safe to call twice.
    pub fn release(&mut self) {
        if self.frame.is_none() {
            return;
        }
        if let Err(e) = self.wait_idle() {
            log::error!("GPU wait during shutdown failed: {e}");
        }
        self.blit.unbind();
        self.frame = None;
        log::debug!(
            "GPU resources released ({}/{} frames retired, backend {:?})",
            self.fence.completed(),
            self.fence.value(),
            self.adapter.get_info().backend
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::testing::{headless_device, read_texture};

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        fence: &mut Fence,
        frame: &FrameTarget,
        pixels: &[u8],
    ) {
        frame.staging.write(device, pixels).unwrap();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor::default());
        frame.staging.copy_to_texture(&mut encoder, &frame.texture);
        fence.signal(queue.submit(std::iter::once(encoder.finish())));
        fence.wait(device).unwrap();
    }

    // ── frame resources ───────────────────────────────────────────────────

    #[test]
    fn oversized_frame_is_rejected_before_allocation() {
        let Some((device, _queue)) = headless_device() else {
            return;
        };
        let max = device.limits().max_texture_dimension_2d;

        let err = FrameTarget::new(&device, FORMAT, max + 1, 16).err();
        assert!(matches!(err, Some(Error::FrameTooLarge { width, height: 16 }) if width == max + 1));

        let err = FrameTarget::new(&device, FORMAT, 16, max + 1).err();
        assert!(matches!(err, Some(Error::FrameTooLarge { .. })));

        assert!(FrameTarget::new(&device, FORMAT, max, 1).is_ok());
    }

    // ── upload ────────────────────────────────────────────────────────────

    #[test]
    fn padded_upload_reaches_the_frame_texture_unchanged() {
        let Some((device, queue)) = headless_device() else {
            return;
        };
        // 37 pixels = 148 bytes per row, padded to 256 in staging.
        let (w, h) = (37u32, 5u32);
        let frame = FrameTarget::new(&device, FORMAT, w, h).unwrap();
        assert_ne!(
            frame.staging.layout().padded_bytes_per_row,
            frame.staging.layout().unpadded_bytes_per_row
        );

        let mut fence = Fence::new();
        let first: Vec<u8> = (0..w * h * 4).map(|i| (i % 251) as u8).collect();
        upload(&device, &queue, &mut fence, &frame, &first);
        assert_eq!(read_texture(&device, &queue, &frame.texture), first);

        // The staging buffer is remapped for the next frame.
        let second: Vec<u8> = first.iter().map(|b| b.wrapping_mul(3)).collect();
        upload(&device, &queue, &mut fence, &frame, &second);
        assert_eq!(read_texture(&device, &queue, &frame.texture), second);

        assert_eq!(fence.value(), 2);
        assert_eq!(fence.completed(), 2);
    }
}
