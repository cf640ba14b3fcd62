//! Surface policies: format, alpha, present mode and upload path selection.
//!
//! Kept free of live GPU objects so the decisions can be unit-tested.

use wgpu::{PresentMode, TextureFormat, TextureUsages};

/// Picks the swap target format.
///
/// Byte-order-matching formats come first so the frame texture can be copied
/// straight into the swap target; anything else goes through the blit.
pub(crate) fn choose_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    const PREFERRED: [TextureFormat; 2] = [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];

    PREFERRED
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| {
            supported
                .contains(&wgpu::CompositeAlphaMode::Opaque)
                .then_some(wgpu::CompositeAlphaMode::Opaque)
        })
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Tearing is available when the surface can present without waiting for vblank.
pub(crate) fn tearing_supported(modes: &[PresentMode]) -> bool {
    modes.contains(&PresentMode::Immediate)
}

/// Vsync presents on vblank. Without it: immediate when tearing is allowed,
/// then mailbox, then plain FIFO (always available).
pub(crate) fn choose_present_mode(modes: &[PresentMode], vsync: bool) -> PresentMode {
    if vsync {
        return PresentMode::Fifo;
    }

    [PresentMode::Immediate, PresentMode::Mailbox]
        .into_iter()
        .find(|m| modes.contains(m))
        .unwrap_or(PresentMode::Fifo)
}

/// Texture format holding the uploaded frame.
///
/// Matches the surface's sRGB-ness so sampling and writing cancel out and the
/// caller's bytes reach the screen unchanged.
pub(crate) fn frame_texture_format(surface_format: TextureFormat) -> TextureFormat {
    if surface_format.is_srgb() {
        TextureFormat::Rgba8UnormSrgb
    } else {
        TextureFormat::Rgba8Unorm
    }
}

/// How the frame texture reaches the swap target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UploadPath {
    /// Texture-to-texture copy; no shader involved.
    Copy,
    /// Full-screen triangle sampling the frame texture (scales as needed).
    Blit,
}

/// Surface-side state that decides the upload path.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) struct TargetDesc {
    pub usage: TextureUsages,
    pub format: TextureFormat,
    pub size: (u32, u32),
}

pub(crate) fn choose_upload_path(
    target: TargetDesc,
    frame_format: TextureFormat,
    frame_size: (u32, u32),
) -> UploadPath {
    if target.usage.contains(TextureUsages::COPY_DST)
        && target.format == frame_format
        && target.size == frame_size
    {
        UploadPath::Copy
    } else {
        UploadPath::Blit
    }
}

/// Usage flags for the configured surface: always a render attachment, plus
/// copy destination when the platform allows it.
pub(crate) fn surface_usage(supported: TextureUsages) -> TextureUsages {
    TextureUsages::RENDER_ATTACHMENT | (supported & TextureUsages::COPY_DST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::CompositeAlphaMode;

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_prefers_rgba_then_bgra() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm, TextureFormat::Rgba8Unorm];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Rgba8Unorm));

        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn format_falls_back_to_first_or_none() {
        let formats = [TextureFormat::Rgb10a2Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Rgb10a2Unorm));
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn frame_texture_follows_srgb_ness() {
        assert_eq!(frame_texture_format(TextureFormat::Bgra8UnormSrgb), TextureFormat::Rgba8UnormSrgb);
        assert_eq!(frame_texture_format(TextureFormat::Bgra8Unorm), TextureFormat::Rgba8Unorm);
        assert_eq!(frame_texture_format(TextureFormat::Rgba8Unorm), TextureFormat::Rgba8Unorm);
    }

    #[test]
    fn alpha_prefers_request_then_opaque() {
        let supported = [CompositeAlphaMode::PreMultiplied, CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── present mode ──────────────────────────────────────────────────────

    #[test]
    fn vsync_always_uses_fifo() {
        let modes = [PresentMode::Immediate, PresentMode::Mailbox, PresentMode::Fifo];
        assert_eq!(choose_present_mode(&modes, true), PresentMode::Fifo);
    }

    #[test]
    fn no_vsync_prefers_immediate_then_mailbox() {
        let all = [PresentMode::Fifo, PresentMode::Mailbox, PresentMode::Immediate];
        assert_eq!(choose_present_mode(&all, false), PresentMode::Immediate);

        let no_tearing = [PresentMode::Fifo, PresentMode::Mailbox];
        assert_eq!(choose_present_mode(&no_tearing, false), PresentMode::Mailbox);

        assert_eq!(choose_present_mode(&[PresentMode::Fifo], false), PresentMode::Fifo);
    }

    #[test]
    fn tearing_requires_immediate() {
        assert!(tearing_supported(&[PresentMode::Fifo, PresentMode::Immediate]));
        assert!(!tearing_supported(&[PresentMode::Fifo, PresentMode::Mailbox]));
    }

    // ── upload path ───────────────────────────────────────────────────────

    fn target(usage: TextureUsages, format: TextureFormat, size: (u32, u32)) -> TargetDesc {
        TargetDesc { usage, format, size }
    }

    #[test]
    fn copy_when_usage_format_and_size_match() {
        let usage = surface_usage(TextureUsages::all());
        let t = target(usage, TextureFormat::Rgba8Unorm, (320, 200));
        assert_eq!(choose_upload_path(t, TextureFormat::Rgba8Unorm, (320, 200)), UploadPath::Copy);
    }

    #[test]
    fn blit_on_any_mismatch() {
        let usage = surface_usage(TextureUsages::all());
        let t = target(usage, TextureFormat::Bgra8Unorm, (320, 200));
        assert_eq!(choose_upload_path(t, TextureFormat::Rgba8Unorm, (320, 200)), UploadPath::Blit);

        let t = target(usage, TextureFormat::Rgba8Unorm, (640, 400));
        assert_eq!(choose_upload_path(t, TextureFormat::Rgba8Unorm, (320, 200)), UploadPath::Blit);

        let t = target(TextureUsages::RENDER_ATTACHMENT, TextureFormat::Rgba8Unorm, (320, 200));
        assert_eq!(choose_upload_path(t, TextureFormat::Rgba8Unorm, (320, 200)), UploadPath::Blit);
    }

    #[test]
    fn surface_usage_only_adds_supported_copy_dst() {
        assert_eq!(
            surface_usage(TextureUsages::RENDER_ATTACHMENT),
            TextureUsages::RENDER_ATTACHMENT
        );
        assert!(surface_usage(TextureUsages::RENDER_ATTACHMENT | TextureUsages::COPY_DST)
            .contains(TextureUsages::COPY_DST));
    }
}
