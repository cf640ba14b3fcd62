/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; presentation resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); stop presenting.
    Fatal,
}

impl SurfaceErrorAction {
    /// Classifies an acquire error. Reconfiguration itself is the caller's job.
    pub fn for_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(SurfaceErrorAction::for_error(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(SurfaceErrorAction::for_error(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(SurfaceErrorAction::for_error(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::for_error(&E::Other), SurfaceErrorAction::SkipFrame);
        assert_eq!(SurfaceErrorAction::for_error(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
