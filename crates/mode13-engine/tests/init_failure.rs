//! Initialization failure with no GPU backends enabled.
//!
//! Kept in its own test binary: a failed init still consumes the process's
//! single winit event loop.

use mode13_engine::{GpuInit, Presenter, PresenterConfig};

#[test]
#[ignore = "needs a display"]
fn no_backends_fails_cleanly() {
    let config = PresenterConfig {
        width: 320,
        height: 200,
        any_thread: true,
        gpu: GpuInit {
            backends: wgpu::Backends::empty(),
            ..Default::default()
        },
        ..Default::default()
    };

    let err = Presenter::new(config).err().expect("init must fail without backends");
    assert!(err.is_initialization(), "unexpected error: {err}");
}

#[test]
fn zero_size_is_rejected_before_touching_the_platform() {
    let err = Presenter::new(PresenterConfig {
        width: 0,
        ..Default::default()
    })
    .err()
    .expect("zero width must fail");
    assert!(matches!(err, mode13_engine::Error::InvalidSize { width: 0, height: 768 }));
}
