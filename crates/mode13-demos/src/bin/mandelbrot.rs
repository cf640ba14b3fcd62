use anyhow::{Context, Result};
use mode13_demos::controls;
use mode13_demos::fractal::{self, Camera};
use mode13_engine::logging::{init_logging, LoggingConfig};
use mode13_engine::{MouseButton, Presenter, PresenterConfig, VirtualKey};

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut presenter = Presenter::new(PresenterConfig {
        width: WIDTH,
        height: HEIGHT,
        app_name: "mode13 demo - mandelbrot".into(),
        ..Default::default()
    })
    .context("could not initialize the presenter")?;

    let mut camera = Camera::default();
    let mut dirty = true;

    while presenter.advance().is_continue() && !controls::quit_requested(presenter.input()) {
        controls::apply(&mut presenter);

        let (w, h) = (presenter.width(), presenter.height());
        let mouse = presenter.mouse_position();

        if presenter.key_pressed(VirtualKey::SPACE) {
            camera.reset();
            dirty = true;
        }
        if presenter.mouse_button_pressed(MouseButton::Left) {
            camera.zoom_in(mouse, w, h);
            dirty = true;
        }
        if presenter.mouse_button_pressed(MouseButton::Right) {
            camera.zoom_out(mouse, w, h);
            dirty = true;
        }

        if dirty {
            dirty = false;
            fractal::render(presenter.pixels_mut(), w, h, &camera);
            log::debug!(
                "rendered view at ({}, {}) height {}",
                camera.center_x,
                camera.center_y,
                camera.height
            );
        }
    }

    presenter.shutdown();
    Ok(())
}
