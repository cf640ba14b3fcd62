use anyhow::{Context, Result};
use mode13_demos::{controls, gradient};
use mode13_engine::logging::{init_logging, LoggingConfig};
use mode13_engine::{Presenter, PresenterConfig};

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 768;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut presenter = Presenter::new(PresenterConfig {
        width: WIDTH,
        height: HEIGHT,
        app_name: "mode13 demo - gradient".into(),
        ..Default::default()
    })
    .context("could not initialize the presenter")?;

    let mut frame: u32 = 0;
    while presenter.advance().is_continue() && !controls::quit_requested(presenter.input()) {
        controls::apply(&mut presenter);

        let width = presenter.width();
        gradient::fill(presenter.pixels_mut(), width, frame);
        frame = frame.wrapping_add(1);
    }

    presenter.shutdown();
    Ok(())
}
