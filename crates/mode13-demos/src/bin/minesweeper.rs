use anyhow::{Context, Result};
use mode13_demos::board::{Board, GameResult};
use mode13_demos::controls;
use mode13_engine::logging::{init_logging, LoggingConfig};
use mode13_engine::{MouseButton, Presenter, PresenterConfig, VirtualKey};

const WIDTH: u32 = 768;
const HEIGHT: u32 = 768;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut presenter = Presenter::new(PresenterConfig {
        width: WIDTH,
        height: HEIGHT,
        app_name: "mode13 demo - minesweeper".into(),
        ..Default::default()
    })
    .context("could not initialize the presenter")?;

    let mut rng = rand::rng();
    let mut board = Board::new(&mut rng);
    let mut dirty = true;
    let mut last_result = GameResult::Undecided;

    while presenter.advance().is_continue() && !controls::quit_requested(presenter.input()) {
        controls::apply(&mut presenter);

        let (w, h) = (presenter.width(), presenter.height());

        if presenter.key_pressed(VirtualKey::SPACE) {
            board = Board::new(&mut rng);
            dirty = true;
        }

        let result = board.result();
        if result == GameResult::Undecided {
            let cell = Board::cell_at(presenter.mouse_position(), w, h);
            if let Some((x, y)) = cell.filter(|_| presenter.mouse_button_pressed(MouseButton::Left)) {
                board.reveal(x, y);
                dirty = true;
            }
            if let Some((x, y)) = cell.filter(|_| presenter.mouse_button_pressed(MouseButton::Right)) {
                board.toggle_flag(x, y);
                dirty = true;
            }
        }

        if result != last_result {
            log::info!("game result: {result:?}");
            last_result = result;
            dirty = true;
        }

        if dirty {
            dirty = false;
            board.draw(presenter.pixels_mut(), w, h);
        }
    }

    presenter.shutdown();
    Ok(())
}
