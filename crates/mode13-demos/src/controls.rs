//! Keys shared by every demo.
//!
//! `V` toggles vsync, `F` toggles fullscreen, `S` writes `screenshot.png`,
//! `Esc` quits.

use mode13_engine::{InputState, Presenter, VirtualKey};

use crate::screenshot;

pub const SCREENSHOT_PATH: &str = "screenshot.png";

const KEY_VSYNC: char = 'V';
const KEY_FULLSCREEN: char = 'F';
const KEY_SCREENSHOT: char = 'S';

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Command {
    ToggleVsync,
    ToggleFullscreen,
    Screenshot,
}

fn pressed(input: &InputState, c: char) -> bool {
    VirtualKey::from_char(c).is_some_and(|k| input.key_pressed(k))
}

/// Commands whose key went down this frame, in a fixed order.
pub fn commands(input: &InputState) -> Vec<Command> {
    [
        (KEY_VSYNC, Command::ToggleVsync),
        (KEY_FULLSCREEN, Command::ToggleFullscreen),
        (KEY_SCREENSHOT, Command::Screenshot),
    ]
    .into_iter()
    .filter(|&(c, _)| pressed(input, c))
    .map(|(_, cmd)| cmd)
    .collect()
}

/// Applies this frame's commands. Screenshot failures are logged, not fatal.
pub fn apply(presenter: &mut Presenter) {
    for cmd in commands(presenter.input()) {
        match cmd {
            Command::ToggleVsync => {
                let vsync = !presenter.vsync();
                presenter.set_vsync(vsync);
                log::info!("vsync {}", if vsync { "on" } else { "off" });
            }
            Command::ToggleFullscreen => {
                let fullscreen = !presenter.fullscreen();
                presenter.set_fullscreen(fullscreen);
            }
            Command::Screenshot => {
                let (w, h) = (presenter.width(), presenter.height());
                if let Err(e) = screenshot::save_png(SCREENSHOT_PATH, w, h, presenter.pixels()) {
                    log::warn!("screenshot failed: {e:#}");
                }
            }
        }
    }
}

/// `Esc` is held.
pub fn quit_requested(input: &InputState) -> bool {
    input.key(VirtualKey::ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mode13_engine::input::{ButtonState, InputEvent};

    fn press(input: &mut InputState, c: char) {
        input.apply_event(InputEvent::Key {
            key: VirtualKey::from_char(c).unwrap(),
            state: ButtonState::Pressed,
        });
    }

    #[test]
    fn commands_fire_on_the_press_edge_only() {
        let mut input = InputState::default();
        input.begin_frame();
        press(&mut input, 'f');
        press(&mut input, 'V');
        assert_eq!(commands(&input), vec![Command::ToggleVsync, Command::ToggleFullscreen]);

        input.begin_frame();
        assert!(commands(&input).is_empty());
    }

    #[test]
    fn escape_requests_quit_while_held() {
        let mut input = InputState::default();
        assert!(!quit_requested(&input));
        input.apply_event(InputEvent::Key {
            key: VirtualKey::ESCAPE,
            state: ButtonState::Pressed,
        });
        input.begin_frame();
        assert!(quit_requested(&input));
    }
}
