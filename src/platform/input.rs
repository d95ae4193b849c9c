//! Keyboard → simulation command mapping
//!
//! Only digits 0-5 select a level; the other digit keys are ignored.

use winit::keyboard::KeyCode;

use crate::sim::Command;

/// Map a pressed key to a command. Unmapped keys yield `None`.
pub fn command_for_key(key: KeyCode) -> Option<Command> {
    let command = match key {
        KeyCode::Escape => Command::Quit,
        KeyCode::Space | KeyCode::Enter | KeyCode::NumpadEnter => Command::NextLevel,
        KeyCode::Digit0 | KeyCode::Numpad0 => Command::SelectLevel(0),
        KeyCode::Digit1 | KeyCode::Numpad1 => Command::SelectLevel(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Command::SelectLevel(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Command::SelectLevel(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Command::SelectLevel(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Command::SelectLevel(5),
        _ => return None,
    };
    Some(command)
}
