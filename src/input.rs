use crate::options::Options;
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// What an input event means to the showcase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Command {
    /// Advance the virtual scroll offset by this many rows (negative = up).
    ScrollBy(f32),
    PointerMoved(u16, u16),
    Resized(u16, u16),
    Quit,
}

/// Translate a crossterm event into a showcase command. Events with no
/// mapping (mouse buttons, other keys) are ignored.
pub(crate) fn map_event(event: &Event, options: &Options) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollBy(options.key_rows)),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollBy(-options.key_rows)),
            KeyCode::PageDown => Some(Command::ScrollBy(options.page_rows)),
            KeyCode::PageUp => Some(Command::ScrollBy(-options.page_rows)),
            _ => None,
        },
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(Command::ScrollBy(options.wheel_rows)),
            MouseEventKind::ScrollUp => Some(Command::ScrollBy(-options.wheel_rows)),
            MouseEventKind::Moved => Some(Command::PointerMoved(mouse.column, mouse.row)),
            _ => None,
        },
        Event::Resize(columns, rows) => Some(Command::Resized(*columns, *rows)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn test_quit_keys() {
        let options = Options::default();
        assert_eq!(map_event(&key(KeyCode::Char('q')), &options), Some(Command::Quit));
        assert_eq!(map_event(&key(KeyCode::Esc), &options), Some(Command::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c, &options), Some(Command::Quit));
    }

    #[test]
    fn test_scroll_keys_use_configured_deltas() {
        let mut options = Options::default();
        options.key_rows = 7.0;
        assert_eq!(map_event(&key(KeyCode::Down), &options), Some(Command::ScrollBy(7.0)));
        assert_eq!(map_event(&key(KeyCode::Up), &options), Some(Command::ScrollBy(-7.0)));
    }

    #[test]
    fn test_wheel_maps_to_scroll() {
        let options = Options::default();
        assert_eq!(
            map_event(&mouse(MouseEventKind::ScrollDown, 0, 0), &options),
            Some(Command::ScrollBy(options.wheel_rows))
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::ScrollUp, 0, 0), &options),
            Some(Command::ScrollBy(-options.wheel_rows))
        );
    }

    #[test]
    fn test_pointer_move_carries_position() {
        let options = Options::default();
        assert_eq!(
            map_event(&mouse(MouseEventKind::Moved, 12, 7), &options),
            Some(Command::PointerMoved(12, 7))
        );
    }

    #[test]
    fn test_unmapped_events_are_ignored() {
        let options = Options::default();
        assert_eq!(map_event(&key(KeyCode::Char('x')), &options), None);
    }
}
