use sdl2::{
    event::{Event, WindowEvent},
    keyboard::Keycode,
};

/// Something the main loop has to act on after the events of a frame were processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAction {
    Quit,
    Resize(i32, i32),
    ToggleWireframe,
}

/// Collects window and keyboard events into per-frame actions.
#[derive(Default, Debug)]
pub struct InputState {
    actions: Vec<FrameAction>,
}

impl InputState {
    /// Forgets the previous frame's actions.
    pub fn begin_frame(&mut self) {
        self.actions.clear();
    }

    /// Folds a single event into the state.
    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Quit { .. } => self.actions.push(FrameAction::Quit),
            Event::Window {
                win_event: WindowEvent::SizeChanged(width, height),
                ..
            } => self.actions.push(FrameAction::Resize(*width, *height)),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => {
                if *keycode == Keycode::Escape {
                    self.actions.push(FrameAction::Quit);
                } else if *keycode == Keycode::Tab {
                    self.actions.push(FrameAction::ToggleWireframe);
                }
            }
            _ => {}
        }
    }

    /// Returns the actions gathered this frame, in arrival order.
    pub fn actions(&self) -> &[FrameAction] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::Mod;

    use super::*;

    fn key_down(keycode: Keycode, repeat: bool) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat,
        }
    }

    fn key_up(keycode: Keycode) -> Event {
        Event::KeyUp {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn test_escape_quits() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::Escape, false));
        assert_eq!(input.actions(), &[FrameAction::Quit]);
    }

    #[test]
    fn test_window_close_quits() {
        let mut input = InputState::default();
        input.handle_event(&Event::Quit { timestamp: 0 });
        assert_eq!(input.actions(), &[FrameAction::Quit]);
    }

    #[test]
    fn test_resize_is_reported() {
        let mut input = InputState::default();
        input.handle_event(&Event::Window {
            timestamp: 0,
            window_id: 1,
            win_event: WindowEvent::SizeChanged(1024, 768),
        });
        assert_eq!(input.actions(), &[FrameAction::Resize(1024, 768)]);
    }

    #[test]
    fn test_repeated_keydown_is_ignored() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::Tab, false));
        input.handle_event(&key_down(Keycode::Tab, true));
        assert_eq!(input.actions(), &[FrameAction::ToggleWireframe]);
    }

    #[test]
    fn test_begin_frame_clears_actions() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::Tab, false));
        input.begin_frame();
        assert!(input.actions().is_empty());
    }

    #[test]
    fn test_other_keys_produce_no_actions() {
        let mut input = InputState::default();
        input.handle_event(&key_down(Keycode::A, false));
        input.handle_event(&key_up(Keycode::Escape));
        assert!(input.actions().is_empty());
    }
}
