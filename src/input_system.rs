//! Input Routing
//!
//! Translates host input primitives into the abstract [`MenuInput`] commands the
//! [`MenuController`](crate::MenuController) understands. The mapping is fixed:
//!
//! | Key / event | Command |
//! |-------------|---------|
//! | Escape      | Close   |
//! | Enter       | Accept  |
//! | Arrow keys  | Up / Down / Left / Right |
//! | Window quit | Quit    |

use std::collections::HashSet;

use tracing::trace;

/// Keys the menu system cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Up,
    Down,
    Left,
    Right,
    /// Any key without a menu meaning
    Other,
}

/// Raw input delivered by the host once per frame, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// `repeat` marks OS auto-repeat of a key that is already held
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key },
    Quit,
}

impl InputEvent {
    /// Fresh (non-repeat) key press
    pub fn press(key: Key) -> Self {
        InputEvent::KeyDown { key, repeat: false }
    }
}

/// Navigation commands consumed by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuInput {
    Up,
    Down,
    Left,
    Right,
    Accept,
    Close,
    Quit,
}

/// EventRouter turns raw key events into [`MenuInput`]s
///
/// Every physical press fires exactly once: a second `KeyDown` for a key that
/// has not been released is dropped, and OS auto-repeat is dropped unless key
/// repeat was enabled. Routing never blocks.
#[derive(Debug, Clone, Default)]
pub struct EventRouter {
    held: HashSet<Key>,
    key_repeat: bool,
}

impl EventRouter {
    pub fn new() -> Self {
        EventRouter::default()
    }

    /// Lets auto-repeat events of held keys through
    pub fn with_key_repeat(mut self, key_repeat: bool) -> Self {
        self.key_repeat = key_repeat;
        self
    }

    /// Fixed key binding
    pub fn map_key(key: Key) -> Option<MenuInput> {
        match key {
            Key::Escape => Some(MenuInput::Close),
            Key::Enter => Some(MenuInput::Accept),
            Key::Up => Some(MenuInput::Up),
            Key::Down => Some(MenuInput::Down),
            Key::Left => Some(MenuInput::Left),
            Key::Right => Some(MenuInput::Right),
            Key::Other => None,
        }
    }

    /// Routes one event; `None` when it carries no menu command
    pub fn route(&mut self, event: InputEvent) -> Option<MenuInput> {
        match event {
            InputEvent::Quit => Some(MenuInput::Quit),
            InputEvent::KeyUp { key } => {
                self.held.remove(&key);
                None
            }
            InputEvent::KeyDown { key, repeat } => {
                let fresh = self.held.insert(key);
                let allowed = if repeat { self.key_repeat } else { fresh };
                if !allowed {
                    trace!(?key, repeat, "dropped repeated key press");
                    return None;
                }
                Self::map_key(key)
            }
        }
    }

    /// Routes a frame's events, keeping their order
    pub fn route_all<I>(&mut self, events: I) -> Vec<MenuInput>
    where
        I: IntoIterator<Item = InputEvent>,
    {
        events
            .into_iter()
            .filter_map(|event| self.route(event))
            .collect()
    }

    /// Forgets held keys, e.g. after the window lost focus
    pub fn reset(&mut self) {
        self.held.clear();
    }
}

#[cfg(feature = "sdl")]
mod sdl_events {
    use super::{InputEvent, Key};
    use sdl2::EventPump;
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;

    impl From<Keycode> for Key {
        fn from(keycode: Keycode) -> Self {
            match keycode {
                Keycode::Escape => Key::Escape,
                Keycode::Return | Keycode::KpEnter => Key::Enter,
                Keycode::Up => Key::Up,
                Keycode::Down => Key::Down,
                Keycode::Left => Key::Left,
                Keycode::Right => Key::Right,
                _ => Key::Other,
            }
        }
    }

    /// Translates a single SDL2 event, ignoring event types menus never use
    pub fn translate(event: &Event) -> Option<InputEvent> {
        match event {
            Event::Quit { .. } => Some(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(keycode),
                repeat,
                ..
            } => Some(InputEvent::KeyDown {
                key: Key::from(*keycode),
                repeat: *repeat,
            }),
            Event::KeyUp {
                keycode: Some(keycode),
                ..
            } => Some(InputEvent::KeyUp {
                key: Key::from(*keycode),
            }),
            _ => None,
        }
    }

    /// Drains every pending SDL2 event for this frame
    pub fn poll_events(event_pump: &mut EventPump) -> Vec<InputEvent> {
        event_pump.poll_iter().filter_map(|event| translate(&event)).collect()
    }
}

#[cfg(feature = "sdl")]
pub use sdl_events::{poll_events, translate};
