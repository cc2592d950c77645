use glam::Vec2;
use winit::{
    event::{ElementState, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::input::{Direction, HeldDirections, InputSnapshot, SpeedCommand};

/// Turns window events into the per-tick input consumed by orbiting sprites.
///
/// Held directions persist between snapshots. Clicks, speed changes and the
/// marker toggle are one-shot and are cleared each time a snapshot is taken.
#[derive(Default)]
pub struct OrbitInputController {
    held: HeldDirections,
    /// Last known cursor position in canvas coordinates, or `None` when the
    /// cursor is outside the canvas.
    cursor: Option<Vec2>,
    relocate_pivot: Option<Vec2>,
    speed_commands: Vec<SpeedCommand>,
    toggle_pivot_markers: bool,
}

impl OrbitInputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates controller state with the given input event. Returns `true` if
    /// the event was used.
    pub fn process_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event: keyboard_input_event,
                ..
            } => {
                let PhysicalKey::Code(key_code) = keyboard_input_event.physical_key else {
                    return false;
                };

                self.process_key(
                    key_code,
                    keyboard_input_event.state == ElementState::Pressed,
                    keyboard_input_event.repeat,
                )
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: ElementState::Pressed,
                ..
            } => match self.cursor {
                Some(cursor) => {
                    self.relocate_pivot = Some(cursor);
                    true
                }
                None => false,
            },
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                false
            }
            WindowEvent::Focused(false) => {
                // Key releases are lost when the window loses focus.
                self.held = HeldDirections::default();
                false
            }
            _ => false,
        }
    }

    /// Updates controller state for a physical key changing state. Returns
    /// `true` if the key is bound.
    pub(crate) fn process_key(
        &mut self,
        key_code: KeyCode,
        is_pressed: bool,
        repeat: bool,
    ) -> bool {
        if let Some(direction) = direction_for_key(key_code) {
            self.held.set(direction, is_pressed);
            return true;
        }

        // Everything else only acts on the initial key press.
        if !is_pressed || repeat {
            return false;
        }

        match action_for_key(key_code) {
            Some(KeyAction::Speed(command)) => {
                self.speed_commands.push(command);
                true
            }
            Some(KeyAction::TogglePivotMarkers) => {
                self.toggle_pivot_markers = !self.toggle_pivot_markers;
                true
            }
            None => false,
        }
    }

    /// Record where the cursor is on the canvas.
    pub fn process_cursor(&mut self, canvas_position: Option<Vec2>) {
        self.cursor = canvas_position;
    }

    /// Get the input for the next tick and clear one-shot events.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held,
            relocate_pivot: self.relocate_pivot.take(),
            speed_commands: std::mem::take(&mut self.speed_commands),
            toggle_pivot_markers: std::mem::take(&mut self.toggle_pivot_markers),
        }
    }
}

/// Arrow keys and WASD move the player sprite.
fn direction_for_key(key_code: KeyCode) -> Option<Direction> {
    match key_code {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Direction::Left),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Direction::Right),
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Direction::Up),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Direction::Down),
        _ => None,
    }
}

/// One-shot actions bound to a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum KeyAction {
    Speed(SpeedCommand),
    TogglePivotMarkers,
}

fn action_for_key(key_code: KeyCode) -> Option<KeyAction> {
    match key_code {
        KeyCode::Equal | KeyCode::NumpadAdd => Some(KeyAction::Speed(SpeedCommand::Increase)),
        KeyCode::Minus | KeyCode::NumpadSubtract => Some(KeyAction::Speed(SpeedCommand::Decrease)),
        KeyCode::Digit0 | KeyCode::Numpad0 | KeyCode::Space => {
            Some(KeyAction::Speed(SpeedCommand::Stop))
        }
        KeyCode::KeyM => Some(KeyAction::TogglePivotMarkers),
        _ => None,
    }
}
