//! Keyboard input handling
//!
//! Key events arrive asynchronously; they only flip flags here. The game
//! loop snapshots the flags once per frame with [`InputState::take_tick_input`].

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left arrow held
    pub left: bool,
    /// Right arrow held
    pub right: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
}

/// What a key means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Left,
    Right,
    Pause,
    Mute,
    Ignored,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn key_action(key: &str) -> KeyAction {
    match key {
        "ArrowLeft" | "Left" => KeyAction::Left,
        "ArrowRight" | "Right" => KeyAction::Right,
        "Escape" => KeyAction::Pause,
        "m" | "M" => KeyAction::Mute,
        _ => KeyAction::Ignored,
    }
}

/// Start is only allowed once a non-blank name has been entered
pub fn name_is_valid(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Held-key state shared between event handlers and the loop
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    pause_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key down event; returns the action so callers can handle
    /// non-gameplay keys (mute) themselves
    pub fn key_down(&mut self, key: &str, repeat: bool) -> KeyAction {
        let action = key_action(key);
        match action {
            KeyAction::Left => self.left = true,
            KeyAction::Right => self.right = true,
            // Auto-repeat must not flip pause back and forth
            KeyAction::Pause if !repeat => self.pause_pending = true,
            _ => {}
        }
        action
    }

    /// Handle key up event
    pub fn key_up(&mut self, key: &str) {
        match key_action(key) {
            KeyAction::Left => self.left = false,
            KeyAction::Right => self.right = false,
            _ => {}
        }
    }

    /// Drop held keys (window blur swallows the key-up events)
    pub fn release_all(&mut self) {
        self.left = false;
        self.right = false;
    }

    /// Hold whichever arrow moves `current_x` toward `target_x`.
    /// Within `dead_zone` both arrows are released.
    pub fn steer_toward(&mut self, current_x: f32, target_x: f32, dead_zone: f32) {
        let delta = target_x - current_x;
        self.right = delta > dead_zone;
        self.left = delta < -dead_zone;
    }

    /// Snapshot for this frame; the pause toggle is consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            pause: self.pause_pending,
        };
        self.pause_pending = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action("ArrowLeft"), KeyAction::Left);
        assert_eq!(key_action("Left"), KeyAction::Left);
        assert_eq!(key_action("ArrowRight"), KeyAction::Right);
        assert_eq!(key_action("Escape"), KeyAction::Pause);
        assert_eq!(key_action("M"), KeyAction::Mute);
        assert_eq!(key_action("a"), KeyAction::Ignored);
        // Escape is the only pause key
        assert_eq!(key_action("p"), KeyAction::Ignored);
        assert_eq!(key_action("P"), KeyAction::Ignored);
    }

    #[test]
    fn test_held_keys_persist_until_released() {
        let mut input = InputState::new();
        input.key_down("ArrowRight", false);
        assert!(input.take_tick_input().right);
        assert!(input.take_tick_input().right);
        input.key_up("ArrowRight");
        assert!(!input.take_tick_input().right);
    }

    #[test]
    fn test_pause_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down("Escape", false);
        input.key_down("Escape", true);
        assert!(input.take_tick_input().pause);
        assert!(!input.take_tick_input().pause);
    }

    #[test]
    fn test_release_all() {
        let mut input = InputState::new();
        input.key_down("ArrowLeft", false);
        input.key_down("ArrowRight", false);
        input.release_all();
        let tick = input.take_tick_input();
        assert!(!tick.left && !tick.right);
        // Losing focus never toggles pause
        assert!(!tick.pause);
    }

    #[test]
    fn test_steer_toward() {
        let mut input = InputState::new();
        input.steer_toward(100.0, 300.0, 5.0);
        assert_eq!(input.take_tick_input(), TickInput { left: false, right: true, pause: false });
        input.steer_toward(300.0, 100.0, 5.0);
        assert!(input.take_tick_input().left);
        input.steer_toward(100.0, 103.0, 5.0);
        let tick = input.take_tick_input();
        assert!(!tick.left && !tick.right);
    }

    #[test]
    fn test_name_validation() {
        assert!(!name_is_valid(""));
        assert!(!name_is_valid("   "));
        assert!(name_is_valid(" ann "));
    }
}
