use std::collections::HashSet;

use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    RotateLeft,
    RotateRight,
    Sprint,
    Quit,
}

/// Anything that can answer "is this action held right now?".
pub trait InputSource {
    fn is_held(&self, action: Action) -> bool;
}

/// The movement-relevant actions, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Input {
    pub forth: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub sprint: bool,
}

impl Input {
    pub fn sample(source: &impl InputSource) -> Self {
        Input {
            forth: source.is_held(Action::Forward),
            back: source.is_held(Action::Backward),
            left: source.is_held(Action::StrafeLeft),
            right: source.is_held(Action::StrafeRight),
            turn_left: source.is_held(Action::RotateLeft),
            turn_right: source.is_held(Action::RotateRight),
            sprint: source.is_held(Action::Sprint),
        }
    }
}

/// Key bindings on top of winit's keyboard state.
pub struct Keyboard<'a> {
    helper: &'a WinitInputHelper,
}

impl<'a> Keyboard<'a> {
    pub fn new(helper: &'a WinitInputHelper) -> Self {
        Keyboard { helper }
    }

    fn keys(action: Action) -> &'static [KeyCode] {
        match action {
            Action::Forward => &[KeyCode::KeyW, KeyCode::ArrowUp],
            Action::Backward => &[KeyCode::KeyS, KeyCode::ArrowDown],
            Action::StrafeLeft => &[KeyCode::KeyA],
            Action::StrafeRight => &[KeyCode::KeyD],
            Action::RotateLeft => &[KeyCode::ArrowLeft],
            Action::RotateRight => &[KeyCode::ArrowRight],
            Action::Sprint => &[KeyCode::ShiftLeft, KeyCode::ShiftRight],
            Action::Quit => &[KeyCode::Escape],
        }
    }
}

impl InputSource for Keyboard<'_> {
    fn is_held(&self, action: Action) -> bool {
        if action == Action::Quit && self.helper.close_requested() {
            return true;
        }
        Self::keys(action).iter().any(|&key| self.helper.key_held(key))
    }
}

/// A fixed set of held actions, for replays and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    held: HashSet<Action>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(actions: &[Action]) -> Self {
        ScriptedInput {
            held: actions.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }
}

impl InputSource for ScriptedInput {
    fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }
}
