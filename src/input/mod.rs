use std::collections::{HashSet, HashMap};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;
pub use winit::event::MouseButton;

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    Mouse(MouseButton),
}

/// Raw hardware state for a single frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub mouse_held: HashSet<MouseButton>,
    pub mouse_pressed: HashSet<MouseButton>,
    pub mouse_released: HashSet<MouseButton>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key going down. Repeats while held do not count as presses.
    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        if self.keys_held.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub fn press_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release_mouse(&mut self, button: MouseButton) {
        if self.mouse_held.remove(&button) {
            self.mouse_released.insert(button);
        }
    }

    /// Forget this frame's edges; held state carries over.
    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_mouse_held(&self, button: MouseButton) -> bool { self.mouse_held.contains(&button) }
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool { self.mouse_pressed.contains(&button) }
    pub fn is_mouse_released(&self, button: MouseButton) -> bool { self.mouse_released.contains(&button) }
}

/// Maps logical actions to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::Mouse(b) => input.is_mouse_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::Mouse(b) => input.is_mouse_held(*b),
            })
        })
    }

    /// Returns true if any bound source was released this frame.
    pub fn is_released(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_released(*k),
                InputSource::Mouse(b) => input.is_mouse_released(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Interact,
    Pause,
    MenuUp,
    MenuDown,
    Confirm,
    PrevScene,
    NextScene,
}

/// Default keyboard and mouse layout.
pub fn default_bindings() -> ActionMap<GameAction> {
    use GameAction::*;
    let mut map = ActionMap::new();
    map.bind(MoveLeft, InputSource::Key(KeyCode::ArrowLeft));
    map.bind(MoveRight, InputSource::Key(KeyCode::ArrowRight));
    map.bind(Jump, InputSource::Key(KeyCode::Space));
    map.bind(Attack, InputSource::Key(KeyCode::KeyZ));
    map.bind(Attack, InputSource::Mouse(MouseButton::Left));
    map.bind(Interact, InputSource::Key(KeyCode::KeyE));
    map.bind(Pause, InputSource::Key(KeyCode::Escape));
    map.bind(MenuUp, InputSource::Key(KeyCode::ArrowUp));
    map.bind(MenuDown, InputSource::Key(KeyCode::ArrowDown));
    map.bind(Confirm, InputSource::Key(KeyCode::Enter));
    map.bind(PrevScene, InputSource::Key(KeyCode::PageUp));
    map.bind(NextScene, InputSource::Key(KeyCode::PageDown));
    map
}

/// One frame's worth of intents, independent of devices.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    pub interact: bool,
    pub pause: bool,
    pub menu_up: bool,
    pub menu_down: bool,
    pub confirm: bool,
    /// Debug scene cycling: -1, 0 or +1.
    pub cycle_scene: i32,
}

impl FrameInput {
    /// Sample `input` through `map`.
    pub fn from_state(map: &ActionMap<GameAction>, input: &InputState) -> Self {
        use GameAction::*;
        let cycle_scene = map.is_pressed(NextScene, input) as i32 - map.is_pressed(PrevScene, input) as i32;
        Self {
            move_left: map.is_held(MoveLeft, input),
            move_right: map.is_held(MoveRight, input),
            jump: map.is_pressed(Jump, input),
            attack: map.is_pressed(Attack, input),
            interact: map.is_pressed(Interact, input),
            pause: map.is_pressed(Pause, input),
            menu_up: map.is_pressed(MenuUp, input),
            menu_down: map.is_pressed(MenuDown, input),
            confirm: map.is_pressed(Confirm, input),
            cycle_scene,
        }
    }

    /// Net horizontal direction: -1, 0 or 1.
    pub fn move_x(&self) -> f32 {
        self.move_right as i32 as f32 - self.move_left as i32 as f32
    }
}
