//! Double-click interaction mode and two-finger pinch handling.

/// Smallest and largest camera zoom a pinch may produce
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 5.0;

/// Vertical midpoint travel (px) beyond which a two-finger gesture is a scroll
pub const SCROLL_THRESHOLD: f32 = 20.0;

pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 1000.0;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// camera fixed, cosmic elements hidden
    #[default]
    Idle,
    /// camera controls on, cosmic elements visible, animation doubled
    Interactive,
}

impl InteractionMode {
    pub fn is_interactive(self) -> bool {
        self == InteractionMode::Interactive
    }

    /// Multiplier applied to color cycling and glow rotation
    pub fn animation_speed(self) -> f32 {
        match self {
            InteractionMode::Idle => 1.0,
            InteractionMode::Interactive => 2.0,
        }
    }

    /// Multiplier applied to the halo wobble amplitude
    pub fn animation_intensity(self) -> f32 {
        match self {
            InteractionMode::Idle => 1.0,
            InteractionMode::Interactive => 2.0,
        }
    }

    /// Tooltip text announcing that this mode was entered
    pub fn announcement(self) -> &'static str {
        match self {
            InteractionMode::Idle => "ZEN interaction mode disabled",
            InteractionMode::Interactive => "ZEN interaction mode enabled - Explore the cosmos",
        }
    }
}


/// The only state machine in the scene: toggled by double-click, no terminal state
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    toggles: u64,
}

impl InteractionState {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_interactive(&self) -> bool {
        self.mode.is_interactive()
    }

    /// Number of transitions taken so far
    pub fn toggles(&self) -> u64 {
        self.toggles
    }

    /// Flips the mode and returns the new one
    pub fn toggle(&mut self) -> InteractionMode {
        self.mode = match self.mode {
            InteractionMode::Idle => InteractionMode::Interactive,
            InteractionMode::Interactive => InteractionMode::Idle,
        };
        self.toggles += 1;
        self.mode
    }
}


/// A touch point in page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &TouchPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}


#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    None,
    Pinch { initial_distance: f32, initial_zoom: f32, initial_mid_y: f32 },
    Scroll,
}


/// What a touch move did to the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchResponse {
    /// not a two-finger gesture; leave the event alone
    Ignored,
    /// two fingers moved vertically: treated as scrolling, zoom suppressed
    Scroll,
    /// pinch recognised but zoom is disabled outside interactive mode
    Suppressed,
    /// new camera zoom
    Zoom(f32),
}

impl PinchResponse {
    /// Whether the browser's default handling should be prevented
    pub fn consumes_event(&self) -> bool {
        !matches!(self, PinchResponse::Ignored | PinchResponse::Suppressed)
    }
}


/// Tracks one two-finger gesture from start to end
#[derive(Debug, Clone)]
pub struct PinchGesture {
    gesture: Gesture,
}

impl Default for PinchGesture {
    fn default() -> Self {
        Self { gesture: Gesture::None }
    }
}

impl PinchGesture {
    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::None)
    }

    /// Starts a pinch when exactly two fingers are down. Returns true if the event was consumed.
    pub fn touch_start(&mut self, touches: &[TouchPoint], current_zoom: f32) -> bool {
        if let [a, b] = touches {
            let distance = a.distance(b);
            if distance > 0.0 {
                self.gesture = Gesture::Pinch {
                    initial_distance: distance,
                    initial_zoom: current_zoom,
                    initial_mid_y: (a.y + b.y) * 0.5,
                };
            }
            return true;
        }
        false
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint], mode: InteractionMode) -> PinchResponse {
        let [a, b] = touches else {
            return PinchResponse::Ignored;
        };
        match self.gesture {
            Gesture::None => PinchResponse::Ignored,
            Gesture::Scroll => PinchResponse::Scroll,
            Gesture::Pinch { initial_distance, initial_zoom, initial_mid_y } => {
                let mid_y = (a.y + b.y) * 0.5;
                if (mid_y - initial_mid_y).abs() > SCROLL_THRESHOLD {
                    self.gesture = Gesture::Scroll;
                    return PinchResponse::Scroll;
                }
                if !mode.is_interactive() {
                    return PinchResponse::Suppressed;
                }
                let ratio = a.distance(b) / initial_distance;
                PinchResponse::Zoom(clamp_zoom(initial_zoom * ratio))
            }
        }
    }

    /// Ends the gesture once fewer than two fingers remain
    pub fn touch_end(&mut self, remaining_touches: usize) {
        if remaining_touches < 2 {
            self.gesture = Gesture::None;
        }
    }
}


/// Clamps a zoom factor to [MIN_ZOOM, MAX_ZOOM]; NaN maps to 1
pub fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
