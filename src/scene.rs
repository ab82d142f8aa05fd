use rand::{rngs::StdRng, SeedableRng};
use three_d::*;

use crate::config::SceneConfig;
use crate::cosmos::Cosmos;
use crate::dom::Tooltip;
use crate::error::Result;
use crate::interaction::{InteractionMode, InteractionState, PinchGesture, PinchResponse, TouchPoint};
use crate::particles::{Halo, PointField, QuantumField};
use crate::texture::{Painter, ProceduralTexture, TextureStyle};
use crate::zen_text::{ZenText, TEXT_POSITION};
use crate::log; // macro import


/// Fixed step of the physics stand-in
pub const PHYSICS_STEP: f32 = 1.0 / 60.0;

/// Camera z travel per scrolled pixel
pub const SCROLL_FACTOR: f32 = 0.01;

const HALO_AMPLITUDE: f32 = 0.3;

const STAR_SHELL_INNER: f32 = 300.0;
const STAR_SHELL_OUTER: f32 = 500.0;
const STAR_SPIN: f32 = 0.0005;

pub const BACKDROP_SIZE: f32 = 600.0;
const BACKDROP_Z: f32 = -400.0;
const BACKDROP_TIME_STEP: f32 = 0.005;
const BACKDROP_SPIN: f32 = 0.0005;


/// Position, Euler rotation (radians, applied x then y then z) and scale of a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 0.0, 0.0),
            rotation: vec3(0.0, 0.0, 0.0),
            scale: vec3(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self { position, ..Default::default() }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_angle_x(radians(self.rotation.x))
            * Mat4::from_angle_y(radians(self.rotation.y))
            * Mat4::from_angle_z(radians(self.rotation.z))
            * Mat4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }
}


/// Stand-in for a rigid body world: nothing is simulated, but the world is
/// configured and stepped every frame.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub gravity: Vec3,
    pub solver_iterations: u32,
    pub tolerance: f32,
    steps: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            gravity: vec3(0.0, 0.0, 0.0),
            solver_iterations: 50,
            tolerance: 1e-5,
            steps: 0,
        }
    }
}

impl PhysicsWorld {
    pub fn step(&mut self, _dt: f32) {
        self.steps += 1;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}


/// Elapsed scene time in seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    elapsed: f64,
    delta: f32,
    frames: u64,
}

impl FrameClock {
    pub fn advance(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.delta = delta;
        self.elapsed += delta as f64;
        self.frames += 1;
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}


/// Distant starfield shell and the shader backdrop plane behind everything
#[derive(Debug, Clone)]
pub struct Background {
    pub stars: PointField,
    pub star_rotation: f32,
    pub backdrop: Transform,
    pub backdrop_time: f32,
}

impl Background {
    pub fn generate<R: rand::Rng>(star_count: usize, rng: &mut R) -> Self {
        Self {
            stars: PointField::starfield_shell(star_count, STAR_SHELL_INNER, STAR_SHELL_OUTER, rng),
            star_rotation: 0.0,
            backdrop: Transform::at(vec3(0.0, 0.0, BACKDROP_Z)),
            backdrop_time: 0.0,
        }
    }

    /// Per-frame drift, independent of frame time
    pub fn advance(&mut self) {
        self.star_rotation += STAR_SPIN;
        self.backdrop_time += BACKDROP_TIME_STEP;
        self.backdrop.rotation.z += BACKDROP_SPIN;
    }

    pub fn stars_matrix(&self) -> Mat4 {
        Mat4::from_angle_y(radians(self.star_rotation))
    }

    /// The unit plane stretched to the backdrop size
    pub fn backdrop_matrix(&self) -> Mat4 {
        self.backdrop.matrix() * Mat4::from_nonuniform_scale(BACKDROP_SIZE * 0.5, BACKDROP_SIZE * 0.5, 1.0)
    }
}


/// Where the camera should be while nothing else owns it
#[derive(Debug, Clone)]
pub struct CameraRig {
    home: Vec3,
    pub eye: Vec3,
    pub target: Vec3,
    base_fov: f32,
    zoom: f32,
    scroll_y: f32,
}

impl CameraRig {
    pub fn new(config: &SceneConfig) -> Self {
        let [x, y, z] = config.camera_eye;
        Self {
            home: vec3(x, y, z),
            eye: vec3(x, y, z),
            target: vec3(0.0, 0.0, 0.0),
            base_fov: config.fov_degrees,
            zoom: 1.0,
            scroll_y: 0.0,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// Vertical field of view after zoom, in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.base_fov / self.zoom
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
        self.eye.z = self.home.z + scroll_y * SCROLL_FACTOR;
    }

    /// Back to the home position, keeping the scroll offset
    pub fn reset(&mut self) {
        self.eye = self.home;
        self.target = vec3(0.0, 0.0, 0.0);
        self.scroll_to(self.scroll_y);
    }
}


/// Input gathered by DOM listeners between two frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomInput {
    DoubleClick,
    /// page scroll offset in CSS pixels
    Scroll(f32),
}


/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub style: TextureStyle,
    pub recycled: usize,
    pub cosmos_advanced: bool,
}


/// All CPU-side scene state; the renderer mirrors it onto GPU objects
pub struct SceneContext {
    pub config: SceneConfig,
    rng: StdRng,
    pub clock: FrameClock,
    pub physics: PhysicsWorld,
    pub interaction: InteractionState,
    pub pinch: PinchGesture,
    pub camera: CameraRig,
    pub zen_text: ZenText,
    pub halo: Halo,
    /// current halo wobble amplitude
    pub halo_amplitude: f32,
    pub quantum: QuantumField,
    pub background: Background,
    pub cosmos: Cosmos,
    pub texture: ProceduralTexture,
    pub tooltip: Tooltip,
}

impl SceneContext {
    /// Seeds from the configuration, or from the browser when no seed is set
    pub fn seeded_rng(config: &SceneConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed.unwrap_or_else(crate::utils::random_seed))
    }

    pub fn build(config: SceneConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;

        let zen_text = ZenText::new();
        let halo = Halo::generate(config.halo_particle_count, TEXT_POSITION, &mut rng);
        let background = Background::generate(config.background_star_count, &mut rng);
        let quantum = QuantumField::generate(config.quantum_particle_count, &mut rng);
        let mut cosmos = Cosmos::generate(&config, &mut rng);
        cosmos.set_visible(false);

        let mut tooltip = Tooltip::default();
        tooltip.scene_ready(0.0);

        log!(
            "SceneContext::build(): {} quantum, {} halo, {} stars, {} planets, {} nebulae",
            quantum.len(),
            halo.len(),
            background.stars.len(),
            cosmos.planets.len(),
            cosmos.nebulae.len()
        );

        Ok(Self {
            camera: CameraRig::new(&config),
            texture: ProceduralTexture::new(config.texture_size),
            config,
            rng,
            clock: FrameClock::default(),
            physics: PhysicsWorld::default(),
            interaction: InteractionState::default(),
            pinch: PinchGesture::default(),
            zen_text,
            halo,
            halo_amplitude: HALO_AMPLITUDE,
            quantum,
            background,
            cosmos,
            tooltip,
        })
    }

    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn elapsed(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Advances every animated element by `delta` seconds
    pub fn tick(&mut self, delta: f32) -> FrameSummary {
        self.clock.advance(delta);
        let dt = self.clock.delta();
        let t = self.clock.elapsed() as f32;
        let mode = self.mode();

        self.physics.step(PHYSICS_STEP);

        let recycled = self.quantum.update(dt, t, &mut self.rng);

        self.zen_text.animate(t, mode.animation_speed());
        self.halo_amplitude = HALO_AMPLITUDE * mode.animation_intensity();
        self.background.advance();
        let style = self.texture.advance(self.clock.elapsed());

        let cosmos_advanced = mode.is_interactive();
        if cosmos_advanced {
            self.cosmos.advance(dt);
        }

        FrameSummary { style, recycled, cosmos_advanced }
    }

    /// Repaints the procedural texture for the current scene time
    pub fn paint_texture<P: Painter>(&mut self, painter: &mut P) {
        let time = self.clock.elapsed();
        self.texture.paint(painter, time, &mut self.rng);
    }

    /// Applies one queued DOM input; returns the new mode if it toggled
    pub fn apply_input(&mut self, input: DomInput) -> Option<InteractionMode> {
        match input {
            DomInput::DoubleClick => Some(self.toggle_interaction()),
            DomInput::Scroll(scroll_y) => {
                self.on_scroll(scroll_y);
                None
            }
        }
    }

    /// Double-click: flips the mode and applies its side effects
    pub fn toggle_interaction(&mut self) -> InteractionMode {
        let mode = self.interaction.toggle();
        self.cosmos.set_visible(mode.is_interactive());
        if !mode.is_interactive() {
            self.camera.reset();
        }
        self.tooltip.announce(mode.announcement(), self.elapsed());
        log!("SceneContext::toggle_interaction(): {:?}", mode);
        mode
    }

    /// Page scroll; the orbit control owns the camera in interactive mode
    pub fn on_scroll(&mut self, scroll_y: f32) {
        if self.mode().is_interactive() {
            self.camera.scroll_y = scroll_y;
        } else {
            self.camera.scroll_to(scroll_y);
        }
    }

    pub fn on_touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        self.pinch.touch_start(touches, self.camera.zoom())
    }

    pub fn on_touch_move(&mut self, touches: &[TouchPoint]) -> PinchResponse {
        let response = self.pinch.touch_move(touches, self.mode());
        if let PinchResponse::Zoom(zoom) = response {
            self.camera.set_zoom(zoom);
        }
        response
    }

    pub fn on_touch_end(&mut self, remaining_touches: usize) {
        self.pinch.touch_end(remaining_touches);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::QuantumParticle;

    fn small_config() -> SceneConfig {
        SceneConfig {
            seed: Some(42),
            background_star_count: 200,
            galaxy_particle_count: 200,
            halo_particle_count: 50,
            texture_size: 32,
            ..SceneConfig::default()
        }
    }

    fn context() -> SceneContext {
        let config = small_config();
        let rng = SceneContext::seeded_rng(&config);
        SceneContext::build(config, rng).unwrap()
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).magnitude() < 1e-4
    }

    #[test]
    fn transform_applies_scale_then_rotation_then_translation() {
        let mut t = Transform::at(vec3(1.0, 2.0, 3.0));
        t.scale = vec3(2.0, 2.0, 2.0);
        t.rotation.z = std::f32::consts::FRAC_PI_2;
        let p = t.matrix() * Vec4::new(1.0, 0.0, 0.0, 1.0);
        assert!(close(vec3(p.x, p.y, p.z), vec3(1.0, 4.0, 3.0)));

        assert_eq!(Transform::default().matrix(), Mat4::from_scale(1.0));
    }

    #[test]
    fn build_wires_the_stock_scene() {
        let scene = context();
        assert_eq!(scene.quantum.len(), 100);
        assert_eq!(scene.halo.len(), 50);
        assert_eq!(scene.background.stars.len(), 200);
        assert_eq!(scene.cosmos.planets.len(), 8);
        assert!(!scene.cosmos.is_visible());
        assert_eq!(scene.mode(), InteractionMode::Idle);
        assert_eq!(scene.physics.gravity, vec3(0.0, 0.0, 0.0));
        assert_eq!(scene.physics.solver_iterations, 50);
        assert_eq!(scene.camera.eye, vec3(0.0, 5.0, 10.0));
        assert_eq!(scene.camera.fov_degrees(), 75.0);
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = small_config();
        config.texture_size = 0;
        let rng = SceneContext::seeded_rng(&config);
        assert!(SceneContext::build(config, rng).is_err());
    }

    #[test]
    fn same_seed_same_scene() {
        let a = context();
        let b = context();
        assert_eq!(a.cosmos.planets, b.cosmos.planets);
        assert_eq!(a.quantum.particles, b.quantum.particles);
    }

    #[test]
    fn tick_runs_every_step() {
        let mut scene = context();
        let summary = scene.tick(0.5);
        assert_eq!(scene.clock.frames(), 1);
        assert_eq!(scene.physics.steps(), 1);
        assert_eq!(summary.style, TextureStyle::Gradient);
        assert!(!summary.cosmos_advanced);
        assert!((scene.zen_text.uniforms.time - 0.5).abs() < 1e-6);
        assert!((scene.background.star_rotation - STAR_SPIN).abs() < 1e-7);
        assert!((scene.background.backdrop_time - BACKDROP_TIME_STEP).abs() < 1e-7);
        assert_eq!(scene.halo_amplitude, HALO_AMPLITUDE);
    }

    #[test]
    fn stray_particle_is_back_in_the_cube_after_a_tick() {
        let mut scene = context();
        scene.quantum.particles[0] = QuantumParticle {
            position: vec3(12.0, 0.0, 0.0),
            velocity: vec3(0.0, 0.0, 0.0),
            scale: 1.0,
        };
        let summary = scene.tick(1.0 / 60.0);
        assert!(summary.recycled >= 1);
        let p = scene.quantum.particles[0].position;
        assert!([p.x, p.y, p.z].iter().all(|c| c.abs() <= 10.0));
    }

    #[test]
    fn texture_style_follows_scene_time() {
        let mut scene = context();
        let mut styles = Vec::new();
        // mid-interval samples at 2.5 s, 7.5 s, ...
        scene.tick(2.5);
        styles.push(scene.texture.style().index());
        for _ in 0..5 {
            scene.tick(5.0);
            styles.push(scene.texture.style().index());
        }
        assert_eq!(styles, vec![0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn cosmos_moves_only_while_interactive() {
        let mut scene = context();
        let parked = scene.cosmos.planets.clone();
        scene.tick(0.1);
        assert_eq!(scene.cosmos.planets, parked);

        assert_eq!(scene.toggle_interaction(), InteractionMode::Interactive);
        assert!(scene.cosmos.is_visible());
        let summary = scene.tick(0.1);
        assert!(summary.cosmos_advanced);
        assert_ne!(scene.cosmos.planets, parked);
        assert_eq!(scene.halo_amplitude, HALO_AMPLITUDE * 2.0);
    }

    #[test]
    fn leaving_interactive_mode_resets_the_camera() {
        let mut scene = context();
        scene.on_scroll(200.0);
        assert!((scene.camera.eye.z - 12.0).abs() < 1e-5);

        scene.toggle_interaction();
        scene.camera.eye = vec3(40.0, 40.0, 40.0);
        scene.on_scroll(500.0);
        assert_eq!(scene.camera.eye, vec3(40.0, 40.0, 40.0));

        assert_eq!(scene.toggle_interaction(), InteractionMode::Idle);
        assert!(!scene.cosmos.is_visible());
        assert!(close(scene.camera.eye, vec3(0.0, 5.0, 15.0)));
        assert_eq!(scene.tooltip.text(), InteractionMode::Idle.announcement());
    }

    #[test]
    fn one_double_click_is_one_toggle() {
        let mut scene = context();
        assert_eq!(scene.apply_input(DomInput::DoubleClick), Some(InteractionMode::Interactive));
        assert_eq!(scene.interaction.toggles(), 1);
        assert!(scene.cosmos.is_visible());

        assert_eq!(scene.apply_input(DomInput::Scroll(300.0)), None);
        assert_eq!(scene.interaction.toggles(), 1);
        assert_eq!(scene.camera.scroll_y(), 300.0);

        assert_eq!(scene.apply_input(DomInput::DoubleClick), Some(InteractionMode::Idle));
        assert_eq!(scene.interaction.toggles(), 2);
        assert!(close(scene.camera.eye, vec3(0.0, 5.0, 13.0)));
    }

    #[test]
    fn texture_is_painted_at_scene_time() {
        use crate::texture::tests::{Draw, Sketch};

        let mut scene = context();
        scene.tick(7.5);
        let mut sketch = Sketch::new(scene.texture.size());
        scene.paint_texture(&mut sketch);
        assert_eq!(sketch.draws[0], Draw::Clear);
        // geometric: black backdrop then the tiling
        assert!(sketch.draws.iter().any(|d| matches!(d, Draw::Triangle(_))));
    }

    #[test]
    fn pinch_zoom_narrows_the_field_of_view() {
        let mut scene = context();
        scene.toggle_interaction();
        let start = [TouchPoint::new(0.0, 300.0), TouchPoint::new(100.0, 300.0)];
        let spread = [TouchPoint::new(0.0, 300.0), TouchPoint::new(250.0, 300.0)];
        assert!(scene.on_touch_start(&start));
        assert_eq!(scene.on_touch_move(&spread), PinchResponse::Zoom(2.5));
        assert!((scene.camera.fov_degrees() - 30.0).abs() < 1e-4);
        scene.on_touch_end(0);
        assert!(!scene.pinch.is_active());
    }

    #[test]
    fn idle_pinch_keeps_the_zoom() {
        let mut scene = context();
        let start = [TouchPoint::new(0.0, 300.0), TouchPoint::new(100.0, 300.0)];
        let spread = [TouchPoint::new(0.0, 300.0), TouchPoint::new(400.0, 300.0)];
        scene.on_touch_start(&start);
        assert_eq!(scene.on_touch_move(&spread), PinchResponse::Suppressed);
        assert_eq!(scene.camera.zoom(), 1.0);
    }

    #[test]
    fn clock_ignores_bad_deltas() {
        let mut clock = FrameClock::default();
        clock.advance(f32::NAN);
        clock.advance(-1.0);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.25);
        assert_eq!(clock.frames(), 3);
    }
}
