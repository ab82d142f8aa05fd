use std::cell::Cell;
use std::f32::consts::PI;

use three_d::*;
use bus::BusReader;

use crate::cosmos::{Cosmos, PlanetSurface};
use crate::error::Result;
use crate::interaction::InteractionMode;
use crate::materials::*;
use crate::particles::{Halo, PointField, QuantumField};
use crate::scene::{DomInput, SceneContext};
use crate::utils::to_rgba8;
use crate::zen_text::ZenText;


const QUANTUM_RADIUS: f32 = 0.05;
const STAR_RADIUS: f32 = 0.75;
const GALAXY_RADIUS: f32 = 0.75;
const STAR_BRIGHTNESS: f32 = 0.6;
const GALAXY_BRIGHTNESS: f32 = 0.8;
const RING_SEGMENTS: u32 = 32;
const SPHERE_SUBDIVISIONS: u32 = 16;
const SPARK_SUBDIVISIONS: u32 = 6;

/// Share of the pending orbit/dolly motion applied per frame
const DAMPING_FACTOR: f32 = 0.05;
/// Radians per dragged pixel
const ORBIT_SPEED: f32 = 0.01;
/// Fraction of the target distance per wheel unit
const DOLLY_SPEED: f32 = 0.002;
/// Fraction of the target distance per dragged pixel
const PAN_SPEED: f32 = 0.001;
const SETTLED: f32 = 1e-6;


/// Orbit and dolly input eased out over the following frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Damping {
    orbit: (f32, f32),
    dolly: f32,
}

impl Damping {
    pub fn push_orbit(&mut self, x: f32, y: f32) {
        self.orbit.0 += x;
        self.orbit.1 += y;
    }

    pub fn push_dolly(&mut self, amount: f32) {
        self.dolly += amount;
    }

    pub fn is_settled(&self) -> bool {
        self.orbit == (0.0, 0.0) && self.dolly == 0.0
    }

    /// Motion due this frame as (orbit x, orbit y, dolly); the rest carries over
    pub fn step(&mut self) -> (f32, f32, f32) {
        let due = (
            self.orbit.0 * DAMPING_FACTOR,
            self.orbit.1 * DAMPING_FACTOR,
            self.dolly * DAMPING_FACTOR,
        );
        let keep = |v: f32| {
            let v = v * (1.0 - DAMPING_FACTOR);
            if v.abs() < SETTLED { 0.0 } else { v }
        };
        self.orbit = (keep(self.orbit.0), keep(self.orbit.1));
        self.dolly = keep(self.dolly);
        due
    }
}


/// Damped orbit control for interactive mode: left drag orbits, right drag
/// pans the target, the wheel dollies within [min_distance, max_distance].
pub struct CosmosControl {
    target: Vec3,
    min_distance: f32,
    max_distance: f32,
    damping: Damping,
}

impl CosmosControl {
    pub fn new(target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        Self { target, min_distance, max_distance, damping: Damping::default() }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Consumes pointer events and moves the camera. Call once per frame while interactive.
    pub fn handle_events(&mut self, camera: &mut Camera, events: &mut [Event]) -> bool {
        let mut moved = false;
        for event in events.iter_mut() {
            match event {
                Event::MouseMotion { delta, button: Some(MouseButton::Left), handled, .. } if !*handled => {
                    self.damping.push_orbit(delta.0 * ORBIT_SPEED, delta.1 * ORBIT_SPEED);
                    *handled = true;
                }
                Event::MouseMotion { delta, button: Some(MouseButton::Right), handled, .. } if !*handled => {
                    // camera and target move together
                    let speed = PAN_SPEED * self.target.distance(*camera.position());
                    let right = camera.right_direction();
                    let up = right.cross(camera.view_direction());
                    let change = -right * delta.0 * speed + up * delta.1 * speed;
                    camera.translate(&change);
                    self.target += change;
                    *handled = true;
                    moved = true;
                }
                Event::MouseWheel { delta, handled, .. } if !*handled => {
                    self.damping.push_dolly(delta.1 * DOLLY_SPEED);
                    *handled = true;
                }
                _ => {}
            }
        }

        if self.damping.is_settled() {
            return moved;
        }
        let (x, y, dolly) = self.damping.step();
        camera.rotate_around_with_fixed_up(&self.target, x, y);
        if dolly != 0.0 {
            let distance = self.target.distance(*camera.position());
            camera.zoom_towards(&self.target, dolly * distance, self.min_distance, self.max_distance);
        }
        true
    }
}


/// Applies the input queued since the last frame: every double-click in
/// order, then only the latest scroll offset. Returns the mode after the last toggle.
pub fn drain_input(
    scene: &mut SceneContext,
    clicks: &mut BusReader<DomInput>,
    scroll: &Cell<Option<f32>>,
) -> Option<InteractionMode> {
    let mut toggled = None;
    while let Ok(input) = clicks.try_recv() {
        toggled = scene.apply_input(input).or(toggled);
    }
    if let Some(scroll_y) = scroll.take() {
        scene.apply_input(DomInput::Scroll(scroll_y));
    }
    toggled
}


pub fn srgba(rgb: [f32; 3], alpha: f32) -> Srgba {
    let [r, g, b, a] = to_rgba8(rgb, alpha);
    Srgba::new(r, g, b, a)
}


/// Flat annulus in the xy plane, facing +z
pub fn ring_mesh(inner_radius: f32, outer_radius: f32, segments: u32) -> CpuMesh {
    let segments = segments.max(3);
    let mut positions = Vec::with_capacity(2 * (segments as usize + 1));
    let mut uvs = Vec::with_capacity(positions.capacity());
    for i in 0..=segments {
        let angle = i as f32 / segments as f32 * PI * 2.0;
        let (sin, cos) = angle.sin_cos();
        positions.push(vec3(cos * inner_radius, sin * inner_radius, 0.0));
        positions.push(vec3(cos * outer_radius, sin * outer_radius, 0.0));
        let u = i as f32 / segments as f32;
        uvs.push(vec2(u, 0.0));
        uvs.push(vec2(u, 1.0));
    }
    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let (a, b, c, d) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        indices.extend_from_slice(&[a, b, d, a, d, c]);
    }
    let normals = vec![vec3(0.0, 0.0, 1.0); positions.len()];
    CpuMesh {
        positions: Positions::F32(positions),
        indices: Indices::U32(indices),
        normals: Some(normals),
        uvs: Some(uvs),
        ..Default::default()
    }
}


/// Spheres at the given centers with the given radii
pub fn sphere_instances(
    centers: impl IntoIterator<Item = Vec3>,
    radii: impl IntoIterator<Item = f32>,
    colors: Option<&[[f32; 3]]>,
) -> Instances {
    let transformations = centers
        .into_iter()
        .zip(radii)
        .map(|(c, r)| Mat4::from_translation(c) * Mat4::from_scale(r))
        .collect();
    Instances {
        transformations,
        colors: colors.map(|colors| colors.iter().map(|c| srgba(*c, 1.0)).collect()),
        ..Default::default()
    }
}

fn point_field_instances(points: &PointField, radius: f32) -> Instances {
    sphere_instances(
        points.positions.iter().copied(),
        std::iter::repeat(radius),
        points.colors.as_deref(),
    )
}

fn halo_instances(halo: &Halo, time: f32, amplitude: f32) -> Instances {
    sphere_instances(
        halo.positions_at(time, amplitude),
        halo.sizes.iter().map(|s| s * 0.5),
        Some(halo.colors.as_slice()),
    )
}

fn quantum_instances(field: &QuantumField) -> Instances {
    sphere_instances(
        field.particles.iter().map(|p| p.position),
        field.particles.iter().map(|p| QUANTUM_RADIUS * p.scale),
        None,
    )
}


enum PlanetBody {
    Standard(Gm<Mesh, PhysicalMaterial>),
    Banded(Gm<Mesh, PlanetMaterial>),
}

impl PlanetBody {
    fn set_transformation(&mut self, transformation: Mat4) {
        match self {
            PlanetBody::Standard(gm) => gm.geometry.set_transformation(transformation),
            PlanetBody::Banded(gm) => gm.geometry.set_transformation(transformation),
        }
    }

    fn as_object(&self) -> &dyn Object {
        match self {
            PlanetBody::Standard(gm) => gm,
            PlanetBody::Banded(gm) => gm,
        }
    }
}


/// GPU mirror of the cosmic realm
struct CosmosMeshes {
    planets: Vec<PlanetBody>,
    /// (planet index, ring)
    rings: Vec<(usize, Gm<Mesh, ColorMaterial>)>,
    moons: Option<Gm<InstancedMesh, PhysicalMaterial>>,
    nebulae: Vec<Gm<Mesh, NebulaMaterial>>,
    galaxy: Gm<InstancedMesh, SparkMaterial>,
}

impl CosmosMeshes {
    fn new(context: &Context, cosmos: &Cosmos) -> Self {
        let sphere = CpuMesh::sphere(SPHERE_SUBDIVISIONS);

        let planets = cosmos
            .planets
            .iter()
            .map(|planet| {
                let mesh = Mesh::new(context, &sphere);
                match planet.surface {
                    PlanetSurface::Standard => {
                        let emissive = planet.emissive.map(|c| c * 0.2);
                        let material = PhysicalMaterial::new_opaque(
                            context,
                            &CpuMaterial {
                                albedo: srgba(planet.color, 1.0),
                                emissive: srgba(emissive, 1.0),
                                roughness: 0.7,
                                metallic: 0.2,
                                ..Default::default()
                            },
                        );
                        PlanetBody::Standard(Gm::new(mesh, material))
                    }
                    PlanetSurface::Banded => PlanetBody::Banded(Gm::new(
                        mesh,
                        PlanetMaterial { time: 0.0, base_color: planet.color },
                    )),
                }
            })
            .collect();

        let rings = cosmos
            .planets
            .iter()
            .enumerate()
            .filter_map(|(i, planet)| planet.ring.map(|ring| (i, ring)))
            .map(|(i, ring)| {
                let mut material = ColorMaterial::new_transparent(
                    context,
                    &CpuMaterial { albedo: Srgba::new(255, 255, 255, 128), ..Default::default() },
                );
                material.render_states.cull = Cull::None;
                let mesh = Mesh::new(context, &ring_mesh(ring.inner_radius, ring.outer_radius, RING_SEGMENTS));
                (i, Gm::new(mesh, material))
            })
            .collect();

        let moon_count: usize = cosmos.planets.iter().map(|p| p.moons.len()).sum();
        let moons = (moon_count > 0).then(|| {
            let material = PhysicalMaterial::new_opaque(
                context,
                &CpuMaterial { albedo: Srgba::new(0xcc, 0xcc, 0xcc, 255), roughness: 0.8, ..Default::default() },
            );
            let instances = Instances {
                transformations: cosmos.planets.iter().flat_map(|p| p.moon_matrices()).collect(),
                ..Default::default()
            };
            Gm::new(InstancedMesh::new(context, &instances, &sphere), material)
        });

        let square = CpuMesh::square();
        let nebulae = cosmos
            .nebulae
            .iter()
            .map(|nebula| {
                Gm::new(
                    Mesh::new(context, &square),
                    NebulaMaterial { time: 0.0, color1: nebula.color1, color2: nebula.color2 },
                )
            })
            .collect();

        let galaxy = Gm::new(
            InstancedMesh::new(
                context,
                &point_field_instances(&cosmos.galaxy.points, GALAXY_RADIUS),
                &CpuMesh::sphere(SPARK_SUBDIVISIONS),
            ),
            SparkMaterial { brightness: GALAXY_BRIGHTNESS, always_on_top: false },
        );

        Self { planets, rings, moons, nebulae, galaxy }
    }

    fn sync(&mut self, cosmos: &Cosmos, time: f32) {
        for (body, planet) in self.planets.iter_mut().zip(&cosmos.planets) {
            body.set_transformation(planet.matrix() * Mat4::from_scale(planet.radius));
            if let PlanetBody::Banded(gm) = body {
                gm.material.time = time;
            }
        }
        for (i, ring) in self.rings.iter_mut() {
            if let Some(m) = cosmos.planets[*i].ring_matrix() {
                ring.geometry.set_transformation(m);
            }
        }
        if let Some(moons) = self.moons.as_mut() {
            moons.geometry.set_instances(&Instances {
                transformations: cosmos.planets.iter().flat_map(|p| p.moon_matrices()).collect(),
                ..Default::default()
            });
        }
        for (gm, nebula) in self.nebulae.iter_mut().zip(&cosmos.nebulae) {
            gm.geometry.set_transformation(nebula.matrix());
            gm.material.time = time;
        }
        self.galaxy.geometry.set_transformation(cosmos.galaxy.transform.matrix());
    }

    fn objects(&self) -> Vec<&dyn Object> {
        let mut objects: Vec<&dyn Object> = self.planets.iter().map(PlanetBody::as_object).collect();
        objects.extend(self.rings.iter().map(|(_, gm)| gm as &dyn Object));
        if let Some(moons) = &self.moons {
            objects.push(moons);
        }
        objects.extend(self.nebulae.iter().map(|gm| gm as &dyn Object));
        objects.push(&self.galaxy);
        objects
    }
}


/// Every GPU object of the scene, rebuilt from [SceneContext] each frame
pub struct SceneMeshes {
    text: Gm<InstancedMesh, ZenTextMaterial>,
    glow: Vec<Gm<InstancedMesh, GlowMaterial>>,
    halo: Gm<InstancedMesh, SparkMaterial>,
    quantum: Gm<InstancedMesh, PhysicalMaterial>,
    stars: Gm<InstancedMesh, SparkMaterial>,
    backdrop: Gm<Mesh, BackdropMaterial>,
    cosmos: CosmosMeshes,
}

impl SceneMeshes {
    pub fn new(context: &Context, scene: &SceneContext) -> Self {
        let cube = CpuMesh::cube();
        let spark = CpuMesh::sphere(SPARK_SUBDIVISIONS);
        let strokes = Instances { transformations: scene.zen_text.stroke_matrices(), ..Default::default() };

        let text = Gm::new(
            InstancedMesh::new(context, &strokes, &cube),
            ZenTextMaterial::new(context, scene.texture.size()),
        );
        let glow = scene
            .zen_text
            .glow
            .iter()
            .map(|layer| {
                Gm::new(
                    InstancedMesh::new(context, &strokes, &cube),
                    GlowMaterial { time: 0.0, color_offset: layer.color_offset },
                )
            })
            .collect();

        let halo = Gm::new(
            InstancedMesh::new(context, &halo_instances(&scene.halo, 0.0, scene.halo_amplitude), &spark),
            SparkMaterial { brightness: 1.0, always_on_top: true },
        );

        let quantum = Gm::new(
            InstancedMesh::new(context, &quantum_instances(&scene.quantum), &CpuMesh::sphere(SPHERE_SUBDIVISIONS)),
            PhysicalMaterial::new_transparent(
                context,
                &CpuMaterial {
                    albedo: Srgba::new(0, 255, 255, 204),
                    emissive: Srgba::new(0, 128, 128, 255),
                    ..Default::default()
                },
            ),
        );

        let stars = Gm::new(
            InstancedMesh::new(context, &point_field_instances(&scene.background.stars, STAR_RADIUS), &spark),
            SparkMaterial { brightness: STAR_BRIGHTNESS, always_on_top: false },
        );
        let backdrop = Gm::new(Mesh::new(context, &CpuMesh::square()), BackdropMaterial { time: 0.0 });

        Self {
            text,
            glow,
            halo,
            quantum,
            stars,
            backdrop,
            cosmos: CosmosMeshes::new(context, &scene.cosmos),
        }
    }

    fn sync_text(&mut self, text: &ZenText) {
        self.text.geometry.set_transformation(text.matrix());
        let material = &mut self.text.material;
        material.time = text.uniforms.time;
        material.color_cycle = text.uniforms.color_cycle;
        material.intensity = text.uniforms.intensity;
        material.origin = text.transform.position;

        for (gm, layer) in self.glow.iter_mut().zip(&text.glow) {
            gm.geometry.set_transformation(layer.matrix());
            gm.material.time = layer.time;
        }
    }

    /// Replaces the pattern on the letters with freshly painted pixels
    pub fn upload_texture(&mut self, pixels: &[[u8; 4]]) -> Result<()> {
        self.text.material.upload(pixels)
    }

    /// Copies the state of this frame onto the GPU
    pub fn sync(&mut self, scene: &SceneContext) {
        let t = scene.elapsed() as f32;

        self.sync_text(&scene.zen_text);

        self.halo.geometry.set_instances(&halo_instances(&scene.halo, t, scene.halo_amplitude));
        self.quantum.geometry.set_instances(&quantum_instances(&scene.quantum));

        self.stars.geometry.set_transformation(scene.background.stars_matrix());
        self.backdrop.geometry.set_transformation(scene.background.backdrop_matrix());
        self.backdrop.material.time = scene.background.backdrop_time;

        if scene.cosmos.is_visible() {
            self.cosmos.sync(&scene.cosmos, t);
        }
    }

    /// Draw list for this frame; the cosmic realm only while it is visible
    pub fn objects(&self, cosmos_visible: bool) -> Vec<&dyn Object> {
        let mut objects: Vec<&dyn Object> = vec![&self.backdrop as &dyn Object, &self.stars as &dyn Object];
        if cosmos_visible {
            objects.extend(self.cosmos.objects());
        }
        objects.push(&self.quantum);
        objects.push(&self.text);
        objects.extend(self.glow.iter().map(|gm| gm as &dyn Object));
        objects.push(&self.halo);
        objects
    }
}


#[cfg(target_arch = "wasm32")]
pub use self::web::main;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::{cell::RefCell, rc::Rc};

    use bus::Bus;
    use wasm_bindgen::{prelude::*, JsCast};
    use web_sys::{AddEventListenerOptions, TouchEvent};

    use super::*;
    use crate::bootstrap::LoadReport;
    use crate::config::SceneConfig;
    use crate::dom;
    use crate::error::ZenError;
    use crate::interaction::{TouchPoint, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE};
    use crate::texture::CanvasPainter;
    use crate::utils::are_floats_equal;
    use crate::{error, log, warn};

    fn touch_points(event: &TouchEvent) -> Vec<TouchPoint> {
        let list = event.touches();
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(|t| TouchPoint::new(t.client_x() as f32, t.client_y() as f32))
            .collect()
    }

    fn add_listener<E: 'static + JsCast>(
        target: &web_sys::EventTarget,
        name: &str,
        passive: bool,
        mut handler: impl FnMut(E) + 'static,
    ) -> Result<()> {
        let callback = Closure::wrap(Box::new(move |event: web_sys::Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        callback.forget();
        Ok(())
    }

    /// Double-clicks go through the bus, scrolls collapse into the latest
    /// offset, and touches are decided on the spot because they may need
    /// `preventDefault`.
    fn listen_dom(
        scene: &Rc<RefCell<SceneContext>>,
        clicks: &Rc<RefCell<Bus<DomInput>>>,
        scroll: &Rc<Cell<Option<f32>>>,
    ) -> Result<()> {
        let container = dom::element(dom::CONTAINER_ID)?;
        let window = dom::window()?;

        let tx = Rc::clone(clicks);
        add_listener(&container, "dblclick", true, move |_: web_sys::MouseEvent| {
            if tx.borrow_mut().try_broadcast(DomInput::DoubleClick).is_err() {
                warn!("listen_dom(): input queue full, double-click dropped");
            }
        })?;

        let latest = Rc::clone(scroll);
        add_listener(&window, "scroll", true, move |_: web_sys::Event| {
            latest.set(Some(dom::scroll_y() as f32));
        })?;

        let s = Rc::clone(scene);
        add_listener(&window, "touchstart", false, move |event: TouchEvent| {
            if s.borrow_mut().on_touch_start(&touch_points(&event)) {
                event.prevent_default();
            }
        })?;

        let s = Rc::clone(scene);
        add_listener(&window, "touchmove", false, move |event: TouchEvent| {
            if s.borrow_mut().on_touch_move(&touch_points(&event)).consumes_event() {
                event.prevent_default();
            }
        })?;

        let s = Rc::clone(scene);
        add_listener(&window, "touchend", false, move |event: TouchEvent| {
            s.borrow_mut().on_touch_end(event.touches().length() as usize);
        })?;

        Ok(())
    }

    /// three-d renders into the first canvas of the document
    fn attach_canvas() -> Result<()> {
        let canvas = dom::document()?.create_element("canvas")?;
        dom::element(dom::CONTAINER_ID)?.append_child(&canvas)?;
        Ok(())
    }

    fn orbit_control() -> CosmosControl {
        CosmosControl::new(vec3(0.0, 0.0, 0.0), ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE)
    }

    pub async fn main(config: SceneConfig, report: LoadReport) -> Result<()> {
        log!("main(): {} of {} libraries loaded", report.loaded().count(), report.attempts());

        let rng = SceneContext::seeded_rng(&config);
        let scene = SceneContext::build(config, rng)?;

        attach_canvas()?;
        let window = Window::new(WindowSettings {
            title: "ZEN".to_string(),
            max_size: None,
            ..Default::default()
        })
        .map_err(|e| ZenError::Window(e.to_string()))?;

        let context = window.gl();
        log!("main(): OpenGL version: {:?}", context.version());

        let mut camera = Camera::new_perspective(
            window.viewport(),
            scene.camera.eye,
            scene.camera.target,
            vec3(0.0, 1.0, 0.0),
            degrees(scene.camera.fov_degrees()),
            scene.config.z_near,
            scene.config.z_far,
        );
        let mut control = orbit_control();

        let ambient = AmbientLight::new(&context, 0.5, Srgba::new(0, 255, 255, 255));
        let directional = DirectionalLight::new(&context, 0.8, Srgba::WHITE, &vec3(-5.0, -10.0, -7.5));

        let mut meshes = SceneMeshes::new(&context, &scene);
        let mut painter = CanvasPainter::new(scene.texture.size())?;

        let tooltip = match dom::element(dom::TOOLTIP_ID) {
            Ok(el) => Some(el),
            Err(e) => {
                warn!("main(): tooltip unavailable: {}", e);
                None
            }
        };

        // lock-free bus for double-clicks (single-send, single-consumer)
        let mut bus_clicks = Bus::<DomInput>::new(64);
        let mut rx_clicks = bus_clicks.add_rx();
        let bus_clicks_rc = Rc::new(RefCell::new(bus_clicks));
        let scroll = Rc::new(Cell::new(None));

        let scene = Rc::new(RefCell::new(scene));
        listen_dom(&scene, &bus_clicks_rc, &scroll)?;

        let mut tooltip_failed = false;
        let mut texture_failed = false;
        let mut prev_fov = scene.borrow().camera.fov_degrees();

        window.render_loop(move |mut frame_input| {
            let mut scene = scene.borrow_mut();

            if drain_input(&mut scene, &mut rx_clicks, &scroll) == Some(InteractionMode::Interactive) {
                control = orbit_control();
            }

            let dt = (frame_input.elapsed_time / 1000.0) as f32;
            scene.tick(dt);

            camera.set_viewport(frame_input.viewport);
            if scene.mode().is_interactive() {
                control.handle_events(&mut camera, &mut frame_input.events);
            } else {
                camera.set_view(scene.camera.eye, scene.camera.target, vec3(0.0, 1.0, 0.0));
            }
            let fov = scene.camera.fov_degrees();
            if !are_floats_equal(fov, prev_fov, 0.00001) {
                camera.set_perspective_projection(degrees(fov), scene.config.z_near, scene.config.z_far);
                prev_fov = fov;
            }

            if let Some(el) = &tooltip {
                let now = scene.elapsed();
                if let Err(e) = dom::sync_tooltip(el, &mut scene.tooltip, now) {
                    if !tooltip_failed {
                        warn!("main(): tooltip unavailable: {}", e);
                        tooltip_failed = true;
                    }
                }
            }

            scene.paint_texture(&mut painter);
            if let Err(e) = painter.pixels().and_then(|pixels| meshes.upload_texture(pixels)) {
                if !texture_failed {
                    error!("main(): {}", e);
                    texture_failed = true;
                }
            }

            meshes.sync(&scene);
            frame_input
                .screen()
                .clear(ClearState::color_and_depth(0.0, 0.0, 0.0, 1.0, 1.0))
                .render(&camera, meshes.objects(scene.cosmos.is_visible()), &[&ambient, &directional]);

            FrameOutput::default()
        });

        Ok(())
    }
}
