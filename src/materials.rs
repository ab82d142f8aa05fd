//! Custom three-d materials. Fragment shaders live in `shaders/` and share
//! the helpers in `common.glsl`.

use three_d::*;

use crate::error::{Result, ZenError};


const COMMON: &str = include_str!("shaders/common.glsl");
const ZEN_TEXT_SOURCE: &str = include_str!("shaders/zen_text.frag");
const GLOW_SOURCE: &str = include_str!("shaders/glow.frag");
const SPARK_SOURCE: &str = include_str!("shaders/spark.frag");
const PLANET_SOURCE: &str = include_str!("shaders/planet.frag");
const NEBULA_SOURCE: &str = include_str!("shaders/nebula.frag");
const BACKDROP_SOURCE: &str = include_str!("shaders/backdrop.frag");

// ids below 2^15 belong to three-d
const ZEN_TEXT_ID: u16 = 0x8001;
const GLOW_ID: u16 = 0x8002;
const SPARK_ID: u16 = 0x8003;
const PLANET_ID: u16 = 0x8004;
const NEBULA_ID: u16 = 0x8005;
const BACKDROP_ID: u16 = 0x8006;


fn with_common(source: &str) -> String {
    format!("{}\n{}", COMMON, source)
}

fn position_normal() -> FragmentAttributes {
    FragmentAttributes { position: true, normal: true, ..FragmentAttributes::NONE }
}

fn uv_only() -> FragmentAttributes {
    FragmentAttributes { uv: true, ..FragmentAttributes::NONE }
}

fn additive() -> RenderStates {
    RenderStates {
        write_mask: WriteMask::COLOR,
        blend: Blend::ADD,
        cull: Cull::None,
        ..Default::default()
    }
}

fn transparent_double_sided() -> RenderStates {
    RenderStates {
        write_mask: WriteMask::COLOR,
        blend: Blend::TRANSPARENCY,
        cull: Cull::None,
        ..Default::default()
    }
}

fn check_pixel_count(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ZenError::TextureSize { expected, actual });
    }
    Ok(())
}

fn rgb(c: [f32; 3]) -> Vec3 {
    vec3(c[0], c[1], c[2])
}


/// Color-cycling, iridescent surface of the ZEN letters, overlaid with the procedural texture
pub struct ZenTextMaterial {
    pub time: f32,
    pub color_cycle: f32,
    pub intensity: f32,
    /// world position the letter-space coordinates are measured from
    pub origin: Vec3,
    pub texture: Texture2D,
}

impl ZenTextMaterial {
    /// Starts with a blank `size` x `size` pattern
    pub fn new(context: &Context, size: usize) -> Self {
        let texture = Texture2D::new(
            context,
            &CpuTexture {
                data: TextureData::RgbaU8(vec![[0; 4]; size * size]),
                width: size as u32,
                height: size as u32,
                ..Default::default()
            },
        );
        Self { time: 0.0, color_cycle: 0.0, intensity: 1.0, origin: vec3(0.0, 0.0, 0.0), texture }
    }

    /// Replaces the pattern; the buffer must cover the whole texture
    pub fn upload(&mut self, pixels: &[[u8; 4]]) -> Result<()> {
        check_pixel_count(self.texture.width() as usize * self.texture.height() as usize, pixels.len())?;
        self.texture.fill(pixels);
        Ok(())
    }
}

impl Material for ZenTextMaterial {
    fn id(&self) -> u16 {
        ZEN_TEXT_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(ZEN_TEXT_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        position_normal()
    }

    fn use_uniforms(&self, program: &Program, camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("time", self.time);
        program.use_uniform_if_required("colorCycle", self.color_cycle);
        program.use_uniform_if_required("intensity", self.intensity);
        program.use_uniform_if_required("cameraPosition", *camera.position());
        program.use_uniform_if_required("textOrigin", self.origin);
        program.use_texture("patternTexture", &self.texture);
    }

    fn render_states(&self) -> RenderStates {
        RenderStates::default()
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Opaque
    }
}


/// Additive rim glow around one enlarged copy of the letters
pub struct GlowMaterial {
    pub time: f32,
    pub color_offset: f32,
}

impl Material for GlowMaterial {
    fn id(&self) -> u16 {
        GLOW_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(GLOW_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        position_normal()
    }

    fn use_uniforms(&self, program: &Program, camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("time", self.time);
        program.use_uniform_if_required("colorOffset", self.color_offset);
        program.use_uniform_if_required("cameraPosition", *camera.position());
    }

    fn render_states(&self) -> RenderStates {
        additive()
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Transparent
    }
}


/// Procedural sprite: a glowing disc drawn on small instanced spheres, tinted by the instance color
pub struct SparkMaterial {
    pub brightness: f32,
    /// draw over everything, like the halo around the letters
    pub always_on_top: bool,
}

impl Material for SparkMaterial {
    fn id(&self) -> u16 {
        SPARK_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(SPARK_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        FragmentAttributes { color: true, ..position_normal() }
    }

    fn use_uniforms(&self, program: &Program, camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("brightness", self.brightness);
        program.use_uniform_if_required("cameraPosition", *camera.position());
    }

    fn render_states(&self) -> RenderStates {
        let mut states = additive();
        if self.always_on_top {
            states.depth_test = DepthTest::Always;
        }
        states
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Transparent
    }
}


/// Banded planet surface with spots and an atmosphere rim
pub struct PlanetMaterial {
    pub time: f32,
    pub base_color: [f32; 3],
}

impl Material for PlanetMaterial {
    fn id(&self) -> u16 {
        PLANET_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(PLANET_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        position_normal()
    }

    fn use_uniforms(&self, program: &Program, camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("time", self.time);
        program.use_uniform_if_required("baseColor", rgb(self.base_color));
        program.use_uniform_if_required("cameraPosition", *camera.position());
    }

    fn render_states(&self) -> RenderStates {
        RenderStates::default()
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Opaque
    }
}


/// Fractal cloud on a plane, fading towards its edges
pub struct NebulaMaterial {
    pub time: f32,
    pub color1: [f32; 3],
    pub color2: [f32; 3],
}

impl Material for NebulaMaterial {
    fn id(&self) -> u16 {
        NEBULA_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(NEBULA_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        uv_only()
    }

    fn use_uniforms(&self, program: &Program, _camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("time", self.time);
        program.use_uniform_if_required("color1", rgb(self.color1));
        program.use_uniform_if_required("color2", rgb(self.color2));
    }

    fn render_states(&self) -> RenderStates {
        transparent_double_sided()
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Transparent
    }
}


/// Slowly pulsing gradient behind the scene
pub struct BackdropMaterial {
    pub time: f32,
}

impl Material for BackdropMaterial {
    fn id(&self) -> u16 {
        BACKDROP_ID
    }

    fn fragment_shader_source(&self, _lights: &[&dyn Light]) -> String {
        with_common(BACKDROP_SOURCE)
    }

    fn fragment_attributes(&self) -> FragmentAttributes {
        uv_only()
    }

    fn use_uniforms(&self, program: &Program, _camera: &Camera, _lights: &[&dyn Light]) {
        program.use_uniform_if_required("time", self.time);
    }

    fn render_states(&self) -> RenderStates {
        transparent_double_sided()
    }

    fn material_type(&self) -> MaterialType {
        MaterialType::Transparent
    }
}
