//! The "ZEN" logo: block-letter geometry built from boxes, its floating
//! animation, the uniforms driving its shader and three additive glow shells.

use three_d::*;

use crate::scene::Transform;


/// Cap height of the letters in world units
pub const TEXT_SIZE: f32 = 6.0;
/// Extrusion depth
pub const TEXT_DEPTH: f32 = 2.0;
/// Rest position of the logo
pub const TEXT_POSITION: Vec3 = Vec3 { x: 0.0, y: 3.0, z: -5.0 };

const LETTER_WIDTH: f32 = 4.5;
const LETTER_GAP: f32 = 1.2;
const STROKE: f32 = 1.1;

pub const GLOW_LAYERS: usize = 3;


/// One box of a letter: center, half extents in the letter plane, rotation about z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub angle: f32,
}

impl Stroke {
    fn bar(center: Vec2, half_extents: Vec2) -> Self {
        Self { center, half_extents, angle: 0.0 }
    }

    fn between(from: Vec2, to: Vec2) -> Self {
        let d = to - from;
        Self {
            center: (from + to) * 0.5,
            half_extents: vec2(d.magnitude() * 0.5, STROKE * 0.5),
            angle: d.y.atan2(d.x),
        }
    }

    /// Matrix mapping the unit cube [-1, 1]^3 onto this stroke
    pub fn matrix(&self, depth: f32) -> Mat4 {
        Mat4::from_translation(vec3(self.center.x, self.center.y, 0.0))
            * Mat4::from_angle_z(radians(self.angle))
            * Mat4::from_nonuniform_scale(self.half_extents.x, self.half_extents.y, depth * 0.5)
    }
}


/// Strokes of "ZEN", centered on the origin
pub fn zen_strokes() -> Vec<Stroke> {
    let (h, w, t) = (TEXT_SIZE * 0.5, LETTER_WIDTH * 0.5, STROKE * 0.5);
    let advance = LETTER_WIDTH + LETTER_GAP;
    let mut strokes = Vec::with_capacity(10);

    // Z
    let x = -advance;
    strokes.push(Stroke::bar(vec2(x, h - t), vec2(w, t)));
    strokes.push(Stroke::bar(vec2(x, -h + t), vec2(w, t)));
    strokes.push(Stroke::between(vec2(x + w - t, h - 2.0 * t), vec2(x - w + t, -h + 2.0 * t)));

    // E
    let x = 0.0;
    strokes.push(Stroke::bar(vec2(x - w + t, 0.0), vec2(t, h)));
    strokes.push(Stroke::bar(vec2(x, h - t), vec2(w, t)));
    strokes.push(Stroke::bar(vec2(x - 0.1 * LETTER_WIDTH, 0.0), vec2(w * 0.8, t)));
    strokes.push(Stroke::bar(vec2(x, -h + t), vec2(w, t)));

    // N
    let x = advance;
    strokes.push(Stroke::bar(vec2(x - w + t, 0.0), vec2(t, h)));
    strokes.push(Stroke::bar(vec2(x + w - t, 0.0), vec2(t, h)));
    strokes.push(Stroke::between(vec2(x - w + 2.0 * t, h - t), vec2(x + w - 2.0 * t, -h + t)));

    strokes
}


/// Inputs of the logo's fragment shader
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextUniforms {
    pub time: f32,
    pub color_cycle: f32,
    pub intensity: f32,
}


/// A slightly larger copy of the logo drawn additively
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowLayer {
    pub index: usize,
    pub color_offset: f32,
    pub transform: Transform,
    /// growth relative to the logo, from the larger glyph size and depth
    pub size_factor: Vec3,
    pub time: f32,
}

impl GlowLayer {
    fn new(index: usize) -> Self {
        let i = index as f32;
        Self {
            index,
            color_offset: i * 0.33,
            transform: Transform::at(TEXT_POSITION),
            size_factor: vec3(
                (TEXT_SIZE + 0.1 + i * 0.2) / TEXT_SIZE,
                (TEXT_SIZE + 0.1 + i * 0.2) / TEXT_SIZE,
                (TEXT_DEPTH + 0.1 + i * 0.1) / TEXT_DEPTH,
            ),
            time: 0.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
            * Mat4::from_nonuniform_scale(self.size_factor.x, self.size_factor.y, self.size_factor.z)
    }
}


#[derive(Debug, Clone)]
pub struct ZenText {
    pub transform: Transform,
    pub uniforms: TextUniforms,
    pub strokes: Vec<Stroke>,
    pub glow: Vec<GlowLayer>,
}

impl Default for ZenText {
    fn default() -> Self {
        Self::new()
    }
}

impl ZenText {
    pub fn new() -> Self {
        Self {
            transform: Transform::at(TEXT_POSITION),
            uniforms: TextUniforms { time: 0.0, color_cycle: 0.0, intensity: 1.0 },
            strokes: zen_strokes(),
            glow: (0..GLOW_LAYERS).map(GlowLayer::new).collect(),
        }
    }

    /// Per-instance matrices of the letter boxes
    pub fn stroke_matrices(&self) -> Vec<Mat4> {
        self.strokes.iter().map(|s| s.matrix(TEXT_DEPTH)).collect()
    }

    pub fn matrix(&self) -> Mat4 {
        self.transform.matrix()
    }

    /// Sways, bobs and pulses the logo; `speed` is the interaction mode multiplier
    pub fn animate(&mut self, elapsed: f32, speed: f32) {
        let t = elapsed;
        self.transform.rotation = vec3((t * 0.3).sin() * 0.05, (t * 0.5).sin() * 0.2, (t * 0.2).sin() * 0.03);
        self.transform.position.y = TEXT_POSITION.y + t.sin() * 0.2;
        let s = 1.0 + 0.05 * (t * 1.5).sin();
        self.transform.scale = vec3(s, s, s);

        self.uniforms.time = t;
        self.uniforms.color_cycle += 0.008 * speed;
        self.uniforms.intensity = 0.5 + 0.5 * (t * 2.0).sin();

        for layer in &mut self.glow {
            let i = layer.index as f32;
            layer.transform.rotation.z += 0.01 * speed;
            layer.transform.rotation.x = (t * 0.2 + i).sin() * 0.05;
            let s = 1.0 + 0.15 * (t * 2.0 + i * 0.5).sin();
            layer.transform.scale = vec3(s, s, s);
            layer.time = t;
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_fit_the_cap_height() {
        let strokes = zen_strokes();
        assert_eq!(strokes.len(), 10);
        for s in &strokes {
            // corners of the rotated box stay within the glyph band
            let (c, sn) = (s.angle.cos().abs(), s.angle.sin().abs());
            let reach_y = s.half_extents.x * sn + s.half_extents.y * c;
            assert!(s.center.y.abs() + reach_y <= TEXT_SIZE * 0.5 + STROKE, "{:?}", s);
        }
    }

    #[test]
    fn layout_is_centered() {
        let strokes = zen_strokes();
        let mean_x: f32 = strokes.iter().map(|s| s.center.x).sum::<f32>() / strokes.len() as f32;
        assert!(mean_x.abs() < 0.5);
    }

    #[test]
    fn animation_follows_the_clock() {
        let mut text = ZenText::new();
        text.animate(1.0, 1.0);
        assert!((text.transform.rotation.y - 0.5_f32.sin() * 0.2).abs() < 1e-6);
        assert!((text.transform.position.y - (3.0 + 1.0_f32.sin() * 0.2)).abs() < 1e-6);
        assert!((text.uniforms.intensity - (0.5 + 0.5 * 2.0_f32.sin())).abs() < 1e-6);
        assert_eq!(text.uniforms.time, 1.0);
    }

    #[test]
    fn interactive_speed_doubles_color_cycling() {
        let mut idle = ZenText::new();
        let mut interactive = ZenText::new();
        for frame in 0..10 {
            idle.animate(frame as f32 / 60.0, 1.0);
            interactive.animate(frame as f32 / 60.0, 2.0);
        }
        assert!((idle.uniforms.color_cycle - 0.08).abs() < 1e-5);
        assert!((interactive.uniforms.color_cycle - 0.16).abs() < 1e-5);
        assert!((interactive.glow[0].transform.rotation.z - 0.2).abs() < 1e-5);
    }

    #[test]
    fn glow_layers_grow_outward() {
        let text = ZenText::new();
        assert_eq!(text.glow.len(), GLOW_LAYERS);
        for pair in text.glow.windows(2) {
            assert!(pair[1].size_factor.x > pair[0].size_factor.x);
            assert!(pair[1].color_offset > pair[0].color_offset);
        }
        assert!(text.glow[0].size_factor.x > 1.0);
    }
}
