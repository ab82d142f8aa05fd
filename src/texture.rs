//! Procedural texture for the ZEN letters.
//!
//! Five pattern styles repaint the whole surface every frame. The style is
//! chosen by time: `floor((time * 0.2) mod 5)`. Painting goes through the
//! [Painter] trait; in the browser that is a 2D canvas context whose pixels
//! are read back for the GPU texture.

use std::f32::consts::PI;
use rand::Rng;

use crate::utils::{hsl_to_rgb, to_rgba8};


/// Straight (non premultiplied) RGBA, components in [0, 1]
pub type Rgba = [f32; 4];

pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const TRANSPARENT: Rgba = [0.0, 0.0, 0.0, 0.0];


/// HSL color with alpha; hue in degrees
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let [r, g, b] = hsl_to_rgb(hue, saturation, lightness);
    [r, g, b, alpha]
}

/// CSS `rgba()` string for a canvas fill or stroke style
pub fn css(color: &Rgba) -> String {
    let [r, g, b, _] = to_rgba8([color[0], color[1], color[2]], color[3]);
    format!("rgba({},{},{},{})", r, g, b, color[3].clamp(0.0, 1.0))
}


/// What a shape is filled with
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    /// gradient along `start` -> `end`; stops are (offset in [0, 1], color)
    Linear { start: (f32, f32), end: (f32, f32), stops: Vec<(f32, Rgba)> },
    /// gradient from `center` (offset 0) out to `radius` (offset 1)
    Radial { center: (f32, f32), radius: f32, stops: Vec<(f32, Rgba)> },
}

impl Fill {
    /// True when every pixel the fill covers ends up fully opaque
    pub fn is_opaque(&self) -> bool {
        match self {
            Fill::Solid(c) => c[3] >= 1.0,
            Fill::Linear { stops, .. } | Fill::Radial { stops, .. } => {
                !stops.is_empty() && stops.iter().all(|(_, c)| c[3] >= 1.0)
            }
        }
    }
}


/// The 2D drawing surface the styles paint on. Coordinates are pixels, y down.
pub trait Painter {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Resets every pixel to transparent black
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &Fill);
    fn fill_circle(&mut self, center: (f32, f32), radius: f32, fill: &Fill);
    fn fill_triangle(&mut self, corners: [(f32, f32); 3], color: Rgba);
    fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: Rgba);

    fn fill(&mut self, fill: &Fill) {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0.0, 0.0, w, h, fill);
    }
}


/// The five pattern renderers, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureStyle {
    Gradient = 0,
    Geometric = 1,
    Fractal = 2,
    Circuit = 3,
    Cosmic = 4,
}

impl TextureStyle {
    pub const ALL: [TextureStyle; 5] = [
        TextureStyle::Gradient,
        TextureStyle::Geometric,
        TextureStyle::Fractal,
        TextureStyle::Circuit,
        TextureStyle::Cosmic,
    ];

    /// `floor((time * 0.2) mod 5)`: each style holds for five seconds
    pub fn at(time: f64) -> Self {
        let index = (time * 0.2).rem_euclid(5.0).floor() as usize;
        Self::ALL[index.min(4)]
    }

    pub fn index(self) -> usize {
        self as usize
    }
}


/// Which style the texture shows; repainted in full on every frame
#[derive(Debug, Clone)]
pub struct ProceduralTexture {
    size: usize,
    style: TextureStyle,
}

impl ProceduralTexture {
    pub fn new(size: usize) -> Self {
        Self { size, style: TextureStyle::Gradient }
    }

    /// Edge length of the square surface in pixels
    pub fn size(&self) -> usize {
        self.size
    }

    /// Style selected by the last [ProceduralTexture::advance]
    pub fn style(&self) -> TextureStyle {
        self.style
    }

    pub fn advance(&mut self, time: f64) -> TextureStyle {
        self.style = TextureStyle::at(time);
        self.style
    }

    /// Clears the surface and paints the current style at `time`
    pub fn paint<P: Painter, R: Rng>(&self, painter: &mut P, time: f64, rng: &mut R) {
        painter.clear();
        let t = time as f32;
        match self.style {
            TextureStyle::Gradient => paint_gradient(painter, t),
            TextureStyle::Geometric => paint_geometric(painter, t),
            TextureStyle::Fractal => paint_fractal(painter, t),
            TextureStyle::Circuit => paint_circuit(painter, t),
            TextureStyle::Cosmic => paint_cosmic(painter, t, rng),
        }
    }
}


/// Diagonal hue gradient with three flowing sine waves
fn paint_gradient<P: Painter>(painter: &mut P, time: f32) {
    let (w, h) = (painter.width(), painter.height());
    let base = (time * 20.0) % 360.0;
    painter.fill(&Fill::Linear {
        start: (0.0, 0.0),
        end: (w, h),
        stops: vec![
            (0.0, hsla(base, 1.0, 0.5, 1.0)),
            (0.5, hsla(base + 120.0, 1.0, 0.5, 1.0)),
            (1.0, hsla(base + 240.0, 1.0, 0.5, 1.0)),
        ],
    });

    for j in 0..3 {
        let jf = j as f32;
        let wave: Vec<(f32, f32)> = (0..w as usize)
            .step_by(5)
            .map(|x| {
                let x = x as f32;
                (x, h * (0.3 + jf * 0.2) + (x * 0.02 + time * 3.0 + jf).sin() * 20.0)
            })
            .collect();
        painter.stroke_polyline(&wave, 2.0, [1.0, 1.0, 1.0, 0.5]);
    }
}


/// Drifting tiling of squares, circles and triangles
fn paint_geometric<P: Painter>(painter: &mut P, time: f32) {
    painter.fill(&Fill::Solid(BLACK));
    let (w, h) = (painter.width() as i64, painter.height() as i64);
    const SIZE: i64 = 40;
    let size = SIZE as f32;
    let offset = (time * 10.0) % size;

    let mut x = -SIZE;
    while x < w + SIZE {
        let mut y = -SIZE;
        while y < h + SIZE {
            let (xf, yf) = (x as f32, y as f32);
            // negative operands keep their sign, leaving those cells empty
            let shape = ((xf + yf + time * 50.0) / size).floor() as i64 % 3;
            let color = hsla((xf + yf + time * 30.0) % 360.0, 1.0, 0.5, 1.0);
            let (ox, oy) = (xf + offset, yf + offset);
            match shape {
                0 => painter.fill_rect(ox, oy, size / 2.0, size / 2.0, &Fill::Solid(color)),
                1 => painter.fill_circle((ox + size / 4.0, oy + size / 4.0), size / 4.0, &Fill::Solid(color)),
                2 => painter.fill_triangle(
                    [(ox, oy), (ox + size / 2.0, oy), (ox + size / 4.0, oy + size / 2.0)],
                    color,
                ),
                _ => {}
            }
            y += SIZE;
        }
        x += SIZE;
    }
}


/// Radial backdrop with five shrinking spirals
fn paint_fractal<P: Painter>(painter: &mut P, time: f32) {
    let (w, h) = (painter.width(), painter.height());
    let center = (w / 2.0, h / 2.0);
    painter.fill(&Fill::Radial {
        center,
        radius: w / 2.0,
        stops: vec![
            (0.0, hsla((time * 30.0) % 360.0, 1.0, 0.2, 1.0)),
            (1.0, hsla((time * 30.0 + 60.0) % 360.0, 1.0, 0.05, 1.0)),
        ],
    });

    const ITERATIONS: usize = 5;
    const SCALE: f32 = 100.0;
    let turns = PI * 10.0;
    for i in 0..ITERATIONS {
        let fi = i as f32;
        let falloff = 1.0 - fi / ITERATIONS as f32;
        let size = SCALE * falloff;
        let color = hsla((time * 50.0 + fi * 30.0) % 360.0, 1.0, 0.5, 0.5);
        let breathe = 0.5 + 0.5 * (time + fi).sin();

        let mut spiral = Vec::with_capacity(320);
        let mut angle = 0.0_f32;
        while angle < turns {
            let radius = size * (1.0 - angle / turns) * breathe;
            spiral.push((
                center.0 + (angle + time + fi).cos() * radius,
                center.1 + (angle + time + fi).sin() * radius,
            ));
            angle += 0.1;
        }
        painter.stroke_polyline(&spiral, 2.0 * falloff, color);
    }
}


const CIRCUIT_GRID: usize = 30;
const CIRCUIT_NODE: f32 = 4.0;

/// Circuit-board grid with glowing, occasionally pulsing nodes
fn paint_circuit<P: Painter>(painter: &mut P, time: f32) {
    painter.fill(&Fill::Solid([
        0.0,
        (20.0 + time.sin() * 10.0) / 255.0,
        (50.0 + (time * 0.5).sin() * 20.0) / 255.0,
        1.0,
    ]));
    let trace = [
        0.0,
        (150.0 + (time * 2.0).sin() * 50.0) / 255.0,
        (200.0 + time.sin() * 55.0) / 255.0,
        0.8,
    ];

    let grid = CIRCUIT_GRID as f32;
    let (w, h) = (painter.width() as usize, painter.height() as usize);
    for x in (0..w).step_by(CIRCUIT_GRID) {
        for y in (0..h).step_by(CIRCUIT_GRID) {
            let (xf, yf) = (x as f32, y as f32);
            let to = if (xf * yf * 0.001 + time).sin() > 0.0 { (xf + grid, yf) } else { (xf, yf + grid) };
            painter.stroke_polyline(&[(xf, yf), to], 2.0, trace);

            if (xf * 0.1 + yf * 0.1 + time * 2.0).sin() > 0.7 {
                let glow = (200.0 + (time * 3.0 + xf * yf * 0.001).sin() * 55.0) / 255.0;
                painter.fill_circle((xf, yf), CIRCUIT_NODE, &Fill::Solid([0.0, glow, 1.0, 0.8]));
                if (xf * 0.2 + yf * 0.2 + time * 3.0).sin() > 0.9 {
                    let pulse = CIRCUIT_NODE * (1.0 + (time * 5.0).sin() * 0.5);
                    painter.fill_circle((xf, yf), pulse, &Fill::Solid([1.0, 1.0, 1.0, 0.8]));
                }
            }
        }
    }
}


const COSMIC_STARS: usize = 200;
const COSMIC_CLOUDS: usize = 5;

/// Random starfield under five drifting nebula clouds
fn paint_cosmic<P: Painter, R: Rng>(painter: &mut P, time: f32, rng: &mut R) {
    painter.fill(&Fill::Solid(BLACK));
    let (w, h) = (painter.width(), painter.height());

    for _ in 0..COSMIC_STARS {
        let x = rng.gen::<f32>() * w;
        let y = rng.gen::<f32>() * h;
        let size = rng.gen::<f32>() * 2.0 + 0.5;
        let brightness = rng.gen::<f32>() * 0.5 + 0.5;
        painter.fill_circle((x, y), size, &Fill::Solid([1.0, 1.0, 1.0, brightness]));
    }

    for i in 0..COSMIC_CLOUDS {
        let fi = i as f32;
        let center = (
            w * (0.2 + 0.6 * (time * 0.1 + fi).sin()),
            h * (0.2 + 0.6 * (time * 0.1 + fi).cos()),
        );
        let radius = 100.0 + 50.0 * (time * 0.2 + fi).sin();
        let hue1 = (time * 20.0 + fi * 60.0) % 360.0;
        let hue2 = (hue1 + 30.0) % 360.0;
        let cloud = Fill::Radial {
            center,
            radius,
            stops: vec![
                (0.0, hsla(hue1, 1.0, 0.5, 0.3)),
                (0.5, hsla(hue2, 1.0, 0.3, 0.1)),
                (1.0, TRANSPARENT),
            ],
        };
        painter.fill_circle(center, radius, &cloud);
    }
}


#[cfg(target_arch = "wasm32")]
pub use self::web::CanvasPainter;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::f64::consts::TAU;

    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

    use super::*;
    use crate::error::{Result, ZenError};

    fn set_style(ctx: &CanvasRenderingContext2d, property: &str, value: &JsValue) {
        let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str(property), value);
    }

    fn with_stops(gradient: CanvasGradient, stops: &[(f32, Rgba)]) -> CanvasGradient {
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(*offset, &css(color));
        }
        gradient
    }

    /// Offscreen 2D canvas; never attached to the document
    pub struct CanvasPainter {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        rgba: Vec<[u8; 4]>,
    }

    impl CanvasPainter {
        pub fn new(size: usize) -> Result<Self> {
            let canvas = crate::dom::document()?
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| ZenError::Dom("canvas element expected".to_string()))?;
            canvas.set_width(size as u32);
            canvas.set_height(size as u32);
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| ZenError::Dom("2d context unavailable".to_string()))?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| ZenError::Dom("2d context expected".to_string()))?;
            Ok(Self { canvas, ctx, rgba: Vec::with_capacity(size * size) })
        }

        /// Reads the painted pixels back, row 0 at the top
        pub fn pixels(&mut self) -> Result<&[[u8; 4]]> {
            let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
            let data = self.ctx.get_image_data(0.0, 0.0, w, h)?.data();
            self.rgba.clear();
            self.rgba.extend(data.0.chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]]));
            Ok(&self.rgba)
        }

        fn set_fill(&self, fill: &Fill) {
            let style: JsValue = match fill {
                Fill::Solid(color) => JsValue::from_str(&css(color)),
                Fill::Linear { start, end, stops } => {
                    let gradient = self.ctx.create_linear_gradient(
                        start.0 as f64,
                        start.1 as f64,
                        end.0 as f64,
                        end.1 as f64,
                    );
                    with_stops(gradient, stops).into()
                }
                Fill::Radial { center, radius, stops } => {
                    let (x, y) = (center.0 as f64, center.1 as f64);
                    match self.ctx.create_radial_gradient(x, y, 0.0, x, y, *radius as f64) {
                        Ok(gradient) => with_stops(gradient, stops).into(),
                        // negative radius: nothing sensible to paint
                        Err(_) => JsValue::from_str(&css(&TRANSPARENT)),
                    }
                }
            };
            set_style(&self.ctx, "fillStyle", &style);
        }
    }

    impl Painter for CanvasPainter {
        fn width(&self) -> f32 {
            self.canvas.width() as f32
        }

        fn height(&self) -> f32 {
            self.canvas.height() as f32
        }

        fn clear(&mut self) {
            self.ctx.clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &Fill) {
            self.set_fill(fill);
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        fn fill_circle(&mut self, center: (f32, f32), radius: f32, fill: &Fill) {
            if radius <= 0.0 {
                return;
            }
            self.set_fill(fill);
            self.ctx.begin_path();
            let _ = self.ctx.arc(center.0 as f64, center.1 as f64, radius as f64, 0.0, TAU);
            self.ctx.fill();
        }

        fn fill_triangle(&mut self, corners: [(f32, f32); 3], color: Rgba) {
            self.set_fill(&Fill::Solid(color));
            self.ctx.begin_path();
            self.ctx.move_to(corners[0].0 as f64, corners[0].1 as f64);
            self.ctx.line_to(corners[1].0 as f64, corners[1].1 as f64);
            self.ctx.line_to(corners[2].0 as f64, corners[2].1 as f64);
            self.ctx.close_path();
            self.ctx.fill();
        }

        fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, color: Rgba) {
            let Some((first, rest)) = points.split_first() else {
                return;
            };
            set_style(&self.ctx, "strokeStyle", &JsValue::from_str(&css(&color)));
            self.ctx.set_line_width(width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(first.0 as f64, first.1 as f64);
            for p in rest {
                self.ctx.line_to(p.0 as f64, p.1 as f64);
            }
            self.ctx.stroke();
        }
    }
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Draw {
        Clear,
        Rect { x: f32, y: f32, w: f32, h: f32, fill: Fill },
        Circle { center: (f32, f32), radius: f32, fill: Fill },
        Triangle([(f32, f32); 3]),
        Polyline { points: usize, width: f32 },
    }

    /// Records what a style draws
    pub(crate) struct Sketch {
        pub size: f32,
        pub draws: Vec<Draw>,
    }

    impl Sketch {
        pub(crate) fn new(size: usize) -> Self {
            Self { size: size as f32, draws: Vec::new() }
        }

        fn count(&self, pred: impl Fn(&Draw) -> bool) -> usize {
            self.draws.iter().filter(|d| pred(d)).count()
        }
    }

    impl Painter for Sketch {
        fn width(&self) -> f32 {
            self.size
        }
        fn height(&self) -> f32 {
            self.size
        }
        fn clear(&mut self) {
            self.draws.clear();
            self.draws.push(Draw::Clear);
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: &Fill) {
            self.draws.push(Draw::Rect { x, y, w, h, fill: fill.clone() });
        }
        fn fill_circle(&mut self, center: (f32, f32), radius: f32, fill: &Fill) {
            self.draws.push(Draw::Circle { center, radius, fill: fill.clone() });
        }
        fn fill_triangle(&mut self, corners: [(f32, f32); 3], _color: Rgba) {
            self.draws.push(Draw::Triangle(corners));
        }
        fn stroke_polyline(&mut self, points: &[(f32, f32)], width: f32, _color: Rgba) {
            self.draws.push(Draw::Polyline { points: points.len(), width });
        }
    }

    fn painted(style: TextureStyle, size: usize, seed: u64) -> Sketch {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut texture = ProceduralTexture::new(size);
        let time = style.index() as f64 * 5.0 + 0.5;
        assert_eq!(texture.advance(time), style);
        let mut sketch = Sketch::new(size);
        texture.paint(&mut sketch, time, &mut rng);
        sketch
    }

    #[test]
    fn style_cycles_every_five_seconds() {
        let expected = [0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 0];
        for (step, want) in expected.iter().enumerate() {
            let time = step as f64 * 5.0 + 2.5;
            assert_eq!(TextureStyle::at(time).index(), *want, "time {}", time);
        }
        assert_eq!(TextureStyle::at(0.0), TextureStyle::Gradient);
        assert_eq!(TextureStyle::at(4.99), TextureStyle::Gradient);
        assert_eq!(TextureStyle::at(24.99), TextureStyle::Cosmic);
    }

    #[test]
    fn every_style_clears_then_covers_the_surface() {
        for style in TextureStyle::ALL {
            let sketch = painted(style, 128, 1);
            assert_eq!(sketch.draws[0], Draw::Clear, "{:?}", style);
            match &sketch.draws[1] {
                Draw::Rect { x, y, w, h, fill } => {
                    assert_eq!((*x, *y, *w, *h), (0.0, 0.0, 128.0, 128.0), "{:?}", style);
                    assert!(fill.is_opaque(), "{:?}", style);
                }
                other => panic!("{:?} opened with {:?}", style, other),
            }
        }
    }

    #[test]
    fn repainting_starts_from_a_clear_surface() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut texture = ProceduralTexture::new(64);
        let mut sketch = Sketch::new(64);
        texture.advance(0.5);
        texture.paint(&mut sketch, 0.5, &mut rng);
        let first = sketch.draws.clone();
        texture.paint(&mut sketch, 0.5, &mut rng);
        assert_eq!(first, sketch.draws);
    }

    #[test]
    fn gradient_draws_three_waves() {
        let sketch = painted(TextureStyle::Gradient, 100, 1);
        assert!(matches!(&sketch.draws[1], Draw::Rect { fill: Fill::Linear { stops, .. }, .. } if stops.len() == 3));
        // x = 0, 5, .., 95
        assert_eq!(sketch.count(|d| *d == Draw::Polyline { points: 20, width: 2.0 }), 3);
    }

    #[test]
    fn geometric_cells_drift_with_time() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut texture = ProceduralTexture::new(80);
        texture.advance(5.5);
        let mut sketch = Sketch::new(80);
        texture.paint(&mut sketch, 5.5, &mut rng);
        // offset = 55 mod 40
        let offset = 15.0;
        let cells = sketch.draws[2..].iter().filter(|d| match d {
            Draw::Rect { x, y, .. } => ((x - offset) % 40.0).abs() < 1e-3 && ((y - offset) % 40.0).abs() < 1e-3,
            Draw::Triangle([(x, y), ..]) => ((x - offset) % 40.0).abs() < 1e-3 && ((y - offset) % 40.0).abs() < 1e-3,
            Draw::Circle { center, radius, .. } => {
                *radius == 10.0 && ((center.0 - offset - 10.0) % 40.0).abs() < 1e-3
            }
            _ => false,
        });
        assert_eq!(cells.count(), sketch.draws.len() - 2);
        assert!(sketch.draws.len() > 2);
    }

    #[test]
    fn fractal_draws_five_thinning_spirals() {
        let sketch = painted(TextureStyle::Fractal, 128, 1);
        assert!(matches!(&sketch.draws[1], Draw::Rect { fill: Fill::Radial { radius, .. }, .. } if *radius == 64.0));
        let widths: Vec<f32> = sketch
            .draws
            .iter()
            .filter_map(|d| match d {
                Draw::Polyline { width, .. } => Some(*width),
                _ => None,
            })
            .collect();
        assert_eq!(widths.len(), 5);
        assert!(widths.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn circuit_traces_one_segment_per_cell() {
        let sketch = painted(TextureStyle::Circuit, 90, 1);
        // 0, 30, 60 on each axis
        assert_eq!(sketch.count(|d| matches!(d, Draw::Polyline { points: 2, width } if *width == 2.0)), 9);
    }

    #[test]
    fn cosmic_scatters_stars_under_clouds() {
        let sketch = painted(TextureStyle::Cosmic, 256, 7);
        let stars = sketch.count(|d| matches!(d, Draw::Circle { fill: Fill::Solid(_), radius, .. } if *radius >= 0.5 && *radius <= 2.5));
        let clouds = sketch.count(|d| matches!(d, Draw::Circle { fill: Fill::Radial { stops, .. }, .. } if stops[2].1 == TRANSPARENT));
        assert_eq!(stars, COSMIC_STARS);
        assert_eq!(clouds, COSMIC_CLOUDS);
        // stars first, clouds on top
        assert!(matches!(sketch.draws.last(), Some(Draw::Circle { fill: Fill::Radial { .. }, .. })));
    }

    #[test]
    fn styles_differ() {
        let sketches: Vec<Vec<Draw>> = TextureStyle::ALL.iter().map(|s| painted(*s, 64, 3).draws).collect();
        for i in 0..sketches.len() {
            for j in i + 1..sketches.len() {
                assert_ne!(sketches[i], sketches[j], "styles {} and {}", i, j);
            }
        }
    }

    #[test]
    fn css_colors() {
        assert_eq!(css(&BLACK), "rgba(0,0,0,1)");
        assert_eq!(css(&[1.0, 1.0, 1.0, 0.5]), "rgba(255,255,255,0.5)");
        assert!(Fill::Solid(BLACK).is_opaque());
        assert!(!Fill::Solid([1.0, 1.0, 1.0, 0.8]).is_opaque());
    }
}
