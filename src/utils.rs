#[macro_export]
macro_rules! log {
    ( $( $t:tt )* ) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!( $( $t )* ).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("{}", format!( $( $t )* ));
    }}
}


#[macro_export]
macro_rules! warn {
    ( $( $t:tt )* ) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!( $( $t )* ).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("WARN: {}", format!( $( $t )* ));
    }}
}


#[macro_export]
macro_rules! error {
    ( $( $t:tt )* ) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!( $( $t )* ).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("ERROR: {}", format!( $( $t )* ));
    }}
}


/// Enable better error messages if our code ever panics
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}


/// A seed for the scene's random generator
pub fn random_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * u64::MAX as f64) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        0x5EED_2E4E
    }
}


/// Check if a float is zero
#[inline(always)]
pub fn is_float_zero(x: f32, threshold: f32) -> bool {
    x.abs() < threshold
}


/// Check if two floats are equal
#[inline(always)]
pub fn are_floats_equal(x: f32, y: f32, threshold: f32) -> bool {
    is_float_zero(x - y, threshold)
}


/// Converts HSL (hue in degrees, saturation and lightness in [0, 1]) to RGB in [0, 1]
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m]
}


/// Packs an RGB color in [0, 1] and an alpha in [0, 1] into RGBA8
#[inline(always)]
pub fn to_rgba8(rgb: [f32; 3], alpha: f32) -> [u8; 4] {
    // float-to-integer casts saturate
    [
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8,
        (alpha * 255.0).round() as u8,
    ]
}


/// Splits a 0xRRGGBB color into RGB in [0, 1]
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}
