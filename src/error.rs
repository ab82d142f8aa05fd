use thiserror::Error;


/// Errors that abort scene construction or rendering.
///
/// Library load failures are not represented here; see [crate::bootstrap::LoadError].
#[derive(Debug, Error)]
pub enum ZenError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("no `document` exists on window")]
    NoDocument,

    #[error("element not found: #{0}")]
    MissingElement(&'static str),

    #[error("DOM operation failed: {0}")]
    Dom(String),

    #[error("could not create the render window: {0}")]
    Window(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("texture buffer has {actual} pixels, expected {expected}")]
    TextureSize { expected: usize, actual: usize },

    #[error("library manifest: {0}")]
    Manifest(String),
}


#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ZenError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        ZenError::Dom(format!("{:?}", value))
    }
}


#[cfg(target_arch = "wasm32")]
impl From<ZenError> for wasm_bindgen::JsValue {
    fn from(e: ZenError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}


pub type Result<T> = std::result::Result<T, ZenError>;
