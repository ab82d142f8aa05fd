//! Best-effort, strictly serial loading of the external library manifest,
//! followed by an unconditional hand-off to scene initialization.

use std::future::Future;
use thiserror::Error;

use crate::error::{Result, ZenError};


/// Banner text shown when initialization fails after the libraries settled
pub const INIT_FAILED_MESSAGE: &str = "Failed to initialize visualization";


/// One external script and the libraries that must be evaluated before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibrarySpec {
    pub name: &'static str,
    pub url: &'static str,
    pub depends_on: &'static [&'static str],
}


const STANDARD_LIBRARIES: [LibrarySpec; 13] = [
    LibrarySpec {
        name: "three.js",
        url: "https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js",
        depends_on: &[],
    },
    LibrarySpec {
        name: "OrbitControls",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/controls/OrbitControls.js",
        depends_on: &["three.js"],
    },
    LibrarySpec {
        name: "GLTFLoader",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/loaders/GLTFLoader.js",
        depends_on: &["three.js"],
    },
    LibrarySpec {
        name: "Tween.js",
        url: "https://cdnjs.cloudflare.com/ajax/libs/tween.js/18.6.4/tween.umd.js",
        depends_on: &[],
    },
    LibrarySpec {
        name: "EffectComposer",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/postprocessing/EffectComposer.js",
        depends_on: &["three.js"],
    },
    LibrarySpec {
        name: "RenderPass",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/postprocessing/RenderPass.js",
        depends_on: &["EffectComposer"],
    },
    LibrarySpec {
        name: "UnrealBloomPass",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/postprocessing/UnrealBloomPass.js",
        depends_on: &["EffectComposer"],
    },
    LibrarySpec {
        name: "ShaderPass",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/postprocessing/ShaderPass.js",
        depends_on: &["EffectComposer"],
    },
    LibrarySpec {
        name: "CopyShader",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/shaders/CopyShader.js",
        depends_on: &["three.js"],
    },
    LibrarySpec {
        name: "LuminosityHighPassShader",
        url: "https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/shaders/LuminosityHighPassShader.js",
        depends_on: &["three.js"],
    },
    LibrarySpec {
        name: "cannon.js",
        url: "https://cdnjs.cloudflare.com/ajax/libs/cannon.js/0.6.2/cannon.min.js",
        depends_on: &[],
    },
    LibrarySpec {
        name: "plotly.js",
        url: "https://cdn.plot.ly/plotly-2.26.2.min.js",
        depends_on: &[],
    },
    LibrarySpec {
        name: "math.js",
        url: "https://cdnjs.cloudflare.com/ajax/libs/mathjs/9.5.0/math.js",
        depends_on: &[],
    },
];


/// Ordered list of libraries to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryManifest {
    libraries: Vec<LibrarySpec>,
}

impl LibraryManifest {
    /// The thirteen libraries of the stock visualization, in load order
    pub fn standard() -> Self {
        Self { libraries: STANDARD_LIBRARIES.to_vec() }
    }

    pub fn empty() -> Self {
        Self { libraries: Vec::new() }
    }

    pub fn new(libraries: Vec<LibrarySpec>) -> Self {
        Self { libraries }
    }

    pub fn libraries(&self) -> &[LibrarySpec] {
        &self.libraries
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Checks that names are unique and every dependency is listed before its dependent
    pub fn validate(&self) -> Result<()> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.libraries.len());
        for lib in &self.libraries {
            if seen.contains(&lib.name) {
                return Err(ZenError::Manifest(format!("{} is listed twice", lib.name)));
            }
            for dep in lib.depends_on {
                if !seen.contains(dep) {
                    return Err(ZenError::Manifest(format!(
                        "{} depends on {}, which is not loaded before it",
                        lib.name, dep
                    )));
                }
            }
            seen.push(lib.name);
        }
        Ok(())
    }
}


/// Why a single library failed to load. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("could not inject a script tag for {name}: {reason}")]
    Inject { name: &'static str, reason: String },

    #[error("failed to load {name}: {url}")]
    Rejected { name: &'static str, url: &'static str },
}


/// Fetches and evaluates one script
pub trait ScriptLoader {
    fn load(&self, lib: &LibrarySpec) -> impl Future<Output = std::result::Result<(), LoadError>>;
}


/// Where the bootstrapper reports progress
pub trait BootHost {
    fn info(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn show_overlay(&self, msg: &str);
}


/// Outcome of one load attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub library: LibrarySpec,
    pub result: std::result::Result<(), LoadError>,
}


/// Attempts in the order they were made
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub outcomes: Vec<LoadOutcome>,
}

impl LoadReport {
    pub fn attempts(&self) -> usize {
        self.outcomes.len()
    }

    pub fn loaded(&self) -> impl Iterator<Item = &LibrarySpec> {
        self.outcomes.iter().filter(|o| o.result.is_ok()).map(|o| &o.library)
    }

    pub fn failed(&self) -> impl Iterator<Item = &LibrarySpec> {
        self.outcomes.iter().filter(|o| o.result.is_err()).map(|o| &o.library)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded().any(|lib| lib.name == name)
    }
}


/// Loads every library once, one at a time. Failures are reported and skipped.
pub async fn load_libraries<L: ScriptLoader, H: BootHost>(
    loader: &L,
    manifest: &LibraryManifest,
    host: &H,
) -> LoadReport {
    let mut report = LoadReport::default();
    for lib in manifest.libraries() {
        let result = loader.load(lib).await;
        match &result {
            Ok(()) => host.info(&format!("Loaded {}", lib.name)),
            Err(e) => host.warn(&format!("Failed to load {}: {} ({})", lib.name, lib.url, e)),
        }
        report.outcomes.push(LoadOutcome { library: *lib, result });
    }
    report
}


/// Loads the manifest, then runs `init` whatever the outcome.
///
/// An `init` error is the only thing that puts the banner on screen.
pub async fn bootstrap<L, H, F, Fut>(
    loader: &L,
    manifest: &LibraryManifest,
    host: &H,
    init: F,
) -> Result<()>
where
    L: ScriptLoader,
    H: BootHost,
    F: FnOnce(LoadReport) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let report = load_libraries(loader, manifest, host).await;
    let failed = report.failed().count();
    if failed > 0 {
        host.warn(&format!("{} of {} libraries failed to load", failed, report.attempts()));
    }

    match init(report).await {
        Ok(()) => Ok(()),
        Err(e) => {
            host.show_overlay(INIT_FAILED_MESSAGE);
            Err(e)
        }
    }
}


/// Reports to the browser console and the on-page banner
pub struct ConsoleHost;

impl BootHost for ConsoleHost {
    fn info(&self, msg: &str) {
        crate::log!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        crate::warn!("{}", msg);
    }

    fn show_overlay(&self, msg: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Err(e) = crate::dom::show_error_overlay(msg) {
            crate::error!("could not show the error banner: {}", e);
        }
        #[cfg(not(target_arch = "wasm32"))]
        crate::error!("{}", msg);
    }
}


/// Injects `<script>` tags into `<head>` and waits for them to settle
#[cfg(target_arch = "wasm32")]
pub struct DomScriptLoader;

#[cfg(target_arch = "wasm32")]
impl DomScriptLoader {
    fn inject(lib: &LibrarySpec) -> std::result::Result<js_sys::Promise, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
        let head = document
            .head()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("no <head>"))?;
        let script = document
            .create_element("script")?
            .dyn_into::<web_sys::HtmlScriptElement>()?;
        script.set_src(lib.url);

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            script.set_onload(Some(&resolve));
            script.set_onerror(Some(&reject));
        });
        head.append_child(&script)?;
        Ok(promise)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScriptLoader for DomScriptLoader {
    fn load(&self, lib: &LibrarySpec) -> impl Future<Output = std::result::Result<(), LoadError>> {
        let lib = *lib;
        let injected = Self::inject(&lib);
        async move {
            let promise = injected.map_err(|e| LoadError::Inject {
                name: lib.name,
                reason: format!("{:?}", e),
            })?;
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|_| LoadError::Rejected { name: lib.name, url: lib.url })
        }
    }
}
