#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use wasm_bindgen::prelude::*;

mod utils;
pub mod error;
pub mod config;
pub mod bootstrap;
pub mod dom;
pub mod interaction;
pub mod texture;
pub mod particles;
pub mod cosmos;
pub mod zen_text;
pub mod scene;
pub mod materials;
pub mod renderer;


#[wasm_bindgen(start)]
pub fn dummy_main() {
}


/// Mounts the page into `container_id`, loads the library manifest and starts the render loop.
///
/// `config_json` is an optional [config::SceneConfig] in JSON; an explicit
/// `container_id` takes precedence over the one in the configuration.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn run(container_id: Option<String>, config_json: Option<String>) -> Result<(), JsValue> {
    use crate::bootstrap::{bootstrap, ConsoleHost, DomScriptLoader, LibraryManifest, INIT_FAILED_MESSAGE};
    use crate::config::SceneConfig;

    utils::set_panic_hook();

    let mut config = match SceneConfig::from_json(config_json.as_deref().unwrap_or("")) {
        Ok(config) => config,
        Err(e) => {
            error!("run(): {}", e);
            let _ = dom::show_error_overlay(INIT_FAILED_MESSAGE);
            return Err(e.into());
        }
    };
    if let Some(id) = container_id {
        config.container_id = id;
    }

    if let Err(e) = dom::mount(&config.container_id) {
        error!("run(): {}", e);
        if config.show_error_overlay {
            let _ = dom::show_error_overlay(INIT_FAILED_MESSAGE);
        }
        return Err(e.into());
    }
    if let Err(e) = dom::show_loading() {
        warn!("run(): {}", e);
    }

    let manifest = if config.load_libraries { LibraryManifest::standard() } else { LibraryManifest::empty() };
    manifest.validate()?;

    let show_overlay = config.show_error_overlay;
    let result = if show_overlay {
        bootstrap(&DomScriptLoader, &manifest, &ConsoleHost, |report| renderer::main(config, report)).await
    } else {
        let report = bootstrap::load_libraries(&DomScriptLoader, &manifest, &ConsoleHost).await;
        renderer::main(config, report).await
    };

    result.map_err(|e| {
        error!("run(): {}", e);
        e.into()
    })
}
