//! Page furniture around the canvas: markup, stylesheet, tooltip and the
//! error banner.

/// Ids the injected markup guarantees
pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const CONTAINER_ID: &str = "container";
pub const MENU_CONTAINER_ID: &str = "menu-container";
pub const TOOLTIP_ID: &str = "tooltip";
pub const BOTTOM_ARROW_ID: &str = "bottom-arrow";
pub const LEFT_ARROW_ID: &str = "left-arrow";

pub const LOADING_TEXT: &str = "Loading ZEN visualization...";
pub const HINT_TEXT: &str = "Double-click to interact with ZEN";

/// (button id, label, target) of the three outbound menu links
pub const MENU_LINKS: [(&str, &str, &str); 3] = [
    ("left-button", "Quantum Times", "https://www.zenai.world/blog"),
    ("center-button", "My Account", "https://www.zenai.world/zenaccount/my/my-accountinto"),
    ("right-button", "ZenX", "https://www.zenai.world/zenx"),
];

const HINT_DELAY: f64 = 2.0;
const HINT_DURATION: f64 = 5.0;
const MODE_MESSAGE_DURATION: f64 = 2.0;


/// Builds the markup injected into the host container
pub fn markup() -> String {
    let links: String = MENU_LINKS
        .iter()
        .map(|(id, label, href)| {
            format!(r#"<a class="curved-button" id="{id}" href="{href}" target="_blank">{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("\n    ");
    format!(
        r#"<div id="{CANVAS_CONTAINER_ID}">
  <div id="{CONTAINER_ID}"></div>
</div>
<div id="{MENU_CONTAINER_ID}">
    {links}
</div>
<div class="scroll-arrow" id="{BOTTOM_ARROW_ID}">&#x2193;</div>
<div class="scroll-arrow" id="{LEFT_ARROW_ID}">&#x2193;</div>
<div id="{TOOLTIP_ID}">{HINT_TEXT}</div>"#
    )
}


pub const STYLESHEET: &str = r#"
html, body { margin: 0; padding: 0; overflow: hidden; font-family: 'Quantum', sans-serif; background: #000; }
#canvas-container { position: relative; width: 100%; height: 100vh; }
@media (min-width: 1024px) { #canvas-container { height: 80vh; } }
#container { width: 100%; height: 100%; cursor: pointer; }
canvas { display: block; filter: blur(0.5px) brightness(1.2) contrast(1.1); }
#menu-container { position: fixed; bottom: 0; left: 0; width: 100%; height: 300px; pointer-events: auto; z-index: 10000; }
.curved-button {
  position: absolute; background: linear-gradient(45deg, #ff0099, #493240, #00ffff); background-size: 200% 200%;
  animation: gradientAnimation 5s ease infinite; padding: 16px 32px; color: #fff; text-decoration: none;
  font-size: 1.5em; border-radius: 10px; box-shadow: 0 4px 15px rgba(0,0,0,0.2); transition: transform 0.3s;
}
.curved-button:hover { transform: scale(1.1); }
#center-button { left: 50%; bottom: 20px; transform: translateX(-50%); }
#left-button { left: 5%; bottom: 120px; }
#right-button { right: 5%; bottom: 120px; }
@keyframes gradientAnimation { 0% { background-position: 0% 50%; } 50% { background-position: 100% 50%; } 100% { background-position: 0% 50%; } }
.scroll-arrow {
  position: fixed; font-size: 3.5em; cursor: pointer; animation: bounce 2s infinite;
  background: linear-gradient(45deg, #00ffff, #ff00ff); -webkit-background-clip: text; -webkit-text-fill-color: transparent; z-index: 10000;
}
#bottom-arrow { bottom: 320px; left: 50%; transform: translateX(-50%); }
#left-arrow { bottom: 320px; left: 5%; }
@keyframes bounce { 0%,20%,50%,80%,100% { transform: translateY(0); } 40% { transform: translateY(-10px); } 60% { transform: translateY(-5px); } }
#tooltip {
  position: fixed; top: 20px; left: 50%; transform: translateX(-50%); background: rgba(0, 0, 0, 0.7); color: #00ffff;
  padding: 10px 20px; border-radius: 20px; font-size: 1.2em; z-index: 10000; opacity: 0; transition: opacity 0.5s; pointer-events: none;
}
@media (max-width: 600px) {
  #menu-container {
    position: fixed; bottom: 0; left: 0; width: 100%; height: auto; padding: 10px 0; background: rgba(0, 0, 0, 0.5);
    display: flex; flex-direction: row; align-items: center; justify-content: space-around;
  }
  .curved-button { position: static; width: 30%; margin: 0; font-size: 0.9em; text-align: center; box-sizing: border-box; padding: 8px 0; }
  #center-button, #left-button, #right-button { left: auto !important; bottom: auto !important; transform: none !important; }
}
"#;


/// Tooltip text and the time window (scene seconds) it is visible in
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    text: String,
    visible_from: f64,
    visible_until: f64,
    dirty: bool,
    /// opacity last written to the element
    shown: Option<f32>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self {
            text: LOADING_TEXT.to_string(),
            visible_from: 0.0,
            visible_until: f64::INFINITY,
            dirty: true,
            shown: None,
        }
    }
}

impl Tooltip {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shows `text` during [from, from + duration)
    pub fn schedule(&mut self, text: &str, from: f64, duration: f64) {
        self.text = text.to_string();
        self.visible_from = from;
        self.visible_until = from + duration;
        self.dirty = true;
    }

    /// Swaps the loading message for the hint, which appears two seconds later for five
    pub fn scene_ready(&mut self, now: f64) {
        self.schedule(HINT_TEXT, now + HINT_DELAY, HINT_DURATION);
    }

    /// Announces a mode change for two seconds
    pub fn announce(&mut self, text: &str, now: f64) {
        self.schedule(text, now, MODE_MESSAGE_DURATION);
    }

    pub fn opacity(&self, now: f64) -> f32 {
        if now >= self.visible_from && now < self.visible_until { 1.0 } else { 0.0 }
    }

    /// True once after every text change
    pub fn take_text_change(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The opacity at `now` if it differs from the one last taken
    pub fn take_opacity_change(&mut self, now: f64) -> Option<f32> {
        let opacity = self.opacity(now);
        if self.shown == Some(opacity) {
            return None;
        }
        self.shown = Some(opacity);
        Some(opacity)
    }
}


#[cfg(target_arch = "wasm32")]
pub use self::web::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{prelude::*, JsCast};
    use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

    use super::*;
    use crate::error::{Result, ZenError};

    pub fn window() -> Result<Window> {
        web_sys::window().ok_or(ZenError::NoWindow)
    }

    pub fn document() -> Result<Document> {
        window()?.document().ok_or(ZenError::NoDocument)
    }

    pub fn element(id: &'static str) -> Result<HtmlElement> {
        document()?
            .get_element_by_id(id)
            .ok_or(ZenError::MissingElement(id))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ZenError::Dom(format!("#{} is not an HTML element", id)))
    }

    /// Vertical scroll offset of the page in CSS pixels
    pub fn scroll_y() -> f64 {
        web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
    }

    /// Injects the markup into the host element and the stylesheet into `<head>`
    pub fn mount(container_id: &str) -> Result<()> {
        let document = document()?;
        let host = document
            .get_element_by_id(container_id)
            .ok_or_else(|| ZenError::Dom(format!("host element #{} not found", container_id)))?;
        host.set_inner_html(&markup());

        let style = document.create_element("style")?;
        style.set_text_content(Some(STYLESHEET));
        document.head().ok_or(ZenError::NoDocument)?.append_child(&style)?;

        for id in [BOTTOM_ARROW_ID, LEFT_ARROW_ID] {
            let arrow = element(id)?;
            let on_click = Closure::wrap(Box::new(move || {
                if let Err(e) = scroll_down() {
                    crate::warn!("scroll failed: {}", e);
                }
            }) as Box<dyn FnMut()>);
            arrow.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
            on_click.forget();
        }

        Ok(())
    }

    /// Smoothly scrolls the page down one viewport height
    pub fn scroll_down() -> Result<()> {
        let window = window()?;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0);
        let options = ScrollToOptions::new();
        options.set_top(height);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    /// Writes whatever changed in the tooltip state to its element
    pub fn sync_tooltip(el: &HtmlElement, tooltip: &mut Tooltip, now: f64) -> Result<()> {
        if tooltip.take_text_change() {
            el.set_text_content(Some(tooltip.text()));
        }
        if let Some(opacity) = tooltip.take_opacity_change(now) {
            el.style().set_property("opacity", &opacity.to_string())?;
        }
        Ok(())
    }

    /// Shows the loading message straight away, before the scene clock exists
    pub fn show_loading() -> Result<()> {
        let el = element(TOOLTIP_ID)?;
        el.set_text_content(Some(LOADING_TEXT));
        el.style().set_property("opacity", "1")?;
        Ok(())
    }

    /// Fixed, centered banner with a generic message
    pub fn show_error_overlay(message: &str) -> Result<()> {
        let document = document()?;
        let banner = document
            .create_element("div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| ZenError::Dom("banner is not an HTML element".to_string()))?;
        let style = banner.style();
        for (property, value) in [
            ("position", "fixed"),
            ("top", "50%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%)"),
            ("background", "rgba(0, 0, 0, 0.8)"),
            ("color", "#ff0055"),
            ("padding", "20px"),
            ("border-radius", "10px"),
            ("z-index", "20000"),
            ("max-width", "80%"),
            ("text-align", "center"),
        ] {
            style.set_property(property, value)?;
        }
        let paragraph = document.create_element("p")?;
        paragraph.set_text_content(Some(message));
        banner.append_child(&paragraph)?;
        document.body().ok_or(ZenError::NoDocument)?.append_child(&banner)?;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_carries_every_id_and_link() {
        let html = markup();
        for id in [CANVAS_CONTAINER_ID, CONTAINER_ID, MENU_CONTAINER_ID, TOOLTIP_ID, BOTTOM_ARROW_ID, LEFT_ARROW_ID] {
            assert!(html.contains(&format!(r#"id="{}""#, id)), "missing #{}", id);
        }
        for (_, label, href) in MENU_LINKS {
            assert!(html.contains(href));
            assert!(html.contains(label));
        }
        assert_eq!(html.matches("target=\"_blank\"").count(), 3);
    }

    #[test]
    fn loading_text_shows_until_ready() {
        let mut tooltip = Tooltip::default();
        assert_eq!(tooltip.text(), LOADING_TEXT);
        assert_eq!(tooltip.opacity(1.0e6), 1.0);

        tooltip.scene_ready(10.0);
        assert_eq!(tooltip.text(), HINT_TEXT);
        assert_eq!(tooltip.opacity(11.0), 0.0);
        assert_eq!(tooltip.opacity(12.0), 1.0);
        assert_eq!(tooltip.opacity(16.9), 1.0);
        assert_eq!(tooltip.opacity(17.0), 0.0);
    }

    #[test]
    fn announcements_last_two_seconds() {
        let mut tooltip = Tooltip::default();
        assert!(tooltip.take_text_change());
        assert!(!tooltip.take_text_change());
        tooltip.announce("ZEN interaction mode disabled", 3.0);
        assert!(tooltip.take_text_change());
        assert_eq!(tooltip.opacity(4.9), 1.0);
        assert_eq!(tooltip.opacity(5.0), 0.0);
    }

    #[test]
    fn opacity_is_written_only_when_it_changes() {
        let mut tooltip = Tooltip::default();
        tooltip.scene_ready(0.0);
        assert_eq!(tooltip.take_opacity_change(0.0), Some(0.0));
        assert_eq!(tooltip.take_opacity_change(1.0), None);
        assert_eq!(tooltip.take_opacity_change(2.0), Some(1.0));
        for frame in 0..100 {
            assert_eq!(tooltip.take_opacity_change(2.0 + frame as f64 / 60.0), None);
        }
        assert_eq!(tooltip.take_opacity_change(7.0), Some(0.0));
        assert_eq!(tooltip.take_opacity_change(8.0), None);
    }
}
