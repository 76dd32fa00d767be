//! Landing background controller
//!
//! WASM-bindgen wrapper that owns the renderer for one page mount.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gitaf_background::{BackgroundRenderer, ElementBounds, RendererConfig};
use wasm_bindgen::prelude::*;

use crate::host::{HostCallbacks, WebHost};
use crate::util::log;

type SharedRenderer = Rc<RefCell<BackgroundRenderer<WebHost>>>;

/// WASM-bindgen wrapper for the landing page background
///
/// ```js
/// const bg = new BackgroundController();
/// bg.mount();          // "running", "disabled", "fallback" or "stopped"
/// window.addEventListener("pagehide", () => bg.unmount());
/// ```
#[wasm_bindgen]
pub struct BackgroundController {
    renderer: SharedRenderer,
}

#[wasm_bindgen]
impl BackgroundController {
    /// Bind to the page
    ///
    /// `config_json` is an optional JSON object overriding the defaults,
    /// e.g. `{"canvasId": "bg", "fallbackOnSetupFailure": false}`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<BackgroundController, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config = parse_config(config_json.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let host = WebHost::new(&config).map_err(|e| {
            log(&format!("[background] Failed to bind to page: {}", e));
            JsValue::from_str(&e.to_string())
        })?;

        let renderer: SharedRenderer =
            Rc::new(RefCell::new(BackgroundRenderer::new(host.clone(), config)));
        host.install(callbacks_for(Rc::downgrade(&renderer)));

        Ok(Self { renderer })
    }

    /// Start the background; returns the resulting state id
    #[wasm_bindgen]
    pub fn mount(&self) -> String {
        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.initialize().id().to_string(),
            Err(_) => {
                log("[background] mount called re-entrantly, ignored");
                self.state()
            }
        }
    }

    /// Stop the frame loop and remove every listener
    #[wasm_bindgen]
    pub fn unmount(&self) {
        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.teardown(),
            Err(_) => log("[background] unmount called re-entrantly, ignored"),
        }
    }

    /// Current state id
    #[wasm_bindgen]
    pub fn state(&self) -> String {
        self.renderer
            .try_borrow()
            .map(|r| r.state().id().to_string())
            .unwrap_or_default()
    }

    /// Device class id, "mobile" or "desktop", once mounted
    #[wasm_bindgen]
    pub fn device(&self) -> Option<String> {
        self.renderer
            .try_borrow()
            .ok()
            .and_then(|r| r.device())
            .map(|d| d.id().to_string())
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.renderer
            .try_borrow()
            .map(|r| r.is_running())
            .unwrap_or(false)
    }

    /// Message of the error that stopped the renderer, if any
    #[wasm_bindgen]
    pub fn last_error(&self) -> Option<String> {
        self.renderer
            .try_borrow()
            .ok()
            .and_then(|r| r.last_error().map(|e| e.to_string()))
    }

    #[wasm_bindgen]
    pub fn frames_drawn(&self) -> f64 {
        self.renderer
            .try_borrow()
            .map(|r| r.frames_drawn() as f64)
            .unwrap_or(0.0)
    }
}

impl Drop for BackgroundController {
    fn drop(&mut self) {
        // Listeners must not outlive the closures the host is about to drop
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.teardown();
        }
    }
}

/// Run `f` against the renderer if it is still alive and not busy
fn with_renderer(
    weak: &Weak<RefCell<BackgroundRenderer<WebHost>>>,
    f: impl FnOnce(&mut BackgroundRenderer<WebHost>),
) {
    let Some(renderer) = weak.upgrade() else {
        return;
    };
    match renderer.try_borrow_mut() {
        Ok(mut renderer) => f(&mut renderer),
        Err(_) => log("[background] callback skipped, renderer busy"),
    };
}

fn callbacks_for(weak: Weak<RefCell<BackgroundRenderer<WebHost>>>) -> HostCallbacks {
    let frame_target = weak.clone();
    let frame = Closure::wrap(Box::new(move |_timestamp: f64| {
        with_renderer(&frame_target, |r| r.on_frame());
    }) as Box<dyn FnMut(f64)>);

    let resize_target = weak.clone();
    let resize = Closure::wrap(Box::new(move || {
        with_renderer(&resize_target, |r| r.on_resize());
    }) as Box<dyn FnMut()>);

    let pointer = Rc::new(move |element: usize, x: f64, y: f64, bounds: ElementBounds| {
        with_renderer(&weak, |r| {
            r.on_pointer_move(element, x, y, bounds);
        });
    });

    HostCallbacks {
        frame,
        resize,
        pointer,
    }
}

/// Parse the page-supplied configuration; absent or blank input means defaults
pub fn parse_config(json: Option<&str>) -> Result<RendererConfig, String> {
    match json.map(str::trim) {
        None | Some("") => Ok(RendererConfig::default()),
        Some(text) => {
            serde_json::from_str(text).map_err(|e| format!("Invalid background config: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_absent() {
        assert_eq!(parse_config(None).unwrap(), RendererConfig::default());
        assert_eq!(parse_config(Some("   ")).unwrap(), RendererConfig::default());
    }

    #[test]
    fn test_parse_config_overrides() {
        let config = parse_config(Some(r#"{ "canvasId": "stars", "interactiveSelector": ".cta" }"#))
            .unwrap();
        assert_eq!(config.canvas_id, "stars");
        assert_eq!(config.interactive_selector, ".cta");
        assert_eq!(config.fallback_selector, ".mobile-background");
    }

    #[test]
    fn test_parse_config_invalid() {
        let err = parse_config(Some("{ not json")).unwrap_err();
        assert!(err.starts_with("Invalid background config"));
    }

    #[test]
    fn test_parse_config_wrong_type() {
        assert!(parse_config(Some(r#"{ "fallbackOnSetupFailure": "yes" }"#)).is_err());
    }
}
