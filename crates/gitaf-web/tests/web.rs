//! In-browser tests, run with `wasm-pack test --headless --firefox`

#![cfg(target_arch = "wasm32")]

use gitaf_web::BackgroundController;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn config_for(id: &str) -> Option<String> {
    Some(format!(r#"{{ "canvasId": "{}" }}"#, id))
}

#[wasm_bindgen_test]
fn missing_canvas_is_an_error() {
    assert!(BackgroundController::new(config_for("no-such-canvas")).is_err());
}

#[wasm_bindgen_test]
fn invalid_config_is_an_error() {
    assert!(BackgroundController::new(Some("{".to_string())).is_err());
}

#[wasm_bindgen_test]
fn mount_then_unmount() {
    let canvas = add_canvas("bg-mount");
    let bg = BackgroundController::new(config_for("bg-mount")).unwrap();
    assert_eq!(bg.state(), "uninitialized");
    assert_eq!(bg.device(), None);

    let state = bg.mount();
    // Headless browsers may lack WebGL; both outcomes are valid mounts
    assert!(state == "running" || state == "fallback", "state: {}", state);
    assert_eq!(bg.device().as_deref(), Some("desktop"));
    if state == "running" {
        assert!(bg.is_running());
        assert_eq!(bg.frames_drawn(), 1.0);
        assert!(canvas.width() > 0);
    } else {
        assert!(bg.last_error().is_some());
    }

    bg.unmount();
    assert_eq!(bg.state(), "stopped");
    assert!(!bg.is_running());

    // Idempotent
    bg.unmount();
    assert_eq!(bg.state(), "stopped");
    canvas.remove();
}

#[wasm_bindgen_test]
fn remount_with_fresh_controller() {
    let canvas = add_canvas("bg-remount");
    for _ in 0..2 {
        let bg = BackgroundController::new(config_for("bg-remount")).unwrap();
        let state = bg.mount();
        assert_ne!(state, "uninitialized");
        // Second mount on the same controller is ignored
        assert_eq!(bg.mount(), state);
        bg.unmount();
    }
    canvas.remove();
}
