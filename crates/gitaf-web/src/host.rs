//! Browser host
//!
//! Implements the host traits over the DOM. Event callbacks are supplied
//! by the controller after the renderer exists (see [`HostCallbacks`]);
//! until then, scheduling and listener registration fail cleanly.

use std::cell::RefCell;
use std::rc::Rc;

use gitaf_background::RendererConfig;
use gitaf_hal::{ElementBounds, FrameRequest, HalError, Host, PlatformCapabilities, SurfaceSize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, WebGlRenderingContext, Window};

use crate::gl::WebGl;
use crate::util::log;

/// Context ids tried in order
const CONTEXT_KINDS: [&str; 2] = ["webgl", "experimental-webgl"];

/// Pointer handler: element index, client x, client y, element bounds
pub(crate) type PointerDispatch = Rc<dyn Fn(usize, f64, f64, ElementBounds)>;

/// Callbacks into the renderer, owned by the host for its lifetime
pub(crate) struct HostCallbacks {
    pub frame: Closure<dyn FnMut(f64)>,
    pub resize: Closure<dyn FnMut()>,
    pub pointer: PointerDispatch,
}

/// One registered pointer-move listener
struct PointerListener {
    element: HtmlElement,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl PointerListener {
    fn attach(
        element: HtmlElement,
        index: usize,
        dispatch: PointerDispatch,
    ) -> Result<Self, HalError> {
        let target = element.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            dispatch(
                index,
                event.client_x() as f64,
                event.client_y() as f64,
                ElementBounds::new(rect.left(), rect.top(), rect.width(), rect.height()),
            );
        }) as Box<dyn FnMut(MouseEvent)>);

        element
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
            .map_err(|_| HalError::ListenerFailed("mousemove"))?;
        Ok(Self { element, closure })
    }

    fn detach(self) {
        let _ = self.element.remove_event_listener_with_callback(
            "mousemove",
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Attach every item or none
///
/// `attach` receives the index the item will have among the attached ones.
/// On the first failure, everything attached so far is detached and the
/// error is returned.
fn attach_all<T, L>(
    items: impl IntoIterator<Item = T>,
    mut attach: impl FnMut(usize, T) -> Result<L, HalError>,
    detach: impl FnMut(L),
) -> Result<Vec<L>, HalError> {
    let mut attached = Vec::new();
    for item in items {
        match attach(attached.len(), item) {
            Ok(listener) => attached.push(listener),
            Err(e) => {
                attached.into_iter().for_each(detach);
                return Err(e);
            }
        }
    }
    Ok(attached)
}

/// DOM-backed host
#[derive(Clone)]
pub struct WebHost {
    inner: Rc<WebHostInner>,
}

struct WebHostInner {
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    fallback_selector: String,
    interactive_selector: String,
    callbacks: RefCell<Option<HostCallbacks>>,
    pointer_listeners: RefCell<Vec<PointerListener>>,
}

impl WebHost {
    /// Bind to the page's window, document and drawing surface
    pub fn new(config: &RendererConfig) -> Result<Self, HalError> {
        let window = web_sys::window().ok_or(HalError::NotSupported)?;
        let document = window.document().ok_or(HalError::NotSupported)?;
        let canvas = document
            .get_element_by_id(&config.canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(|| HalError::ElementNotFound(config.canvas_id.clone()))?;

        Ok(Self {
            inner: Rc::new(WebHostInner {
                window,
                document,
                canvas,
                fallback_selector: config.fallback_selector.clone(),
                interactive_selector: config.interactive_selector.clone(),
                callbacks: RefCell::new(None),
                pointer_listeners: RefCell::new(Vec::new()),
            }),
        })
    }

    /// Install the renderer callbacks
    pub(crate) fn install(&self, callbacks: HostCallbacks) {
        *self.inner.callbacks.borrow_mut() = Some(callbacks);
    }

    fn query_html(&self, selector: &str) -> Option<HtmlElement> {
        self.inner
            .document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        log(&format!("[web-host] failed to set {}: {:?}", property, e));
    }
}

fn window_dimension(value: Result<JsValue, JsValue>) -> u32 {
    value
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|v| v.is_finite() && *v > 0.0)
        .map(|v| v as u32)
        .unwrap_or(0)
}

impl PlatformCapabilities for WebHost {
    type Gfx = WebGl;

    fn platform_signal(&self) -> String {
        self.inner.window.navigator().user_agent().unwrap_or_default()
    }

    fn acquire_context(&self) -> Result<WebGl, HalError> {
        CONTEXT_KINDS
            .iter()
            .find_map(|kind| {
                self.inner
                    .canvas
                    .get_context(kind)
                    .ok()
                    .flatten()
                    .and_then(|ctx| ctx.dyn_into::<WebGlRenderingContext>().ok())
            })
            .map(WebGl::new)
            .ok_or(HalError::ContextUnavailable)
    }
}

impl Host for WebHost {
    fn hide_surface(&self) {
        set_style(&self.inner.canvas, "display", "none");
    }

    fn show_fallback(&self) {
        match self.query_html(&self.inner.fallback_selector) {
            Some(layer) => set_style(&layer, "display", "block"),
            None => log(&format!(
                "[web-host] fallback layer '{}' not found",
                self.inner.fallback_selector
            )),
        }
    }

    fn viewport_size(&self) -> SurfaceSize {
        SurfaceSize::new(
            window_dimension(self.inner.window.inner_width()),
            window_dimension(self.inner.window.inner_height()),
        )
    }

    fn resize_surface(&self, size: SurfaceSize) {
        self.inner.canvas.set_width(size.width);
        self.inner.canvas.set_height(size.height);
    }

    fn shader_source(&self, element_id: &str) -> Option<String> {
        self.inner
            .document
            .get_element_by_id(element_id)
            .and_then(|el| el.text_content())
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn request_frame(&self) -> Result<FrameRequest, HalError> {
        let callbacks = self.inner.callbacks.borrow();
        let callbacks = callbacks.as_ref().ok_or(HalError::SchedulerUnavailable)?;
        self.inner
            .window
            .request_animation_frame(callbacks.frame.as_ref().unchecked_ref())
            .map(FrameRequest::new)
            .map_err(|_| HalError::SchedulerUnavailable)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        if let Err(e) = self.inner.window.cancel_animation_frame(request.id()) {
            log(&format!("[web-host] cancelAnimationFrame failed: {:?}", e));
        }
    }

    fn listen_resize(&self) -> Result<(), HalError> {
        let callbacks = self.inner.callbacks.borrow();
        let callbacks = callbacks
            .as_ref()
            .ok_or(HalError::ListenerFailed("resize"))?;
        self.inner
            .window
            .add_event_listener_with_callback("resize", callbacks.resize.as_ref().unchecked_ref())
            .map_err(|_| HalError::ListenerFailed("resize"))
    }

    fn unlisten_resize(&self) {
        if let Some(callbacks) = self.inner.callbacks.borrow().as_ref() {
            let _ = self.inner.window.remove_event_listener_with_callback(
                "resize",
                callbacks.resize.as_ref().unchecked_ref(),
            );
        }
    }

    fn listen_pointer(&self) -> Result<usize, HalError> {
        let dispatch = self
            .inner
            .callbacks
            .borrow()
            .as_ref()
            .map(|c| c.pointer.clone())
            .ok_or(HalError::ListenerFailed("mousemove"))?;
        let nodes = self
            .inner
            .document
            .query_selector_all(&self.inner.interactive_selector)
            .map_err(|_| HalError::ListenerFailed("mousemove"))?;
        let elements = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok());

        self.unlisten_pointer();
        let attached = attach_all(
            elements,
            |index, element| PointerListener::attach(element, index, dispatch.clone()),
            PointerListener::detach,
        )?;

        let count = attached.len();
        *self.inner.pointer_listeners.borrow_mut() = attached;
        Ok(count)
    }

    fn unlisten_pointer(&self) {
        let listeners = std::mem::take(&mut *self.inner.pointer_listeners.borrow_mut());
        listeners.into_iter().for_each(PointerListener::detach);
    }

    fn set_highlight(&self, element: usize, x_percent: f64, y_percent: f64) {
        if let Some(listener) = self.inner.pointer_listeners.borrow().get(element) {
            set_style(&listener.element, "--x", &format!("{}%", x_percent));
            set_style(&listener.element, "--y", &format!("{}%", y_percent));
        }
    }

    fn debug_write(&self, msg: &str) {
        log(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_all_success() {
        let attached = attach_all(["a", "b", "c"], |i, name| Ok((i, name)), |_| {}).unwrap();
        assert_eq!(attached, vec![(0, "a"), (1, "b"), (2, "c")]);
    }

    #[test]
    fn test_attach_all_detaches_on_failure() {
        let detached = RefCell::new(Vec::new());
        let result = attach_all(
            ["a", "b", "c", "d"],
            |_, name| {
                if name == "c" {
                    Err(HalError::ListenerFailed("mousemove"))
                } else {
                    Ok(name)
                }
            },
            |name| detached.borrow_mut().push(name),
        );

        assert_eq!(result, Err(HalError::ListenerFailed("mousemove")));
        assert_eq!(*detached.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_attach_all_empty() {
        let attached: Vec<()> = attach_all(Vec::<()>::new(), |_, item| Ok(item), |_| {}).unwrap();
        assert!(attached.is_empty());
    }
}
