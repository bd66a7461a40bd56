//! Runs a [`Simulator`] on a page canvas from `requestAnimationFrame`.
//!
//! The window's `resize`, `mousemove` and `mouseout` events feed the
//! simulator while it is mounted. Teardown cancels the simulator first, so a
//! frame callback the browser has already fired draws nothing, then cancels
//! the outstanding frame request and removes every listener.

use crate::canvas::CanvasSurface;
use plexus_core::{FieldConfig, FieldError, Simulator, Xorshift64};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

type Shared = Rc<RefCell<Simulator<CanvasSurface, Xorshift64>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// An event listener that is removed when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, FieldError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Host(format!("cannot listen for {kind}: {e:?}")))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::debug!("could not remove {} listener: {e:?}", self.kind);
        }
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Option<i32> {
    let borrow = callback.borrow();
    let cb = borrow.as_ref()?;
    window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

struct Mounted {
    window: Window,
    simulator: Shared,
    frame: Rc<Cell<Option<i32>>>,
    tick: FrameCallback,
    listeners: Vec<Listener>,
}

impl Mounted {
    fn start(window: Window, simulator: Shared) -> Result<Self, FieldError> {
        let target: &EventTarget = window.as_ref();
        let mut listeners = Vec::with_capacity(3);
        {
            let simulator = simulator.clone();
            let win = window.clone();
            listeners.push(Listener::add(target, "resize", move |_| {
                let (w, h) = viewport(&win);
                simulator.borrow_mut().resize(w, h);
            })?);
        }
        {
            let simulator = simulator.clone();
            listeners.push(Listener::add(target, "mousemove", move |event| {
                if let Some(m) = event.dyn_ref::<MouseEvent>() {
                    simulator
                        .borrow_mut()
                        .pointer_moved(m.client_x() as f64, m.client_y() as f64);
                }
            })?);
        }
        {
            let simulator = simulator.clone();
            listeners.push(Listener::add(target, "mouseout", move |_| {
                simulator.borrow_mut().pointer_left();
            })?);
        }

        let frame = Rc::new(Cell::new(None));
        let tick: FrameCallback = Rc::new(RefCell::new(None));

        {
            let simulator = simulator.clone();
            let frame = frame.clone();
            let tick_handle = tick.clone();
            let window = window.clone();
            *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame.set(None);
                let drawn = simulator
                    .try_borrow_mut()
                    .map(|mut sim| sim.frame())
                    .unwrap_or(false);
                if drawn {
                    frame.set(request_frame(&window, &tick_handle));
                }
            }) as Box<dyn FnMut()>));
        }

        frame.set(request_frame(&window, &tick));
        Ok(Self {
            window,
            simulator,
            frame,
            tick,
            listeners,
        })
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Ok(mut sim) = self.simulator.try_borrow_mut() {
            sim.cancel();
        }
        if let Some(id) = self.frame.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::debug!("could not cancel frame {id}: {e:?}");
            }
        }
        // breaks the tick -> tick cycle
        self.tick.borrow_mut().take();
        self.listeners.clear();
    }
}

fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_config(params: Option<&str>) -> Result<FieldConfig, FieldError> {
    let Some(json) = params else {
        return Ok(FieldConfig::default());
    };
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| FieldError::invalid_param("params", format!("invalid JSON: {e}")))?;
    FieldConfig::from_json(&value)
}

/// Parses `params` and checks the particle count for a `width`×`height` viewport.
fn resolve_config(
    params: Option<&str>,
    width: f64,
    height: f64,
) -> Result<FieldConfig, FieldError> {
    let config = parse_config(params)?;
    config.check_surface(width, height)?;
    Ok(config)
}

/// The animated particle background of one canvas.
///
/// Dropping the handle (or calling [`ParticleBackground::destroy`]) stops
/// the animation and detaches its listeners. A handle mounted where no
/// canvas context is available is inert.
#[wasm_bindgen]
pub struct ParticleBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Sizes `canvas` to the viewport, populates the field and starts the
    /// animation.
    ///
    /// `params` is an optional JSON object of field parameters; `seed` fixes
    /// the particle layout, otherwise one is drawn from `Math.random`.
    pub fn mount(
        canvas: HtmlCanvasElement,
        seed: Option<u32>,
        params: Option<String>,
    ) -> Result<ParticleBackground, JsValue> {
        let Some(window) = web_sys::window() else {
            return Ok(Self { mounted: None });
        };
        let (width, height) = viewport(&window);
        let config = resolve_config(params.as_deref(), width, height).map_err(to_js)?;
        let seed = match seed {
            Some(s) => s as u64,
            None => (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64,
        };
        let Some(simulator) = Simulator::mount(
            CanvasSurface::from_canvas(canvas),
            width,
            height,
            config,
            Xorshift64::new(seed),
        ) else {
            return Ok(Self { mounted: None });
        };
        log::info!(
            "particle background: {} particles on {width}x{height}",
            simulator.field().len()
        );
        let mounted = Mounted::start(window, Rc::new(RefCell::new(simulator))).map_err(to_js)?;
        Ok(Self {
            mounted: Some(mounted),
        })
    }

    /// Stops the animation and removes the listeners. Calling it again is a
    /// no-op.
    pub fn destroy(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("particle background destroyed");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| !m.simulator.borrow().is_cancelled())
    }

    #[wasm_bindgen(getter)]
    pub fn particles(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |m| m.simulator.borrow().field().len())
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.mounted
            .as_ref()
            .map_or(0.0, |m| m.simulator.borrow().frames() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_defaults_without_params() {
        assert_eq!(parse_config(None).unwrap(), FieldConfig::default());
    }

    #[test]
    fn parse_config_applies_overrides() {
        let config = parse_config(Some(r##"{"density": 6000, "color": "#007fff"}"##)).unwrap();
        assert_eq!(config.density, 6000.0);
    }

    #[test]
    fn resolve_config_rejects_over_dense_viewport() {
        assert!(matches!(
            resolve_config(Some(r#"{"density": 1}"#), 1920.0, 1080.0),
            Err(FieldError::InvalidParameter { .. })
        ));
        assert!(matches!(
            resolve_config(Some(r#"{"density": 1e-6}"#), 1280.0, 720.0),
            Err(FieldError::InvalidParameter { .. })
        ));
        assert!(resolve_config(None, 1920.0, 1080.0).is_ok());
    }

    #[test]
    fn parse_config_rejects_bad_json() {
        assert!(matches!(
            parse_config(Some("{density")),
            Err(FieldError::InvalidParameter { .. })
        ));
    }
}
