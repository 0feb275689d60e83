use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, MouseEvent, TouchEvent, WheelEvent};

use camera::Viewport;
use foundation::math::Vec2;
use foundation::time::Time;
use viewer::{InteractionEvent, MapViewer, ViewerError};

mod dom;
pub mod regions;

use dom::{Listener, PANEL_CLOSE_ID, sync_label, sync_panel, touch_points};

#[derive(Default)]
struct HostState {
    viewer: MapViewer,
    canvas_id: Option<String>,
    listeners: Vec<Listener>,
}

thread_local! {
    static STATE: RefCell<HostState> = RefCell::new(HostState::default());
}

fn with_viewer<R>(f: impl FnOnce(&mut MapViewer) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut().viewer))
}

fn to_js(err: ViewerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));
    // A second start (hot reload) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    init_tracing();
    Ok(())
}

/// Partial JSON override of the viewer configuration.
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    with_viewer(|v| v.configure(json)).map_err(to_js)
}

/// Registers the pickable regions: a JSON array of
/// `{id, name, min: [x, y, z], max: [x, y, z], color?, material?}`.
/// Regions with inverted bounds are skipped; returns how many were kept.
#[wasm_bindgen]
pub fn register_regions(json: &str) -> Result<u32, JsValue> {
    let regions = regions::parse_regions(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let count = with_viewer(|v| v.register_regions(regions));
    Ok(count as u32)
}

/// Canvas bounding client rectangle in CSS px.
#[wasm_bindgen]
pub fn set_viewport(left: f64, top: f64, width: f64, height: f64) {
    with_viewer(|v| v.resize(Viewport::new(left, top, width, height)));
}

#[wasm_bindgen]
pub fn set_touch_primary(touch_primary: bool) {
    with_viewer(|v| v.set_touch_primary(touch_primary));
}

/// Wires DOM input on the canvas (and window) to the viewer.
#[wasm_bindgen]
pub fn attach(canvas_id: &str) -> Result<(), JsValue> {
    detach()?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = dom::document()?;
    let canvas = dom::element(&document, canvas_id)?;

    let coarse = window
        .match_media("(pointer: coarse)")?
        .map(|mq| mq.matches())
        .unwrap_or(false);

    let mut listeners = vec![
        Listener::add(&canvas, "mousedown", true, |e: Event| {
            if let Some(m) = e.dyn_ref::<MouseEvent>() {
                with_viewer(|v| v.on_pointer_down(client_pos(m)));
            }
        })?,
        Listener::add(&window, "mousemove", true, |e: Event| {
            if let Some(m) = e.dyn_ref::<MouseEvent>() {
                with_viewer(|v| v.on_pointer_move(client_pos(m)));
            }
        })?,
        Listener::add(&window, "mouseup", true, |e: Event| {
            if let Some(m) = e.dyn_ref::<MouseEvent>() {
                with_viewer(|v| v.on_pointer_up(client_pos(m)));
            }
        })?,
        Listener::add(&canvas, "mouseleave", true, |_e: Event| {
            with_viewer(|v| v.on_pointer_leave());
        })?,
        Listener::add(&canvas, "wheel", false, |e: Event| {
            if let Some(w) = e.dyn_ref::<WheelEvent>() {
                w.prevent_default();
                with_viewer(|v| v.on_wheel(w.delta_y()));
            }
        })?,
        // Touch handlers cancel the emulated mouse events that would
        // otherwise resolve the same tap twice.
        Listener::add(&canvas, "touchstart", false, |e: Event| {
            if let Some(t) = e.dyn_ref::<TouchEvent>() {
                t.prevent_default();
                with_viewer(|v| v.on_touch_start(&touch_points(t)));
            }
        })?,
        Listener::add(&canvas, "touchmove", false, |e: Event| {
            if let Some(t) = e.dyn_ref::<TouchEvent>() {
                t.prevent_default();
                with_viewer(|v| v.on_touch_move(&touch_points(t)));
            }
        })?,
        Listener::add(&canvas, "touchend", false, |e: Event| {
            if let Some(t) = e.dyn_ref::<TouchEvent>() {
                t.prevent_default();
                with_viewer(|v| v.on_touch_end(&touch_points(t)));
            }
        })?,
        Listener::add(&window, "resize", true, |_e: Event| {
            if let Err(err) = refresh_viewport() {
                warn!(?err, "viewport refresh failed");
            }
        })?,
    ];

    if let Some(close) = document.get_element_by_id(PANEL_CLOSE_ID) {
        listeners.push(Listener::add(&close, "click", true, |_e: Event| {
            with_viewer(|v| v.close_panel());
        })?);
    } else {
        warn!("no close button; info panel can only be closed by deselecting");
    }

    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.viewer.attach();
        s.viewer.set_touch_primary(coarse);
        s.canvas_id = Some(canvas_id.to_string());
        s.listeners = listeners;
    });
    refresh_viewport()?;
    info!(canvas_id, coarse, "viewer attached");
    Ok(())
}

/// Unregisters every DOM listener and stops the viewer.
#[wasm_bindgen]
pub fn detach() -> Result<(), JsValue> {
    let listeners = STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.viewer.detach();
        s.canvas_id = None;
        std::mem::take(&mut s.listeners)
    });
    for listener in listeners {
        listener.remove()?;
    }
    Ok(())
}

/// One display frame at the `requestAnimationFrame` timestamp `now_ms`.
///
/// Returns the frame snapshot as JSON for the renderer.
#[wasm_bindgen]
pub fn advance_frame(now_ms: f64) -> Result<String, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.viewer.frame(Time::from_millis(now_ms));

        let panel_changed = s.viewer.drain_events().iter().any(|e| {
            matches!(
                e.event,
                InteractionEvent::Selected { .. } | InteractionEvent::Deselected { .. }
            )
        });
        if panel_changed {
            sync_panel(s.viewer.panel())?;
        }

        let snapshot = s.viewer.take_snapshot();
        sync_label(snapshot.label.as_ref())?;
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

/// Selects a region by internal name (e.g. from a search box).
#[wasm_bindgen]
pub fn select_region(name: &str) -> bool {
    with_viewer(|v| v.select_by_name(name))
}

#[wasm_bindgen]
pub fn close_panel() {
    with_viewer(|v| v.close_panel());
}

/// Fetches the info dataset (JSON array of `{region, text, url?}`).
/// Failures are logged; lookups stay empty.
#[wasm_bindgen]
pub fn load_dataset(url: String) {
    spawn_local(async move {
        let text = match fetch_text(&url).await {
            Ok(text) => text,
            Err(err) => {
                warn!(%url, %err, "info dataset fetch failed");
                return;
            }
        };
        match with_viewer(|v| v.load_dataset_json(&text)) {
            Ok(count) => info!(%url, count, "info dataset ready"),
            Err(err) => warn!(%url, %err, "info dataset rejected"),
        }
    });
}

fn client_pos(event: &MouseEvent) -> Vec2 {
    Vec2::new(event.client_x() as f64, event.client_y() as f64)
}

fn refresh_viewport() -> Result<(), JsValue> {
    let Some(canvas_id) = STATE.with(|state| state.borrow().canvas_id.clone()) else {
        return Ok(());
    };
    let rect = dom::element(&dom::document()?, &canvas_id)?.get_bounding_client_rect();
    set_viewport(rect.left(), rect.top(), rect.width(), rect.height());
    Ok(())
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let resp = Request::get(url).send().await.map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.text().await.map_err(|e| e.to_string())
}
