//! DOM glue: event listeners and the label / info panel elements.

use foundation::math::Vec2;
use layers::{InfoPanel, LabelView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, TouchEvent,
};

pub const LABEL_ID: &str = "region-label";
pub const PANEL_ID: &str = "info-panel";
pub const PANEL_TITLE_ID: &str = "info-title";
pub const PANEL_LIST_ID: &str = "info-list";
pub const PANEL_CLOSE_ID: &str = "info-close";

const HIDDEN_CLASS: &str = "hidden";

/// A registered DOM listener; removing it needs the same target, type and
/// function object.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn add(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref::<js_sys::Function>(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    pub fn remove(self) -> Result<(), JsValue> {
        self.target.remove_event_listener_with_callback(
            self.kind,
            self.closure.as_ref().unchecked_ref::<js_sys::Function>(),
        )
    }
}

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

pub fn touch_points(event: &TouchEvent) -> Vec<Vec2> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| Vec2::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

/// Renders the info panel; a hidden panel only toggles the class.
pub fn sync_panel(panel: &InfoPanel) -> Result<(), JsValue> {
    let document = document()?;
    let root = element(&document, PANEL_ID)?;
    if !panel.visible {
        return root.class_list().add_1(HIDDEN_CLASS);
    }

    element(&document, PANEL_TITLE_ID)?.set_text_content(Some(&panel.title));

    let list = element(&document, PANEL_LIST_ID)?;
    list.set_inner_html("");
    for entry in &panel.entries {
        let item = document.create_element("li")?;
        match &entry.url {
            Some(url) => {
                let link = document.create_element("a")?;
                link.set_attribute("href", url)?;
                link.set_attribute("target", "_blank")?;
                link.set_attribute("rel", "noopener")?;
                link.set_text_content(Some(&entry.text));
                item.append_child(&link)?;
            }
            None => item.set_text_content(Some(&entry.text)),
        }
        list.append_child(&item)?;
    }
    root.class_list().remove_1(HIDDEN_CLASS)
}

/// Moves the floating label; positions are relative to the canvas.
pub fn sync_label(view: Option<&LabelView>) -> Result<(), JsValue> {
    let document = document()?;
    let label: HtmlElement = element(&document, LABEL_ID)?.dyn_into()?;
    let Some(view) = view else {
        return label.class_list().add_1(HIDDEN_CLASS);
    };

    if label.text_content().as_deref() != Some(view.text.as_str()) {
        label.set_text_content(Some(&view.text));
    }
    let style = label.style();
    style.set_property("left", &format!("{:.1}px", view.x))?;
    style.set_property("top", &format!("{:.1}px", view.y))?;
    style.set_property("opacity", &format!("{:.3}", view.opacity))?;
    label.class_list().remove_1(HIDDEN_CLASS)
}
