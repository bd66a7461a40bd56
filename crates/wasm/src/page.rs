//! Header navigation and contact form wiring for the page.

use plexus_site::{
    compose_mailto, scroll_target, ContactConfig, ContactForm, NavState, SectionRect, SECTIONS,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollToOptions, Window};

fn window_and_document() -> Option<(Window, Document)> {
    let window = web_sys::window()?;
    let document = window.document()?;
    Some((window, document))
}

fn section_rects(document: &Document) -> Vec<SectionRect> {
    SECTIONS
        .iter()
        .filter_map(|id| {
            let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
            Some(SectionRect::new(id, rect.top(), rect.bottom()))
        })
        .collect()
}

/// Smoothly scrolls section `id` to just below the fixed header.
///
/// Returns `false` when the page has no such section.
#[wasm_bindgen]
pub fn scroll_to_section(id: &str) -> bool {
    let Some((window, document)) = window_and_document() else {
        return false;
    };
    let Some(element) = document.get_element_by_id(id) else {
        log::debug!("no section #{id}");
        return false;
    };
    let page_offset = window.scroll_y().unwrap_or(0.0);
    let top = scroll_target(element.get_bounding_client_rect().top(), page_offset);
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    true
}

/// Header state driven by the page's scroll and click events.
#[wasm_bindgen]
#[derive(Default)]
pub struct Navigation {
    state: NavState,
}

#[wasm_bindgen]
impl Navigation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Navigation {
        Self::default()
    }

    /// Re-evaluates the scrolled flag and active section from the live page.
    ///
    /// Returns the newly active section id, or `None` if it did not change.
    pub fn on_scroll(&mut self) -> Option<String> {
        let (window, document) = window_and_document()?;
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        self.state
            .on_scroll(scroll_y, &section_rects(&document))
            .then(|| self.state.active().to_string())
    }

    /// Closes the mobile menu and scrolls to the link's section.
    pub fn click(&mut self, link: &str) -> bool {
        let id = self.state.on_nav_click(link);
        scroll_to_section(&id)
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.state.toggle_menu();
        self.state.menu_open()
    }

    #[wasm_bindgen(getter)]
    pub fn active(&self) -> String {
        self.state.active().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn scrolled(&self) -> bool {
        self.state.scrolled()
    }

    #[wasm_bindgen(getter)]
    pub fn menu_open(&self) -> bool {
        self.state.menu_open()
    }

    pub fn is_active(&self, link: &str) -> bool {
        self.state.is_active(link)
    }
}

/// Builds the inquiry's `mailto:` link without navigating.
#[wasm_bindgen]
pub fn contact_mailto(
    recipient: &str,
    name: &str,
    email: &str,
    message: &str,
) -> Result<String, JsValue> {
    let config = ContactConfig::new(recipient).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let form = ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    };
    Ok(compose_mailto(&form, &config))
}

/// Submits the contact form by pointing the window at its `mailto:` link.
#[wasm_bindgen]
pub fn send_contact(
    recipient: &str,
    name: &str,
    email: &str,
    message: &str,
) -> Result<(), JsValue> {
    let uri = contact_mailto(recipient, name, email, message)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().set_href(&uri)
}

/// The services and projects as a JSON string.
#[wasm_bindgen]
pub fn catalog_json() -> Result<String, JsValue> {
    serde_json::to_string(&plexus_site::catalog()).map_err(|e| JsValue::from_str(&e.to_string()))
}
