#![deny(unsafe_code)]
//! Browser bindings: the animated canvas background plus the page's
//! navigation and contact glue.

pub mod canvas;
pub mod host;
pub mod page;

pub use canvas::CanvasSurface;
pub use host::ParticleBackground;
pub use page::{catalog_json, contact_mailto, scroll_to_section, send_contact, Navigation};

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
