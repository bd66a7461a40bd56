//! Header navigation: smooth-scroll targets and scroll-spy.
//!
//! The header is fixed and 70 px tall, so every in-page jump lands 70 px
//! above its section. While the page scrolls, the active link is the first
//! section whose box spans a probe line 100 px below the viewport top.

use serde::{Deserialize, Serialize};

/// Height of the fixed header.
pub const HEADER_OFFSET: f64 = 70.0;
/// Viewport y of the scroll-spy probe line.
pub const SPY_LINE: f64 = 100.0;
/// Scroll distance after which the header gets its solid background.
pub const SCROLLED_AFTER: f64 = 10.0;
/// Section ids in page order.
pub const SECTIONS: [&str; 5] = ["hero", "about", "services", "work", "contact"];
/// Header link labels; each maps to the lowercase section id.
pub const NAV_LINKS: [&str; 4] = ["About", "Services", "Work", "Contact"];

/// Section id a header link points to.
pub fn section_id(link: &str) -> String {
    link.to_lowercase()
}

/// Document scroll position that brings a section just under the header.
///
/// `element_top` is the section's viewport-relative top, `page_offset` the
/// current vertical scroll.
pub fn scroll_target(element_top: f64, page_offset: f64) -> f64 {
    element_top + page_offset - HEADER_OFFSET
}

/// Viewport-relative vertical extent of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRect {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn new(id: &str, top: f64, bottom: f64) -> Self {
        Self {
            id: id.to_string(),
            top,
            bottom,
        }
    }

    fn spans(&self, y: f64) -> bool {
        self.top <= y && self.bottom >= y
    }
}

/// First section (in the given order) spanning the probe line.
pub fn active_section(sections: &[SectionRect]) -> Option<&str> {
    sections
        .iter()
        .find(|s| s.spans(SPY_LINE))
        .map(|s| s.id.as_str())
}

/// Transient header state: active link, mobile menu, solid background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavState {
    active: String,
    menu_open: bool,
    scrolled: bool,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            active: SECTIONS[0].to_string(),
            menu_open: false,
            scrolled: false,
        }
    }
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the scrolled flag and the active section.
    ///
    /// When no section spans the probe line the previous active section is
    /// kept. Returns whether the active section changed.
    pub fn on_scroll(&mut self, scroll_y: f64, sections: &[SectionRect]) -> bool {
        self.scrolled = scroll_y > SCROLLED_AFTER;
        match active_section(sections) {
            Some(id) if id != self.active => {
                self.active = id.to_string();
                true
            }
            _ => false,
        }
    }

    /// Handles a header link click: closes the mobile menu and returns the
    /// section id to scroll to.
    pub fn on_nav_click(&mut self, link: &str) -> String {
        self.menu_open = false;
        section_id(link)
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Whether `link` is the highlighted header link.
    pub fn is_active(&self, link: &str) -> bool {
        section_id(link) == self.active
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }
}
