#![deny(unsafe_code)]
//! Landing-page glue around the particle background.
//!
//! Nothing here animates: [`mailto`] builds the contact-form link, [`nav`]
//! holds the header's scroll-spy and smooth-scroll arithmetic, and
//! [`content`] is the static service/project catalogue the page renders.

pub mod content;
pub mod error;
pub mod mailto;
pub mod nav;

pub use content::{catalog, Catalog, Project, Service};
pub use error::SiteError;
pub use mailto::{compose_body, compose_mailto, encode_component, ContactConfig, ContactForm};
pub use nav::{active_section, scroll_target, NavState, SectionRect, NAV_LINKS, SECTIONS};
