//! site-widgets: headless interactive widgets for marketing pages.
//!
//! Widget logic (hero rotator, testimonial carousel, stats counter, menu
//! toggle) is written against the `Surface` trait, so it runs the same on a
//! browser binding and on the in-memory `HeadlessSurface` used by tests.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{SiteEngine, SiteEngineConfig};
pub use error::{SiteError, SiteResult};
