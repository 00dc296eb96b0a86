mod element;
mod headless;

pub use element::ElementState;
pub use headless::{FIRED_LOG_CAPACITY, HeadlessSurface, HeadlessSurfaceBuilder, PendingTimer};

use std::time::Duration;

use crate::core::{ElementId, EventKind, TimerHandle, TimerMode};
use crate::error::SiteResult;

/// Contract implemented by any host rendering environment.
///
/// Widgets never hold a surface; the engine lends it to them for the
/// duration of one event so their logic stays independent of the host.
pub trait Surface {
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Elements carrying `class`, in document order, optionally limited to
    /// descendants of `scope`.
    fn elements_by_class(&self, scope: Option<&ElementId>, class: &str) -> Vec<ElementId>;

    /// Direct children of `parent`, in document order.
    fn children(&self, parent: &ElementId) -> Vec<ElementId>;

    /// Creates an element carrying `classes` as the last child of `parent`.
    fn create_element(&mut self, parent: &ElementId, classes: &[&str]) -> SiteResult<ElementId>;

    fn add_class(&mut self, element: &ElementId, class: &str) -> SiteResult<()>;

    fn remove_class(&mut self, element: &ElementId, class: &str) -> SiteResult<()>;

    fn has_class(&self, element: &ElementId, class: &str) -> bool;

    fn set_style(&mut self, element: &ElementId, property: &str, value: &str) -> SiteResult<()>;

    fn text(&self, element: &ElementId) -> Option<String>;

    fn set_text(&mut self, element: &ElementId, text: &str) -> SiteResult<()>;

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) -> SiteResult<()>;

    fn subscribe(&mut self, element: &ElementId, kind: EventKind) -> SiteResult<()>;

    fn unsubscribe(&mut self, element: &ElementId, kind: EventKind);

    /// Schedules a callback after `delay`. The host reports the firing back
    /// through `SiteEvent::TimerFired` with the returned handle.
    fn schedule(&mut self, delay: Duration, mode: TimerMode) -> TimerHandle;

    /// Cancels a scheduled callback. Returns `false` when the handle was
    /// unknown or already spent.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Toggles `class` and returns whether it is present afterwards.
    fn toggle_class(&mut self, element: &ElementId, class: &str) -> SiteResult<bool> {
        if self.has_class(element, class) {
            self.remove_class(element, class)?;
            Ok(false)
        } else {
            self.add_class(element, class)?;
            Ok(true)
        }
    }
}
