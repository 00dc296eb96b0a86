use std::time::Duration;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::{ElementId, EventKind, TimerHandle, TimerMode};
use crate::error::{SiteError, SiteResult};
use crate::render::{ElementState, Surface};

/// Timer as seen by tests inspecting the headless queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    pub handle: TimerHandle,
    pub due_at_ms: u64,
    pub interval_ms: Option<u64>,
}

/// Firings kept by the headless log; older entries are dropped in halves.
pub const FIRED_LOG_CAPACITY: usize = 4_096;

#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    handle: TimerHandle,
    due_at_ms: u64,
    order: u64,
    interval_ms: Option<u64>,
}

/// In-memory surface with a virtual clock, used by tests and headless tools.
///
/// Elements keep insertion order, which stands in for document order.
/// Timers fire ordered by due time, then by the order they were armed.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    elements: IndexMap<ElementId, ElementState>,
    next_element_seq: u64,
    timers: Vec<ScheduledTimer>,
    next_timer_id: u64,
    next_timer_order: u64,
    now_ms: u64,
    fired: Vec<(u64, TimerHandle)>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn builder() -> HeadlessSurfaceBuilder {
        HeadlessSurfaceBuilder::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&ElementState> {
        self.elements.get(id)
    }

    #[must_use]
    pub fn style(&self, id: &ElementId, property: &str) -> Option<&str> {
        self.elements.get(id).and_then(|state| state.style(property))
    }

    #[must_use]
    pub fn is_subscribed(&self, id: &ElementId, kind: EventKind) -> bool {
        self.elements
            .get(id)
            .is_some_and(|state| state.is_subscribed(kind))
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        let mut timers = self.timers.clone();
        timers.sort_by_key(|timer| (timer.due_at_ms, timer.order));
        timers
            .into_iter()
            .map(|timer| PendingTimer {
                handle: timer.handle,
                due_at_ms: timer.due_at_ms,
                interval_ms: timer.interval_ms,
            })
            .collect()
    }

    #[must_use]
    pub fn live_timer_count(&self) -> usize {
        self.timers.len()
    }

    /// Recent firings, oldest first, as `(virtual time, handle)`.
    ///
    /// Holds at most `FIRED_LOG_CAPACITY` entries.
    #[must_use]
    pub fn fired_timers(&self) -> &[(u64, TimerHandle)] {
        &self.fired
    }

    /// Due time of the timer `pop_due_timer(until_ms)` would fire next.
    #[must_use]
    pub fn next_due_at(&self, until_ms: u64) -> Option<u64> {
        self.next_due_index(until_ms)
            .map(|idx| self.timers[idx].due_at_ms)
    }

    /// Pops the earliest timer due at or before `until_ms`, moving the clock
    /// to its due time. Repeating timers are re-armed before returning.
    pub fn pop_due_timer(&mut self, until_ms: u64) -> Option<TimerHandle> {
        let idx = self.next_due_index(until_ms)?;

        let timer = self.timers[idx];
        self.now_ms = self.now_ms.max(timer.due_at_ms);
        match timer.interval_ms {
            Some(interval_ms) => {
                let order = self.bump_timer_order();
                let slot = &mut self.timers[idx];
                slot.due_at_ms = timer.due_at_ms.saturating_add(interval_ms);
                slot.order = order;
            }
            None => {
                self.timers.remove(idx);
            }
        }
        if self.fired.len() >= FIRED_LOG_CAPACITY {
            self.fired.drain(..FIRED_LOG_CAPACITY / 2);
        }
        self.fired.push((self.now_ms, timer.handle));
        trace!(handle = %timer.handle, now_ms = self.now_ms, "headless timer fired");
        Some(timer.handle)
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn set_now_ms(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn next_due_index(&self, until_ms: u64) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due_at_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_at_ms, timer.order))
            .map(|(idx, _)| idx)
    }

    fn bump_timer_order(&mut self) -> u64 {
        let order = self.next_timer_order;
        self.next_timer_order += 1;
        order
    }

    fn state_mut(&mut self, element: &ElementId) -> SiteResult<&mut ElementState> {
        self.elements
            .get_mut(element)
            .ok_or_else(|| SiteError::UnknownElement(element.clone()))
    }

    fn is_descendant_of(&self, element: &ElementId, ancestor: &ElementId) -> bool {
        let mut current = self.elements.get(element).and_then(|s| s.parent.as_ref());
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(parent).and_then(|s| s.parent.as_ref());
        }
        false
    }

    fn insert(
        &mut self,
        id: ElementId,
        parent: Option<ElementId>,
        classes: &[&str],
    ) -> SiteResult<()> {
        if let Some(parent) = &parent {
            if !self.elements.contains_key(parent) {
                return Err(SiteError::UnknownElement(parent.clone()));
            }
        }
        if self.elements.contains_key(&id) {
            return Err(SiteError::InvalidData(format!("duplicate element id `{id}`")));
        }
        self.elements
            .insert(id, ElementState::with_classes(parent, classes));
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let id = ElementId::new(id);
        self.elements.contains_key(&id).then_some(id)
    }

    fn elements_by_class(&self, scope: Option<&ElementId>, class: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, state)| state.has_class(class))
            .filter(|(id, _)| scope.is_none_or(|scope| self.is_descendant_of(id, scope)))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn children(&self, parent: &ElementId) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|(_, state)| state.parent.as_ref() == Some(parent))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn create_element(&mut self, parent: &ElementId, classes: &[&str]) -> SiteResult<ElementId> {
        let mut id = ElementId::new(format!("el-{}", self.next_element_seq));
        while self.elements.contains_key(&id) {
            self.next_element_seq += 1;
            id = ElementId::new(format!("el-{}", self.next_element_seq));
        }
        self.next_element_seq += 1;
        self.insert(id.clone(), Some(parent.clone()), classes)?;
        Ok(id)
    }

    fn add_class(&mut self, element: &ElementId, class: &str) -> SiteResult<()> {
        self.state_mut(element)?.add_class(class);
        Ok(())
    }

    fn remove_class(&mut self, element: &ElementId, class: &str) -> SiteResult<()> {
        self.state_mut(element)?.remove_class(class);
        Ok(())
    }

    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.elements
            .get(element)
            .is_some_and(|state| state.has_class(class))
    }

    fn set_style(&mut self, element: &ElementId, property: &str, value: &str) -> SiteResult<()> {
        self.state_mut(element)?
            .styles
            .insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn text(&self, element: &ElementId) -> Option<String> {
        self.elements.get(element).map(|state| state.text.clone())
    }

    fn set_text(&mut self, element: &ElementId, text: &str) -> SiteResult<()> {
        text.clone_into(&mut self.state_mut(element)?.text);
        Ok(())
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.elements
            .get(element)
            .and_then(|state| state.attributes.get(name).cloned())
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) -> SiteResult<()> {
        self.state_mut(element)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn subscribe(&mut self, element: &ElementId, kind: EventKind) -> SiteResult<()> {
        let state = self.state_mut(element)?;
        if !state.subscriptions.contains(&kind) {
            state.subscriptions.push(kind);
        }
        Ok(())
    }

    fn unsubscribe(&mut self, element: &ElementId, kind: EventKind) {
        if let Some(state) = self.elements.get_mut(element) {
            state.subscriptions.retain(|k| *k != kind);
        }
    }

    fn schedule(&mut self, delay: Duration, mode: TimerMode) -> TimerHandle {
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let handle = TimerHandle::from_raw(self.next_timer_id);
        self.next_timer_id += 1;
        let order = self.bump_timer_order();
        let interval_ms = match mode {
            TimerMode::Once => None,
            // A zero interval would re-fire forever within a single instant.
            TimerMode::Repeating => Some(delay_ms.max(1)),
        };
        self.timers.push(ScheduledTimer {
            handle,
            due_at_ms: self.now_ms.saturating_add(delay_ms),
            order,
            interval_ms,
        });
        trace!(%handle, delay_ms, ?mode, "headless timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        before != self.timers.len()
    }
}

/// Declarative builder for headless page markup.
#[derive(Debug, Default)]
pub struct HeadlessSurfaceBuilder {
    surface: HeadlessSurface,
    error: Option<SiteError>,
}

impl HeadlessSurfaceBuilder {
    /// Adds a top-level element.
    #[must_use]
    pub fn element(self, id: &str, classes: &[&str]) -> Self {
        self.apply(|surface| surface.insert(ElementId::new(id), None, classes))
    }

    /// Adds an element as the last child of `parent`.
    #[must_use]
    pub fn child(self, parent: &str, id: &str, classes: &[&str]) -> Self {
        self.apply(|surface| {
            surface.insert(ElementId::new(id), Some(ElementId::new(parent)), classes)
        })
    }

    #[must_use]
    pub fn text(self, id: &str, text: &str) -> Self {
        self.apply(|surface| surface.set_text(&ElementId::new(id), text))
    }

    #[must_use]
    pub fn attribute(self, id: &str, name: &str, value: &str) -> Self {
        self.apply(|surface| surface.set_attribute(&ElementId::new(id), name, value))
    }

    /// Finishes the markup, reporting the first invalid step.
    pub fn build(self) -> SiteResult<HeadlessSurface> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.surface),
        }
    }

    fn apply(mut self, step: impl FnOnce(&mut HeadlessSurface) -> SiteResult<()>) -> Self {
        if self.error.is_none() {
            if let Err(error) = step(&mut self.surface) {
                self.error = Some(error);
            }
        }
        self
    }
}
