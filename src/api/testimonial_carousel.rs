use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{ElementId, EventKind, RotationCursor, TimerHandle, TimerMode};
use crate::error::SiteResult;
use crate::render::Surface;

use super::engine_config::default_active_class;

/// Timing and markup hooks of the testimonial carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_rotate_interval_ms")]
    pub rotate_interval_ms: u64,
    #[serde(default = "default_container_class")]
    pub container_class: String,
    #[serde(default = "default_card_class")]
    pub card_class: String,
    #[serde(default = "default_dots_container_id")]
    pub dots_container_id: String,
    #[serde(default = "default_dot_class")]
    pub dot_class: String,
    #[serde(default = "default_prev_button_class")]
    pub prev_button_class: String,
    #[serde(default = "default_next_button_class")]
    pub next_button_class: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            rotate_interval_ms: default_rotate_interval_ms(),
            container_class: default_container_class(),
            card_class: default_card_class(),
            dots_container_id: default_dots_container_id(),
            dot_class: default_dot_class(),
            prev_button_class: default_prev_button_class(),
            next_button_class: default_next_button_class(),
            active_class: default_active_class(),
        }
    }
}

fn default_rotate_interval_ms() -> u64 {
    7_000
}

fn default_container_class() -> String {
    "testimonial-carousel".to_owned()
}

fn default_card_class() -> String {
    "testimonial-card".to_owned()
}

fn default_dots_container_id() -> String {
    "carousel-dots".to_owned()
}

fn default_dot_class() -> String {
    "dot".to_owned()
}

fn default_prev_button_class() -> String {
    "prev-btn".to_owned()
}

fn default_next_button_class() -> String {
    "next-btn".to_owned()
}

pub const DOT_INDEX_ATTRIBUTE: &str = "data-index";

/// Testimonial cards slid horizontally, with auto-rotation and manual controls.
///
/// Every manual navigation cancels the recurring timer before arming a new
/// one, so at most one auto-rotation timer is ever live.
#[derive(Debug, Clone)]
pub struct TestimonialCarousel {
    config: CarouselConfig,
    container: ElementId,
    cards: Vec<ElementId>,
    dots: Vec<ElementId>,
    prev_button: Option<ElementId>,
    next_button: Option<ElementId>,
    cursor: RotationCursor,
    timer: Option<TimerHandle>,
}

impl TestimonialCarousel {
    /// Mounts on the page markup, creating one dot per card.
    ///
    /// Returns `None` when the container or its cards are missing.
    pub fn mount<S: Surface>(surface: &mut S, config: CarouselConfig) -> SiteResult<Option<Self>> {
        let Some(container) = surface
            .elements_by_class(None, &config.container_class)
            .into_iter()
            .next()
        else {
            debug!("testimonial carousel container not found; skipping");
            return Ok(None);
        };
        let cards = surface.elements_by_class(Some(&container), &config.card_class);
        if cards.is_empty() {
            debug!("testimonial carousel has no cards; skipping");
            return Ok(None);
        }

        let mut dots = Vec::with_capacity(cards.len());
        match surface.element_by_id(&config.dots_container_id) {
            Some(dots_container) => {
                for i in 0..cards.len() {
                    let dot =
                        surface.create_element(&dots_container, &[config.dot_class.as_str()])?;
                    surface.set_attribute(&dot, DOT_INDEX_ATTRIBUTE, &i.to_string())?;
                    surface.subscribe(&dot, EventKind::Click)?;
                    dots.push(dot);
                }
            }
            None => warn!("testimonial dots container not found; dots disabled"),
        }

        let prev_button = first_by_class(surface, &config.prev_button_class);
        let next_button = first_by_class(surface, &config.next_button_class);
        for button in prev_button.iter().chain(next_button.iter()) {
            surface.subscribe(button, EventKind::Click)?;
        }

        let mut carousel = Self {
            cursor: RotationCursor::new(cards.len()),
            config,
            container,
            cards,
            dots,
            prev_button,
            next_button,
            timer: None,
        };
        carousel.show_testimonial(surface, 0)?;
        carousel.start_auto_rotate(surface);
        debug!(cards = carousel.cards.len(), "testimonial carousel mounted");
        Ok(Some(carousel))
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    #[must_use]
    pub fn dots(&self) -> &[ElementId] {
        &self.dots
    }

    #[must_use]
    pub fn container(&self) -> &ElementId {
        &self.container
    }

    #[must_use]
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Horizontal offset of the card strip, in percent of the container width.
    #[must_use]
    pub fn offset_percent(&self) -> i64 {
        -(i64::try_from(self.cursor.index()).unwrap_or(i64::MAX) * 100)
    }

    /// Shows the card at `index`, wrapping out-of-range requests.
    ///
    /// Repeating the call with the same index leaves the page unchanged.
    pub fn show_testimonial<S: Surface>(
        &mut self,
        surface: &mut S,
        index: i64,
    ) -> SiteResult<usize> {
        let index = self.cursor.move_to(index);
        let transform = format!("translateX({}%)", self.offset_percent());
        surface.set_style(&self.container, "transform", &transform)?;

        let active = &self.config.active_class;
        for (i, card) in self.cards.iter().enumerate() {
            sync_class(surface, card, active, i == index)?;
        }
        for (i, dot) in self.dots.iter().enumerate() {
            sync_class(surface, dot, active, i == index)?;
        }
        Ok(index)
    }

    pub fn next<S: Surface>(&mut self, surface: &mut S) -> SiteResult<usize> {
        let index = self.show_testimonial(surface, self.cursor.offset_by(1))?;
        self.restart_auto_rotate(surface);
        Ok(index)
    }

    pub fn prev<S: Surface>(&mut self, surface: &mut S) -> SiteResult<usize> {
        let index = self.show_testimonial(surface, self.cursor.offset_by(-1))?;
        self.restart_auto_rotate(surface);
        Ok(index)
    }

    /// Jumps to the card behind dot `index`.
    pub fn select<S: Surface>(&mut self, surface: &mut S, index: usize) -> SiteResult<usize> {
        let index = self.show_testimonial(surface, i64::try_from(index).unwrap_or(i64::MAX))?;
        self.restart_auto_rotate(surface);
        Ok(index)
    }

    /// Handles a click. Returns `false` when `target` is none of its controls.
    pub fn on_click<S: Surface>(
        &mut self,
        surface: &mut S,
        target: &ElementId,
    ) -> SiteResult<bool> {
        if self.prev_button.as_ref() == Some(target) {
            self.prev(surface)?;
            return Ok(true);
        }
        if self.next_button.as_ref() == Some(target) {
            self.next(surface)?;
            return Ok(true);
        }
        if let Some(dot_index) = self.dots.iter().position(|dot| dot == target) {
            self.select(surface, dot_index)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Advances on the auto-rotation timer. Returns `false` for foreign handles.
    pub fn on_timer<S: Surface>(
        &mut self,
        surface: &mut S,
        handle: TimerHandle,
    ) -> SiteResult<bool> {
        if self.timer != Some(handle) {
            return Ok(false);
        }
        self.show_testimonial(surface, self.cursor.offset_by(1))?;
        Ok(true)
    }

    fn start_auto_rotate<S: Surface>(&mut self, surface: &mut S) {
        self.timer = Some(surface.schedule(
            Duration::from_millis(self.config.rotate_interval_ms),
            TimerMode::Repeating,
        ));
    }

    fn restart_auto_rotate<S: Surface>(&mut self, surface: &mut S) {
        if let Some(previous) = self.timer.take() {
            surface.cancel(previous);
        }
        self.start_auto_rotate(surface);
    }
}

fn first_by_class<S: Surface>(surface: &S, class: &str) -> Option<ElementId> {
    surface.elements_by_class(None, class).into_iter().next()
}

fn sync_class<S: Surface>(
    surface: &mut S,
    element: &ElementId,
    class: &str,
    wanted: bool,
) -> SiteResult<()> {
    match (wanted, surface.has_class(element, class)) {
        (true, false) => surface.add_class(element, class),
        (false, true) => surface.remove_class(element, class),
        _ => Ok(()),
    }
}
