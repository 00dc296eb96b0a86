use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ElementId, RotationCursor, TimerHandle, TimerMode};
use crate::error::SiteResult;
use crate::render::Surface;

use super::engine_config::default_active_class;

/// Lifecycle of the hero banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HeroPhase {
    /// The static panel is shown; rotation has not started.
    #[default]
    Static,
    /// The static panel is fading out; no rotating panel is shown yet.
    Transitioning,
    /// Rotating panels cycle on a recurring timer.
    Rotating,
}

/// Timings and markup hooks of the hero rotator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroRotatorConfig {
    /// How long the static panel stays up before rotation begins.
    #[serde(default = "default_static_hold_ms")]
    pub static_hold_ms: u64,
    /// Wait between hiding the static panel and showing the first slide.
    /// Should match the CSS fade-out transition.
    #[serde(default = "default_fade_out_ms")]
    pub fade_out_ms: u64,
    #[serde(default = "default_slide_interval_ms")]
    pub slide_interval_ms: u64,
    #[serde(default = "default_panel_class")]
    pub panel_class: String,
    #[serde(default = "default_static_panel_id")]
    pub static_panel_id: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
}

impl Default for HeroRotatorConfig {
    fn default() -> Self {
        Self {
            static_hold_ms: default_static_hold_ms(),
            fade_out_ms: default_fade_out_ms(),
            slide_interval_ms: default_slide_interval_ms(),
            panel_class: default_panel_class(),
            static_panel_id: default_static_panel_id(),
            active_class: default_active_class(),
            hidden_class: default_hidden_class(),
        }
    }
}

fn default_static_hold_ms() -> u64 {
    3_000
}

fn default_fade_out_ms() -> u64 {
    500
}

fn default_slide_interval_ms() -> u64 {
    3_000
}

fn default_panel_class() -> String {
    "hero-section".to_owned()
}

fn default_static_panel_id() -> String {
    "hero".to_owned()
}

fn default_hidden_class() -> String {
    "hidden-hero".to_owned()
}

/// Rotating hero banner preceded by one static panel.
///
/// Startup is two one-shot timers (static hold, then fade-out) followed by a
/// single recurring slide timer. Only one of them is armed at any time.
#[derive(Debug, Clone)]
pub struct HeroRotator {
    config: HeroRotatorConfig,
    static_panel: Option<ElementId>,
    panels: Vec<ElementId>,
    cursor: RotationCursor,
    phase: HeroPhase,
    timer: Option<TimerHandle>,
}

impl HeroRotator {
    /// Mounts on the page markup.
    ///
    /// Returns `None` when the page carries neither a static panel nor any
    /// rotating panel.
    pub fn mount<S: Surface>(
        surface: &mut S,
        config: HeroRotatorConfig,
    ) -> SiteResult<Option<Self>> {
        let static_panel = surface.element_by_id(&config.static_panel_id);
        let panels: Vec<ElementId> = surface
            .elements_by_class(None, &config.panel_class)
            .into_iter()
            .filter(|panel| Some(panel) != static_panel.as_ref())
            .collect();

        if static_panel.is_none() && panels.is_empty() {
            debug!("hero rotator markup not found; skipping");
            return Ok(None);
        }

        let mut rotator = Self {
            cursor: RotationCursor::new(panels.len()),
            config,
            static_panel,
            panels,
            phase: HeroPhase::Static,
            timer: None,
        };

        if let Some(static_panel) = &rotator.static_panel {
            surface.add_class(static_panel, &rotator.config.active_class)?;
            surface.remove_class(static_panel, &rotator.config.hidden_class)?;
        }
        for panel in &rotator.panels {
            surface.remove_class(panel, &rotator.config.active_class)?;
        }

        if rotator.panels.is_empty() {
            debug!("hero rotator has no rotating panels; staying static");
        } else {
            rotator.timer = Some(surface.schedule(
                Duration::from_millis(rotator.config.static_hold_ms),
                TimerMode::Once,
            ));
            debug!(panels = rotator.panels.len(), "hero rotator mounted");
        }

        Ok(Some(rotator))
    }

    #[must_use]
    pub fn phase(&self) -> HeroPhase {
        self.phase
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.index()
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn panels(&self) -> &[ElementId] {
        &self.panels
    }

    #[must_use]
    pub fn static_panel(&self) -> Option<&ElementId> {
        self.static_panel.as_ref()
    }

    /// Rotating panel currently shown, if rotation has started.
    #[must_use]
    pub fn active_panel(&self) -> Option<&ElementId> {
        match self.phase {
            HeroPhase::Rotating => self.panels.get(self.cursor.index()),
            HeroPhase::Static | HeroPhase::Transitioning => None,
        }
    }

    #[must_use]
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Handles a timer firing. Returns `false` for handles it does not own.
    pub fn on_timer<S: Surface>(
        &mut self,
        surface: &mut S,
        handle: TimerHandle,
    ) -> SiteResult<bool> {
        if self.timer != Some(handle) {
            return Ok(false);
        }

        match self.phase {
            HeroPhase::Static => {
                if let Some(static_panel) = &self.static_panel {
                    surface.remove_class(static_panel, &self.config.active_class)?;
                    surface.add_class(static_panel, &self.config.hidden_class)?;
                }
                self.phase = HeroPhase::Transitioning;
                self.timer = Some(surface.schedule(
                    Duration::from_millis(self.config.fade_out_ms),
                    TimerMode::Once,
                ));
                debug!("hero static panel fading out");
            }
            HeroPhase::Transitioning => {
                self.cursor.move_to(0);
                self.show_slide(surface)?;
                self.phase = HeroPhase::Rotating;
                self.timer = Some(surface.schedule(
                    Duration::from_millis(self.config.slide_interval_ms),
                    TimerMode::Repeating,
                ));
                debug!("hero rotation started");
            }
            HeroPhase::Rotating => {
                self.cursor.advance();
                self.show_slide(surface)?;
            }
        }
        Ok(true)
    }

    fn show_slide<S: Surface>(&self, surface: &mut S) -> SiteResult<()> {
        let index = self.cursor.index();
        let active = &self.config.active_class;

        for (i, panel) in self.panels.iter().enumerate() {
            if i != index && surface.has_class(panel, active) {
                surface.remove_class(panel, active)?;
            }
        }
        if let Some(static_panel) = &self.static_panel {
            surface.add_class(static_panel, &self.config.hidden_class)?;
        }
        if let Some(panel) = self.panels.get(index) {
            surface.add_class(panel, active)?;
        }
        debug!(index, "hero slide shown");
        Ok(())
    }
}
