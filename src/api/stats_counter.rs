use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{ElementId, EventKind, TimerHandle, TimerMode};
use crate::error::SiteResult;
use crate::render::Surface;

/// Animation tuning and markup hooks of the stats counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsCounterConfig {
    /// Number of increments needed to reach a target. Lower is faster.
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Visible fraction of the section that starts the animation.
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
    #[serde(default = "default_section_class")]
    pub section_class: String,
    #[serde(default = "default_counter_class")]
    pub counter_class: String,
    #[serde(default = "default_target_attribute")]
    pub target_attribute: String,
}

impl Default for StatsCounterConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            tick_ms: default_tick_ms(),
            visibility_threshold: default_visibility_threshold(),
            section_class: default_section_class(),
            counter_class: default_counter_class(),
            target_attribute: default_target_attribute(),
        }
    }
}

fn default_speed() -> f64 {
    200.0
}

fn default_tick_ms() -> u64 {
    1
}

fn default_visibility_threshold() -> f64 {
    0.5
}

fn default_section_class() -> String {
    "stats-section".to_owned()
}

fn default_counter_class() -> String {
    "stat-number".to_owned()
}

fn default_target_attribute() -> String {
    "data-target".to_owned()
}

/// Attribute value marking a counter that already animated.
pub const COMPLETED_MARKER: &str = "completed";

/// Public progress of one counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterProgress {
    pub element: ElementId,
    pub target: f64,
    pub unit: String,
    pub current: f64,
    pub finished: bool,
}

/// Count-up animation of the statistic numbers, started once when the stats
/// section scrolls into view.
#[derive(Debug, Clone)]
pub struct StatsCounter {
    config: StatsCounterConfig,
    section: ElementId,
    counters: Vec<ElementId>,
    progress: Vec<CounterProgress>,
    triggered: bool,
    timer: Option<TimerHandle>,
}

impl StatsCounter {
    /// Mounts on the stats section. Returns `None` when the section is absent.
    pub fn mount<S: Surface>(
        surface: &mut S,
        config: StatsCounterConfig,
    ) -> SiteResult<Option<Self>> {
        let Some(section) = surface
            .elements_by_class(None, &config.section_class)
            .into_iter()
            .next()
        else {
            debug!("stats section not found; skipping");
            return Ok(None);
        };
        let counters = surface.elements_by_class(None, &config.counter_class);
        surface.subscribe(&section, EventKind::Visibility)?;
        debug!(counters = counters.len(), "stats counter mounted");

        Ok(Some(Self {
            config,
            section,
            counters,
            progress: Vec::new(),
            triggered: false,
            timer: None,
        }))
    }

    #[must_use]
    pub fn section(&self) -> &ElementId {
        &self.section
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn progress(&self) -> &[CounterProgress] {
        &self.progress
    }

    #[must_use]
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Reacts to a visibility change of the section.
    ///
    /// Starts the animation the first time `ratio` reaches the threshold and
    /// stops observing the section afterwards.
    pub fn on_visibility<S: Surface>(
        &mut self,
        surface: &mut S,
        target: &ElementId,
        ratio: f64,
    ) -> SiteResult<bool> {
        if self.triggered || *target != self.section {
            return Ok(false);
        }
        if !ratio.is_finite() || ratio < self.config.visibility_threshold {
            return Ok(false);
        }

        self.triggered = true;
        surface.unsubscribe(&self.section, EventKind::Visibility);

        for counter in &self.counters {
            let Some(raw_target) = surface.attribute(counter, &self.config.target_attribute) else {
                warn!(%counter, "stat counter has no target; skipping");
                continue;
            };
            if raw_target == COMPLETED_MARKER {
                continue;
            }
            let Some(target) = raw_target
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|target| target.is_finite())
            else {
                warn!(%counter, %raw_target, "stat counter target is not a number; skipping");
                continue;
            };
            let unit = unit_suffix(&surface.text(counter).unwrap_or_default());
            surface.set_attribute(counter, &self.config.target_attribute, COMPLETED_MARKER)?;
            self.progress.push(CounterProgress {
                element: counter.clone(),
                target,
                unit,
                current: 0.0,
                finished: false,
            });
        }

        self.step(surface)?;
        if self.progress.iter().any(|p| !p.finished) {
            self.timer = Some(surface.schedule(
                Duration::from_millis(self.config.tick_ms),
                TimerMode::Repeating,
            ));
        }
        debug!(counters = self.progress.len(), "stats animation started");
        Ok(true)
    }

    /// Advances every running counter by one tick. Returns `false` for
    /// foreign handles.
    pub fn on_timer<S: Surface>(
        &mut self,
        surface: &mut S,
        handle: TimerHandle,
    ) -> SiteResult<bool> {
        if self.timer != Some(handle) {
            return Ok(false);
        }
        self.step(surface)?;
        if self.progress.iter().all(|p| p.finished) {
            if let Some(timer) = self.timer.take() {
                surface.cancel(timer);
            }
            debug!("stats animation finished");
        }
        Ok(true)
    }

    fn step<S: Surface>(&mut self, surface: &mut S) -> SiteResult<()> {
        let speed = self.config.speed;
        for counter in self.progress.iter_mut().filter(|p| !p.finished) {
            counter.current += counter.target / speed;
            let text = if counter.current < counter.target {
                format_in_progress(counter.current, counter.target, &counter.unit)
            } else {
                counter.finished = true;
                format!("{}{}", counter.target, counter.unit)
            };
            trace!(element = %counter.element, %text, "stat counter tick");
            surface.set_text(&counter.element, &text)?;
        }
        Ok(())
    }
}

/// Everything in the initial label that is not part of the number.
fn unit_suffix(initial_text: &str) -> String {
    initial_text
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != '.')
        .collect()
}

fn format_in_progress(current: f64, target: f64, unit: &str) -> String {
    let precision = if current.fract() != 0.0 && target.fract() != 0.0 {
        1
    } else {
        0
    };
    // Ties round away from zero, matching how page scripts print counters.
    let scale = if precision == 0 { 1.0 } else { 10.0 };
    let rounded = (current * scale).round() / scale;
    format!("{rounded:.precision$}{unit}")
}
