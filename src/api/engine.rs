use tracing::{debug, trace};

use crate::core::{ElementId, TimerHandle};
use crate::error::{SiteError, SiteResult};
use crate::interaction::{Dispatch, SiteEvent};
use crate::render::{HeadlessSurface, Surface};

use super::{
    CarouselSnapshot, HeroRotator, HeroSnapshot, MenuSnapshot, MenuToggle, SiteEngineConfig,
    SiteSnapshot, StatsCounter, StatsSnapshot, TestimonialCarousel,
};

/// Upper bound on timer firings `advance_time` processes at one virtual
/// instant. Hitting it means timers keep re-arming with no delay.
pub const ADVANCE_TIME_STEP_LIMIT: usize = 100_000;

/// Main orchestration facade consumed by host applications.
///
/// `SiteEngine` owns the surface and every widget found in the markup, and
/// routes host events to them. Widgets whose markup is missing are simply
/// not mounted.
#[derive(Debug)]
pub struct SiteEngine<S: Surface> {
    surface: S,
    config: SiteEngineConfig,
    hero: Option<HeroRotator>,
    carousel: Option<TestimonialCarousel>,
    stats: Option<StatsCounter>,
    menu: Option<MenuToggle>,
}

impl<S: Surface> SiteEngine<S> {
    /// Validates `config` and mounts every widget on `surface`.
    pub fn new(mut surface: S, config: SiteEngineConfig) -> SiteResult<Self> {
        config.validate()?;

        let hero = HeroRotator::mount(&mut surface, config.hero.clone())?;
        let carousel = TestimonialCarousel::mount(&mut surface, config.carousel.clone())?;
        let stats = StatsCounter::mount(&mut surface, config.stats.clone())?;
        let menu = MenuToggle::mount(&mut surface, config.menu.clone())?;
        debug!(
            hero = hero.is_some(),
            carousel = carousel.is_some(),
            stats = stats.is_some(),
            menu = menu.is_some(),
            "site engine initialized"
        );

        Ok(Self {
            surface,
            config,
            hero,
            carousel,
            stats,
            menu,
        })
    }

    /// Routes one host event to the widget that owns it.
    pub fn dispatch(&mut self, event: SiteEvent) -> SiteResult<Dispatch> {
        trace!(?event, "dispatch");
        let handled = match &event {
            SiteEvent::TimerFired(handle) => self.route_timer(*handle)?,
            SiteEvent::Click(target) => self.route_click(target)?,
            SiteEvent::Visibility { target, ratio } => match self.stats.as_mut() {
                Some(stats) => stats.on_visibility(&mut self.surface, target, *ratio)?,
                None => false,
            },
        };
        Ok(Dispatch::from_handled(handled))
    }

    pub fn click(&mut self, target: &ElementId) -> SiteResult<Dispatch> {
        self.dispatch(SiteEvent::Click(target.clone()))
    }

    pub fn timer_fired(&mut self, handle: TimerHandle) -> SiteResult<Dispatch> {
        self.dispatch(SiteEvent::TimerFired(handle))
    }

    pub fn report_visibility(&mut self, target: &ElementId, ratio: f64) -> SiteResult<Dispatch> {
        self.dispatch(SiteEvent::Visibility {
            target: target.clone(),
            ratio,
        })
    }

    /// Shows testimonial `index` without touching the auto-rotation timer.
    ///
    /// Returns the normalized cursor, or `None` when no carousel is mounted.
    pub fn show_testimonial(&mut self, index: i64) -> SiteResult<Option<usize>> {
        match self.carousel.as_mut() {
            Some(carousel) => carousel.show_testimonial(&mut self.surface, index).map(Some),
            None => Ok(None),
        }
    }

    pub fn next_testimonial(&mut self) -> SiteResult<Option<usize>> {
        match self.carousel.as_mut() {
            Some(carousel) => carousel.next(&mut self.surface).map(Some),
            None => Ok(None),
        }
    }

    pub fn prev_testimonial(&mut self) -> SiteResult<Option<usize>> {
        match self.carousel.as_mut() {
            Some(carousel) => carousel.prev(&mut self.surface).map(Some),
            None => Ok(None),
        }
    }

    pub fn select_testimonial(&mut self, index: usize) -> SiteResult<Option<usize>> {
        match self.carousel.as_mut() {
            Some(carousel) => carousel.select(&mut self.surface, index).map(Some),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn hero(&self) -> Option<&HeroRotator> {
        self.hero.as_ref()
    }

    #[must_use]
    pub fn carousel(&self) -> Option<&TestimonialCarousel> {
        self.carousel.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> Option<&StatsCounter> {
        self.stats.as_ref()
    }

    #[must_use]
    pub fn menu(&self) -> Option<&MenuToggle> {
        self.menu.as_ref()
    }

    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu
            .as_ref()
            .is_some_and(|menu| menu.is_open(&self.surface))
    }

    #[must_use]
    pub fn config(&self) -> &SiteEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn snapshot(&self) -> SiteSnapshot {
        let active_class = &self.config.carousel.active_class;
        SiteSnapshot {
            hero: self.hero.as_ref().map(|hero| HeroSnapshot {
                phase: hero.phase(),
                cursor: hero.cursor(),
                panel_count: hero.panel_count(),
                timer_live: hero.timer().is_some(),
            }),
            carousel: self.carousel.as_ref().map(|carousel| CarouselSnapshot {
                cursor: carousel.cursor(),
                card_count: carousel.card_count(),
                offset_percent: carousel.offset_percent(),
                active_dots: carousel
                    .dots()
                    .iter()
                    .filter(|dot| self.surface.has_class(dot, active_class))
                    .count(),
            }),
            stats: self.stats.as_ref().map(|stats| StatsSnapshot {
                triggered: stats.is_triggered(),
                running: stats.is_running(),
                counters: stats.progress().to_vec(),
            }),
            menu: self.menu.as_ref().map(|menu| MenuSnapshot {
                open: menu.is_open(&self.surface),
            }),
        }
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn route_timer(&mut self, handle: TimerHandle) -> SiteResult<bool> {
        let surface = &mut self.surface;
        if let Some(hero) = self.hero.as_mut() {
            if hero.on_timer(surface, handle)? {
                return Ok(true);
            }
        }
        if let Some(carousel) = self.carousel.as_mut() {
            if carousel.on_timer(surface, handle)? {
                return Ok(true);
            }
        }
        if let Some(stats) = self.stats.as_mut() {
            if stats.on_timer(surface, handle)? {
                return Ok(true);
            }
        }
        trace!(%handle, "timer not owned by any widget");
        Ok(false)
    }

    fn route_click(&mut self, target: &ElementId) -> SiteResult<bool> {
        let surface = &mut self.surface;
        if let Some(menu) = self.menu.as_mut() {
            if menu.on_click(surface, target)? {
                return Ok(true);
            }
        }
        if let Some(carousel) = self.carousel.as_mut() {
            if carousel.on_click(surface, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl SiteEngine<HeadlessSurface> {
    /// Moves the virtual clock forward by `delta_ms`, dispatching every timer
    /// that comes due on the way, in order. Returns the number of firings.
    pub fn advance_time(&mut self, delta_ms: u64) -> SiteResult<usize> {
        let target_ms = self.surface.now_ms().saturating_add(delta_ms);
        let mut fired = 0usize;
        let mut instant_ms = self.surface.now_ms();
        let mut at_instant = 0usize;
        while let Some(due_at_ms) = self.surface.next_due_at(target_ms) {
            if due_at_ms == instant_ms {
                at_instant += 1;
            } else {
                instant_ms = due_at_ms;
                at_instant = 1;
            }
            if at_instant > ADVANCE_TIME_STEP_LIMIT {
                self.surface.set_now_ms(due_at_ms);
                return Err(SiteError::InvalidData(format!(
                    "advance_time exceeded {ADVANCE_TIME_STEP_LIMIT} timer firings \
                     at now_ms={due_at_ms} (target_ms={target_ms})"
                )));
            }
            let Some(handle) = self.surface.pop_due_timer(target_ms) else {
                break;
            };
            fired += 1;
            self.dispatch(SiteEvent::TimerFired(handle))?;
        }
        self.surface.set_now_ms(target_ms);
        Ok(fired)
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.surface.now_ms()
    }
}
