use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

use super::validation::{
    validate_carousel_config, validate_hero_config, validate_menu_config, validate_stats_config,
};
use super::{CarouselConfig, HeroRotatorConfig, MenuToggleConfig, StatsCounterConfig};

/// Public engine bootstrap configuration.
///
/// Every field has a default reproducing the stock page, so hosts only
/// spell out what differs. The type is serializable so the whole setup can
/// live next to the page markup as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteEngineConfig {
    #[serde(default)]
    pub hero: HeroRotatorConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub stats: StatsCounterConfig,
    #[serde(default)]
    pub menu: MenuToggleConfig,
}

impl SiteEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the static hold, fade-out wait and slide interval of the hero.
    #[must_use]
    pub fn with_hero_timings(
        mut self,
        static_hold_ms: u64,
        fade_out_ms: u64,
        slide_interval_ms: u64,
    ) -> Self {
        self.hero.static_hold_ms = static_hold_ms;
        self.hero.fade_out_ms = fade_out_ms;
        self.hero.slide_interval_ms = slide_interval_ms;
        self
    }

    /// Sets the auto-rotation interval of the testimonial carousel.
    #[must_use]
    pub fn with_carousel_interval_ms(mut self, rotate_interval_ms: u64) -> Self {
        self.carousel.rotate_interval_ms = rotate_interval_ms;
        self
    }

    /// Sets stats animation speed (ticks to target) and tick length.
    #[must_use]
    pub fn with_stats_animation(mut self, speed: f64, tick_ms: u64) -> Self {
        self.stats.speed = speed;
        self.stats.tick_ms = tick_ms;
        self
    }

    #[must_use]
    pub fn with_hero(mut self, hero: HeroRotatorConfig) -> Self {
        self.hero = hero;
        self
    }

    #[must_use]
    pub fn with_carousel(mut self, carousel: CarouselConfig) -> Self {
        self.carousel = carousel;
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: StatsCounterConfig) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_menu(mut self, menu: MenuToggleConfig) -> Self {
        self.menu = menu;
        self
    }

    pub fn validate(&self) -> SiteResult<()> {
        validate_hero_config(&self.hero)?;
        validate_carousel_config(&self.carousel)?;
        validate_stats_config(&self.stats)?;
        validate_menu_config(&self.menu)?;
        Ok(())
    }

    /// Parses and validates a JSON config. Missing fields take defaults.
    pub fn from_json_str(input: &str) -> SiteResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| SiteError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> SiteResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SiteError::InvalidConfig(format!("failed to serialize config json: {e}")))
    }
}

pub(crate) fn default_active_class() -> String {
    "active".to_owned()
}
