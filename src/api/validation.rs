use crate::error::{SiteError, SiteResult};

use super::{CarouselConfig, HeroRotatorConfig, MenuToggleConfig, StatsCounterConfig};

pub(super) fn validate_hero_config(config: &HeroRotatorConfig) -> SiteResult<()> {
    require_positive_ms("hero static_hold_ms", config.static_hold_ms)?;
    require_positive_ms("hero slide_interval_ms", config.slide_interval_ms)?;
    // A zero fade-out is allowed: the first slide then follows immediately.
    require_class("hero panel_class", &config.panel_class)?;
    require_class("hero static_panel_id", &config.static_panel_id)?;
    require_class("hero active_class", &config.active_class)?;
    require_class("hero hidden_class", &config.hidden_class)
}

pub(super) fn validate_carousel_config(config: &CarouselConfig) -> SiteResult<()> {
    require_positive_ms("carousel rotate_interval_ms", config.rotate_interval_ms)?;
    require_class("carousel container_class", &config.container_class)?;
    require_class("carousel card_class", &config.card_class)?;
    require_class("carousel dots_container_id", &config.dots_container_id)?;
    require_class("carousel dot_class", &config.dot_class)?;
    require_class("carousel prev_button_class", &config.prev_button_class)?;
    require_class("carousel next_button_class", &config.next_button_class)?;
    require_class("carousel active_class", &config.active_class)
}

pub(super) fn validate_stats_config(config: &StatsCounterConfig) -> SiteResult<()> {
    if !config.speed.is_finite() || config.speed <= 0.0 {
        return Err(SiteError::InvalidConfig(
            "stats speed must be finite and > 0".to_owned(),
        ));
    }
    require_positive_ms("stats tick_ms", config.tick_ms)?;
    if !config.visibility_threshold.is_finite()
        || !(0.0..=1.0).contains(&config.visibility_threshold)
    {
        return Err(SiteError::InvalidConfig(
            "stats visibility_threshold must be finite and in [0, 1]".to_owned(),
        ));
    }
    require_class("stats section_class", &config.section_class)?;
    require_class("stats counter_class", &config.counter_class)?;
    require_class("stats target_attribute", &config.target_attribute)
}

pub(super) fn validate_menu_config(config: &MenuToggleConfig) -> SiteResult<()> {
    require_class("menu toggle_id", &config.toggle_id)?;
    require_class("menu links_class", &config.links_class)?;
    require_class("menu closed_icon_class", &config.closed_icon_class)?;
    require_class("menu open_icon_class", &config.open_icon_class)?;
    require_class("menu active_class", &config.active_class)
}

fn require_positive_ms(name: &str, value: u64) -> SiteResult<()> {
    if value == 0 {
        return Err(SiteError::InvalidConfig(format!("{name} must be > 0")));
    }
    Ok(())
}

fn require_class(name: &str, value: &str) -> SiteResult<()> {
    if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
        return Err(SiteError::InvalidConfig(format!(
            "{name} must be a non-empty token without whitespace"
        )));
    }
    Ok(())
}
