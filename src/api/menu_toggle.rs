use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ElementId, EventKind};
use crate::error::SiteResult;
use crate::render::Surface;

use super::engine_config::default_active_class;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuToggleConfig {
    #[serde(default = "default_toggle_id")]
    pub toggle_id: String,
    #[serde(default = "default_links_class")]
    pub links_class: String,
    #[serde(default = "default_closed_icon_class")]
    pub closed_icon_class: String,
    #[serde(default = "default_open_icon_class")]
    pub open_icon_class: String,
    #[serde(default = "default_active_class")]
    pub active_class: String,
}

impl Default for MenuToggleConfig {
    fn default() -> Self {
        Self {
            toggle_id: default_toggle_id(),
            links_class: default_links_class(),
            closed_icon_class: default_closed_icon_class(),
            open_icon_class: default_open_icon_class(),
            active_class: default_active_class(),
        }
    }
}

fn default_toggle_id() -> String {
    "menu-toggle".to_owned()
}

fn default_links_class() -> String {
    "nav-links".to_owned()
}

fn default_closed_icon_class() -> String {
    "fa-bars".to_owned()
}

fn default_open_icon_class() -> String {
    "fa-times".to_owned()
}

/// Mobile navigation toggle: opens and closes the link list and swaps the
/// button icon between bars and a cross.
#[derive(Debug, Clone)]
pub struct MenuToggle {
    config: MenuToggleConfig,
    toggle: ElementId,
    links: ElementId,
    icon: Option<ElementId>,
}

impl MenuToggle {
    /// Returns `None` unless both the toggle button and the link list exist.
    pub fn mount<S: Surface>(
        surface: &mut S,
        config: MenuToggleConfig,
    ) -> SiteResult<Option<Self>> {
        let Some(toggle) = surface.element_by_id(&config.toggle_id) else {
            return Ok(None);
        };
        let Some(links) = surface
            .elements_by_class(None, &config.links_class)
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let icon = surface.children(&toggle).into_iter().next();
        surface.subscribe(&toggle, EventKind::Click)?;
        debug!("menu toggle mounted");

        Ok(Some(Self {
            config,
            toggle,
            links,
            icon,
        }))
    }

    /// Whether the link list is open, read back from the surface.
    #[must_use]
    pub fn is_open<S: Surface>(&self, surface: &S) -> bool {
        surface.has_class(&self.links, &self.config.active_class)
    }

    #[must_use]
    pub fn toggle_button(&self) -> &ElementId {
        &self.toggle
    }

    /// Handles a click. Returns `false` when `target` is not the toggle.
    pub fn on_click<S: Surface>(
        &mut self,
        surface: &mut S,
        target: &ElementId,
    ) -> SiteResult<bool> {
        if *target != self.toggle {
            return Ok(false);
        }
        let open = surface.toggle_class(&self.links, &self.config.active_class)?;
        if let Some(icon) = &self.icon {
            let (from, to) = if open {
                (&self.config.closed_icon_class, &self.config.open_icon_class)
            } else {
                (&self.config.open_icon_class, &self.config.closed_icon_class)
            };
            surface.remove_class(icon, from)?;
            surface.add_class(icon, to)?;
        }
        debug!(open, "menu toggled");
        Ok(true)
    }
}
