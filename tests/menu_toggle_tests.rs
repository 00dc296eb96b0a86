use site_widgets::api::{SiteEngine, SiteEngineConfig};
use site_widgets::core::{ElementId, EventKind};
use site_widgets::interaction::Dispatch;
use site_widgets::render::{HeadlessSurface, Surface};

fn build_engine() -> SiteEngine<HeadlessSurface> {
    let surface = HeadlessSurface::builder()
        .element("menu-toggle", &[])
        .child("menu-toggle", "icon", &["fas", "fa-bars"])
        .element("links", &["nav-links"])
        .element("elsewhere", &[])
        .build()
        .expect("valid markup");
    SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init")
}

#[test]
fn toggle_opens_and_closes_links_and_swaps_icon() {
    let mut engine = build_engine();
    let toggle = ElementId::new("menu-toggle");
    let icon = ElementId::new("icon");

    assert!(engine.surface().is_subscribed(&toggle, EventKind::Click));
    assert!(!engine.is_menu_open());

    assert_eq!(engine.click(&toggle).expect("click"), Dispatch::Handled);
    assert!(engine.is_menu_open());
    assert!(engine.surface().has_class(&icon, "fa-times"));
    assert!(!engine.surface().has_class(&icon, "fa-bars"));
    assert!(engine.surface().has_class(&icon, "fas"));

    engine.click(&toggle).expect("click");
    assert!(!engine.is_menu_open());
    assert!(engine.surface().has_class(&icon, "fa-bars"));
    assert!(!engine.surface().has_class(&icon, "fa-times"));
}

#[test]
fn unrelated_clicks_are_ignored() {
    let mut engine = build_engine();
    let dispatch = engine
        .click(&ElementId::new("elsewhere"))
        .expect("click");
    assert_eq!(dispatch, Dispatch::Ignored);
    assert!(!engine.is_menu_open());
}

#[test]
fn toggle_without_icon_still_toggles_links() {
    let surface = HeadlessSurface::builder()
        .element("menu-toggle", &[])
        .element("links", &["nav-links"])
        .build()
        .expect("valid markup");
    let mut engine = SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");

    engine.click(&ElementId::new("menu-toggle")).expect("click");
    assert!(engine.is_menu_open());
}

#[test]
fn missing_links_skip_menu() {
    let surface = HeadlessSurface::builder()
        .element("menu-toggle", &[])
        .build()
        .expect("valid markup");
    let engine = SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");
    assert!(engine.menu().is_none());
    assert!(!engine.is_menu_open());
}
