use site_widgets::api::{HeroPhase, SiteEngine, SiteEngineConfig};
use site_widgets::core::ElementId;
use site_widgets::render::{HeadlessSurface, Surface};

fn hero_page(rotating: usize) -> HeadlessSurface {
    let mut builder = HeadlessSurface::builder().element("hero", &["hero-section"]);
    for i in 0..rotating {
        builder = builder.element(&format!("hero-{i}"), &["hero-section"]);
    }
    builder.build().expect("valid markup")
}

fn build_engine(rotating: usize) -> SiteEngine<HeadlessSurface> {
    SiteEngine::new(hero_page(rotating), SiteEngineConfig::default()).expect("engine init")
}

fn active_rotating(engine: &SiteEngine<HeadlessSurface>) -> Vec<usize> {
    let hero = engine.hero().expect("hero mounted");
    hero.panels()
        .iter()
        .enumerate()
        .filter(|(_, panel)| engine.surface().has_class(panel, "active"))
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn static_panel_is_shown_on_mount() {
    let engine = build_engine(3);
    let hero = engine.hero().expect("hero mounted");
    let static_panel = ElementId::new("hero");

    assert_eq!(hero.phase(), HeroPhase::Static);
    assert_eq!(hero.panel_count(), 3);
    assert_eq!(hero.static_panel(), Some(&static_panel));
    assert!(engine.surface().has_class(&static_panel, "active"));
    assert!(!engine.surface().has_class(&static_panel, "hidden-hero"));
    assert!(active_rotating(&engine).is_empty());
    assert_eq!(engine.surface().live_timer_count(), 1);
}

#[test]
fn two_stage_startup_then_rotation() {
    let mut engine = build_engine(3);
    let static_panel = ElementId::new("hero");

    engine.advance_time(2_999).expect("advance");
    assert_eq!(engine.hero().expect("hero").phase(), HeroPhase::Static);

    engine.advance_time(1).expect("advance");
    let hero = engine.hero().expect("hero");
    assert_eq!(hero.phase(), HeroPhase::Transitioning);
    assert!(!engine.surface().has_class(&static_panel, "active"));
    assert!(engine.surface().has_class(&static_panel, "hidden-hero"));
    assert!(active_rotating(&engine).is_empty());

    engine.advance_time(500).expect("advance");
    let hero = engine.hero().expect("hero");
    assert_eq!(hero.phase(), HeroPhase::Rotating);
    assert_eq!(hero.cursor(), 0);
    assert_eq!(hero.active_panel(), Some(&ElementId::new("hero-0")));
    assert_eq!(active_rotating(&engine), vec![0]);

    engine.advance_time(3_000).expect("advance");
    assert_eq!(engine.hero().expect("hero").cursor(), 1);
    assert_eq!(active_rotating(&engine), vec![1]);

    engine.advance_time(3_000).expect("advance");
    engine.advance_time(3_000).expect("advance");
    assert_eq!(engine.hero().expect("hero").cursor(), 0);
    assert_eq!(active_rotating(&engine), vec![0]);
    assert_eq!(engine.surface().live_timer_count(), 1);
}

#[test]
fn exactly_one_panel_visible_outside_fade() {
    let mut engine = build_engine(4);
    let static_panel = ElementId::new("hero");

    for _ in 0..300 {
        engine.advance_time(100).expect("advance");
        let hero = engine.hero().expect("hero");
        let rotating = active_rotating(&engine);
        let static_active = engine.surface().has_class(&static_panel, "active");
        match hero.phase() {
            HeroPhase::Static => {
                assert!(static_active);
                assert!(rotating.is_empty());
            }
            HeroPhase::Transitioning => {
                assert!(!static_active);
                assert!(rotating.is_empty());
            }
            HeroPhase::Rotating => {
                assert!(!static_active);
                assert_eq!(rotating, vec![hero.cursor()]);
            }
        }
        assert!(engine.surface().live_timer_count() <= 1);
    }
}

#[test]
fn no_rotating_panels_keeps_static_forever() {
    let mut engine = build_engine(0);
    let static_panel = ElementId::new("hero");

    assert_eq!(engine.surface().live_timer_count(), 0);
    let fired = engine.advance_time(600_000).expect("advance");
    assert_eq!(fired, 0);

    let hero = engine.hero().expect("hero mounted");
    assert_eq!(hero.phase(), HeroPhase::Static);
    assert!(hero.timer().is_none());
    assert!(engine.surface().has_class(&static_panel, "active"));
}

#[test]
fn rotation_runs_without_static_panel() {
    let surface = HeadlessSurface::builder()
        .element("slide-a", &["hero-section"])
        .element("slide-b", &["hero-section"])
        .build()
        .expect("valid markup");
    let mut engine = SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");

    assert!(engine.hero().expect("hero").static_panel().is_none());
    engine.advance_time(3_500).expect("advance");
    assert_eq!(active_rotating(&engine), vec![0]);
    engine.advance_time(3_000).expect("advance");
    assert_eq!(active_rotating(&engine), vec![1]);
}

#[test]
fn custom_timings_are_honoured() {
    let config = SiteEngineConfig::default().with_hero_timings(1_000, 200, 400);
    let mut engine = SiteEngine::new(hero_page(2), config).expect("engine init");

    engine.advance_time(1_200).expect("advance");
    assert_eq!(engine.hero().expect("hero").phase(), HeroPhase::Rotating);
    engine.advance_time(400).expect("advance");
    assert_eq!(engine.hero().expect("hero").cursor(), 1);
}

#[test]
fn page_without_hero_markup_skips_rotator() {
    let surface = HeadlessSurface::builder()
        .element("body", &[])
        .build()
        .expect("valid markup");
    let engine = SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");
    assert!(engine.hero().is_none());
    assert_eq!(engine.surface().live_timer_count(), 0);
}

#[test]
fn mount_clears_preactivated_rotating_panels() {
    let surface = HeadlessSurface::builder()
        .element("hero", &["hero-section"])
        .element("hero-0", &["hero-section"])
        .element("hero-1", &["hero-section", "active"])
        .build()
        .expect("valid markup");
    let mut engine = SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");

    assert!(engine.surface().has_class(&ElementId::new("hero"), "active"));
    assert!(active_rotating(&engine).is_empty());

    engine.advance_time(3_500).expect("advance");
    assert_eq!(active_rotating(&engine), vec![0]);
}

#[test]
fn week_long_rotation_runs_to_completion() {
    let mut engine = build_engine(2);
    let week_ms = 7 * 24 * 60 * 60 * 1_000;

    let fired = engine.advance_time(week_ms).expect("long advance");
    // Two startup timers, then one firing every 3000 ms after 3500 ms.
    assert_eq!(fired, 2 + ((week_ms - 3_500) / 3_000) as usize);
    assert_eq!(engine.now_ms(), week_ms);

    let hero = engine.hero().expect("hero");
    assert_eq!(hero.phase(), HeroPhase::Rotating);
    assert_eq!(active_rotating(&engine).len(), 1);
    assert_eq!(engine.surface().live_timer_count(), 1);
}
