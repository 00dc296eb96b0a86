use approx::assert_abs_diff_eq;
use site_widgets::api::{COMPLETED_MARKER, SiteEngine, SiteEngineConfig};
use site_widgets::core::{ElementId, EventKind};
use site_widgets::interaction::Dispatch;
use site_widgets::render::{HeadlessSurface, Surface};

fn stats_page() -> HeadlessSurface {
    HeadlessSurface::builder()
        .element("stats", &["stats-section"])
        .child("stats", "clients", &["stat-number"])
        .text("clients", "0k")
        .attribute("clients", "data-target", "12")
        .child("stats", "volume", &["stat-number"])
        .text("volume", "0b+")
        .attribute("volume", "data-target", "2.5")
        .build()
        .expect("valid markup")
}

fn build_engine(surface: HeadlessSurface) -> SiteEngine<HeadlessSurface> {
    SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init")
}

fn text(engine: &SiteEngine<HeadlessSurface>, id: &str) -> String {
    engine
        .surface()
        .text(&ElementId::new(id))
        .expect("element exists")
}

#[test]
fn mount_observes_section_without_animating() {
    let mut engine = build_engine(stats_page());
    let section = ElementId::new("stats");

    assert!(engine.surface().is_subscribed(&section, EventKind::Visibility));
    engine.advance_time(5_000).expect("advance");
    assert_eq!(text(&engine, "clients"), "0k");
    assert!(!engine.stats().expect("stats").is_triggered());
}

#[test]
fn below_threshold_visibility_does_not_start() {
    let mut engine = build_engine(stats_page());
    let section = ElementId::new("stats");

    let dispatch = engine.report_visibility(&section, 0.3).expect("visibility");
    assert_eq!(dispatch, Dispatch::Ignored);
    assert!(!engine.stats().expect("stats").is_triggered());
    assert_eq!(engine.surface().live_timer_count(), 0);
}

#[test]
fn counters_count_up_to_exact_target_with_unit() {
    let mut engine = build_engine(stats_page());
    let section = ElementId::new("stats");

    let dispatch = engine.report_visibility(&section, 0.5).expect("visibility");
    assert_eq!(dispatch, Dispatch::Handled);
    assert!(engine.stats().expect("stats").is_running());
    assert_eq!(text(&engine, "clients"), "0k");
    assert!(!engine.surface().is_subscribed(&section, EventKind::Visibility));

    engine.advance_time(99).expect("advance");
    assert_eq!(text(&engine, "clients"), "6k");

    engine.advance_time(1_000).expect("advance");
    assert_eq!(text(&engine, "clients"), "12k");
    assert_eq!(text(&engine, "volume"), "2.5b+");

    let stats = engine.stats().expect("stats");
    assert!(!stats.is_running());
    assert_eq!(engine.surface().live_timer_count(), 0);
    for progress in stats.progress() {
        assert!(progress.finished);
        assert_abs_diff_eq!(progress.current, progress.target, epsilon = progress.target / 100.0);
        assert_eq!(
            engine
                .surface()
                .attribute(&progress.element, "data-target")
                .as_deref(),
            Some(COMPLETED_MARKER)
        );
    }
}

#[test]
fn animation_runs_only_once() {
    let mut engine = build_engine(stats_page());
    let section = ElementId::new("stats");

    engine.report_visibility(&section, 1.0).expect("visibility");
    engine.advance_time(1_000).expect("advance");
    let dispatch = engine.report_visibility(&section, 1.0).expect("visibility");
    assert_eq!(dispatch, Dispatch::Ignored);
    assert_eq!(engine.surface().live_timer_count(), 0);
    assert_eq!(text(&engine, "clients"), "12k");
}

#[test]
fn completed_and_malformed_counters_are_skipped() {
    let surface = HeadlessSurface::builder()
        .element("stats", &["stats-section"])
        .child("stats", "done", &["stat-number"])
        .text("done", "40%")
        .attribute("done", "data-target", COMPLETED_MARKER)
        .child("stats", "broken", &["stat-number"])
        .text("broken", "0x")
        .attribute("broken", "data-target", "lots")
        .child("stats", "plain", &["stat-number"])
        .text("plain", "0")
        .attribute("plain", "data-target", "100")
        .build()
        .expect("valid markup");
    let mut engine = build_engine(surface);

    engine
        .report_visibility(&ElementId::new("stats"), 0.9)
        .expect("visibility");
    engine.advance_time(1_000).expect("advance");

    assert_eq!(text(&engine, "done"), "40%");
    assert_eq!(text(&engine, "broken"), "0x");
    assert_eq!(text(&engine, "plain"), "100");
    assert_eq!(engine.stats().expect("stats").progress().len(), 1);
}

#[test]
fn in_progress_text_rounds_half_steps_up() {
    let surface = HeadlessSurface::builder()
        .element("stats", &["stats-section"])
        .child("stats", "projects", &["stat-number"])
        .text("projects", "0")
        .attribute("projects", "data-target", "100")
        .build()
        .expect("valid markup");
    let mut engine = build_engine(surface);

    engine
        .report_visibility(&ElementId::new("stats"), 1.0)
        .expect("visibility");
    assert_eq!(text(&engine, "projects"), "1");

    engine.advance_time(4).expect("advance");
    assert_eq!(text(&engine, "projects"), "3");
}

#[test]
fn non_finite_targets_are_skipped() {
    let surface = HeadlessSurface::builder()
        .element("stats", &["stats-section"])
        .child("stats", "inf", &["stat-number"])
        .text("inf", "0+")
        .attribute("inf", "data-target", "inf")
        .child("stats", "nan", &["stat-number"])
        .text("nan", "0")
        .attribute("nan", "data-target", "NaN")
        .child("stats", "real", &["stat-number"])
        .text("real", "0")
        .attribute("real", "data-target", "10")
        .build()
        .expect("valid markup");
    let mut engine = build_engine(surface);

    engine
        .report_visibility(&ElementId::new("stats"), 1.0)
        .expect("visibility");
    engine.advance_time(1_000).expect("advance");

    assert_eq!(text(&engine, "inf"), "0+");
    assert_eq!(text(&engine, "nan"), "0");
    assert_eq!(text(&engine, "real"), "10");
    assert_eq!(engine.stats().expect("stats").progress().len(), 1);
}

#[test]
fn zero_target_finishes_without_timer() {
    let surface = HeadlessSurface::builder()
        .element("stats", &["stats-section"])
        .child("stats", "zero", &["stat-number"])
        .text("zero", "0+")
        .attribute("zero", "data-target", "0")
        .build()
        .expect("valid markup");
    let mut engine = build_engine(surface);

    engine
        .report_visibility(&ElementId::new("stats"), 1.0)
        .expect("visibility");
    assert_eq!(text(&engine, "zero"), "0+");
    assert!(!engine.stats().expect("stats").is_running());
    assert_eq!(engine.surface().live_timer_count(), 0);
}

#[test]
fn visibility_of_other_elements_is_ignored() {
    let mut engine = build_engine(stats_page());
    let dispatch = engine
        .report_visibility(&ElementId::new("clients"), 1.0)
        .expect("visibility");
    assert_eq!(dispatch, Dispatch::Ignored);
}

#[test]
fn page_without_stats_section_skips_counter() {
    let surface = HeadlessSurface::builder()
        .element("orphan", &["stat-number"])
        .build()
        .expect("valid markup");
    let engine = build_engine(surface);
    assert!(engine.stats().is_none());
}
