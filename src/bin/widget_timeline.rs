use serde::Serialize;
use site_widgets::api::{SiteEngine, SiteEngineConfig, SiteSnapshot};
use site_widgets::core::ElementId;
use site_widgets::render::HeadlessSurface;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
struct CliArgs {
    config: Option<PathBuf>,
    duration_ms: u64,
    step_ms: u64,
    stats_visible_at_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TimelineFrame {
    now_ms: u64,
    snapshot: SiteSnapshot,
}

fn main() {
    let _ = site_widgets::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            SiteEngineConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => SiteEngineConfig::default(),
    };

    let surface = demo_page().map_err(|err| err.to_string())?;
    let mut engine = SiteEngine::new(surface, config).map_err(|err| err.to_string())?;
    let stats_section = ElementId::new("stats");

    print_frame(&engine)?;
    while engine.now_ms() < args.duration_ms {
        let step = args.step_ms.min(args.duration_ms - engine.now_ms());
        engine.advance_time(step).map_err(|err| err.to_string())?;
        if args
            .stats_visible_at_ms
            .is_some_and(|at| engine.now_ms() >= at && engine.now_ms() - step < at)
        {
            engine
                .report_visibility(&stats_section, 1.0)
                .map_err(|err| err.to_string())?;
        }
        print_frame(&engine)?;
    }
    Ok(())
}

fn print_frame(engine: &SiteEngine<HeadlessSurface>) -> Result<(), String> {
    let frame = TimelineFrame {
        now_ms: engine.now_ms(),
        snapshot: engine.snapshot(),
    };
    let line = serde_json::to_string(&frame).map_err(|err| format!("invalid frame: {err}"))?;
    println!("{line}");
    Ok(())
}

fn demo_page() -> site_widgets::SiteResult<HeadlessSurface> {
    HeadlessSurface::builder()
        .element("menu-toggle", &[])
        .child("menu-toggle", "menu-icon", &["fa-bars"])
        .element("links", &["nav-links"])
        .element("hero", &["hero-section"])
        .element("hero-1", &["hero-section"])
        .element("hero-2", &["hero-section"])
        .element("hero-3", &["hero-section"])
        .element("stats", &["stats-section"])
        .child("stats", "stat-clients", &["stat-number"])
        .text("stat-clients", "0k")
        .attribute("stat-clients", "data-target", "12")
        .child("stats", "stat-volume", &["stat-number"])
        .text("stat-volume", "0b+")
        .attribute("stat-volume", "data-target", "2.5")
        .element("carousel", &["testimonial-carousel"])
        .child("carousel", "card-1", &["testimonial-card"])
        .child("carousel", "card-2", &["testimonial-card"])
        .child("carousel", "card-3", &["testimonial-card"])
        .element("prev", &["prev-btn"])
        .element("next", &["next-btn"])
        .element("carousel-dots", &[])
        .build()
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        config: None,
        duration_ms: 30_000,
        step_ms: 1_000,
        stats_visible_at_ms: None,
    };

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for `{flag}`"))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value()?)),
            "--duration-ms" => parsed.duration_ms = parse_ms(&value()?)?,
            "--step-ms" => parsed.step_ms = parse_ms(&value()?)?,
            "--stats-visible-at-ms" => parsed.stats_visible_at_ms = Some(parse_ms(&value()?)?),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    if parsed.step_ms == 0 {
        return Err("`--step-ms` must be > 0".to_owned());
    }
    Ok(parsed)
}

fn parse_ms(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>()
        .map_err(|err| format!("invalid milliseconds `{raw}`: {err}"))
}
