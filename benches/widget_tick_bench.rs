use criterion::{Criterion, criterion_group, criterion_main};
use site_widgets::api::{SiteEngine, SiteEngineConfig};
use site_widgets::core::ElementId;
use site_widgets::render::HeadlessSurface;
use std::hint::black_box;

fn carousel_page(cards: usize) -> HeadlessSurface {
    let mut builder = HeadlessSurface::builder()
        .element("carousel", &["testimonial-carousel"])
        .element("carousel-dots", &[])
        .element("next", &["next-btn"]);
    for i in 0..cards {
        builder = builder.child("carousel", &format!("card-{i}"), &["testimonial-card"]);
    }
    builder.build().expect("valid markup")
}

fn bench_carousel_manual_next_100_cards(c: &mut Criterion) {
    let mut engine =
        SiteEngine::new(carousel_page(100), SiteEngineConfig::default()).expect("engine init");
    let next = ElementId::new("next");

    c.bench_function("carousel_manual_next_100_cards", |b| {
        b.iter(|| {
            let _ = engine.click(black_box(&next)).expect("click");
        })
    });
}

fn bench_stats_full_animation(c: &mut Criterion) {
    c.bench_function("stats_full_animation_8_counters", |b| {
        b.iter(|| {
            let mut builder = HeadlessSurface::builder().element("stats", &["stats-section"]);
            for i in 0..8 {
                let id = format!("stat-{i}");
                builder = builder
                    .child("stats", &id, &["stat-number"])
                    .text(&id, "0k")
                    .attribute(&id, "data-target", "250");
            }
            let surface = builder.build().expect("valid markup");
            let mut engine =
                SiteEngine::new(surface, SiteEngineConfig::default()).expect("engine init");
            engine
                .report_visibility(&ElementId::new("stats"), 1.0)
                .expect("visibility");
            black_box(engine.advance_time(1_000).expect("advance"))
        })
    });
}

criterion_group!(
    benches,
    bench_carousel_manual_next_100_cards,
    bench_stats_full_animation
);
criterion_main!(benches);
