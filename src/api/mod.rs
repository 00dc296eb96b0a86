mod engine;
mod engine_config;
mod engine_snapshot;
mod hero_rotator;
mod menu_toggle;
mod stats_counter;
mod testimonial_carousel;
mod validation;

pub use engine::{ADVANCE_TIME_STEP_LIMIT, SiteEngine};
pub use engine_config::SiteEngineConfig;
pub use engine_snapshot::{
    CarouselSnapshot, HeroSnapshot, MenuSnapshot, SITE_SNAPSHOT_JSON_SCHEMA_V1, SiteSnapshot,
    SiteSnapshotJsonContractV1, StatsSnapshot,
};
pub use hero_rotator::{HeroPhase, HeroRotator, HeroRotatorConfig};
pub use menu_toggle::{MenuToggle, MenuToggleConfig};
pub use stats_counter::{COMPLETED_MARKER, CounterProgress, StatsCounter, StatsCounterConfig};
pub use testimonial_carousel::{CarouselConfig, DOT_INDEX_ATTRIBUTE, TestimonialCarousel};
