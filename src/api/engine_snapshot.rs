use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};

use super::{CounterProgress, HeroPhase};

pub const SITE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable state summary used by regression tests and tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SiteSnapshot {
    pub hero: Option<HeroSnapshot>,
    pub carousel: Option<CarouselSnapshot>,
    pub stats: Option<StatsSnapshot>,
    pub menu: Option<MenuSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSnapshot {
    pub phase: HeroPhase,
    pub cursor: usize,
    pub panel_count: usize,
    pub timer_live: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSnapshot {
    pub cursor: usize,
    pub card_count: usize,
    pub offset_percent: i64,
    pub active_dots: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub triggered: bool,
    pub running: bool,
    pub counters: Vec<CounterProgress>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSnapshot {
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: SiteSnapshot,
}

impl SiteSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> SiteResult<String> {
        let payload = SiteSnapshotJsonContractV1 {
            schema_version: SITE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SiteError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> SiteResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<SiteSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: SiteSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SiteError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != SITE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(SiteError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
