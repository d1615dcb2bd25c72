//! Data directory loading.
//!
//! A data directory holds three JSON files:
//! - `procedure.json` — the materialized fact snapshot plus the initial
//!   cursor (plan, phase, first steps)
//! - `constraints.json` — required/forbidden fact rules
//! - `sensors.json` — the sensor replay keyed by step id
//!
//! The reasoner that materializes `procedure.json` lives outside this
//! repository; by the time data arrives here it is plain facts.

use anyhow::Context;
use ortwin_core::{Cursor, FactRules, JsonReplay};
use ortwin_graph::{Fact, GraphStore, Resource};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything a run needs, loaded and typed.
#[derive(Debug)]
pub struct DataSet {
    pub graph: GraphStore,
    pub cursor: Cursor,
    pub rules: FactRules,
    pub replay: JsonReplay,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcedureFile {
    plan: String,
    phase: String,
    steps: Vec<String>,
    facts: Vec<Fact>,
}

/// Load `procedure.json`, `constraints.json`, and `sensors.json` from `dir`.
pub fn load_data_dir(dir: &Path) -> anyhow::Result<DataSet> {
    let procedure: ProcedureFile = read_json(&dir.join("procedure.json"))?;
    let rules: FactRules = read_json(&dir.join("constraints.json"))?;

    let sensors_path = dir.join("sensors.json");
    let raw = fs::read_to_string(&sensors_path)
        .with_context(|| format!("reading {}", sensors_path.display()))?;
    let replay = JsonReplay::from_json_str(&raw)
        .with_context(|| format!("parsing {}", sensors_path.display()))?;

    let cursor = Cursor::new(
        procedure.plan,
        procedure.phase,
        procedure.steps.into_iter().map(Resource::new).collect(),
    );
    let graph: GraphStore = procedure.facts.into_iter().collect();

    tracing::info!(
        facts = graph.len(),
        events = replay.len(),
        "data directory loaded"
    );

    Ok(DataSet {
        graph,
        cursor,
        rules,
        replay,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
