//! The saved table state: dice pool, rule, and outcome bands.
//!
//! Saved files are plain JSON using the keys `dicePool`, `activeRule`,
//! `activeRuleCount` and `outcomes`. Loading is lenient: each field is
//! validated on its own, and a field that fails keeps its default value.
//! Deserializing a [`TableState`] always goes through [`TableState::apply`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use rt_core::{
    DicePool, DiceResult, Die, Distribution, EngineConfig, MAX_RULE_COUNT, RuleKind,
    SelectionRule,
};

use crate::error::{TableError, TableResult};
use crate::list::OutcomeList;
use crate::outcome::{OutcomeRange, truncate_label};

/// Everything needed to rebuild a random table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct TableState {
    /// The dice rolled.
    pub dice_pool: DicePool,
    /// The selection rule's kind.
    pub active_rule: RuleKind,
    /// How many dice the rule keeps or drops.
    pub active_rule_count: u32,
    /// The outcome bands.
    pub outcomes: OutcomeList,
}

impl Default for TableState {
    /// 3d6 with three bands: 3-6, 7-10, 11-18.
    fn default() -> Self {
        Self {
            dice_pool: DicePool::from_sides([6, 6, 6]),
            active_rule: RuleKind::None,
            active_rule_count: 1,
            outcomes: OutcomeList::from_ranges(vec![
                OutcomeRange::unset().with_range(3, 6),
                OutcomeRange::unset().with_range(7, 10),
                OutcomeRange::unset().with_range(11, 18),
            ]),
        }
    }
}

impl TableState {
    /// The dice pool.
    pub fn pool(&self) -> &DicePool {
        &self.dice_pool
    }

    /// The active selection rule.
    pub fn rule(&self) -> SelectionRule {
        SelectionRule::new(self.active_rule, self.active_rule_count)
    }

    /// Compute the distribution for the current pool and rule.
    pub fn distribution(&self) -> DiceResult<Distribution> {
        Distribution::compute(&self.dice_pool, self.rule())
    }

    /// Merge an untrusted JSON value into this state.
    ///
    /// Returns `false` (and changes nothing) unless `raw` is an object.
    pub fn apply(&mut self, raw: &Value) -> bool {
        let Some(obj) = raw.as_object() else {
            return false;
        };

        if let Some(pool) = obj.get("dicePool").and_then(coerce_pool) {
            self.dice_pool = pool;
        }

        if let Some(kind) = obj
            .get("activeRule")
            .and_then(Value::as_str)
            .and_then(RuleKind::from_name)
        {
            self.active_rule = kind;
        }

        if let Some(count) = obj
            .get("activeRuleCount")
            .and_then(as_number)
            .filter(|n| n.is_finite() && *n > 0.0)
        {
            self.active_rule_count = count.round().clamp(1.0, f64::from(MAX_RULE_COUNT)) as u32;
        }

        if let Some(items) = obj
            .get("outcomes")
            .and_then(Value::as_array)
            .filter(|items| !items.is_empty())
        {
            self.outcomes = OutcomeList::from_ranges(items.iter().map(coerce_outcome).collect());
        }

        true
    }

    /// Parse a state from JSON text, filling invalid fields from the default.
    pub fn from_json_str(json: &str) -> TableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_string(&self) -> TableResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a state file.
    pub fn load(path: &Path) -> TableResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json_str(&text)?;
        debug!(path = %path.display(), dice = %state.dice_pool, "loaded table state");
        Ok(state)
    }

    /// Write a state file, replacing any existing one.
    pub fn save(&self, path: &Path) -> TableResult<()> {
        let json = self.to_json_string()?;
        std::fs::write(path, json + "\n").map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "saved table state");
        Ok(())
    }
}

impl TryFrom<Value> for TableState {
    type Error = String;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let mut state = Self::default();
        if state.apply(&raw) {
            Ok(state)
        } else {
            Err("table state must be a JSON object".to_string())
        }
    }
}

/// A number, or a string holding one.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Usable die sizes, rounded and clamped into the allowed range. `None` when
/// nothing usable remains.
fn coerce_pool(value: &Value) -> Option<DicePool> {
    let config = EngineConfig::default();
    let dice: Vec<Die> = value
        .as_array()?
        .iter()
        .filter_map(as_number)
        .filter(|n| n.is_finite())
        .map(|n| {
            let sides = n
                .round()
                .clamp(f64::from(config.min_sides), f64::from(config.max_sides));
            Die::from_sides(sides as u32)
        })
        .take(config.max_pool_size)
        .collect();
    if dice.is_empty() {
        None
    } else {
        Some(DicePool::from(dice))
    }
}

fn coerce_outcome(value: &Value) -> OutcomeRange {
    let bound = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_f64)
            .filter(|n| n.is_finite())
            .map(|n| n.round() as i64)
    };
    OutcomeRange {
        label: value
            .get("label")
            .and_then(Value::as_str)
            .map(truncate_label)
            .unwrap_or_default(),
        min: bound("min"),
        max: bound("max"),
        locked: value.get("locked").is_some_and(truthy),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_state() {
        let state = TableState::default();
        assert_eq!(state.dice_pool.describe(), "3d6");
        assert!(!state.rule().is_active());
        let dist = state.distribution().unwrap();
        assert!(state.outcomes.coverage(&dist).is_complete());
    }

    #[test]
    fn json_keys() {
        let json = serde_json::to_value(TableState::default()).unwrap();
        assert_eq!(json["dicePool"], json!([6, 6, 6]));
        assert_eq!(json["activeRule"], json!("none"));
        assert_eq!(json["activeRuleCount"], json!(1));
        assert_eq!(json["outcomes"][1]["min"], json!(7));
    }

    #[test]
    fn apply_valid_state() {
        let mut state = TableState::default();
        let applied = state.apply(&json!({
            "dicePool": [20, 20, 20, 20],
            "activeRule": "drop-low",
            "activeRuleCount": 1,
            "outcomes": [
                { "label": "Miss", "min": 3, "max": 30 },
                { "label": "Hit", "min": 31, "max": 60, "locked": true }
            ]
        }));
        assert!(applied);
        assert_eq!(state.dice_pool.describe(), "4d20");
        assert_eq!(state.rule(), SelectionRule::new(RuleKind::DropLow, 1));
        assert_eq!(state.outcomes.len(), 2);
        assert!(state.outcomes.get(1).unwrap().locked);
    }

    #[test]
    fn apply_rejects_non_objects() {
        let mut state = TableState::default();
        assert!(!state.apply(&json!([1, 2, 3])));
        assert!(!state.apply(&Value::Null));
        assert_eq!(state, TableState::default());
    }

    #[test]
    fn invalid_fields_keep_previous_values() {
        let mut state = TableState::default();
        state.apply(&json!({
            "dicePool": [],
            "activeRule": "explode",
            "activeRuleCount": -4,
            "outcomes": []
        }));
        assert_eq!(state, TableState::default());

        state.apply(&json!({ "dicePool": ["x", null], "activeRuleCount": "nope" }));
        assert_eq!(state, TableState::default());
    }

    #[test]
    fn pool_entries_are_clamped_and_capped() {
        let mut state = TableState::default();
        state.apply(&json!({ "dicePool": [1, 7.6, "12", 500] }));
        let sides: Vec<u32> = state.dice_pool.sides().collect();
        assert_eq!(sides, vec![2, 8, 12, 200]);

        state.apply(&json!({ "dicePool": vec![6; 45] }));
        assert_eq!(state.dice_pool.count(), 30);
    }

    #[test]
    fn rule_count_is_rounded_and_clamped() {
        let mut state = TableState::default();
        state.apply(&json!({ "activeRuleCount": 2.4 }));
        assert_eq!(state.active_rule_count, 2);
        state.apply(&json!({ "activeRuleCount": 99 }));
        assert_eq!(state.active_rule_count, MAX_RULE_COUNT);
        state.apply(&json!({ "activeRuleCount": 0.2 }));
        assert_eq!(state.active_rule_count, 1);
    }

    #[test]
    fn outcomes_are_coerced() {
        let mut state = TableState::default();
        state.apply(&json!({
            "outcomes": [
                { "label": "y".repeat(50), "min": "3", "max": 9, "locked": 1 },
                { "label": 7, "locked": "" },
                "garbage"
            ]
        }));
        let o = state.outcomes.ranges();
        assert_eq!(o.len(), 3);
        assert_eq!(o[0].label.len(), 40);
        assert_eq!(o[0].min, None);
        assert_eq!(o[0].max, Some(9));
        assert!(o[0].locked);
        assert_eq!(o[1], OutcomeRange::unset());
        assert_eq!(o[2], OutcomeRange::unset());
    }

    #[test]
    fn from_json_str() {
        let state = TableState::from_json_str(r#"{ "activeRule": "keep-high" }"#).unwrap();
        assert_eq!(state.active_rule, RuleKind::KeepHigh);
        assert_eq!(state.dice_pool.describe(), "3d6");

        assert!(TableState::from_json_str("[]").is_err());
        assert!(matches!(
            TableState::from_json_str("{"),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn deserialize_validates_like_apply() {
        let state: TableState = serde_json::from_value(json!({
            "dicePool": [1, 500],
            "activeRuleCount": 99,
            "outcomes": [{ "label": "q".repeat(60), "min": 2, "max": 9 }]
        }))
        .unwrap();
        let sides: Vec<u32> = state.dice_pool.sides().collect();
        assert_eq!(sides, vec![2, 200]);
        assert_eq!(state.active_rule_count, MAX_RULE_COUNT);
        assert_eq!(state.outcomes.ranges()[0].label.chars().count(), 40);

        assert!(serde_json::from_value::<TableState>(json!("3d6")).is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let mut state = TableState::default();
        state.active_rule = RuleKind::KeepLow;
        state.active_rule_count = 2;
        state.outcomes.toggle_lock(0).unwrap();
        state.save(&path).unwrap();
        assert_eq!(TableState::load(&path).unwrap(), state);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableState::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
