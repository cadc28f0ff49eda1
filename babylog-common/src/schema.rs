//! Canonical log record schema and normalization
//!
//! One `LogRecord` is one calendar day's care entry. Records of any vintage
//! (older exports, hand-edited imports, partially filled forms) are brought
//! to the full canonical shape by [`normalize`]: nested objects merge
//! key-by-key with incoming values winning, array fields are passed through
//! as-is when they are arrays and replaced wholesale by the defaults when
//! they are not. Normalization never fails; malformed fields degrade to
//! their defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical number of feeding slots per day
pub const FEEDING_SLOTS: usize = 6;
/// Canonical number of sleep slots per day
pub const SLEEP_SLOTS: usize = 4;
/// Canonical number of diaper slots per day
pub const DIAPER_SLOTS: usize = 6;

/// One calendar day's care-log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogRecord {
    /// Opaque unique identifier; immutable once created
    pub id: String,
    /// ISO calendar date, the sole sort key (descending for display)
    pub date: String,
    /// ISO timestamp, set once at creation
    pub created_at: String,
    /// Free text; the controller appends computed daily totals at save time
    pub summary: String,
    pub stats: Stats,
    pub feedings: Vec<FeedingSlot>,
    pub sleeps: Vec<SleepSlot>,
    pub diapers: Vec<DiaperSlot>,
    pub supplements: Supplements,
    pub health: Health,
    pub development: Development,
    pub care: Care,
    pub special_care: SpecialCare,
}

impl Default for LogRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            date: String::new(),
            created_at: String::new(),
            summary: String::new(),
            stats: Stats::default(),
            feedings: vec![FeedingSlot::default(); FEEDING_SLOTS],
            sleeps: vec![SleepSlot::default(); SLEEP_SLOTS],
            diapers: vec![DiaperSlot::default(); DIAPER_SLOTS],
            supplements: Supplements::default(),
            health: Health::default(),
            development: Development::default(),
            care: Care::default(),
            special_care: SpecialCare::default(),
        }
    }
}

/// Daily body measurements and mood
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub height: String,
    pub weight: String,
    pub temp: String,
    pub mood: String,
}

/// One feeding slot; `breast_ml` is a legacy alternate unit kept for old records
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedingSlot {
    pub time: String,
    pub breast_l: String,
    pub breast_r: String,
    pub breast_ml: String,
    pub formula: String,
    pub solids_time: String,
    pub solids_food: String,
}

/// One sleep slot, time-of-day bounds
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SleepSlot {
    pub start: String,
    pub end: String,
}

/// One diaper change slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiaperSlot {
    pub time: String,
    pub notes: String,
}

/// Daily supplement checklist
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplements {
    pub ad: bool,
    pub d3: bool,
    pub dha: bool,
    pub calcium: bool,
    pub iron: bool,
    pub probiotics: bool,
    pub lactase: bool,
}

/// Health observations, grouped; each group carries a `none` flag
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Health {
    pub skin: SkinHealth,
    pub respiratory: RespiratoryHealth,
    pub other: OtherHealth,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkinHealth {
    pub none: bool,
    pub redness: bool,
    pub eczema: bool,
    pub rash: bool,
    pub allergy: bool,
}

impl Default for SkinHealth {
    fn default() -> Self {
        Self {
            none: true,
            redness: false,
            eczema: false,
            rash: false,
            allergy: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RespiratoryHealth {
    pub none: bool,
    pub cough: bool,
    pub congestion: bool,
    pub runny_nose: bool,
    pub sneeze: bool,
}

impl Default for RespiratoryHealth {
    fn default() -> Self {
        Self {
            none: true,
            cough: false,
            congestion: false,
            runny_nose: false,
            sneeze: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherHealth {
    pub none: bool,
    pub cry: bool,
    pub refuse_food: bool,
    pub vomit: bool,
    pub retch: bool,
}

impl Default for OtherHealth {
    fn default() -> Self {
        Self {
            none: true,
            cry: false,
            refuse_food: false,
            vomit: false,
            retch: false,
        }
    }
}

/// Development milestones, grouped
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Development {
    pub motor: MotorMilestones,
    pub fine_motor: FineMotorMilestones,
    pub language: LanguageMilestones,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MotorMilestones {
    pub sit: bool,
    pub stand: bool,
    pub crawl: bool,
    pub walk: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FineMotorMilestones {
    pub grasp: bool,
    pub pass: bool,
    pub oppose: bool,
    pub push_pull: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageMilestones {
    pub pronounce: bool,
    pub understand: bool,
    pub interact: bool,
}

/// Daily hygiene actions; the union of flags across schema vintages
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Care {
    pub wash_hands: bool,
    pub wash_face: bool,
    pub bath: bool,
    pub nails: bool,
    pub oral: bool,
    pub nose: bool,
    pub teeth: bool,
}

/// Free-text fields for ad-hoc care notes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecialCare {
    pub eczema: String,
    pub red_butt: String,
    pub diarrhea: String,
    pub other: String,
}

/// Produce a fully populated record from any partial or legacy input.
///
/// Absent or non-object input yields the canonical default record. Nested
/// objects are reconciled key-by-key (incoming wins); array fields are kept
/// at their incoming length when the incoming value is an array, and are
/// replaced wholesale by the defaults otherwise. Ragged arrays are
/// deliberately preserved, never padded or truncated, so consumers must
/// index defensively. Idempotent and infallible.
pub fn normalize(raw: Option<&Value>) -> LogRecord {
    let top = match raw.and_then(Value::as_object) {
        Some(map) => map,
        None => return LogRecord::default(),
    };

    LogRecord {
        id: text(Some(top), "id"),
        date: text(Some(top), "date"),
        created_at: text(Some(top), "createdAt"),
        summary: text(Some(top), "summary"),
        stats: normalize_stats(top.get("stats")),
        feedings: normalize_slots(top.get("feedings"), feeding_slot, || {
            vec![FeedingSlot::default(); FEEDING_SLOTS]
        }),
        sleeps: normalize_slots(top.get("sleeps"), sleep_slot, || {
            vec![SleepSlot::default(); SLEEP_SLOTS]
        }),
        diapers: normalize_slots(top.get("diapers"), diaper_slot, || {
            vec![DiaperSlot::default(); DIAPER_SLOTS]
        }),
        supplements: normalize_supplements(top.get("supplements")),
        health: normalize_health(top.get("health")),
        development: normalize_development(top.get("development")),
        care: normalize_care(top.get("care")),
        special_care: normalize_special_care(top.get("specialCare")),
    }
}

fn obj(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn text(map: Option<&Map<String, Value>>, key: &str) -> String {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn flag(map: Option<&Map<String, Value>>, key: &str, default: bool) -> bool {
    map.and_then(|m| m.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

/// Array pass-through rule: an incoming array keeps its own length, anything
/// else is replaced by the canonical default sequence.
fn normalize_slots<T>(
    value: Option<&Value>,
    slot: fn(&Value) -> T,
    defaults: impl FnOnce() -> Vec<T>,
) -> Vec<T> {
    match value {
        Some(Value::Array(items)) => items.iter().map(slot).collect(),
        _ => defaults(),
    }
}

fn feeding_slot(value: &Value) -> FeedingSlot {
    let m = value.as_object();
    FeedingSlot {
        time: text(m, "time"),
        breast_l: text(m, "breastL"),
        breast_r: text(m, "breastR"),
        breast_ml: text(m, "breastMl"),
        formula: text(m, "formula"),
        solids_time: text(m, "solidsTime"),
        solids_food: text(m, "solidsFood"),
    }
}

fn sleep_slot(value: &Value) -> SleepSlot {
    let m = value.as_object();
    SleepSlot {
        start: text(m, "start"),
        end: text(m, "end"),
    }
}

fn diaper_slot(value: &Value) -> DiaperSlot {
    let m = value.as_object();
    DiaperSlot {
        time: text(m, "time"),
        notes: text(m, "notes"),
    }
}

fn normalize_stats(value: Option<&Value>) -> Stats {
    let m = obj(value);
    Stats {
        height: text(m, "height"),
        weight: text(m, "weight"),
        temp: text(m, "temp"),
        mood: text(m, "mood"),
    }
}

fn normalize_supplements(value: Option<&Value>) -> Supplements {
    let m = obj(value);
    Supplements {
        ad: flag(m, "ad", false),
        d3: flag(m, "d3", false),
        dha: flag(m, "dha", false),
        calcium: flag(m, "calcium", false),
        iron: flag(m, "iron", false),
        probiotics: flag(m, "probiotics", false),
        lactase: flag(m, "lactase", false),
    }
}

fn normalize_health(value: Option<&Value>) -> Health {
    let m = obj(value);
    let skin = obj(m.and_then(|m| m.get("skin")));
    let respiratory = obj(m.and_then(|m| m.get("respiratory")));
    let other = obj(m.and_then(|m| m.get("other")));
    Health {
        skin: SkinHealth {
            none: flag(skin, "none", true),
            redness: flag(skin, "redness", false),
            eczema: flag(skin, "eczema", false),
            rash: flag(skin, "rash", false),
            allergy: flag(skin, "allergy", false),
        },
        respiratory: RespiratoryHealth {
            none: flag(respiratory, "none", true),
            cough: flag(respiratory, "cough", false),
            congestion: flag(respiratory, "congestion", false),
            runny_nose: flag(respiratory, "runnyNose", false),
            sneeze: flag(respiratory, "sneeze", false),
        },
        other: OtherHealth {
            none: flag(other, "none", true),
            cry: flag(other, "cry", false),
            refuse_food: flag(other, "refuseFood", false),
            vomit: flag(other, "vomit", false),
            retch: flag(other, "retch", false),
        },
    }
}

fn normalize_development(value: Option<&Value>) -> Development {
    let m = obj(value);
    let motor = obj(m.and_then(|m| m.get("motor")));
    let fine_motor = obj(m.and_then(|m| m.get("fineMotor")));
    let language = obj(m.and_then(|m| m.get("language")));
    Development {
        motor: MotorMilestones {
            sit: flag(motor, "sit", false),
            stand: flag(motor, "stand", false),
            crawl: flag(motor, "crawl", false),
            walk: flag(motor, "walk", false),
        },
        fine_motor: FineMotorMilestones {
            grasp: flag(fine_motor, "grasp", false),
            pass: flag(fine_motor, "pass", false),
            oppose: flag(fine_motor, "oppose", false),
            push_pull: flag(fine_motor, "pushPull", false),
        },
        language: LanguageMilestones {
            pronounce: flag(language, "pronounce", false),
            understand: flag(language, "understand", false),
            interact: flag(language, "interact", false),
        },
    }
}

fn normalize_care(value: Option<&Value>) -> Care {
    let m = obj(value);
    Care {
        wash_hands: flag(m, "washHands", false),
        wash_face: flag(m, "washFace", false),
        bath: flag(m, "bath", false),
        nails: flag(m, "nails", false),
        oral: flag(m, "oral", false),
        nose: flag(m, "nose", false),
        teeth: flag(m, "teeth", false),
    }
}

fn normalize_special_care(value: Option<&Value>) -> SpecialCare {
    let m = obj(value);
    SpecialCare {
        eczema: text(m, "eczema"),
        red_butt: text(m, "redButt"),
        diarrhea: text(m, "diarrhea"),
        other: text(m, "other"),
    }
}

/// Total sleep duration in minutes across all filled sleep slots.
///
/// A slot counts only when both bounds parse as HH:MM times; spans that end
/// past midnight wrap by 24 hours.
pub fn total_sleep_minutes(record: &LogRecord) -> i64 {
    record
        .sleeps
        .iter()
        .filter_map(|slot| {
            let start = minutes_of_day(&slot.start)?;
            let end = minutes_of_day(&slot.end)?;
            let mut diff = end - start;
            if diff < 0 {
                diff += 24 * 60;
            }
            Some(diff)
        })
        .sum()
}

fn minutes_of_day(time: &str) -> Option<i64> {
    let (hours, minutes) = time.split_once(':')?;
    let hours: i64 = hours.trim().parse().ok()?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    Some(hours * 60 + minutes)
}

fn amount(text: &str) -> f64 {
    text.trim().parse().unwrap_or(0.0)
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Computed aggregate line for a day: breast minutes, formula volume, sleep.
pub fn daily_totals(record: &LogRecord) -> String {
    let breast: f64 = record
        .feedings
        .iter()
        .map(|f| amount(&f.breast_l) + amount(&f.breast_r))
        .sum();
    let formula: f64 = record.feedings.iter().map(|f| amount(&f.formula)).sum();
    let sleep = total_sleep_minutes(record);

    format!(
        "Breast: {} min, Formula: {} ml, Sleep: {}h {}m",
        format_amount(breast),
        format_amount(formula),
        sleep / 60,
        sleep % 60
    )
}

/// Append the computed daily totals to the record's summary.
///
/// An existing summary keeps its text and gains the totals on a
/// parenthesized second line.
pub fn append_daily_totals(record: &mut LogRecord) {
    let totals = daily_totals(record);
    record.summary = if record.summary.is_empty() {
        totals
    } else {
        format!("{}\n({})", record.summary, totals)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_record_has_canonical_shape() {
        let record = LogRecord::default();
        assert_eq!(record.feedings.len(), FEEDING_SLOTS);
        assert_eq!(record.sleeps.len(), SLEEP_SLOTS);
        assert_eq!(record.diapers.len(), DIAPER_SLOTS);
        assert!(record.health.skin.none);
        assert!(record.health.respiratory.none);
        assert!(record.health.other.none);
        assert!(!record.supplements.d3);
        assert!(record.summary.is_empty());
    }

    #[test]
    fn normalize_absent_returns_defaults() {
        assert_eq!(normalize(None), LogRecord::default());
        assert_eq!(normalize(Some(&Value::Null)), LogRecord::default());
        assert_eq!(normalize(Some(&json!(42))), LogRecord::default());
    }

    #[test]
    fn normalize_fills_missing_fields_from_defaults() {
        let raw = json!({
            "id": "abc",
            "date": "2024-01-05",
            "stats": { "weight": "7.2" }
        });
        let record = normalize(Some(&raw));
        assert_eq!(record.id, "abc");
        assert_eq!(record.date, "2024-01-05");
        assert_eq!(record.stats.weight, "7.2");
        assert_eq!(record.stats.height, "");
        assert_eq!(record.feedings.len(), FEEDING_SLOTS);
        assert!(record.health.skin.none);
        assert_eq!(record.special_care.eczema, "");
    }

    #[test]
    fn nested_groups_merge_key_by_key() {
        let raw = json!({
            "health": {
                "skin": { "none": false, "eczema": true }
            },
            "supplements": { "d3": true }
        });
        let record = normalize(Some(&raw));
        assert!(!record.health.skin.none);
        assert!(record.health.skin.eczema);
        assert!(!record.health.skin.rash);
        // Untouched sibling groups keep their defaults
        assert!(record.health.respiratory.none);
        assert!(record.supplements.d3);
        assert!(!record.supplements.iron);
    }

    #[test]
    fn incoming_arrays_pass_through_ragged() {
        let raw = json!({
            "feedings": [ { "time": "08:00", "breastL": "10" }, {} ],
            "sleeps": "not-an-array"
        });
        let record = normalize(Some(&raw));
        // Shorter-than-canonical array is preserved, not padded
        assert_eq!(record.feedings.len(), 2);
        assert_eq!(record.feedings[0].time, "08:00");
        assert_eq!(record.feedings[0].breast_l, "10");
        assert_eq!(record.feedings[1], FeedingSlot::default());
        // Non-array replaced wholesale by defaults
        assert_eq!(record.sleeps.len(), SLEEP_SLOTS);
    }

    #[test]
    fn legacy_feeding_unit_is_retained() {
        let raw = json!({
            "feedings": [ { "breastMl": "90" } ]
        });
        let record = normalize(Some(&raw));
        assert_eq!(record.feedings[0].breast_ml, "90");
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = json!({
            "id": "x",
            "summary": "good day",
            "feedings": [ { "time": "06:30", "formula": "120" } ],
            "development": { "motor": { "sit": true } },
            "care": { "bath": true }
        });
        let once = normalize(Some(&raw));
        let round_tripped = serde_json::to_value(&once).unwrap();
        let twice = normalize(Some(&round_tripped));
        assert_eq!(once, twice);
    }

    #[test]
    fn malformed_fields_degrade_to_defaults() {
        let raw = json!({
            "id": 12345,
            "stats": "broken",
            "supplements": { "d3": "yes" },
            "health": { "skin": [1, 2, 3] }
        });
        let record = normalize(Some(&raw));
        assert_eq!(record.id, "");
        assert_eq!(record.stats, Stats::default());
        assert!(!record.supplements.d3);
        assert!(record.health.skin.none);
    }

    #[test]
    fn daily_totals_sums_feedings_and_sleep() {
        let mut record = LogRecord::default();
        record.feedings[0].breast_l = "10".into();
        record.feedings[0].breast_r = "15".into();
        record.feedings[1].formula = "120".into();
        record.feedings[2].formula = "60".into();
        record.sleeps[0] = SleepSlot {
            start: "13:00".into(),
            end: "14:30".into(),
        };
        assert_eq!(
            daily_totals(&record),
            "Breast: 25 min, Formula: 180 ml, Sleep: 1h 30m"
        );
    }

    #[test]
    fn overnight_sleep_wraps_by_24_hours() {
        let mut record = LogRecord::default();
        record.sleeps[0] = SleepSlot {
            start: "22:00".into(),
            end: "06:00".into(),
        };
        assert_eq!(total_sleep_minutes(&record), 8 * 60);
    }

    #[test]
    fn unparsable_sleep_slots_are_skipped() {
        let mut record = LogRecord::default();
        record.sleeps[0] = SleepSlot {
            start: "noonish".into(),
            end: "14:00".into(),
        };
        record.sleeps[1] = SleepSlot {
            start: "14:00".into(),
            end: "15:00".into(),
        };
        assert_eq!(total_sleep_minutes(&record), 60);
    }

    #[test]
    fn append_totals_keeps_existing_summary() {
        let mut record = LogRecord::default();
        append_daily_totals(&mut record);
        assert_eq!(record.summary, "Breast: 0 min, Formula: 0 ml, Sleep: 0h 0m");

        let mut record = LogRecord::default();
        record.summary = "fussy afternoon".into();
        append_daily_totals(&mut record);
        assert_eq!(
            record.summary,
            "fussy afternoon\n(Breast: 0 min, Formula: 0 ml, Sleep: 0h 0m)"
        );
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(LogRecord::default()).unwrap();
        let top = value.as_object().unwrap();
        assert!(top.contains_key("createdAt"));
        assert!(top.contains_key("specialCare"));
        let feeding = &value["feedings"][0];
        assert!(feeding.get("breastL").is_some());
        assert!(feeding.get("solidsTime").is_some());
    }
}
