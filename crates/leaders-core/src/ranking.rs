// Ranking a player pool for one stat key.
//
// Pulls (display name, raw value) out of every record, orders by the numeric
// reading of the value, keeps the top `count`, and casts the kept values for
// display. An empty pool ranks as a single "None Qualified" placeholder so
// every category always has something to show.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use crate::categories::{resolve_field, CastKind, SortDirection};
use crate::fetcher::PlayerRecord;

/// Provider field holding the display name ("A Judge").
pub const NAME_FIELD: &str = "playerInitLastName";

/// Display name of the placeholder entry for an empty pool.
pub const NONE_QUALIFIED: &str = "None Qualified";

static MISSING: Value = Value::Null;

// ---------------------------------------------------------------------------
// Leader types
// ---------------------------------------------------------------------------

/// A leader's displayed value after casting.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderValue {
    /// Counting stat, truncated toward zero.
    Integer(i64),
    /// Rate stat; displays as three decimals without a leading zero.
    Rate(f64),
    /// Provider value passed through unchanged.
    Raw(Value),
}

impl fmt::Display for LeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderValue::Integer(n) => write!(f, "{n}"),
            LeaderValue::Rate(v) => f.write_str(&format_rate(*v)),
            LeaderValue::Raw(Value::String(s)) => f.write_str(s),
            LeaderValue::Raw(Value::Null) => Ok(()),
            LeaderValue::Raw(other) => write!(f, "{other}"),
        }
    }
}

/// One ranked player for a stat key.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderEntry {
    pub name: String,
    pub value: LeaderValue,
}

impl LeaderEntry {
    /// The placeholder used when nobody is in the pool.
    pub fn none_qualified() -> Self {
        Self {
            name: NONE_QUALIFIED.to_string(),
            value: LeaderValue::Integer(0),
        }
    }

    pub fn is_none_qualified(&self) -> bool {
        *self == Self::none_qualified()
    }
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// Rank `players` on `key` and return at most `count` leaders.
///
/// - `count == 0` always yields no entries.
/// - A missing or empty pool yields exactly one [`LeaderEntry::none_qualified`].
/// - Ties keep the order the provider returned them in.
pub fn rank_top(
    key: &str,
    players: Option<&[PlayerRecord]>,
    direction: SortDirection,
    count: usize,
    cast: CastKind,
) -> Vec<LeaderEntry> {
    if count == 0 {
        return Vec::new();
    }

    let players = match players {
        Some(players) if !players.is_empty() => players,
        _ => return vec![LeaderEntry::none_qualified()],
    };

    let field = resolve_field(key);
    let mut rows: Vec<(&str, &Value, f64)> = players
        .iter()
        .map(|player| {
            let name = player
                .get(NAME_FIELD)
                .and_then(Value::as_str)
                .unwrap_or_default();
            let raw = player.get(field).unwrap_or(&MISSING);
            (name, raw, numeric_value(raw))
        })
        .collect();

    // slice::sort_by is stable, so equal values stay in provider order in
    // both directions.
    rows.sort_by(|a, b| match direction {
        SortDirection::Ascending => compare(a.2, b.2),
        SortDirection::Descending => compare(b.2, a.2),
    });

    rows.into_iter()
        .take(count)
        .map(|(name, raw, number)| LeaderEntry {
            name: name.to_string(),
            value: cast_value(raw, number, cast),
        })
        .collect()
}

fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Numeric reading of a provider value. Numbers and numeric strings
/// (".345", "180.1") parse; anything else counts as 0.0.
pub fn numeric_value(raw: &Value) -> f64 {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Apply a category's cast to a kept value.
pub fn cast_value(raw: &Value, number: f64, cast: CastKind) -> LeaderValue {
    match cast {
        CastKind::None => LeaderValue::Raw(raw.clone()),
        CastKind::Integer => LeaderValue::Integer(number.trunc() as i64),
        CastKind::Rate => LeaderValue::Rate(number),
    }
}

/// Three decimals with a single leading zero dropped: 0.345 -> ".345",
/// 1.05 -> "1.050", 3.2 -> "3.200".
pub fn format_rate(value: f64) -> String {
    let text = format!("{value:.3}");
    match text.strip_prefix("0.") {
        Some(rest) => format!(".{rest}"),
        None => match text.strip_prefix("-0.") {
            Some(rest) => format!("-.{rest}"),
            None => text,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
