// Compiled-in category tables for hitters and pitchers.
//
// Each role ranks a fixed list of stat keys. A key carries its sort
// direction, which player pool it draws from, and how the leader's value is
// cast for display.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Which side of the ball a leaders table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hitter,
    Pitcher,
}

impl Role {
    /// The provider's stat group for this role.
    pub fn group(self) -> StatGroup {
        match self {
            Role::Hitter => StatGroup::Hitting,
            Role::Pitcher => StatGroup::Pitching,
        }
    }

    /// The role's ordered category list.
    pub fn categories(self) -> &'static [Category] {
        match self {
            Role::Hitter => HITTER_CATEGORIES,
            Role::Pitcher => PITCHER_CATEGORIES,
        }
    }

    /// Look up one of the role's categories by its short key.
    pub fn category(self, key: &str) -> Option<&'static Category> {
        self.categories().iter().find(|c| c.key == key)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Hitter => write!(f, "hitter"),
            Role::Pitcher => write!(f, "pitcher"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hitter" | "hitters" | "hitting" => Ok(Role::Hitter),
            "pitcher" | "pitchers" | "pitching" => Ok(Role::Pitcher),
            other => Err(format!("unknown role `{other}`, expected hitter or pitcher")),
        }
    }
}

/// Stat group query parameter understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGroup {
    Hitting,
    Pitching,
}

impl StatGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            StatGroup::Hitting => "hitting",
            StatGroup::Pitching => "pitching",
        }
    }
}

// ---------------------------------------------------------------------------
// Category annotations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Which of the two fetched player pools a category ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourcePool {
    /// Every player with a stat line.
    All,
    /// Players meeting the provider's playing-time threshold.
    Qualified,
}

/// How a leader's raw value is turned into its displayed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    /// Keep the provider's value as-is (innings pitched, "180.1").
    None,
    /// Truncate toward zero.
    Integer,
    /// Three-decimal rate with the leading zero dropped (".345").
    Rate,
}

/// One ranked stat key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub direction: SortDirection,
    pub pool: SourcePool,
    pub cast: CastKind,
}

impl Category {
    const fn new(
        key: &'static str,
        direction: SortDirection,
        pool: SourcePool,
        cast: CastKind,
    ) -> Self {
        Self {
            key,
            direction,
            pool,
            cast,
        }
    }

    /// The provider field this category reads.
    pub fn field(&self) -> &'static str {
        resolve_field(self.key)
    }
}

use self::CastKind as C;
use self::SortDirection::{Ascending, Descending};
use self::SourcePool::{All, Qualified};

pub const HITTER_CATEGORIES: &[Category] = &[
    Category::new("h", Descending, All, C::Integer),
    Category::new("xbh", Descending, All, C::Integer),
    Category::new("hr", Descending, All, C::Integer),
    Category::new("rbi", Descending, All, C::Integer),
    Category::new("bb", Descending, All, C::Integer),
    Category::new("sb", Descending, All, C::Integer),
    Category::new("r", Descending, All, C::Integer),
    Category::new("avg", Descending, Qualified, C::Rate),
    Category::new("obp", Descending, Qualified, C::Rate),
    Category::new("slg", Descending, Qualified, C::Rate),
    Category::new("ops", Descending, Qualified, C::Rate),
];

pub const PITCHER_CATEGORIES: &[Category] = &[
    Category::new("ip", Descending, All, C::None),
    Category::new("w", Descending, All, C::Integer),
    Category::new("sv", Descending, All, C::Integer),
    Category::new("hld", Descending, All, C::Integer),
    Category::new("so", Descending, All, C::Integer),
    Category::new("whip", Ascending, Qualified, C::Rate),
    Category::new("era", Ascending, Qualified, C::Rate),
    Category::new("avg", Ascending, Qualified, C::Rate),
];

// ---------------------------------------------------------------------------
// Field aliases
// ---------------------------------------------------------------------------

/// Short keys whose provider column is spelled out in full. Keys not listed
/// here (avg, obp, era, rbi, ...) are already the provider's field names.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("bb", "baseOnBalls"),
    ("h", "hits"),
    ("hld", "holds"),
    ("hr", "homeRuns"),
    ("ip", "inningsPitched"),
    ("r", "runs"),
    ("sb", "stolenBases"),
    ("so", "strikeOuts"),
    ("sv", "saves"),
    ("w", "wins"),
    ("xbh", "extraBaseHits"),
];

/// Map a short key to the provider's field name, falling back to the key.
pub fn resolve_field(key: &str) -> &str {
    COLUMN_ALIASES
        .iter()
        .find(|(short, _)| *short == key)
        .map(|(_, field)| *field)
        .unwrap_or(key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
