//! Static preflop range tables.
//!
//! Two shapes of table drive the preflop decisions:
//!
//! - [`HandRange`] is a plain set of hand classes. Membership means take
//!   the action the table is named for.
//! - [`DepthChart`] maps a hand class to the deepest effective stack, in big
//!   blinds, where the action is still taken. Classes that are missing never
//!   take the action.
//!
//! [`RangeTables`] groups every table the range chart agent consults. The
//! built in defaults are a reasonable heads-up strategy, and custom tables
//! can be loaded from JSON:
//!
//! ```json
//! {
//!   "bu_open": "22+, A2+, K2+, Q5o+",
//!   "push_fold_shove": { "AA": 20.0, "72o": 2.5 }
//! }
//! ```
//!
//! Any table left out of the JSON keeps its default.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::PokerError;

use super::{HandClass, RangeParser};

/// A set of hand classes.
///
/// # Examples
///
/// ```
/// use headsup_holdem::holdem::{HandClass, HandRange};
///
/// let range = HandRange::from_notation("TT+, AQs+").unwrap();
/// assert_eq!(7, range.len());
/// assert!(range.contains(&HandClass::from_notation("AKs").unwrap()));
/// assert!(!range.contains(&HandClass::from_notation("AKo").unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct HandRange {
    hands: HashSet<HandClass>,
}

impl HandRange {
    /// Parse range notation such as `"22+, A2s+, KTo+"`.
    pub fn from_notation(notation: &str) -> Result<Self, PokerError> {
        Ok(RangeParser::parse_many(notation)?.into_iter().collect())
    }

    pub fn contains(&self, hand: &HandClass) -> bool {
        self.hands.contains(hand)
    }

    pub fn insert(&mut self, hand: HandClass) -> bool {
        self.hands.insert(hand)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandClass> {
        self.hands.iter()
    }

    /// Comma separated labels, strongest classes first.
    pub fn to_notation(&self) -> String {
        let mut hands: Vec<&HandClass> = self.hands.iter().collect();
        hands.sort_unstable_by(|a, b| b.cmp(a));
        hands
            .iter()
            .map(|h| h.to_notation())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromIterator<HandClass> for HandRange {
    fn from_iter<T: IntoIterator<Item = HandClass>>(iter: T) -> Self {
        Self {
            hands: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for HandRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl TryFrom<String> for HandRange {
    type Error = PokerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl From<HandRange> for String {
    fn from(range: HandRange) -> Self {
        range.to_notation()
    }
}

/// Maximum effective stack depth, in big blinds, per hand class.
///
/// # Examples
///
/// ```
/// use headsup_holdem::holdem::{DepthChart, HandClass};
///
/// let chart = DepthChart::from_tiers(&[("AA, KK", 20.0), ("22+", 8.0)]).unwrap();
/// let kk = HandClass::from_notation("KK").unwrap();
/// let deuces = HandClass::from_notation("22").unwrap();
///
/// assert!(chart.allows(&kk, 15.0));
/// assert!(chart.allows(&deuces, 8.0));
/// assert!(!chart.allows(&deuces, 8.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "HashMap<String, f32>", into = "HashMap<String, f32>")
)]
pub struct DepthChart {
    depths: HashMap<HandClass, f32>,
}

impl DepthChart {
    /// Build a chart from `(hand, depth)` pairs. A hand listed twice keeps
    /// its last depth.
    pub fn from_entries<I>(entries: I) -> Result<Self, PokerError>
    where
        I: IntoIterator<Item = (HandClass, f32)>,
    {
        let mut chart = Self::default();
        for (hand, depth) in entries {
            chart.set(hand, depth)?;
        }
        Ok(chart)
    }

    /// Build a chart from range notation tiers. Each hand gets the deepest
    /// depth of any tier that names it.
    pub fn from_tiers(tiers: &[(&str, f32)]) -> Result<Self, PokerError> {
        let mut chart = Self::default();
        for (notation, depth) in tiers {
            for hand in RangeParser::parse_many(notation)? {
                let current = chart.depth(&hand);
                chart.set(hand, current.max(*depth))?;
            }
        }
        Ok(chart)
    }

    /// Set the depth for a hand. Depths must be finite and non-negative.
    pub fn set(&mut self, hand: HandClass, depth: f32) -> Result<(), PokerError> {
        if !depth.is_finite() || depth < 0.0 {
            return Err(PokerError::InvalidDepth {
                hand: hand.to_notation(),
                depth,
            });
        }
        self.depths.insert(hand, depth);
        Ok(())
    }

    /// Depth for a hand, zero when the hand isn't in the chart.
    pub fn depth(&self, hand: &HandClass) -> f32 {
        self.depths.get(hand).copied().unwrap_or(0.0)
    }

    /// True when the action is taken with `hand` at `depth_bb` big blinds.
    pub fn allows(&self, hand: &HandClass, depth_bb: f32) -> bool {
        self.depths
            .get(hand)
            .is_some_and(|max_depth| depth_bb <= *max_depth)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

impl TryFrom<HashMap<String, f32>> for DepthChart {
    type Error = PokerError;

    fn try_from(value: HashMap<String, f32>) -> Result<Self, Self::Error> {
        let mut chart = Self::default();
        for (label, depth) in value {
            chart.set(HandClass::from_notation(&label)?, depth)?;
        }
        Ok(chart)
    }
}

impl From<DepthChart> for HashMap<String, f32> {
    fn from(chart: DepthChart) -> Self {
        chart
            .depths
            .into_iter()
            .map(|(hand, depth)| (hand.to_notation(), depth))
            .collect()
    }
}

const BU_OPEN: &str = "22+, A2+, K2+, Q2s+, Q5o+, J4s+, J7o+, T6s+, T7o+, 96s+, 97o+, 85s+, 87o, \
                       75s+, 64s+, 54s";
const BB_THREE_BET: &str = "88+, ATs+, KJs+, AJo+, KQo, A5s-A4s, K9s, Q9s, J9s, T8s, 97s, 76s, 65s";
const BB_CALL_OPEN: &str = "22-77, A6s-A9s, A2s-A3s, A2o-ATo, K2s-K8s, KTs, K7o-KJo, Q4s-Q8s, \
                            QTs-QJs, Q8o-QJo, J6s-J8s, JTs, J8o-JTo, T6s-T7s, T9s, T8o-T9o, 96s, \
                            98s, 98o, 85s+, 74s-75s, 64s, 53s+, 43s";
const BU_FOUR_BET: &str = "QQ+, AKs, AKo, A5s";
const BU_CALL_THREE_BET: &str = "22-JJ, A6s-AQs, ATo-AQo, KTs+, KQo, QTs+, JTs, T9s, 98s, 87s";
const BB_FIVE_BET_SHOVE: &str = "QQ+, AK";
const BU_CALL_SHOVE: &str = "JJ+, AK, AQs";

/// Small blind shove depths for the push/fold regime.
const PUSH_FOLD_SHOVE: &[(&str, f32)] = &[
    (
        "22+, A2+, K2s+, K5o+, Q4s+, Q9o+, J6s+, J9o+, T6s+, T9o, 96s+, 85s+, 75s+, 64s+, 54s",
        20.0,
    ),
    (
        "K2o+, Q2s+, Q7o+, J3s+, J7o+, T3s+, T7o+, 95s+, 97o+, 84s+, 87o, 74s+, 63s+, 53s+, 43s",
        15.0,
    ),
    (
        "Q2o+, J2s+, J4o+, T2s+, T5o+, 92s+, 95o+, 82s+, 85o+, 72s+, 75o+, 62s+, 64o+, 52s+, 54o, \
         42s+, 32s",
        10.0,
    ),
    ("32+, 42+, 52+, 62+, 72+, 82+, 92+, T2+, J2+", 5.0),
];

/// Big blind calling depths against a shove.
const PUSH_FOLD_CALL: &[(&str, f32)] = &[
    ("22+, A2s+, A4o+, K8s+, KTo+, QTs+, QJo", 20.0),
    ("A2o+, K5s+, K9o, Q9s, JTs", 15.0),
    ("K2s+, K7o+, Q6s+, QTo, J8s+, JTo, T9s", 10.0),
    ("Q2s+, Q5o+, J5s+, J8o+, T6s+, T8o+, 96s+, 98o, 86s+, 76s", 5.0),
    ("K2+, Q2+, J2+, T2+, 92+, 82+, 72+, 62+, 52+, 42+, 32+", 2.5),
];

/// Every table the range chart agent consults preflop.
///
/// Set tables drive the deep stack escalation ladder. The two depth charts
/// drive the push/fold regime.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangeTables {
    /// Button first in
    pub bu_open: HandRange,
    /// Big blind raise against a limp or an open
    pub bb_three_bet: HandRange,
    /// Big blind flat against an open
    pub bb_call_open: HandRange,
    pub bu_four_bet: HandRange,
    pub bu_call_three_bet: HandRange,
    pub bb_five_bet_shove: HandRange,
    /// Button calling off or shoving over a five bet
    pub bu_call_shove: HandRange,
    pub push_fold_shove: DepthChart,
    pub push_fold_call: DepthChart,
}

impl RangeTables {
    /// The built in heads-up tables.
    pub fn builtin() -> Result<Self, PokerError> {
        Ok(Self {
            bu_open: HandRange::from_notation(BU_OPEN)?,
            bb_three_bet: HandRange::from_notation(BB_THREE_BET)?,
            bb_call_open: HandRange::from_notation(BB_CALL_OPEN)?,
            bu_four_bet: HandRange::from_notation(BU_FOUR_BET)?,
            bu_call_three_bet: HandRange::from_notation(BU_CALL_THREE_BET)?,
            bb_five_bet_shove: HandRange::from_notation(BB_FIVE_BET_SHOVE)?,
            bu_call_shove: HandRange::from_notation(BU_CALL_SHOVE)?,
            push_fold_shove: DepthChart::from_tiers(PUSH_FOLD_SHOVE)?,
            push_fold_call: DepthChart::from_tiers(PUSH_FOLD_CALL)?,
        })
    }

    /// Tables with nothing in them. Every lookup misses, so an agent using
    /// these folds or checks everywhere preflop.
    pub fn empty() -> Self {
        Self {
            bu_open: HandRange::default(),
            bb_three_bet: HandRange::default(),
            bb_call_open: HandRange::default(),
            bu_four_bet: HandRange::default(),
            bu_call_three_bet: HandRange::default(),
            bb_five_bet_shove: HandRange::default(),
            bu_call_shove: HandRange::default(),
            push_fold_shove: DepthChart::default(),
            push_fold_call: DepthChart::default(),
        }
    }
}

impl Default for RangeTables {
    fn default() -> Self {
        Self::builtin().expect("built in range notation is valid")
    }
}

/// Errors from loading range tables.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum RangeTablesError {
    #[error("Failed to read range tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse range tables: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "serde")]
impl RangeTables {
    /// Parse tables from JSON. Missing tables keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, RangeTablesError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, RangeTablesError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, RangeTablesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
