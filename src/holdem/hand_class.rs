//! Starting hand classes for Texas Hold'em.
//!
//! Every pair of hole cards maps to exactly one of 169 classes. Range
//! tables are keyed by these classes.

use std::fmt;

use crate::core::{HoleCards, PokerError, Value};

/// One of the 169 starting hand classes:
/// - 13 pocket pairs (e.g., AA, KK, 22)
/// - 78 suited hands (e.g., AKs, T9s)
/// - 78 offsuit hands (e.g., AKo, 72o)
///
/// # Examples
///
/// ```
/// use headsup_holdem::core::{HoleCards, Value};
/// use headsup_holdem::holdem::HandClass;
///
/// let aks = HandClass::new(Value::Ace, Value::King, true);
/// assert_eq!(aks.to_notation(), "AKs");
///
/// let hole = HoleCards::from_str_pair("KdAd").unwrap();
/// assert_eq!(HandClass::from(&hole), aks);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct HandClass {
    high: Value,
    low: Value,
    /// Always false for pairs
    suited: bool,
}

impl HandClass {
    /// Values are ordered so that `high >= low`, and a pair is never
    /// suited regardless of the flag passed in.
    pub fn new(v1: Value, v2: Value, suited: bool) -> Self {
        let (high, low) = if v1 >= v2 { (v1, v2) } else { (v2, v1) };
        let suited = suited && high != low;
        Self { high, low, suited }
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    pub fn suited(&self) -> bool {
        self.suited
    }

    pub fn high(&self) -> Value {
        self.high
    }

    pub fn low(&self) -> Value {
        self.low
    }

    /// The label range tables use: "AA", "AKs", "72o".
    pub fn to_notation(&self) -> String {
        let high_char = self.high.to_char();
        let low_char = self.low.to_char();

        if self.is_pair() {
            format!("{}{}", high_char, low_char)
        } else if self.suited {
            format!("{}{}s", high_char, low_char)
        } else {
            format!("{}{}o", high_char, low_char)
        }
    }

    /// Parse a single class label. Case is ignored.
    ///
    /// # Errors
    ///
    /// Returns `PokerError::InvalidPreflopNotation` for anything that is not
    /// a pair, or two different values followed by `s` or `o`.
    ///
    /// # Examples
    ///
    /// ```
    /// use headsup_holdem::holdem::HandClass;
    ///
    /// assert!(HandClass::from_notation("QQ").unwrap().is_pair());
    /// assert!(HandClass::from_notation("t9s").unwrap().suited());
    /// assert!(HandClass::from_notation("AK").is_err());
    /// assert!(HandClass::from_notation("AAs").is_err());
    /// ```
    pub fn from_notation(s: &str) -> Result<Self, PokerError> {
        let invalid = || PokerError::InvalidPreflopNotation(s.to_string());
        let chars: Vec<char> = s.trim().chars().collect();

        if chars.len() < 2 || chars.len() > 3 {
            return Err(invalid());
        }

        let v1 = Value::from_char(chars[0]).ok_or_else(invalid)?;
        let v2 = Value::from_char(chars[1]).ok_or_else(invalid)?;

        let suited = match (chars.get(2).map(|c| c.to_ascii_lowercase()), v1 == v2) {
            (None, true) => false,
            (Some('s'), false) => true,
            (Some('o'), false) => false,
            _ => return Err(invalid()),
        };

        Ok(Self::new(v1, v2, suited))
    }

    /// Generate all 169 classes.
    pub fn all() -> Vec<Self> {
        let mut hands = Vec::with_capacity(169);
        let values = Value::values();

        for (i, &high) in values.iter().enumerate() {
            for &low in &values[..=i] {
                hands.push(Self::new(high, low, false));
                if high != low {
                    hands.push(Self::new(high, low, true));
                }
            }
        }

        hands
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_notation())
    }
}

impl TryFrom<String> for HandClass {
    type Error = PokerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_notation(&value)
    }
}

impl From<HandClass> for String {
    fn from(hand: HandClass) -> Self {
        hand.to_notation()
    }
}

/// Classify hole cards. This is total since `HoleCards` always holds two
/// different cards.
impl From<&HoleCards> for HandClass {
    fn from(hole: &HoleCards) -> Self {
        let [c1, c2] = *hole.cards();
        Self::new(c1.value, c2.value, c1.suit == c2.suit)
    }
}
