use crate::core::{PokerError, Value};

use super::HandClass;

/// Which classes a range entry covers for its pair of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suitedness {
    Pair,
    Suited,
    Offsuit,
    /// No suffix on a non pair, so both suited and offsuit
    Any,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    high: Value,
    low: Value,
    suitedness: Suitedness,
}

impl Entry {
    fn parse(s: &str, full: &str) -> Result<Self, PokerError> {
        let invalid = || PokerError::InvalidRange(full.to_string());
        let chars: Vec<char> = s.chars().collect();
        if chars.len() < 2 || chars.len() > 3 {
            return Err(invalid());
        }
        let v1 = Value::from_char(chars[0]).ok_or_else(invalid)?;
        let v2 = Value::from_char(chars[1]).ok_or_else(invalid)?;
        let (high, low) = if v1 >= v2 { (v1, v2) } else { (v2, v1) };

        let suitedness = match (high == low, chars.get(2).map(|c| c.to_ascii_lowercase())) {
            (true, None) => Suitedness::Pair,
            (false, Some('s')) => Suitedness::Suited,
            (false, Some('o')) => Suitedness::Offsuit,
            (false, None) => Suitedness::Any,
            _ => return Err(invalid()),
        };

        Ok(Self {
            high,
            low,
            suitedness,
        })
    }

    fn with_low(self, low: Value) -> Self {
        Self { low, ..self }
    }

    fn expand_into(self, out: &mut Vec<HandClass>) {
        match self.suitedness {
            Suitedness::Pair => out.push(HandClass::new(self.high, self.high, false)),
            Suitedness::Suited => out.push(HandClass::new(self.high, self.low, true)),
            Suitedness::Offsuit => out.push(HandClass::new(self.high, self.low, false)),
            Suitedness::Any => {
                out.push(HandClass::new(self.high, self.low, true));
                out.push(HandClass::new(self.high, self.low, false));
            }
        }
    }
}

/// Values from `from` to `to`, both inclusive.
fn value_span(from: Value, to: Value) -> impl Iterator<Item = Value> {
    (from as u8..=to as u8).filter_map(Value::from_u8)
}

/// Parser for the usual shorthand used to write down preflop ranges.
///
/// Entries are separated by commas:
///
/// - `AA`, `AKs`, `AKo` name a single class. `AK` names both `AKs` and
///   `AKo`.
/// - `77+` is every pair from sevens up to aces.
/// - `A9s+` raises the low card up to one below the high card, so it is
///   `A9s, ATs, AJs, AQs, AKs`.
/// - `99-66` and `A5s-A2s` are inclusive spans. Both ends must be pairs, or
///   share the high card and suitedness.
///
/// # Examples
///
/// ```
/// use headsup_holdem::holdem::RangeParser;
///
/// let hands = RangeParser::parse_many("QQ+, AKs, KTo+").unwrap();
/// assert_eq!(6, hands.len());
/// ```
pub struct RangeParser;

impl RangeParser {
    /// Parse a comma separated range string. Blank entries are skipped,
    /// and the result may contain duplicates when entries overlap.
    pub fn parse_many(range: &str) -> Result<Vec<HandClass>, PokerError> {
        let mut out = Vec::new();
        for entry in range.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            Self::parse_into(entry, &mut out)?;
        }
        Ok(out)
    }

    /// Parse a single entry such as `A2s+` or `99-66`.
    pub fn parse_one(entry: &str) -> Result<Vec<HandClass>, PokerError> {
        let mut out = Vec::new();
        Self::parse_into(entry.trim(), &mut out)?;
        Ok(out)
    }

    fn parse_into(entry: &str, out: &mut Vec<HandClass>) -> Result<(), PokerError> {
        if let Some(base) = entry.strip_suffix('+') {
            let e = Entry::parse(base, entry)?;
            if e.suitedness == Suitedness::Pair {
                for v in value_span(e.high, Value::Ace) {
                    Entry { high: v, low: v, ..e }.expand_into(out);
                }
            } else {
                // Stop one below the high card
                for low in value_span(e.low, e.high).filter(|v| *v < e.high) {
                    e.with_low(low).expand_into(out);
                }
            }
        } else if let Some((first, second)) = entry.split_once('-') {
            let a = Entry::parse(first.trim(), entry)?;
            let b = Entry::parse(second.trim(), entry)?;
            if a.suitedness != b.suitedness {
                return Err(PokerError::InvalidRange(entry.to_string()));
            }
            if a.suitedness == Suitedness::Pair {
                for v in value_span(a.high.min(b.high), a.high.max(b.high)) {
                    Entry { high: v, low: v, ..a }.expand_into(out);
                }
            } else if a.high == b.high {
                for low in value_span(a.low.min(b.low), a.low.max(b.low)) {
                    a.with_low(low).expand_into(out);
                }
            } else {
                return Err(PokerError::InvalidRange(entry.to_string()));
            }
        } else {
            Entry::parse(entry, entry)?.expand_into(out);
        }
        Ok(())
    }
}
