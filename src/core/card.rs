use std::fmt;

use super::PokerError;

/// Card rank, ordered from `Two` up to `Ace`.
///
/// The discriminant doubles as a bit index when cards are packed into
/// value sets for ranking.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// All thirteen values, lowest first.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Convert from the 0..13 index. Anything larger is `None`.
    pub fn from_u8(v: u8) -> Option<Self> {
        VALUES.get(v as usize).copied()
    }

    /// Parse a value character such as `A`, `t`, or `7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use headsup_holdem::core::Value;
    ///
    /// assert_eq!(Some(Value::Ten), Value::from_char('T'));
    /// assert_eq!(Some(Value::Ace), Value::from_char('a'));
    /// assert_eq!(None, Value::from_char('X'));
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }
}

/// Card suit. Suits carry no ordering in holdem.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Heart = 2,
    Diamond = 3,
}

impl Suit {
    pub const fn suits() -> [Suit; 4] {
        [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond]
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spade),
            'c' => Some(Suit::Club),
            'h' => Some(Suit::Heart),
            'd' => Some(Suit::Diamond),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// A single playing card.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// Parse a two character card such as `"As"` or `"td"`.
impl TryFrom<&str> for Card {
    type Error = PokerError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let (Some(v), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PokerError::InvalidCardString(s.to_string()));
        };
        let value = Value::from_char(v).ok_or(PokerError::UnexpectedValueChar(v))?;
        let suit = Suit::from_char(su).ok_or(PokerError::UnexpectedSuitChar(su))?;
        Ok(Card::new(value, suit))
    }
}

/// The two private cards a player holds for one hand.
///
/// Construction rejects the same card twice, so every `HoleCards` is a
/// real unordered pair.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleCards([Card; 2]);

impl HoleCards {
    pub fn new(first: Card, second: Card) -> Result<Self, PokerError> {
        if first == second {
            return Err(PokerError::DuplicateCard(first));
        }
        Ok(Self([first, second]))
    }

    /// Parse four characters of two cards, for example `"AsKd"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use headsup_holdem::core::{Card, HoleCards, Suit, Value};
    ///
    /// let hole = HoleCards::from_str_pair("AsKd").unwrap();
    /// assert_eq!(hole.cards()[0], Card::new(Value::Ace, Suit::Spade));
    /// assert!(HoleCards::from_str_pair("AsAs").is_err());
    /// ```
    pub fn from_str_pair(s: &str) -> Result<Self, PokerError> {
        if s.len() != 4 || !s.is_ascii() {
            return Err(PokerError::InvalidCardString(s.to_string()));
        }
        let first = Card::try_from(&s[..2])?;
        let second = Card::try_from(&s[2..])?;
        Self::new(first, second)
    }

    pub fn cards(&self) -> &[Card; 2] {
        &self.0
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_char_roundtrip() {
        for v in Value::values() {
            assert_eq!(Some(v), Value::from_char(v.to_char()));
        }
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Ace > Value::King);
        assert!(Value::Two < Value::Three);
        assert_eq!(Some(Value::Ace), Value::from_u8(12));
        assert_eq!(None, Value::from_u8(13));
    }

    #[test]
    fn test_parse_card() {
        let c = Card::try_from("Th").unwrap();
        assert_eq!(Value::Ten, c.value);
        assert_eq!(Suit::Heart, c.suit);
        assert_eq!("Th", c.to_string());
    }

    #[test]
    fn test_parse_card_errors() {
        assert_eq!(
            Err(PokerError::UnexpectedValueChar('X')),
            Card::try_from("Xh")
        );
        assert_eq!(
            Err(PokerError::UnexpectedSuitChar('x')),
            Card::try_from("Ax")
        );
        assert!(Card::try_from("A").is_err());
        assert!(Card::try_from("Ahh").is_err());
    }

    #[test]
    fn test_hole_cards_reject_duplicates() {
        let ace = Card::new(Value::Ace, Suit::Spade);
        assert_eq!(Err(PokerError::DuplicateCard(ace)), HoleCards::new(ace, ace));
    }

    #[test]
    fn test_hole_cards_display() {
        let hole = HoleCards::from_str_pair("7c2d").unwrap();
        assert_eq!("7c2d", hole.to_string());
        assert!(hole.contains(&Card::new(Value::Two, Suit::Diamond)));
    }
}
