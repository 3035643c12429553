use super::Card;

/// All the different possible hand ranks.
/// For each hand rank the u32 corresponds to
/// the strength of the hand in comparison to others
/// of the same rank.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
pub enum Rank {
    /// No matches
    HighCard(u32),
    /// One Card matches another.
    OnePair(u32),
    /// Two different pair of matching cards.
    TwoPair(u32),
    /// Three of the same value.
    ThreeOfAKind(u32),
    /// Five cards in a sequence
    Straight(u32),
    /// Five cards of the same suit
    Flush(u32),
    /// Three of one value and two of another value
    FullHouse(u32),
    /// Four of the same value.
    FourOfAKind(u32),
    /// Five cards in a sequence all for the same suit.
    StraightFlush(u32),
}

/// Bit mask for the wheel (Ace, two, three, four, five)
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Find the highest straight in a set of values.
///
/// Five consecutive bits survive the shifted AND; the position of the top
/// survivor gives the straight's rank. The wheel ranks lowest at 0.
fn straight_rank(value_set: u32) -> Option<u32> {
    let run =
        value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    if run != 0 {
        Some(32 - 4 - run.leading_zeros())
    } else if value_set & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

/// Keep the `n` most significant bits of a value set.
fn top_n(set: u32, n: u32) -> u32 {
    let mut result = set;
    while result.count_ones() > n {
        result &= result - 1;
    }
    result
}

/// Rank the best five card hand out of five to seven cards.
///
/// Ranks compare directly: a higher `Rank` wins at showdown and equal
/// ranks split.
///
/// # Examples
///
/// ```
/// use headsup_holdem::core::{Card, Rank, rank_cards};
///
/// let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th", "2c", "3d"]
///     .iter()
///     .map(|s| Card::try_from(*s).unwrap())
///     .collect();
/// assert!(matches!(rank_cards(&cards), Rank::StraightFlush(_)));
/// ```
pub fn rank_cards(cards: &[Card]) -> Rank {
    let mut counts = [0u8; 13];
    let mut suit_sets = [0u32; 4];
    let mut value_set = 0u32;

    for c in cards {
        let v = c.value as u32;
        value_set |= 1 << v;
        counts[v as usize] += 1;
        suit_sets[c.suit as usize] |= 1 << v;
    }

    // by_count[n] is the set of values held exactly n times
    let mut by_count = [0u32; 5];
    for (v, &n) in counts.iter().enumerate() {
        by_count[(n as usize).min(4)] |= 1 << v;
    }
    let quads = by_count[4];
    let trips = by_count[3];
    let pairs = by_count[2];

    if let Some(flush_set) = suit_sets.iter().copied().find(|s| s.count_ones() >= 5) {
        return match straight_rank(flush_set) {
            Some(r) => Rank::StraightFlush(r),
            None => Rank::Flush(top_n(flush_set, 5)),
        };
    }

    if quads != 0 {
        let kicker = top_n(value_set ^ quads, 1);
        return Rank::FourOfAKind((quads << 13) | kicker);
    }

    if trips != 0 && (trips.count_ones() >= 2 || pairs != 0) {
        let set = top_n(trips, 1);
        let pair = top_n((trips ^ set) | pairs, 1);
        return Rank::FullHouse((set << 13) | pair);
    }

    if let Some(r) = straight_rank(value_set) {
        return Rank::Straight(r);
    }

    if trips != 0 {
        return Rank::ThreeOfAKind((trips << 13) | top_n(value_set ^ trips, 2));
    }

    match pairs.count_ones() {
        0 => Rank::HighCard(top_n(value_set, 5)),
        1 => Rank::OnePair((pairs << 13) | top_n(value_set ^ pairs, 3)),
        _ => {
            let two = top_n(pairs, 2);
            Rank::TwoPair((two << 13) | top_n(value_set ^ two, 1))
        }
    }
}
