/// Module with the 169 starting hand classes.
mod hand_class;
/// Export `HandClass`
pub use self::hand_class::HandClass;

/// Module with all the range notation parsing code.
mod parse;
/// Export `RangeParser`
pub use self::parse::RangeParser;

/// Module for the static preflop range tables.
mod ranges;
/// Export range table types
#[cfg(feature = "serde")]
pub use self::ranges::RangeTablesError;
pub use self::ranges::{DepthChart, HandRange, RangeTables};
