//! Domain logic for rate shopping lives here.

pub mod package;
pub mod price_option;
pub mod selection;

pub use package::{BracketTable, Dimensions, InvalidBrackets, InvalidDimensions};
pub use price_option::{normalize_quote, MalformedQuote, PriceOption};
pub use selection::{select_best, OptionSort, SelectOptions};
