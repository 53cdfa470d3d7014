//! Format recognizers: regex battery and dictionary membership tests.

mod dictionary;
mod patterns;
mod reference;

pub use dictionary::{
    DictionaryMatcher, COUNTRY_MATCHER, LANGUAGE_MATCHER, LARGE_SET_THRESHOLD,
    WORD_OVERLAP_CUTOFF,
};
pub use patterns::{check_patterns, is_valid_date, is_valid_datetime, PatternMatch};
pub use reference::{COUNTRIES, ISO_COUNTRY_CODES, LANGUAGES};
