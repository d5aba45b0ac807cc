use crate::{IntervalSc, Symbol, TimestampMs};
use std::cmp::Ordering;

pub type DataResult<T> = std::result::Result<T, DataError>;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Interval must be greater than 0.")]
    ZeroInterval,

    #[error("Interval {interval_sc}s is too large.")]
    IntervalTooLarge { interval_sc: IntervalSc },

    #[error("Expect symbol {expected}, but found {found}.")]
    MismatchedSymbol { expected: Symbol, found: Symbol },

    #[error(
        "Expect timestamp to be {} {expected}, but found {found}",
        display_ordering(expect_order)
    )]
    UnexpectedTimestamp {
        expect_order: Ordering,
        expected: TimestampMs,
        found: TimestampMs,
    },
}

impl DataError {
    pub fn timestamp_should_be_after(expected: TimestampMs, found: TimestampMs) -> Self {
        Self::UnexpectedTimestamp {
            expect_order: Ordering::Greater,
            expected,
            found,
        }
    }
}

fn display_ordering(order: &Ordering) -> &'static str {
    match order {
        Ordering::Less => "less than",
        Ordering::Equal => "equal to",
        Ordering::Greater => "greater than",
    }
}
