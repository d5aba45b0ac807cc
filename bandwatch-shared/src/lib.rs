pub mod data;
pub mod error;

pub use data::*;
pub use error::*;

pub type TimestampMs = u64;
pub type Symbol = bytestring::ByteString;
pub type IntervalSc = u64;
