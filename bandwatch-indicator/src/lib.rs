pub mod average;
pub mod bollinger;
pub mod buffer;
pub mod error;
pub mod iter;
pub mod stats;
pub mod stream;
pub mod traits;

pub use average::*;
pub use bollinger::*;
pub use buffer::*;
pub use error::*;
pub use iter::*;
pub use stream::*;
pub use traits::*;
