pub mod report;
pub mod request;

pub use report::{RankedEntry, RankedReport};
pub use request::{ParsedRequest, Signal};
