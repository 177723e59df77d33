/// Learning and regeneration passes over image blocks
pub mod forgetter;

pub use forgetter::{ForgetSummary, Forgetter, ForgetterConfig};
