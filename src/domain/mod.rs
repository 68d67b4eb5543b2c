pub mod review;
pub mod schedule;
pub mod word;

pub use review::ReviewOutcome;
pub use schedule::{Versioned, WordSchedulingState};
pub use word::Word;
