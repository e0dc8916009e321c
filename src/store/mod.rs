pub mod slot;
pub mod submissions;

pub use slot::{MemorySlot, SlotStorage};
pub use submissions::{SubmissionStore, SUBMISSIONS_KEY};
