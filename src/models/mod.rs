pub mod score;
pub mod scan_result;
pub mod submission;
pub mod verdict;

pub use score::*;
pub use scan_result::*;
pub use submission::*;
pub use verdict::*;
