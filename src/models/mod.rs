pub mod entry;
pub mod progress;

pub use entry::Entry;
pub use progress::UserProgress;
