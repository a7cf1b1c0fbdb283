pub mod filter;
pub mod language;
pub mod sort;
pub mod summary;
pub mod timer;
pub mod work_entry;

pub use filter::{FilterOptions, FilterPreset};
pub use language::Language;
pub use sort::{SortField, SortOptions, SortOrder};
pub use summary::{WeekTotal, WorkSummary};
pub use timer::ActiveTimer;
pub use work_entry::{EntryPatch, WorkEntry};
