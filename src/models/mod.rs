pub mod filter;
pub mod task;

pub use filter::{FilterPatch, PriorityFilter, StatusFilter, TaskFilter};
pub use task::{Priority, Task, TaskDraft, TaskPatch};
