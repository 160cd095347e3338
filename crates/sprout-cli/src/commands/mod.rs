//! CLI command implementations

mod add;
mod care;
mod common;
mod due;
mod list;
mod sync;
mod watch;

pub use add::run_add;
pub use care::{run_done, run_snooze};
pub use due::run_due;
pub use list::run_list;
pub use sync::run_sync;
pub use watch::run_watch;
