pub mod cli;
pub mod config;
pub mod filter;
pub mod logging;
pub mod models;
pub mod nav;
pub mod tasks;
pub mod tui;
pub mod utils;

pub use config::Config;
pub use filter::{CategoryFilter, StatusFilter, TaskFilter};
pub use models::{NewTask, Priority, Task};
pub use tasks::TaskList;
pub use utils::Profile;
