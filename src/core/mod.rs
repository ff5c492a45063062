pub mod action;
pub mod command;
pub mod context;
pub mod module;

pub use action::{Action, FilterChange, NotifyLevel};
pub use command::{parse_command, Command};
pub use context::{Context, Selected};
pub use module::Module;
