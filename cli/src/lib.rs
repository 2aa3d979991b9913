pub mod args;
pub mod config;
pub mod console;
pub mod logging;
pub mod menu;
pub mod ops;

pub use args::{Cli, Commands};
pub use config::Settings;
pub use console::Console;
pub use menu::{MenuChoice, Session};
pub use ops::Context;
