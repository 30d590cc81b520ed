pub mod cli;
pub mod download;
pub mod parser;
pub mod query;
pub mod schema;
pub mod ui;
pub mod writer;

pub use cli::{Cli, Commands};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
