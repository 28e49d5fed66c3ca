//! CLI commands

mod add;
mod fmt;
mod show;

pub use add::AddCommand;
pub use fmt::FmtCommand;
pub use show::ShowCommand;
