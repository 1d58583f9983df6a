pub mod commands;
pub mod scan_commands;

pub use commands::{Cli, Commands, ScanArgs};
pub use scan_commands::{ScanCommandHandler, ScanReport};
