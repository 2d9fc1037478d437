mod command_result;
pub mod diff;
pub mod extract;
pub mod init;
pub mod manifest;

pub use command_result::*;
