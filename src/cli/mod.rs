//! Command implementations behind the `spotetl` binary.
//!
//! Each command owns its own database connection and converts pipeline
//! errors into a message plus a non-zero exit via the `error!` macro, which
//! is what an external scheduler keys its retry policy on.

mod init;
mod quality;
mod run;
mod status;

pub use init::init;
pub use quality::quality;
pub use run::run;
pub use status::status;
