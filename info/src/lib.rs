//! Build metadata reported by the health check and attached to every log
//! record.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const REVISION: Option<&str> = option_env!("INTAKE_REVISION");

pub const BUILD_TIMESTAMP: Option<&str> = option_env!("INTAKE_BUILD_TIMESTAMP");

pub const NAME: &str = "intake";
