//! CLI command implementations
//!
//! Each command maps onto one trust store operation.

mod add;
mod add_repo;
mod check;
mod config;
mod resolve;

pub use add::{AddArgs, cmd_add};
pub use add_repo::{AddRepoArgs, cmd_add_repo};
pub use check::{CheckArgs, cmd_check};
pub use config::{ConfigArgs, cmd_config};
pub use resolve::{ResolveArgs, cmd_resolve};
