//! One module per subcommand: a clap `Args` struct plus a `run_*` function
//! that takes the open database connection and the output mode.

pub mod add;
pub mod edit;
pub mod list;
pub mod parents;
pub mod rm;
pub mod show;
