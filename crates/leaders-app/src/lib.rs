// Bot-side scaffolding around leaders-core: configuration, log destination,
// HTTP client settings and the command line front end.

pub mod cli;
pub mod config;
pub mod logging;
