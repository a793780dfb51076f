//! Command-line arguments.

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "todoproxy",
    about = "Caching, rate-limited proxy for the todos API",
    version
)]
pub struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub tracing: TracingFormat,
}
