//! Command line front end.
//!
//! The flags mirror the classic getopt interface: everything is a single-letter option and
//! short options can be clustered (`-rp`, `-rkl10m`).

use crate::config::{parse_size, Config, DisplayUnit, DEFAULT_POLL_INTERVAL};
use crate::errors::ConfigError;
use clap::{ArgAction, CommandFactory, Parser};
use std::time::Duration;

pub const USAGE: &str = "memleak [-rp] [-bkmg] [-l limit[bkmg]] [-c chunk[bkmg]]";

#[derive(Debug, Parser)]
#[command(
    name = "memleak",
    about = "Eat memory until allocation fails.",
    override_usage = USAGE,
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Keep running after the limit is reached
    #[arg(short = 'r')]
    pub keep_running: bool,

    /// Keep trying to allocate after the limit is reached (with -r)
    #[arg(short = 'p')]
    pub poll: bool,

    /// Report in bytes
    #[arg(short = 'b')]
    pub bytes: bool,

    /// Report in kilobytes
    #[arg(short = 'k')]
    pub kilobytes: bool,

    /// Report in megabytes
    #[arg(short = 'm')]
    pub megabytes: bool,

    /// Report in gigabytes
    #[arg(short = 'g')]
    pub gigabytes: bool,

    /// Stop eating after this many bytes
    #[arg(short = 'l', value_name = "limit[bkmg]")]
    pub limit: Option<String>,

    /// Bytes requested per allocation
    #[arg(short = 'c', value_name = "chunk[bkmg]")]
    pub chunk: Option<String>,

    /// Cap the address space of the process before eating
    #[arg(short = 'a', value_name = "size[bkmg]")]
    pub address_space: Option<String>,

    /// Milliseconds to wait between allocation attempts while polling
    #[arg(long = "poll-interval", value_name = "ms")]
    pub poll_interval: Option<u64>,

    /// Print this usage text
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }

    pub fn into_config(self) -> Result<Config, ConfigError> {
        let display_unit =
            DisplayUnit::from_flags([self.bytes, self.kilobytes, self.megabytes, self.gigabytes])?;

        let mut config = Config {
            keep_running: self.keep_running,
            poll_after_limit: self.poll,
            display_unit,
            poll_interval: self
                .poll_interval
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            ..Config::default()
        };
        if let Some(limit) = &self.limit {
            config.byte_limit = parse_size(limit)?;
        }
        if let Some(chunk) = &self.chunk {
            config.chunk_size = parse_size(chunk)?;
        }
        if let Some(size) = &self.address_space {
            config.address_space_limit = Some(parse_size(size)?);
        }

        if config.poll_after_limit && !config.keep_running {
            log::warn!("-p has no effect without -r");
        }

        config.validate()?;
        Ok(config)
    }
}
