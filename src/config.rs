use crate::errors::ConfigError;
use crate::utils::size::Size;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_CHUNK_SIZE: u64 = 1024;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Unit used when reporting how much memory was eaten.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DisplayUnit {
    #[default]
    Bytes,
    Kilobytes,
    Megabytes,
    Gigabytes,
}

impl DisplayUnit {
    /// Picks the unit from the `-b`, `-k`, `-m` and `-g` flags, in that order.
    ///
    /// At most one of them may be set; with none set the default unit is used.
    pub fn from_flags(flags: [bool; 4]) -> Result<DisplayUnit, ConfigError> {
        const UNITS: [DisplayUnit; 4] = [
            DisplayUnit::Bytes,
            DisplayUnit::Kilobytes,
            DisplayUnit::Megabytes,
            DisplayUnit::Gigabytes,
        ];

        let mut selected = UNITS.iter().zip(flags).filter(|(_, set)| *set);
        match (selected.next(), selected.next()) {
            (None, _) => Ok(DisplayUnit::default()),
            (Some((unit, _)), None) => Ok(*unit),
            (Some(_), Some(_)) => Err(ConfigError::ConflictingUnits),
        }
    }

    pub fn scale(self) -> u64 {
        match self {
            DisplayUnit::Bytes => 1,
            DisplayUnit::Kilobytes => 1024,
            DisplayUnit::Megabytes => 1_048_576,
            DisplayUnit::Gigabytes => 1_073_741_824,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayUnit::Bytes => "",
            DisplayUnit::Kilobytes => "kB",
            DisplayUnit::Megabytes => "MB",
            DisplayUnit::Gigabytes => "GB",
        }
    }

    /// Whole units contained in `bytes`, remainder dropped.
    pub fn convert(self, bytes: u64) -> u64 {
        bytes / self.scale()
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Stay alive after the limit is hit instead of exiting.
    pub keep_running: bool,
    /// Keep trying to allocate after the limit is hit. Only used with `keep_running`.
    pub poll_after_limit: bool,
    pub display_unit: DisplayUnit,
    /// Stop growing once this many bytes are held.
    pub byte_limit: u64,
    pub chunk_size: u64,
    pub poll_interval: Duration,
    /// Address space cap applied to the process before eating.
    pub address_space_limit: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keep_running: false,
            poll_after_limit: false,
            display_unit: DisplayUnit::default(),
            byte_limit: u64::MAX,
            chunk_size: DEFAULT_CHUNK_SIZE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            address_space_limit: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunk);
        }
        Ok(())
    }
}

/// Parses a size string from the command line into a byte count.
pub fn parse_size(input: &str) -> Result<u64, ConfigError> {
    let size: Size = input.parse()?;
    size.bytes()
        .ok_or_else(|| ConfigError::SizeOverflow(input.to_string()))
}
