//! Named constants and environment overrides.
//!
//! Overrides are read from the process environment after `dotenv` has loaded
//! any `.env` file.

use std::env;

/// log4rs configuration file read at start-up.
pub const LOG_CONFIG_FILE: &str = "log4rs.yml";
/// Environment variable overriding [`LOG_CONFIG_FILE`].
pub const LOG_CONFIG_ENV: &str = "CIDR_LOG_CONFIG";

/// Output format when neither `--format` nor the environment picks one.
pub const DEFAULT_OUTPUT_FORMAT: &str = "text";
/// Environment variable overriding [`DEFAULT_OUTPUT_FORMAT`].
pub const OUTPUT_FORMAT_ENV: &str = "CIDR_OUTPUT_FORMAT";

/// Largest number of networks `subnets` and `split` will produce, as a power of two.
pub const MAX_SUBNET_BITS: u8 = 24;
/// Largest number of networks `subnets` and `split` will produce.
pub const MAX_SUBNETS: usize = 1 << MAX_SUBNET_BITS;

// CSV column widths
pub const WIDTH_INDEX: usize = 6;
pub const WIDTH_CIDR: usize = 45;
pub const WIDTH_ADDR: usize = 41;
pub const WIDTH_SIZE: usize = 42;
pub const WIDTH_NETMASK: usize = 17;
pub const WIDTH_CLASS: usize = 14;

/// log4rs configuration file, honouring [`LOG_CONFIG_ENV`].
pub fn log_config_file() -> String {
    env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| LOG_CONFIG_FILE.to_string())
}

/// Output format name, honouring [`OUTPUT_FORMAT_ENV`].
pub fn output_format() -> String {
    env::var(OUTPUT_FORMAT_ENV).unwrap_or_else(|_| DEFAULT_OUTPUT_FORMAT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_subnets() {
        assert_eq!(MAX_SUBNETS, 16_777_216);
    }

    #[test]
    fn test_defaults_without_env() {
        // neither variable is set by the test harness
        if env::var(LOG_CONFIG_ENV).is_err() {
            assert_eq!(log_config_file(), "log4rs.yml");
        }
        if env::var(OUTPUT_FORMAT_ENV).is_err() {
            assert_eq!(output_format(), "text");
        }
    }
}
