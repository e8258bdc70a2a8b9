//! Debug switches for the command-line front end.

use std::env;

/// Environment variable holding a comma separated list of debug flags.
pub const DEBUG_ENV_VAR: &str = "BITCHESS_DEBUG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugConfig {
    print_bitboards: bool,
}

impl DebugConfig {
    /// Every debug output switched off.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn print_bitboards(&self) -> bool {
        self.print_bitboards
    }

    pub fn enable_bitboards(&mut self) {
        self.print_bitboards = true;
    }

    /// Picks up `--print-bitboards` / `-b`; other arguments are left for the caller.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::disabled();
        for arg in args {
            if matches!(arg.as_ref(), "--print-bitboards" | "-b") {
                config.enable_bitboards();
            }
        }
        config
    }

    pub fn from_env() -> Self {
        Self::from_flag_list(&env::var(DEBUG_ENV_VAR).unwrap_or_default())
    }

    /// Parses a list such as `bitboards,other`. Unknown flags are ignored.
    pub fn from_flag_list(flags: &str) -> Self {
        let mut config = Self::disabled();
        for flag in flags.split(',').map(str::trim) {
            if flag.eq_ignore_ascii_case("bitboards") {
                config.enable_bitboards();
            }
        }
        config
    }

    /// Flags set in either configuration.
    pub fn merge(self, other: DebugConfig) -> Self {
        DebugConfig {
            print_bitboards: self.print_bitboards || other.print_bitboards,
        }
    }
}
