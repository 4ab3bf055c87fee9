//! Host configuration.
//!
//! Settings come from the command line, with the environment as a fallback
//! for the heap size:
//!
//! | Setting | Source, in priority order | Default |
//! |---------|---------------------------|---------|
//! | heap size | `-H<size>` → `$MPDEMO_HEAP_SIZE` | 8 KiB |
//! | runs | `-r<runs>` | 1 |
//! | script only | `-s` | off |
//! | debug | `-d` | off |
//! | output | `-o<file>` | stdout |
//!
//! Sizes are plain byte counts or carry a `k`/`m` suffix (`8k`, `1m`).

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::gc::DEFAULT_HEAP_SIZE;

/// Environment variable consulted when `-H` is absent.
pub const HEAP_SIZE_ENV: &str = "MPDEMO_HEAP_SIZE";

/// An invalid setting, tagged with where it came from.
#[derive(Debug)]
pub struct ConfigError {
    pub origin: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.origin, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Resolved settings for one host invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub heap_size: usize,
    pub runs: u32,
    pub script_only: bool,
    pub debug: bool,
    pub output: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            heap_size: DEFAULT_HEAP_SIZE,
            runs: 1,
            script_only: false,
            debug: false,
            output: None,
        }
    }
}

impl HostConfig {
    /// Resolve settings from parsed arguments and the process environment.
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, std::env::var(HEAP_SIZE_ENV).ok())
    }

    /// Resolve settings with an explicit environment value (exposed for testing).
    pub fn resolve(args: &CliArgs, heap_env: Option<String>) -> Result<Self, ConfigError> {
        let heap_size = match (&args.heap_size, heap_env) {
            (Some(s), _) => parse_size(s).map_err(|message| ConfigError { origin: "-H", message })?,
            (None, Some(s)) => {
                parse_size(&s).map_err(|message| ConfigError { origin: HEAP_SIZE_ENV, message })?
            }
            (None, None) => DEFAULT_HEAP_SIZE,
        };
        Ok(Self {
            heap_size,
            runs: args.runs.unwrap_or(1),
            script_only: args.script_only,
            debug: args.debug,
            output: args.output.clone(),
        })
    }
}

/// Parse a byte count with an optional `k` or `m` suffix.
pub fn parse_size(s: &str) -> Result<usize, String> {
    let t = s.trim();
    let (digits, unit) = match t.char_indices().last() {
        Some((pos, 'k' | 'K')) => (&t[..pos], 1024),
        Some((pos, 'm' | 'M')) => (&t[..pos], 1024 * 1024),
        _ => (t, 1),
    };
    let n: usize = digits
        .parse()
        .map_err(|_| format!("invalid size: {s:?}"))?;
    match n.checked_mul(unit) {
        Some(0) => Err("heap size must be positive".to_owned()),
        Some(bytes) => Ok(bytes),
        None => Err(format!("size too large: {s:?}")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(parse_size("8192"), Ok(8192));
        assert_eq!(parse_size("8k"), Ok(8192));
        assert_eq!(parse_size("16K"), Ok(16384));
        assert_eq!(parse_size("1m"), Ok(1 << 20));
        assert_eq!(parse_size(" 64 "), Ok(64));
    }

    #[test]
    fn bad_sizes() {
        assert!(parse_size("").is_err());
        assert!(parse_size("k").is_err());
        assert!(parse_size("-1").is_err());
        assert!(parse_size("8g").is_err());
        assert_eq!(parse_size("0k"), Err("heap size must be positive".to_owned()));
    }

    #[test]
    fn defaults() {
        let c = HostConfig::resolve(&CliArgs::default(), None).unwrap();
        assert_eq!(c, HostConfig::default());
        assert_eq!(c.heap_size, 8 * 1024);
    }

    #[test]
    fn cli_beats_env() {
        let args = CliArgs { heap_size: Some("2k".into()), ..CliArgs::default() };
        let c = HostConfig::resolve(&args, Some("4k".into())).unwrap();
        assert_eq!(c.heap_size, 2048);
    }

    #[test]
    fn env_fallback() {
        let c = HostConfig::resolve(&CliArgs::default(), Some("4k".into())).unwrap();
        assert_eq!(c.heap_size, 4096);
    }

    #[test]
    fn error_names_origin() {
        let err = HostConfig::resolve(&CliArgs::default(), Some("lots".into())).unwrap_err();
        assert_eq!(err.to_string(), "MPDEMO_HEAP_SIZE: invalid size: \"lots\"");
    }

    #[test]
    fn flags_carry_over() {
        let args = CliArgs { script_only: true, debug: true, runs: Some(3), ..CliArgs::default() };
        let c = HostConfig::resolve(&args, None).unwrap();
        assert!(c.script_only && c.debug);
        assert_eq!(c.runs, 3);
    }
}
