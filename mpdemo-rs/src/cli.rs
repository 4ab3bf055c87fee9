//! Command-line argument parsing.
//!
//! Usage:
//!   mpdemo [-sd] [-H<size>] [-r<runs>] [-o<file>]

use std::path::PathBuf;

pub const USAGE: &str = "Usage: mpdemo [-sd] [-H<size>] [-r<runs>] [-o<file>]";

// ── Public types ──────────────────────────────────────────────────────────────

/// Parsed command-line arguments.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Print only the routine's own output (`-s`).
    pub script_only: bool,
    /// Debug diagnostics on stderr (`-d`).
    pub debug: bool,
    /// Heap size as given, unparsed (`-H<size>`).
    pub heap_size: Option<String>,
    /// How many times to run the routine (`-r<runs>`).
    pub runs: Option<u32>,
    /// Write console output here instead of stdout (`-o<file>`).
    pub output: Option<PathBuf>,
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse `std::env::args()` and return [`CliArgs`] or an error message.
pub fn parse_args() -> Result<CliArgs, String> {
    let raw: Vec<String> = std::env::args().collect();
    parse_argv(&raw[1..])
}

/// Parse a slice of argument strings (exposed for testing).
pub fn parse_argv(argv: &[String]) -> Result<CliArgs, String> {
    let mut args = CliArgs::default();
    let mut i = 0;

    while i < argv.len() {
        let arg = argv[i].as_str();

        if arg == "--" {
            if let Some(extra) = argv.get(i + 1) {
                return Err(format!("unexpected argument: {extra}"));
            }
            break;
        }

        if !arg.starts_with('-') || arg == "-" {
            return Err(format!("unexpected argument: {arg}"));
        }

        // Flag argument: iterate over characters after the leading `-`.
        let chars: Vec<char> = arg[1..].chars().collect();
        let mut j = 0;
        while j < chars.len() {
            let flag = chars[j];
            match flag {
                's' => args.script_only = true,
                'd' => args.debug = true,

                // Flags that take a value, embedded (`-H8k`) or separate (`-H 8k`).
                'H' | 'r' | 'o' => {
                    let value = if j + 1 < chars.len() {
                        let s: String = chars[j + 1..].iter().collect();
                        j = chars.len(); // consumed rest of this arg
                        s
                    } else if i + 1 < argv.len() {
                        i += 1;
                        argv[i].clone()
                    } else {
                        return Err(format!("-{flag} requires an argument"));
                    };
                    match flag {
                        'H' => args.heap_size = Some(value),
                        'r' => args.runs = Some(parse_runs(&value)?),
                        _ => args.output = Some(PathBuf::from(value)),
                    }
                }

                c => return Err(format!("unknown option: -{c}")),
            }
            j += 1;
        }
        i += 1;
    }

    Ok(args)
}

fn parse_runs(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("invalid run count: {s}")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|&s| s.to_owned()).collect()
    }

    #[test]
    fn empty_args() {
        let a = parse_argv(&argv(&[])).unwrap();
        assert!(!a.script_only && !a.debug);
        assert_eq!(a.heap_size, None);
        assert_eq!(a.runs, None);
        assert_eq!(a.output, None);
    }

    #[test]
    fn bool_flags() {
        let a = parse_argv(&argv(&["-s", "-d"])).unwrap();
        assert!(a.script_only);
        assert!(a.debug);
    }

    #[test]
    fn combined_bool_flags() {
        let a = parse_argv(&argv(&["-sd"])).unwrap();
        assert!(a.script_only && a.debug);
    }

    #[test]
    fn heap_embedded() {
        let a = parse_argv(&argv(&["-H16k"])).unwrap();
        assert_eq!(a.heap_size.as_deref(), Some("16k"));
    }

    #[test]
    fn heap_separate() {
        let a = parse_argv(&argv(&["-H", "4096"])).unwrap();
        assert_eq!(a.heap_size.as_deref(), Some("4096"));
    }

    #[test]
    fn value_flag_after_bool_flags() {
        let a = parse_argv(&argv(&["-sdr3"])).unwrap();
        assert!(a.script_only && a.debug);
        assert_eq!(a.runs, Some(3));
    }

    #[test]
    fn output_file() {
        let a = parse_argv(&argv(&["-o", "out.txt"])).unwrap();
        assert_eq!(a.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn zero_runs_rejected() {
        assert!(parse_argv(&argv(&["-r0"])).is_err());
        assert!(parse_argv(&argv(&["-r", "many"])).is_err());
    }

    #[test]
    fn missing_value() {
        let err = parse_argv(&argv(&["-H"])).unwrap_err();
        assert_eq!(err, "-H requires an argument");
    }

    #[test]
    fn positional_rejected() {
        assert!(parse_argv(&argv(&["script.py"])).is_err());
        assert!(parse_argv(&argv(&["--", "x"])).is_err());
    }

    #[test]
    fn unknown_flag() {
        assert!(parse_argv(&argv(&["-z"])).is_err());
    }
}
