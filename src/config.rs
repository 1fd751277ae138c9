// File: src/config.rs
use crate::core::generator::{DEFAULT_COUNT, DEFAULT_LENGTH, MAX_LENGTH};
use crate::error::{PhraseError, Result};
use clap::{Parser, ValueEnum};
use std::ops::Range;
use std::path::PathBuf;

/// Command-line configuration for the passphrase generator.
#[derive(Debug, Clone, Parser)]
#[command(name = "phrase_engine")]
#[command(about = "Generate memorable passphrases from bigram-linked word prefixes")]
#[command(override_usage = "phrase_engine [OPTIONS] [LENGTH] [COUNT] [HOOK]")]
pub struct Config {
    /// Number of bits/10, number of passphrases and a hook word, in any mix.
    /// The first positive integer is the length, the second the count; any
    /// other word becomes the hook.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Word graph corpus file
    #[arg(long, default_value = "wordlist_bigrams.txt")]
    pub corpus: PathBuf,

    /// Binary snapshot of the parsed corpus, created on first use
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print words A..B with their decoded followers instead of generating
    #[arg(long, value_name = "A..B", value_parser = parse_range)]
    pub dump: Option<Range<usize>>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// What the positional arguments ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub length: usize,
    pub count: usize,
    pub hook: Option<String>,
}

impl Config {
    pub fn settings(&self) -> Result<RunSettings> {
        resolve_positionals(&self.args)
    }
}

/// Length first, then count; anything that is not a positive integer in the
/// slot being filled becomes the hook, the last one winning. Numbers are read
/// from the leading digits, so `" 7"` and `"5x"` count as 7 and 5.
pub fn resolve_positionals<S: AsRef<str>>(args: &[S]) -> Result<RunSettings> {
    let mut length = None;
    let mut count = None;
    let mut hook = None;
    for arg in args {
        let arg = arg.as_ref();
        let positive = leading_integer(arg)
            .filter(|&n| n > 0)
            .and_then(|n| usize::try_from(n).ok());
        if length.is_none() {
            if let Some(n) = positive {
                length = Some(n);
                continue;
            }
        } else if count.is_none() {
            if let Some(n) = positive {
                count = Some(n);
                continue;
            }
        }
        hook = Some(arg.to_string());
    }
    let length = length.unwrap_or(DEFAULT_LENGTH);
    if length > MAX_LENGTH {
        return Err(PhraseError::InvalidLength { length, max: MAX_LENGTH });
    }
    Ok(RunSettings {
        length,
        count: count.unwrap_or(DEFAULT_COUNT),
        hook,
    })
}

/// Optional whitespace, an optional sign, then as many digits as follow.
/// `None` without digits or on overflow.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

fn parse_range(s: &str) -> std::result::Result<Range<usize>, String> {
    let (start, end) = s.split_once("..").ok_or_else(|| format!("expected A..B, got {:?}", s))?;
    let start = start.trim().parse().map_err(|e| format!("bad range start: {}", e))?;
    let end = end.trim().parse().map_err(|e| format!("bad range end: {}", e))?;
    Ok(start..end)
}
