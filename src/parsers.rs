use std::{num::NonZeroUsize, str::FromStr};

/// Wrapper type to parse sizes with optional suffixes (e.g. 64K, 4MiB).
#[derive(Debug, Clone, Copy)]
pub struct SizeArg(pub u64);

impl FromStr for SizeArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().replace('_', "");
        let lower = s.to_ascii_lowercase();
        let (num_str, multiplier) = parse_with_suffix(&lower);
        let num: u64 = num_str
            .parse()
            .map_err(|_| format!("Invalid size number: {num_str}"))?;
        num.checked_mul(multiplier)
            .map(Self)
            .ok_or_else(|| format!("Size too large: {s}"))
    }
}

fn parse_with_suffix(s: &str) -> (&str, u64) {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const SUFFIXES: &[(&[&str], u64)] = &[
        (&["gib", "gb", "g"], GB),
        (&["mib", "mb", "m"], MB),
        (&["kib", "kb", "k"], KB),
        (&["b"], 1),
    ];
    for (suffixes, multiplier) in SUFFIXES {
        for suffix in *suffixes {
            if let Some(stripped) = s.strip_suffix(suffix) {
                return (stripped.trim(), *multiplier);
            }
        }
    }
    (s, 1)
}

/// Parse a positive `usize` (>= 1) from CLI input.
///
/// # Errors
/// Returns an error if the input string is not a valid number or is less than 1.
pub fn parse_positive_usize(s: &str) -> Result<NonZeroUsize, String> {
    let value: usize = s
        .parse()
        .map_err(|err| format!("invalid number '{s}': {err}"))?;
    NonZeroUsize::new(value).ok_or_else(|| "value must be at least 1".to_string())
}

/// Parse a read buffer size such as `4M` or `65536`.
///
/// # Errors
/// Returns an error for malformed sizes, zero, or sizes that do not fit in memory addressing.
pub fn parse_buffer_size(s: &str) -> Result<NonZeroUsize, String> {
    let SizeArg(bytes) = s.parse()?;
    let bytes = usize::try_from(bytes).map_err(|_| format!("chunk size too large: {s}"))?;
    NonZeroUsize::new(bytes).ok_or_else(|| "chunk size must be greater than 0".to_string())
}
