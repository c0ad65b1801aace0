//! Simple TOML parser for display configuration
//!
//! This is a minimal parser for the subset of TOML the display config
//! uses. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - `[display]` and `[timer]` section headers
//! - Key = value pairs (string, integer)
//! - Arrays of pins: `digits = ["gpio2", "gpio3"]` or `[2, 3]`, on one line
//!   or spread over several
//! - Integers with `_` separators (`1_000`)
//! - Comments (# ...), also after section headers
//!
//! Example:
//!
//! ```toml
//! [display]
//! wiring = "common_cathode"
//! digits = ["gpio2", "gpio3", "gpio4", "gpio5"]
//! segments = ["gpio6", "gpio7", "gpio8", "gpio9", "gpio10", "gpio11", "gpio12", "gpio13"]
//! dot_blink_ticks = 500
//!
//! [timer]
//! id = 0
//! clock_division = 1
//! tick_hz = 1000
//! ```

use heapless::{String, Vec};

use super::types::{ConfigError, DisplayConfig};
use crate::polarity::Wiring;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Parsed fine but the result is not a usable display
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Timer,
}

/// Longest array value accepted once its lines are joined
const MAX_ARRAY_LEN: usize = 192;

/// Parse and validate a display configuration
pub fn parse_config(input: &str) -> Result<DisplayConfig, ParseError> {
    let mut config = DisplayConfig::default();
    let mut section = Section::Root;
    // Array still waiting for its closing bracket
    let mut open_array: Option<(&str, String<MAX_ARRAY_LEN>)> = None;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        if let Some((key, mut array)) = open_array.take() {
            array.push_str(line).map_err(|_| ParseError::TooManyItems)?;
            if line.ends_with(']') {
                apply_value(section, key, &array, &mut config)?;
            } else {
                open_array = Some((key, array));
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidValue)?;
        if value.starts_with('[') && !value.ends_with(']') {
            let mut array = String::new();
            array.push_str(value).map_err(|_| ParseError::TooManyItems)?;
            open_array = Some((key, array));
            continue;
        }
        apply_value(section, key, value, &mut config)?;
    }

    // Unterminated array
    if open_array.is_some() {
        return Err(ParseError::InvalidValue);
    }

    config.validate()?;
    Ok(config)
}

/// Drop a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    match header.trim() {
        "display" => Ok(Section::Display),
        "timer" => Ok(Section::Timer),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DisplayConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Display, "wiring") => {
            config.wiring =
                Wiring::from_name(parse_string(value)?).ok_or(ParseError::InvalidValue)?;
        }
        (Section::Display, "digits") => config.digit_pins = parse_pin_array(value)?,
        (Section::Display, "segments") => config.segment_pins = parse_pin_array(value)?,
        (Section::Display, "dot_blink_ticks") => config.dot_blink_ticks = parse_int(value)?,
        (Section::Timer, "id") => config.timer.timer_id = parse_int(value)?,
        (Section::Timer, "clock_division") => config.timer.clock_division = parse_int(value)?,
        (Section::Timer, "tick_hz") => config.timer.tick_hz = parse_int(value)?,
        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Split `key = value` (comments already stripped)
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value, allowing `_` between digits
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    if !value.contains('_') {
        return value.parse().map_err(|_| ParseError::InvalidValue);
    }

    let mut digits: String<24> = String::new();
    for (i, c) in value.char_indices() {
        if c == '_' {
            let between_digits = value[..i].ends_with(|p: char| p.is_ascii_digit())
                && value[i + 1..].starts_with(|n: char| n.is_ascii_digit());
            if !between_digits {
                return Err(ParseError::InvalidValue);
            }
        } else {
            digits.push(c).map_err(|_| ParseError::InvalidValue)?;
        }
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a pin: `gpio11`, `"gpio11"` or `11`
fn parse_pin(value: &str) -> Result<u8, ParseError> {
    let value = parse_string(value.trim())?;
    parse_int(value.strip_prefix("gpio").unwrap_or(value))
}

/// Parse a single-line array of pins
fn parse_pin_array<const N: usize>(value: &str) -> Result<Vec<u8, N>, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut pins = Vec::new();
    for item in inner.split(',') {
        let item = item.trim();
        // Tolerate a trailing comma
        if item.is_empty() {
            continue;
        }
        pins.push(parse_pin(item)?)
            .map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(pins)
}
