//! Record parsing for training and pedometer input
//!
//! Records are comma-separated: `<steps>,<activity>,<duration>` for a
//! training and `<steps>,<duration>` for a pedometer day. Durations use
//! unit-suffixed literals such as `3h00m`, `1h30m`, `45m` or `0.75h`.

use chrono::Duration;

use crate::error::ParseError;
use crate::models::{DayRecord, TrainingInput};

const TRAINING_FIELDS: usize = 3;
const DAY_FIELDS: usize = 2;

/// Nanoseconds per duration unit.
const NANOS_PER_MICROSECOND: u64 = 1_000;
const NANOS_PER_MILLISECOND: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Largest magnitude of a negative duration, `|i64::MIN|` nanoseconds.
const MAX_NEGATIVE_NANOS: u64 = 1 << 63;

/// Parse a `<steps>,<activity>,<duration>` training record.
///
/// The activity label is kept verbatim; resolving it is left to the caller so
/// an unknown label is reported separately from a malformed record.
pub fn parse_training(data: &str) -> Result<TrainingInput, ParseError> {
    let fields = split_fields(data, TRAINING_FIELDS)?;

    let steps = parse_steps(fields[0])?;
    let duration = parse_duration(fields[2])?;

    Ok(TrainingInput {
        steps,
        label: fields[1].to_string(),
        duration,
    })
}

/// Parse a `<steps>,<duration>` pedometer record.
pub fn parse_day_steps(data: &str) -> Result<DayRecord, ParseError> {
    let fields = split_fields(data, DAY_FIELDS)?;

    let steps = parse_steps(fields[0])?;
    let duration = parse_duration(fields[1])?;

    Ok(DayRecord { steps, duration })
}

fn split_fields(data: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = data.split(',').map(str::trim).collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

fn parse_steps(field: &str) -> Result<i64, ParseError> {
    let steps: i64 = field.parse().map_err(|source| ParseError::InvalidSteps {
        value: field.to_string(),
        source,
    })?;

    if steps <= 0 {
        return Err(ParseError::NonPositiveSteps { steps });
    }

    Ok(steps)
}

/// Parse a duration literal.
///
/// A literal is an optional sign followed by one or more `<number><unit>`
/// groups, where the number may carry a fraction and the unit is one of
/// `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` or `h`. A bare `0` is accepted.
///
/// # Errors
/// Returns [`ParseError::InvalidDuration`] for empty input, a missing number
/// or unit, an unknown unit, or a value that does not fit into an `i64` of
/// nanoseconds.
pub fn parse_duration(input: &str) -> Result<Duration, ParseError> {
    let invalid = |reason: String| ParseError::InvalidDuration {
        value: input.to_string(),
        reason,
    };

    let mut rest = input.trim();
    let negative = match rest.chars().next() {
        Some('-') => {
            rest = &rest[1..];
            true
        }
        Some('+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    if rest == "0" {
        return Ok(Duration::zero());
    }
    if rest.is_empty() {
        return Err(invalid("duration is empty".to_string()));
    }

    // Whole units are summed exactly; fractions are summed apart and rounded once
    let mut whole_nanos: u64 = 0;
    let mut fraction_nanos = 0.0_f64;
    let out_of_range = || invalid("duration is out of range".to_string());

    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);
        if number.is_empty() {
            return Err(invalid(format!("expected a number before '{}'", tail)));
        }
        let (int_digits, frac_digits) = number.split_once('.').unwrap_or((number, ""));
        if (int_digits.is_empty() && frac_digits.is_empty()) || frac_digits.contains('.') {
            return Err(invalid(format!("malformed number '{}'", number)));
        }

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);
        if unit.is_empty() {
            return Err(invalid(format!("missing unit after '{}'", number)));
        }
        let scale = unit_nanos(unit).ok_or_else(|| {
            invalid(format!(
                "unknown unit '{}', supported units: ns, us, ms, s, m, h",
                unit
            ))
        })?;

        let whole: u64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| out_of_range())?
        };
        whole_nanos = whole
            .checked_mul(scale)
            .and_then(|nanos| whole_nanos.checked_add(nanos))
            .ok_or_else(out_of_range)?;

        if !frac_digits.is_empty() {
            let fraction: f64 = format!("0.{}", frac_digits)
                .parse()
                .map_err(|_| invalid(format!("malformed number '{}'", number)))?;
            fraction_nanos += fraction * scale as f64;
        }

        rest = tail;
    }

    let total_nanos = whole_nanos
        .checked_add(fraction_nanos.round() as u64)
        .ok_or_else(out_of_range)?;

    let nanos = if negative {
        if total_nanos > MAX_NEGATIVE_NANOS {
            return Err(out_of_range());
        }
        0_i64.wrapping_sub_unsigned(total_nanos)
    } else {
        i64::try_from(total_nanos).map_err(|_| out_of_range())?
    };
    Ok(Duration::nanoseconds(nanos))
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_MICROSECOND),
        "ms" => Some(NANOS_PER_MILLISECOND),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}
