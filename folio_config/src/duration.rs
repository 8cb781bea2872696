use std::{ops::Deref, str::FromStr};

use serde::Deserialize;

/// A human readable duration such as `"30s"` or `"1m 30s"`.
///
/// Supported units are `s`, `m`, `h` and `d`; the empty string is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Duration {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .try_fold(0u64, |total, part| {
                let unit_at = part
                    .find(|c: char| !c.is_ascii_digit())
                    .ok_or("Missing duration unit")?;
                let (value, unit) = part.split_at(unit_at);
                let value = value.parse::<u64>().map_err(|_| "Invalid duration value")?;
                let factor = match unit {
                    "s" => 1,
                    "m" => 60,
                    "h" => 60 * 60,
                    "d" => 24 * 60 * 60,
                    _ => return Err("Invalid duration unit"),
                };
                value
                    .checked_mul(factor)
                    .and_then(|secs| total.checked_add(secs))
                    .ok_or("Duration overflow")
            })
            .map(|secs| Self(std::time::Duration::from_secs(secs)))
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration() {
        for (input, expected) in [
            ("30s", Some(30)),
            ("5m", Some(5 * 60)),
            ("2h", Some(2 * 60 * 60)),
            ("1d", Some(24 * 60 * 60)),
            ("", Some(0)),
            ("1m 30s", Some(90)),
            ("1d 1h 1m 1s", Some(((24 + 1) * 60 + 1) * 60 + 1)),
            ("30", None),
            ("s", None),
            ("10ss", None),
            ("10w", None),
            ("-5s", None),
        ] {
            let input = serde_json::Value::String(input.into());
            let output = serde_json::from_value::<Duration>(input)
                .ok()
                .map(|x| x.as_secs());
            assert_eq!(output, expected);
        }
    }
}
