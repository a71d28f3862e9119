use crate::prelude::OffsetError;
use serde::{Deserialize, Serialize};

/// One line of a radio transcript, stamped with a `minutes.seconds` label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    #[serde(rename = "timestamp")]
    pub offset: String,
    pub speaker: String,
    pub text: String,
}

impl TranscriptEntry {
    pub fn new(
        offset: impl Into<String>,
        speaker: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            offset: offset.into(),
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Elapsed seconds encoded by the label, `0` when it cannot be read.
    pub fn offset_seconds(&self) -> u32 {
        parse_offset(&self.offset)
    }
}

/// Reads a leading integer: optional whitespace,
/// an optional sign, then as many digits as are present. Anything after the
/// digits is ignored.
fn leading_int(part: &str) -> Option<i64> {
    let part = part.trim_start();
    let (negative, rest) = match part.as_bytes().first() {
        Some(b'-') => (true, &part[1..]),
        Some(b'+') => (false, &part[1..]),
        _ => (false, part),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Splits a label into its minutes and seconds components.
pub(crate) fn split_offset(label: &str) -> Result<(i64, i64), OffsetError> {
    if label.trim().is_empty() {
        return Err(OffsetError::Missing);
    }
    let mut parts = label.split('.');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(OffsetError::Format(label.to_string()));
    };
    match (leading_int(minutes), leading_int(seconds)) {
        (Some(minutes), Some(seconds)) => Ok((minutes, seconds)),
        _ => Err(OffsetError::NonNumeric(label.to_string())),
    }
}

/// Converts a `minutes.seconds` label into total seconds.
///
/// Seconds of 60 or more are accepted arithmetically (`"2.60"` is 180);
/// range checks belong to [`validate_message`](super::validate_message).
pub fn try_parse_offset(label: &str) -> Result<u32, OffsetError> {
    let (minutes, seconds) = split_offset(label)?;
    let total = minutes
        .checked_mul(60)
        .and_then(|minutes| minutes.checked_add(seconds))
        .ok_or_else(|| OffsetError::NonNumeric(label.to_string()))?;
    u32::try_from(total).map_err(|_| OffsetError::Negative(label.to_string()))
}

/// Like [`try_parse_offset`] but malformed labels read as zero.
pub fn parse_offset(label: &str) -> u32 {
    try_parse_offset(label).unwrap_or(0)
}
