use crate::prelude::{OffsetError, TranscriptError};
use crate::transcript::entry::{split_offset, TranscriptEntry};
use serde_json::Value;

/// Checks a transcript message before it is loaded for playback.
///
/// Unlike offset parsing, this rejects a seconds component outside `0..=59`.
pub fn validate_message(message: &TranscriptEntry) -> Result<(), TranscriptError> {
    if message.offset.is_empty() {
        return Err(TranscriptError::InvalidTimestamp(OffsetError::Missing));
    }
    if message.speaker.is_empty() {
        return Err(TranscriptError::InvalidSpeaker);
    }
    if message.text.is_empty() {
        return Err(TranscriptError::InvalidText);
    }

    let (_, seconds) = split_offset(&message.offset).map_err(TranscriptError::InvalidTimestamp)?;
    if !(0..60).contains(&seconds) {
        return Err(TranscriptError::SecondsOutOfRange(seconds));
    }
    Ok(())
}

/// Validates an untyped JSON message, as read from a transcript file.
pub fn validate_value(value: &Value) -> Result<TranscriptEntry, TranscriptError> {
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    };

    let offset = field("timestamp").ok_or(TranscriptError::InvalidTimestamp(OffsetError::Missing))?;
    let speaker = field("speaker").ok_or(TranscriptError::InvalidSpeaker)?;
    let text = field("text").ok_or(TranscriptError::InvalidText)?;

    let entry = TranscriptEntry::new(offset, speaker, text);
    validate_message(&entry)?;
    Ok(entry)
}
