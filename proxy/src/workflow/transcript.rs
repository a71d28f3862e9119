use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;
use trackcore::transcript::{tower_transcript, validate_value, TranscriptEntry};

/// Reads a JSON array of `{timestamp, speaker, text}` messages, validating each.
pub fn load_transcript<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<TranscriptEntry>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading transcript {}", path_ref.display()))?;
    let values: Vec<Value> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing transcript {}", path_ref.display()))?;

    let entries = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            validate_value(value)
                .with_context(|| format!("transcript entry {} in {}", idx, path_ref.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if entries
        .windows(2)
        .any(|pair| pair[0].offset_seconds() > pair[1].offset_seconds())
    {
        anyhow::bail!(
            "transcript {} is not sorted by timestamp",
            path_ref.display()
        );
    }
    Ok(entries)
}

/// The configured transcript, or the built-in one when none is set.
pub fn resolve_transcript(path: Option<&Path>) -> anyhow::Result<Vec<TranscriptEntry>> {
    match path {
        Some(path) => load_transcript(path),
        None => Ok(tower_transcript()),
    }
}
