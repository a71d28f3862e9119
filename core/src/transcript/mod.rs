//! Radio transcript playback: offset labels, cursor-based emission and
//! message validation.

pub mod entry;
pub mod fixture;
pub mod playback;
pub mod validate;

pub use entry::{parse_offset, try_parse_offset, TranscriptEntry};
pub use fixture::tower_transcript;
pub use playback::{
    filter_by_time_range, messages_up_to, next_message, progress, should_show, time_until_next,
    Playback, TranscriptCursor,
};
pub use validate::{validate_message, validate_value};
