use crate::transcript::entry::TranscriptEntry;

/// Messages released by one playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback<'a> {
    pub emitted: &'a [TranscriptEntry],
    pub new_index: usize,
}

/// Emits messages from `previous_index` onward whose offset has been reached.
///
/// Scanning stops at the first message still in the future, so `messages`
/// must be sorted by offset. Persist `new_index` and pass it back on the
/// next tick to avoid rescanning.
pub fn messages_up_to(
    messages: &[TranscriptEntry],
    current_time: f64,
    previous_index: usize,
) -> Playback<'_> {
    let start = previous_index.min(messages.len());
    let released = messages[start..]
        .iter()
        .take_while(|message| should_show(message, current_time))
        .count();

    Playback {
        emitted: &messages[start..start + released],
        new_index: start + released,
    }
}

pub fn should_show(message: &TranscriptEntry, current_time: f64) -> bool {
    current_time >= f64::from(message.offset_seconds())
}

pub fn next_message(messages: &[TranscriptEntry], index: usize) -> Option<&TranscriptEntry> {
    messages.get(index)
}

/// Seconds until the message at `index` is due, never negative.
pub fn time_until_next(
    messages: &[TranscriptEntry],
    current_time: f64,
    index: usize,
) -> Option<f64> {
    next_message(messages, index)
        .map(|message| (f64::from(message.offset_seconds()) - current_time).max(0.0))
}

/// Messages whose offset lies in `[start, end]`, regardless of cursor state.
pub fn filter_by_time_range(
    messages: &[TranscriptEntry],
    start: f64,
    end: f64,
) -> Vec<&TranscriptEntry> {
    messages
        .iter()
        .filter(|message| {
            let offset = f64::from(message.offset_seconds());
            offset >= start && offset <= end
        })
        .collect()
}

/// Percentage of the transcript already shown, clamped to 100.
pub fn progress(current_index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (current_index as f64 / total as f64 * 100.0).min(100.0)
}

/// Read position over a fixed transcript, advanced by a playback clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranscriptCursor {
    index: usize,
}

impl TranscriptCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Releases every message due at `current_time` and moves past them.
    pub fn advance<'a>(
        &mut self,
        messages: &'a [TranscriptEntry],
        current_time: f64,
    ) -> &'a [TranscriptEntry] {
        let step = messages_up_to(messages, current_time, self.index);
        self.index = step.new_index;
        step.emitted
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn is_finished(&self, messages: &[TranscriptEntry]) -> bool {
        self.index >= messages.len()
    }

    pub fn progress(&self, messages: &[TranscriptEntry]) -> f64 {
        progress(self.index, messages.len())
    }

    pub fn time_until_next(&self, messages: &[TranscriptEntry], current_time: f64) -> Option<f64> {
        time_until_next(messages, current_time, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn messages() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry::new("0.05", "A", "hello"),
            TranscriptEntry::new("1.00", "B", "hi"),
            TranscriptEntry::new("2.30", "C", "hey"),
        ]
    }

    fn texts(entries: &[TranscriptEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.text.as_str()).collect()
    }

    #[test]
    fn emits_messages_up_to_current_time() {
        let messages = messages();

        let step = messages_up_to(&messages, 0.0, 0);
        assert!(step.emitted.is_empty());
        assert_eq!(step.new_index, 0);

        let step = messages_up_to(&messages, 5.0, 0);
        assert_eq!(texts(step.emitted), vec!["hello"]);
        assert_eq!(step.new_index, 1);

        let step = messages_up_to(&messages, 60.0, 0);
        assert_eq!(step.emitted.len(), 2);
        assert_eq!(step.new_index, 2);
    }

    #[test]
    fn resumes_from_previous_index() {
        let messages = messages();
        let step = messages_up_to(&messages, 200.0, 1);
        assert_eq!(texts(step.emitted), vec!["hi", "hey"]);
        assert_eq!(step.new_index, 3);

        let step = messages_up_to(&[], 100.0, 0);
        assert!(step.emitted.is_empty());
        assert_eq!(step.new_index, 0);
    }

    #[test]
    fn cursor_past_end_emits_nothing() {
        let messages = messages();
        let step = messages_up_to(&messages, 500.0, 7);
        assert!(step.emitted.is_empty());
        assert_eq!(step.new_index, 3);
    }

    #[test]
    fn visibility_follows_offset() {
        let message = TranscriptEntry::new("1.30", "X", "t");
        assert!(should_show(&message, 90.0));
        assert!(!should_show(&message, 89.0));
    }

    #[test]
    fn next_message_and_wait_time() {
        let messages = messages();
        assert_eq!(next_message(&messages, 0), Some(&messages[0]));
        assert_eq!(next_message(&messages, 2), Some(&messages[2]));
        assert_eq!(next_message(&messages, 3), None);

        assert_eq!(time_until_next(&messages, 66.0, 0), Some(0.0));
        assert_eq!(time_until_next(&messages, 50.0, 1), Some(10.0));
        assert_eq!(time_until_next(&messages, 0.0, 3), None);
    }

    #[test]
    fn time_range_is_inclusive() {
        let messages = messages();
        let in_range: Vec<&str> = filter_by_time_range(&messages, 6.0, 150.0)
            .iter()
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(in_range, vec!["hi", "hey"]);
        assert!(filter_by_time_range(&messages, 151.0, 200.0).is_empty());
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(2, 4), 50.0);
        assert_eq!(progress(0, 0), 0.0);
        assert_eq!(progress(5, 4), 100.0);
    }

    #[test]
    fn cursor_walks_transcript() {
        let messages = messages();
        let mut cursor = TranscriptCursor::new();

        assert_eq!(texts(cursor.advance(&messages, 10.0)), vec!["hello"]);
        assert!(cursor.advance(&messages, 30.0).is_empty());
        assert_eq!(cursor.time_until_next(&messages, 30.0), Some(30.0));
        assert_eq!(texts(cursor.advance(&messages, 150.0)), vec!["hi", "hey"]);
        assert!(cursor.is_finished(&messages));
        assert_eq!(cursor.progress(&messages), 100.0);

        cursor.reset();
        assert_eq!(cursor.index(), 0);
    }

    proptest! {
        #[test]
        fn resumed_playback_matches_single_pass(
            mut offsets in prop::collection::vec(0u32..600, 0..30),
            first in 0.0f64..600.0,
            extra in 0.0f64..600.0,
        ) {
            offsets.sort_unstable();
            let messages: Vec<TranscriptEntry> = offsets
                .iter()
                .map(|secs| {
                    TranscriptEntry::new(format!("{}.{:02}", secs / 60, secs % 60), "ATC", "msg")
                })
                .collect();
            let later = first + extra;

            let head = messages_up_to(&messages, first, 0);
            let tail = messages_up_to(&messages, later, head.new_index);
            let whole = messages_up_to(&messages, later, 0);

            prop_assert_eq!(head.emitted.len() + tail.emitted.len(), whole.emitted.len());
            prop_assert_eq!(tail.new_index, whole.new_index);
        }
    }
}
