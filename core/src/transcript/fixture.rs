use crate::transcript::entry::TranscriptEntry;

/// Approach-control exchange used when no transcript file is configured.
pub fn tower_transcript() -> Vec<TranscriptEntry> {
    const LINES: &[(&str, &str, &str)] = &[
        ("0.01", "ATC", "Direct SABSA 19L QNH 1003 BKP146."),
        ("0.05", "ATC", "BKP146, high speed approved."),
        ("0.08", "Pilot", "Roger BKP146."),
        ("0.16", "ATC", "Descend 14000 feet BKP146."),
        ("0.19", "ATC", "BKP146 descend 11000 feet QNH 1003."),
        ("0.23", "Pilot", "Descend 11000 1003 BKP146."),
        ("0.49", "ATC", "AIQ647 confirm descend 3000 feet."),
        ("0.52", "ATC", "AIQ647 descend 2600 feet cleared ILS-Z runway 21R."),
        ("0.57", "Pilot", "Descend 2600 feet cleared ILS-Z 21R AIQ647."),
        ("1.02", "Pilot", "AIQ3119, established runway 21R."),
        ("1.06", "ATC", "AIQ3119, can you reduce minimum approach speed?"),
        ("1.12", "ATC", "Say your minimum."),
        ("1.17", "Pilot", "Minimum 141 knots, AIQ3119."),
        ("1.19", "ATC", "Roger."),
        ("1.21", "ATC", "AIQ3119, contact tower 118.1."),
        ("1.24", "Pilot", "118.1 AIQ3119."),
        ("1.30", "ATC", "AIQ647, reduce speed 140, cleared ILS-Z runway 21R, report established."),
        ("1.36", "Pilot", "Speed 140 runway 21R, report established, AIQ647."),
        ("1.42", "ATC", "NOK305 reduce speed 160."),
        ("1.46", "Pilot", "Reduce speed 160 knots, NOK305."),
        ("1.55", "Pilot", "NOK537 SABAI3A."),
        ("1.57", "ATC", "NOK537, radar contact, descend FL140 direct NOD."),
    ];

    LINES
        .iter()
        .map(|(offset, speaker, text)| TranscriptEntry::new(*offset, *speaker, *text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::validate::validate_message;

    #[test]
    fn fixture_is_valid_and_sorted() {
        let transcript = tower_transcript();
        assert!(transcript.iter().all(|entry| validate_message(entry).is_ok()));
        assert!(transcript
            .windows(2)
            .all(|pair| pair[0].offset_seconds() <= pair[1].offset_seconds()));
        assert_eq!(transcript.last().map(TranscriptEntry::offset_seconds), Some(117));
    }
}
