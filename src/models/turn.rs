//! Speech turns and their grouping into speaker turns.
//!
//! A speech turn is one contiguous interval during which a single identified
//! speaker talks. A speaker turn is a maximal run of consecutive speech
//! turns by the same speaker; it exists only as an intermediate grouping
//! during interlocutor estimation and is never persisted.

use serde::{Deserialize, Serialize};

/// Reserved label for unidentified voices. Turns spoken by (or addressed
/// to) this speaker never contribute network edges.
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// One contiguous interval of speech by a single speaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechTurn {
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    /// Speakers this turn addresses. Absent until filled in by manual
    /// annotation or interlocutor estimation; never overwritten once set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interlocutors: Option<Vec<String>>,
}

impl SpeechTurn {
    pub fn new(speaker: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            speaker: speaker.into(),
            start,
            end,
            interlocutors: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A maximal run of consecutive speech turns by the same speaker.
///
/// Invariant: always holds at least one turn, all sharing one speaker.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerTurn {
    turns: Vec<SpeechTurn>,
}

impl SpeakerTurn {
    fn new(first: SpeechTurn) -> Self {
        Self { turns: vec![first] }
    }

    fn push(&mut self, turn: SpeechTurn) {
        self.turns.push(turn);
    }

    pub fn speaker(&self) -> &str {
        &self.turns[0].speaker
    }

    /// Start of the first speech turn in the run.
    pub fn start(&self) -> f64 {
        self.turns[0].start
    }

    /// End of the last speech turn in the run.
    pub fn end(&self) -> f64 {
        self.turns[self.turns.len() - 1].end
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[SpeechTurn] {
        &self.turns
    }

    pub fn turns_mut(&mut self) -> &mut [SpeechTurn] {
        &mut self.turns
    }

    pub fn into_turns(self) -> Vec<SpeechTurn> {
        self.turns
    }
}

/// Merge consecutive same-speaker speech turns into speaker turns.
pub fn group_speaker_turns(turns: Vec<SpeechTurn>) -> Vec<SpeakerTurn> {
    let mut speaker_turns: Vec<SpeakerTurn> = Vec::new();
    for turn in turns {
        let same_speaker = speaker_turns
            .last()
            .is_some_and(|prev| prev.speaker() == turn.speaker);
        if same_speaker {
            if let Some(prev) = speaker_turns.last_mut() {
                prev.push(turn);
            }
        } else {
            speaker_turns.push(SpeakerTurn::new(turn));
        }
    }
    speaker_turns
}

/// Flatten speaker turns back into the original speech turn sequence.
pub fn flatten_speaker_turns(speaker_turns: Vec<SpeakerTurn>) -> Vec<SpeechTurn> {
    speaker_turns
        .into_iter()
        .flat_map(SpeakerTurn::into_turns)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn turn(speaker: &str, start: f64, end: f64) -> SpeechTurn {
        SpeechTurn::new(speaker, start, end)
    }

    #[test]
    fn test_group_merges_consecutive_same_speaker() {
        let turns = vec![
            turn("alice", 0.0, 1.0),
            turn("alice", 1.5, 2.0),
            turn("bob", 2.5, 3.0),
            turn("alice", 3.5, 4.0),
        ];
        let grouped = group_speaker_turns(turns);
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].speaker(), "alice");
        assert_eq!(grouped[0].len(), 2);
        assert_eq!(grouped[1].speaker(), "bob");
        assert_eq!(grouped[2].speaker(), "alice");
    }

    #[test]
    fn test_group_empty_input() {
        assert!(group_speaker_turns(Vec::new()).is_empty());
    }

    #[test]
    fn test_speaker_turn_span() {
        let grouped = group_speaker_turns(vec![turn("a", 1.0, 2.0), turn("a", 3.0, 5.5)]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[0].start(), 1.0);
        assert_eq!(grouped[0].end(), 5.5);
    }

    #[test]
    fn test_flatten_restores_order_and_content() {
        let turns = vec![
            turn("a", 0.0, 1.0),
            turn("a", 1.0, 2.0),
            turn("b", 2.0, 3.0),
            turn("c", 3.0, 4.0),
            turn("b", 4.0, 5.0),
        ];
        let roundtrip = flatten_speaker_turns(group_speaker_turns(turns.clone()));
        assert_eq!(roundtrip, turns);
    }

    #[test]
    fn test_serde_skips_absent_interlocutors() {
        let json = serde_json::to_value(turn("a", 0.0, 1.0)).unwrap();
        assert!(json.get("interlocutors").is_none());

        let mut annotated = turn("a", 0.0, 1.0);
        annotated.interlocutors = Some(vec!["b".to_string()]);
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(json["interlocutors"][0], "b");
    }

    #[test]
    fn test_deserialize_manual_annotation() {
        let parsed: SpeechTurn = serde_json::from_str(
            r#"{"speaker": "alice", "start": 1.0, "end": 2.0, "interlocutors": ["bob"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.interlocutors, Some(vec!["bob".to_string()]));
    }

    // -- Property-based tests --

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_turns() -> impl Strategy<Value = Vec<SpeechTurn>> {
            proptest::collection::vec(
                (
                    prop::sample::select(vec!["alice", "bob", "carol", "unknown"]),
                    0.0f64..3000.0,
                    0.0f64..30.0,
                ),
                0..40,
            )
            .prop_map(|raw| {
                raw.into_iter()
                    .map(|(speaker, start, len)| SpeechTurn::new(speaker, start, start + len))
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn prop_group_flatten_roundtrip(turns in arb_turns()) {
                let roundtrip = flatten_speaker_turns(group_speaker_turns(turns.clone()));
                prop_assert_eq!(roundtrip, turns);
            }

            #[test]
            fn prop_groups_alternate_speakers(turns in arb_turns()) {
                let grouped = group_speaker_turns(turns);
                for pair in grouped.windows(2) {
                    prop_assert_ne!(pair[0].speaker(), pair[1].speaker());
                }
            }
        }
    }
}
