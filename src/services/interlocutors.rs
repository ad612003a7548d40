//! Rule-based interlocutor estimation from speaker alternation.
//!
//! Within a scene, the addressee of a speech turn is inferred from the
//! identity of the surrounding speaker turns and the silence gaps between
//! them. Gaps are compared against a silence threshold and may be negative
//! when turns overlap. Manual annotations are always preserved: every
//! assignment path only fills in turns whose interlocutor set is absent.

use tracing::debug;

use crate::models::turn::{
    flatten_speaker_turns, group_speaker_turns, SpeakerTurn, SpeechTurn,
};

/// Fill in `interlocutors` on every turn of the run that lacks them.
fn set_interlocutors(speaker_turn: &mut SpeakerTurn, interlocutors: &[String]) {
    for turn in speaker_turn.turns_mut() {
        if turn.interlocutors.is_none() {
            turn.interlocutors = Some(interlocutors.to_vec());
        }
    }
}

/// True when the runs before and after position `i` share one speaker.
fn same_surrounding_speaker(i: usize, speaker_turns: &[SpeakerTurn]) -> bool {
    speaker_turns[i - 1].speaker() == speaker_turns[i + 1].speaker()
}

/// Estimate interlocutors for every scene of an episode.
pub fn estimate_interlocutors(
    scene_turns: Vec<Vec<SpeechTurn>>,
    silence_threshold: f64,
) -> Vec<Vec<SpeechTurn>> {
    scene_turns
        .into_iter()
        .map(|turns| estimate_scene(turns, silence_threshold))
        .collect()
}

/// Annotate one scene's speech turns with estimated interlocutors.
///
/// Returns new turns in the original order and count. Turns that already
/// carry interlocutors keep them. A scene with a single speaker turn gets
/// the empty set: there is no one to address.
pub fn estimate_scene(turns: Vec<SpeechTurn>, silence_threshold: f64) -> Vec<SpeechTurn> {
    let mut speaker_turns = group_speaker_turns(turns);
    let n = speaker_turns.len();

    if n <= 1 {
        if let Some(only) = speaker_turns.first_mut() {
            set_interlocutors(only, &[]);
        }
        return flatten_speaker_turns(speaker_turns);
    }

    for i in 0..n {
        let curr_start = speaker_turns[i].start();
        let curr_end = speaker_turns[i].end();

        if i == 0 {
            // Opening run: addresses the next speaker if it follows soon enough.
            let next_speaker = speaker_turns[i + 1].speaker().to_string();
            let next_start = speaker_turns[i + 1].start();
            let interlocs = if next_start - curr_end <= silence_threshold {
                vec![next_speaker]
            } else {
                Vec::new()
            };
            set_interlocutors(&mut speaker_turns[i], &interlocs);
        } else if i == n - 1 {
            // Closing run: symmetric, towards the previous speaker.
            let prev_speaker = speaker_turns[i - 1].speaker().to_string();
            let prev_end = speaker_turns[i - 1].end();
            let interlocs = if curr_start - prev_end <= silence_threshold {
                vec![prev_speaker]
            } else {
                Vec::new()
            };
            set_interlocutors(&mut speaker_turns[i], &interlocs);
        } else if same_surrounding_speaker(i, &speaker_turns) {
            // Sandwiched by one speaker: either adjacency within the
            // threshold suffices.
            let prev_speaker = speaker_turns[i - 1].speaker().to_string();
            let prev_end = speaker_turns[i - 1].end();
            let next_start = speaker_turns[i + 1].start();
            let interlocs = if curr_start - prev_end <= silence_threshold
                || next_start - curr_end <= silence_threshold
            {
                vec![prev_speaker]
            } else {
                Vec::new()
            };
            set_interlocutors(&mut speaker_turns[i], &interlocs);
        } else {
            // Distinct speakers on each side. Look one level further out:
            // was the current speaker already talking before the previous
            // run, or will they talk again after the next one?
            let prev_speaker = speaker_turns[i - 1].speaker().to_string();
            let prev_end = speaker_turns[i - 1].end();
            let next_speaker = speaker_turns[i + 1].speaker().to_string();
            let next_start = speaker_turns[i + 1].start();

            let spoke_before_prev = i >= 2 && same_surrounding_speaker(i - 1, &speaker_turns);
            let speaks_after_next = i + 2 < n && same_surrounding_speaker(i + 1, &speaker_turns);

            if spoke_before_prev && !speaks_after_next {
                let interlocs = if curr_start - prev_end <= silence_threshold {
                    vec![prev_speaker]
                } else {
                    Vec::new()
                };
                set_interlocutors(&mut speaker_turns[i], &interlocs);
            } else if !spoke_before_prev && speaks_after_next {
                let interlocs = if next_start - curr_end <= silence_threshold {
                    vec![next_speaker]
                } else {
                    Vec::new()
                };
                set_interlocutors(&mut speaker_turns[i], &interlocs);
            } else {
                // Ambiguous on both sides: split the run at the midpoint
                // between the surrounding turns. Turns whose own midpoint
                // falls before the limit address the previous speaker,
                // later ones the next, each still gated by its gap.
                let lim = (prev_end + next_start) / 2.0;
                let prev_within = curr_start - prev_end <= silence_threshold;
                let next_within = next_start - curr_end <= silence_threshold;
                debug!(
                    position = i,
                    lim, "splitting speaker turn between two interlocutors"
                );
                for turn in speaker_turns[i].turns_mut() {
                    if turn.interlocutors.is_some() {
                        continue;
                    }
                    let interlocs = if turn.midpoint() <= lim {
                        if prev_within {
                            vec![prev_speaker.clone()]
                        } else {
                            Vec::new()
                        }
                    } else if next_within {
                        vec![next_speaker.clone()]
                    } else {
                        Vec::new()
                    };
                    turn.interlocutors = Some(interlocs);
                }
            }
        }
    }

    flatten_speaker_turns(speaker_turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const THRESHOLD: f64 = 5.0;

    fn turn(speaker: &str, start: f64, end: f64) -> SpeechTurn {
        SpeechTurn::new(speaker, start, end)
    }

    fn interlocs(turns: &[SpeechTurn]) -> Vec<Vec<String>> {
        turns
            .iter()
            .map(|t| t.interlocutors.clone().expect("interlocutors assigned"))
            .collect()
    }

    #[test]
    fn test_empty_scene_is_noop() {
        assert!(estimate_scene(Vec::new(), THRESHOLD).is_empty());
    }

    #[test]
    fn test_single_speaker_turn_gets_empty_set() {
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 1.0), turn("a", 1.5, 2.0)],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated), vec![Vec::<String>::new(); 2]);
    }

    #[test]
    fn test_two_speakers_address_each_other() {
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 1.0), turn("b", 2.0, 3.0)],
            THRESHOLD,
        );
        assert_eq!(
            interlocs(&estimated),
            vec![vec!["b".to_string()], vec!["a".to_string()]]
        );
    }

    #[test]
    fn test_first_turn_beyond_threshold_gets_empty() {
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 1.0), turn("b", 10.0, 11.0)],
            THRESHOLD,
        );
        assert_eq!(
            interlocs(&estimated),
            vec![Vec::<String>::new(), Vec::<String>::new()]
        );
    }

    #[test]
    fn test_overlapping_turns_negative_gap_within_threshold() {
        // b starts before a ends; the negative gap still passes the test.
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 3.0), turn("b", 2.5, 4.0)],
            THRESHOLD,
        );
        assert_eq!(
            interlocs(&estimated),
            vec![vec!["b".to_string()], vec!["a".to_string()]]
        );
    }

    #[test]
    fn test_sandwich_takes_surrounding_speaker() {
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 1.5, 2.5),
                turn("a", 3.0, 4.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[1], vec!["a".to_string()]);
    }

    #[test]
    fn test_sandwich_either_gap_suffices() {
        // Left gap 6.0 exceeds the threshold, right gap 1.0 does not;
        // OR semantics still assigns the surrounding speaker.
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 7.0, 8.0),
                turn("a", 9.0, 10.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[1], vec!["a".to_string()]);

        // Mirrored: left gap fine, right gap too large.
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 2.0, 3.0),
                turn("a", 20.0, 21.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[1], vec!["a".to_string()]);
    }

    #[test]
    fn test_sandwich_both_gaps_exceed_threshold() {
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 10.0, 11.0),
                turn("a", 20.0, 21.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[1], Vec::<String>::new());
    }

    #[test]
    fn test_prev_occurrence_pulls_backward() {
        // Sequence b, a, b, c: at the "b" in position 2 the surrounding
        // speakers differ (a / c), but b already spoke before a, so the
        // middle b addresses a.
        let estimated = estimate_scene(
            vec![
                turn("b", 0.0, 1.0),
                turn("a", 1.5, 2.5),
                turn("b", 3.0, 4.0),
                turn("c", 4.5, 5.5),
                turn("d", 6.0, 7.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[2], vec!["a".to_string()]);
    }

    #[test]
    fn test_next_occurrence_pulls_forward() {
        // Sequence d, a, b, c, b: the middle b will speak again after c,
        // so it addresses c.
        let estimated = estimate_scene(
            vec![
                turn("d", 0.0, 1.0),
                turn("a", 1.5, 2.5),
                turn("b", 3.0, 4.0),
                turn("c", 4.5, 5.5),
                turn("b", 6.0, 7.0),
            ],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[2], vec!["c".to_string()]);
    }

    #[test]
    fn test_ambiguous_run_splits_at_midpoint() {
        // a, b b b, c with no occurrence hints: the midpoint between a's
        // end (1.0) and c's start (7.0) is 4.0. The first two b turns
        // fall before it, the last one after.
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 1.5, 2.5),
                turn("b", 2.8, 3.8),
                turn("b", 5.0, 6.5),
                turn("c", 7.0, 8.0),
            ],
            THRESHOLD,
        );
        let got = interlocs(&estimated);
        assert_eq!(got[1], vec!["a".to_string()]);
        assert_eq!(got[2], vec!["a".to_string()]);
        assert_eq!(got[3], vec!["c".to_string()]);
    }

    #[test]
    fn test_split_respects_gap_thresholds() {
        // Same shape but the previous speaker is too far away: turns on
        // the near side of the midpoint get the empty set.
        let estimated = estimate_scene(
            vec![
                turn("a", 0.0, 1.0),
                turn("b", 10.0, 11.0),
                turn("b", 20.0, 21.0),
                turn("c", 21.5, 22.5),
                turn("d", 23.0, 24.0),
            ],
            THRESHOLD,
        );
        let got = interlocs(&estimated);
        assert_eq!(got[1], Vec::<String>::new());
        assert_eq!(got[2], vec!["c".to_string()]);
    }

    #[test]
    fn test_manual_annotation_preserved() {
        let mut annotated = turn("b", 2.0, 3.0);
        annotated.interlocutors = Some(vec!["z".to_string()]);
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 1.0), annotated, turn("a", 4.0, 5.0)],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[1], vec!["z".to_string()]);
    }

    #[test]
    fn test_preserves_order_and_count() {
        let turns = vec![
            turn("a", 0.0, 1.0),
            turn("b", 1.2, 2.0),
            turn("b", 2.1, 3.0),
            turn("a", 3.5, 4.0),
            turn("c", 4.2, 5.0),
        ];
        let estimated = estimate_scene(turns.clone(), THRESHOLD);
        assert_eq!(estimated.len(), turns.len());
        for (before, after) in turns.iter().zip(estimated.iter()) {
            assert_eq!(before.speaker, after.speaker);
            assert_eq!(before.start, after.start);
            assert_eq!(before.end, after.end);
        }
    }

    #[test]
    fn test_gap_exactly_at_threshold_counts() {
        let estimated = estimate_scene(
            vec![turn("a", 0.0, 1.0), turn("b", 6.0, 7.0)],
            THRESHOLD,
        );
        assert_eq!(interlocs(&estimated)[0], vec!["b".to_string()]);
    }
}
