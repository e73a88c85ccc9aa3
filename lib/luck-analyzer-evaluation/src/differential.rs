//! Gold and experience leads over the lane opponent at fifteen minutes.

use crate::model::{MatchRecord, ParticipantRecord};
use std::collections::HashMap;

pub const FIFTEEN_MINUTES_MS: i64 = 900_000;

/// Gold and experience of one participant in a timeline frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSnapshot {
    pub gold: i32,
    pub xp: i32,
}

/// A timeline frame reduced to what the differentials need, keyed by
/// participant id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineFrame {
    pub timestamp_ms: i64,
    pub participants: HashMap<i32, FrameSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneDifferential {
    pub gold: i32,
    pub xp: i32,
}

/// First frame at or past the fifteen minute mark.
pub fn frame_at_fifteen(frames: &[TimelineFrame]) -> Option<&TimelineFrame> {
    frames.iter().find(|f| f.timestamp_ms >= FIFTEEN_MINUTES_MS)
}

fn lane_opponent<'a>(
    player: &ParticipantRecord,
    participants: &'a [ParticipantRecord],
) -> Option<&'a ParticipantRecord> {
    if player.team_position.is_empty() {
        return None;
    }
    participants.iter().find(|p| {
        p.team_id != player.team_id
            && p.team_position == player.team_position
            && p.participant_id != player.participant_id
    })
}

/// Differential of every participant against their lane opponent. A
/// participant without an opponent, or missing from the frame on either
/// side, gets zero.
pub fn lane_differentials(
    participants: &[ParticipantRecord],
    frame: &TimelineFrame,
) -> HashMap<i32, LaneDifferential> {
    participants
        .iter()
        .map(|player| {
            let differential = lane_opponent(player, participants)
                .and_then(|opponent| {
                    let own = frame.participants.get(&player.participant_id)?;
                    let theirs = frame.participants.get(&opponent.participant_id)?;
                    Some(LaneDifferential {
                        gold: own.gold - theirs.gold,
                        xp: own.xp - theirs.xp,
                    })
                })
                .unwrap_or_default();
            (player.participant_id, differential)
        })
        .collect()
}

impl MatchRecord {
    /// Fill in the fifteen minute differentials from a timeline. Leaves the
    /// record untouched when the game ended before fifteen minutes.
    pub fn apply_timeline(&mut self, frames: &[TimelineFrame]) {
        let Some(frame) = frame_at_fifteen(frames) else {
            return;
        };
        let differentials = lane_differentials(&self.participants, frame);
        for participant in &mut self.participants {
            let differential = differentials
                .get(&participant.participant_id)
                .copied()
                .unwrap_or_default();
            participant.gold_diff_15 = Some(differential.gold);
            participant.xp_diff_15 = Some(differential.xp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laner(participant_id: i32, team_id: u16, position: &str) -> ParticipantRecord {
        ParticipantRecord {
            participant_id,
            team_id,
            team_position: position.to_string(),
            ..Default::default()
        }
    }

    fn frame(timestamp_ms: i64, values: &[(i32, i32, i32)]) -> TimelineFrame {
        TimelineFrame {
            timestamp_ms,
            participants: values
                .iter()
                .map(|(id, gold, xp)| (*id, FrameSnapshot { gold: *gold, xp: *xp }))
                .collect(),
        }
    }

    #[test]
    fn picks_first_frame_past_fifteen() {
        let frames = [
            frame(0, &[]),
            frame(840_000, &[]),
            frame(900_412, &[]),
            frame(960_000, &[]),
        ];
        assert_eq!(frame_at_fifteen(&frames).map(|f| f.timestamp_ms), Some(900_412));
        assert!(frame_at_fifteen(&frames[..2]).is_none());
    }

    #[test]
    fn diffs_against_same_position_on_other_team() {
        let participants = [
            laner(1, 100, "TOP"),
            laner(2, 100, "MIDDLE"),
            laner(6, 200, "TOP"),
            laner(7, 200, "MIDDLE"),
        ];
        let frame = frame(
            900_000,
            &[(1, 5_200, 6_900), (2, 4_800, 7_100), (6, 4_700, 7_300), (7, 5_300, 7_000)],
        );
        let diffs = lane_differentials(&participants, &frame);

        assert_eq!(diffs[&1], LaneDifferential { gold: 500, xp: -400 });
        assert_eq!(diffs[&6], LaneDifferential { gold: -500, xp: 400 });
        assert_eq!(diffs[&2], LaneDifferential { gold: -500, xp: 100 });
    }

    #[test]
    fn no_opponent_means_zero() {
        let participants = [laner(1, 100, ""), laner(6, 200, ""), laner(2, 100, "JUNGLE")];
        let frame = frame(900_000, &[(1, 5_000, 7_000), (6, 4_000, 6_000), (2, 4_500, 6_500)]);
        let diffs = lane_differentials(&participants, &frame);
        assert!(diffs.values().all(|d| *d == LaneDifferential::default()));
    }

    #[test]
    fn apply_timeline_sets_or_leaves_absent() {
        let mut record = MatchRecord {
            participants: vec![laner(1, 100, "BOTTOM"), laner(6, 200, "BOTTOM")],
            ..Default::default()
        };
        record.apply_timeline(&[frame(600_000, &[(1, 3_000, 4_000), (6, 2_000, 3_500)])]);
        assert!(record.participants.iter().all(|p| p.gold_diff_15.is_none()));

        record.apply_timeline(&[frame(900_000, &[(1, 6_000, 7_000), (6, 5_250, 7_400)])]);
        assert_eq!(record.participants[0].gold_diff_15, Some(750));
        assert_eq!(record.participants[0].xp_diff_15, Some(-400));
        assert_eq!(record.participants[1].gold_diff_15, Some(-750));
    }
}
