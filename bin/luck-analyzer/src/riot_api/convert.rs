use luck_analyzer_evaluation::differential::{FrameSnapshot, TimelineFrame};
use luck_analyzer_evaluation::{MatchRecord, ParticipantRecord};
use riven::models::match_v5::{Match, Participant, Timeline};
use std::collections::HashMap;

fn count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

/// `name#tag` when the match carries a Riot ID, else the legacy summoner name.
fn display_name(game_name: Option<&str>, tag_line: Option<&str>, summoner_name: &str) -> String {
    match (game_name, tag_line) {
        (Some(name), Some(tag)) if !name.is_empty() && !tag.is_empty() => format!("{name}#{tag}"),
        (Some(name), _) if !name.is_empty() => name.to_string(),
        _ => summoner_name.to_string(),
    }
}

fn participant_record(participant: &Participant) -> ParticipantRecord {
    let name = display_name(
        participant.riot_id_game_name.as_deref(),
        participant.riot_id_tagline.as_deref(),
        &participant.summoner_name,
    );
    ParticipantRecord {
        puuid: participant.puuid.clone(),
        name,
        champion: participant.champion_name.clone(),
        team_id: u16::from(participant.team_id),
        team_position: participant.team_position.clone(),
        participant_id: participant.participant_id,
        kills: count(participant.kills),
        deaths: count(participant.deaths),
        assists: count(participant.assists),
        damage_to_champions: count(participant.total_damage_dealt_to_champions) as u64,
        vision_score: count(participant.vision_score),
        minions_killed: count(participant.total_minions_killed),
        neutral_minions_killed: count(participant.neutral_minions_killed),
        gold_earned: count(participant.gold_earned),
        turret_kills: count(participant.turret_kills),
        inhibitor_kills: count(participant.inhibitor_kills),
        baron_kills: count(participant.baron_kills),
        dragon_kills: count(participant.dragon_kills),
        kill_participation: participant
            .challenges
            .as_ref()
            .and_then(|c| c.kill_participation)
            .map(f64::from),
        gold_diff_15: None,
        xp_diff_15: None,
        win: participant.win,
    }
}

/// Reduce a Riot match to the record the scoring engine works on.
pub fn match_record(data: &Match) -> MatchRecord {
    MatchRecord {
        match_id: data.metadata.match_id.clone(),
        game_mode: data.info.game_mode.to_string(),
        duration_secs: data.info.game_duration,
        participants: data.info.participants.iter().map(participant_record).collect(),
    }
}

/// Key `(participant id, total gold, xp)` entries by participant id.
fn frame_snapshots(
    entries: impl IntoIterator<Item = (i32, i32, i32)>,
) -> HashMap<i32, FrameSnapshot> {
    entries
        .into_iter()
        .map(|(id, gold, xp)| (id, FrameSnapshot { gold, xp }))
        .collect()
}

/// Gold and experience per participant for every frame of a timeline.
pub fn timeline_frames(timeline: &Timeline) -> Vec<TimelineFrame> {
    timeline
        .info
        .frames
        .iter()
        .map(|frame| {
            let participants = frame
                .participant_frames
                .as_ref()
                .map(|frames| {
                    frame_snapshots(frames.iter().map(|(id, f)| (*id, f.total_gold, f.xp)))
                })
                .unwrap_or_default();
            TimelineFrame {
                timestamp_ms: i64::from(frame.timestamp),
                participants,
            }
        })
        .collect()
}
