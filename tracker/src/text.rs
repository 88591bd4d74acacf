//! Notification text builders.

use urlencoding::encode;

use riftwatch_shared::{
    format::join_names,
    live_match::ResultParticipant,
    ranking::RankingSnapshot,
    Player, Region,
};

/// Start-of-match announcement: singular when one tracked player is in the
/// match, plural with a joined name list otherwise. The viewer link is
/// keyed by the first tracked participant's profile slug.
pub fn live_match(tracked: &[&Player], game_id: i64) -> String {
    let names: Vec<String> = tracked.iter().map(|p| p.display_name.clone()).collect();
    let (verb, adverb) = if tracked.len() > 1 {
        ("are", "together")
    } else {
        ("is", "alone")
    };

    format!(
        "{} {} playing {}!\n\nWatch the matchup: https://lolpros.gg/live/{}#{}",
        join_names(&names),
        verb,
        adverb,
        encode(&tracked[0].profile_slug),
        game_id
    )
}

/// End-of-match outcome block posted as a threaded reply: win/loss banner,
/// one K/D/A line per tracked participant, analysis link.
pub fn match_result(
    tracked: &[(&Player, &ResultParticipant)],
    game_id: i64,
    region: Region,
) -> String {
    let banner = if tracked[0].1.win {
        "✅ VICTORY"
    } else {
        "❌ DEFEAT"
    };

    let mut lines = vec![banner.to_string(), String::new()];
    lines.extend(tracked.iter().map(|(player, stats)| {
        format!(
            "{} ({}) - {}/{}/{}",
            player.display_name, player.game_name, stats.kills, stats.deaths, stats.assists
        )
    }));
    lines.push(String::new());
    lines.push(format!(
        "Match analysis: https://www.leagueofgraphs.com/match/{}/{}",
        region.to_analysis_slug(),
        game_id
    ));

    lines.join("\n")
}

/// Rank-change announcement. Neighbors are read from the fresh snapshot;
/// a missing neighbor (edge of the table) just shortens the message.
pub fn rank_change(
    player: &Player,
    new_position: u32,
    old_position: Option<u32>,
    snapshot: &RankingSnapshot,
) -> String {
    let above = snapshot
        .entry_at(new_position.saturating_sub(1))
        .map(|e| e.display_name.clone());
    let below = snapshot
        .entry_at(new_position + 1)
        .map(|e| e.display_name.clone());

    let mut text = match old_position {
        None => format!(
            "📊 {} entered the bootcamp ranking at #{}",
            player.display_name, new_position
        ),
        Some(old) if new_position < old => {
            let mut s = format!(
                "📈 {} moved up to #{} in the bootcamp ranking",
                player.display_name, new_position
            );
            if let Some(passed) = &below {
                s.push_str(&format!(", passing {}", passed));
            }
            s
        }
        Some(_) => {
            let mut s = format!(
                "📉 {} moved down to #{} in the bootcamp ranking",
                player.display_name, new_position
            );
            if let Some(passed_by) = &above {
                s.push_str(&format!(", passed by {}", passed_by));
            }
            s
        }
    };

    match (old_position, &above) {
        // Upward moves chase the entry right above the new position.
        (Some(old), Some(above)) if new_position < old => {
            text.push_str(&format!(", right behind {}", above));
        }
        _ => {}
    }

    text.push('!');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftwatch_shared::ranking::RankingEntry;

    fn player(name: &str, slug: &str) -> Player {
        Player {
            id: 1,
            display_name: name.to_string(),
            game_name: format!("{} ig", name),
            summoner_id: Some("S".to_string()),
            profile_slug: slug.to_string(),
            last_rank_position: None,
        }
    }

    fn snapshot(names: &[&str]) -> RankingSnapshot {
        RankingSnapshot::from_entries(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| RankingEntry {
                    position: i as u32 + 1,
                    display_name: name.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn live_match_singular_form() {
        let alice = player("Alice", "alice lol");
        let text = live_match(&[&alice], 555);

        assert!(text.starts_with("Alice is playing alone!"));
        assert!(text.contains("https://lolpros.gg/live/alice%20lol#555"));
    }

    #[test]
    fn live_match_plural_form_joins_names() {
        let alice = player("Alice", "alice");
        let bob = player("Bob", "bob");
        let carol = player("Carol", "carol");
        let text = live_match(&[&alice, &bob, &carol], 42);

        assert!(text.starts_with("Alice, Bob and Carol are playing together!"));
        // Link keyed by the first tracked participant.
        assert!(text.contains("https://lolpros.gg/live/alice#42"));
    }

    #[test]
    fn match_result_win_banner_and_kda_lines() {
        let alice = player("Alice", "alice ig");
        let stats = ResultParticipant {
            summoner_id: "S".into(),
            win: true,
            kills: 9,
            deaths: 2,
            assists: 14,
        };
        let text = match_result(&[(&alice, &stats)], 555, Region::Euw);

        assert!(text.starts_with("✅ VICTORY\n\n"));
        assert!(text.contains("Alice (alice ig) - 9/2/14"));
        assert!(text.contains("https://www.leagueofgraphs.com/match/euw/555"));
    }

    #[test]
    fn match_result_loss_banner() {
        let alice = player("Alice", "alice");
        let stats = ResultParticipant {
            summoner_id: "S".into(),
            win: false,
            kills: 0,
            deaths: 7,
            assists: 3,
        };
        let text = match_result(&[(&alice, &stats)], 1, Region::Br);

        assert!(text.starts_with("❌ DEFEAT"));
        assert!(text.contains("/match/br/1"));
    }

    #[test]
    fn rank_change_up_names_both_neighbors() {
        let snap = snapshot(&["First", "Alice", "Third"]);
        let text = rank_change(&player("Alice", "a"), 2, Some(5), &snap);

        assert_eq!(
            text,
            "📈 Alice moved up to #2 in the bootcamp ranking, passing Third, right behind First!"
        );
    }

    #[test]
    fn rank_change_up_to_top_degrades_gracefully() {
        let snap = snapshot(&["Alice", "Second"]);
        let text = rank_change(&player("Alice", "a"), 1, Some(2), &snap);

        assert_eq!(
            text,
            "📈 Alice moved up to #1 in the bootcamp ranking, passing Second!"
        );
    }

    #[test]
    fn rank_change_down_names_who_passed() {
        let snap = snapshot(&["First", "Second", "Alice"]);
        let text = rank_change(&player("Alice", "a"), 3, Some(2), &snap);

        assert_eq!(
            text,
            "📉 Alice moved down to #3 in the bootcamp ranking, passed by Second!"
        );
    }

    #[test]
    fn rank_change_at_table_bottom_degrades_gracefully() {
        let snap = snapshot(&["First", "Alice"]);
        let text = rank_change(&player("Alice", "a"), 2, Some(1), &snap);

        assert_eq!(
            text,
            "📉 Alice moved down to #2 in the bootcamp ranking, passed by First!"
        );
    }

    #[test]
    fn rank_change_first_observation() {
        let snap = snapshot(&["First", "Alice", "Third"]);
        let text = rank_change(&player("Alice", "a"), 2, None, &snap);

        assert_eq!(text, "📊 Alice entered the bootcamp ranking at #2!");
    }
}
