//! Console formatting for session state

use colored::Colorize;
use gavel_application::Notice;
use gavel_domain::{
    CaucusState, CommitteeStats, MotionData, TimerState, format_clock,
};

/// Formats session state for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The clock, red once in overtime
    pub fn clock(timer: &TimerState) -> String {
        let text = format_clock(timer);
        if timer.in_overtime() {
            text.red().bold().to_string()
        } else if timer.ticking {
            text.green().to_string()
        } else {
            text
        }
    }

    /// The agenda, one line per pending motion in rank order
    pub fn motions(ranked: &[(String, MotionData)]) -> String {
        if ranked.is_empty() {
            return format!("{}", "No motions on the floor".dimmed());
        }
        let mut out = String::new();
        for (position, (_, motion)) in ranked.iter().enumerate() {
            let mut line = format!("{:>2}. {}", position + 1, motion.kind);
            if motion.kind.has_duration() {
                line.push_str(&format!(
                    " [{} {}]",
                    motion.caucus_duration, motion.caucus_unit
                ));
            }
            if !motion.proposal.is_empty() {
                line.push_str(&format!(" \"{}\"", motion.proposal));
            }
            line.push_str(&format!(" ({})", motion.proposer.as_str().cyan()));
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// The roll summary with derived thresholds
    pub fn stats(stats: &CommitteeStats) -> String {
        format!(
            "Present {} | Voting {} | Quorum {} | Draft {} | Amendment {}",
            stats.present,
            stats.voting,
            stats.quorum,
            stats.draft_resolution_threshold,
            stats.amendment_threshold
        )
    }

    /// Current speaker and queue of one caucus
    pub fn queue(caucus: &CaucusState) -> String {
        let mut out = String::new();
        match &caucus.speaking {
            Some(speaker) => out.push_str(&format!(
                "Speaking: {} ({}) — {}\n",
                speaker.who.as_str().bold(),
                speaker.stance,
                Self::clock(&caucus.speaker_timer)
            )),
            None => out.push_str("Speaking: —\n"),
        }
        for (position, speaker) in caucus.queue.values().enumerate() {
            out.push_str(&format!(
                "{:>2}. {} ({})\n",
                position + 1,
                speaker.who,
                speaker.stance
            ));
        }
        out
    }

    /// Pending failure notices
    pub fn notices(notices: &[Notice]) -> String {
        notices
            .iter()
            .map(|n| format!("{} {}: {}", "!".yellow().bold(), n.header.bold(), n.message))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Degraded-connection indicator shown instead of live state
    pub fn disconnected() -> String {
        "Connecting to session…".yellow().to_string()
    }
}
