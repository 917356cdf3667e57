//! Presentation — card view models for the chat client. No markup here; the
//! client decides how to draw a card, this module decides what goes on it.

use serde::Serialize;

use crate::models::lead::EnrichedLead;

const UNKNOWN: &str = "Unknown";

/// Color-coded bucket for a 1-10 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            8..=u8::MAX => ScoreBand::Strong,
            6..=7 => ScoreBand::Moderate,
            _ => ScoreBand::Weak,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Strong => "#28a745",
            ScoreBand::Moderate => "#ffc107",
            ScoreBand::Weak => "#dc3545",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadCard {
    pub index: usize,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub summary: String,
    pub score: u8,
    pub outreach: String,
    pub band: ScoreBand,
    pub color: &'static str,
}

pub fn build_cards(leads: &[EnrichedLead]) -> Vec<LeadCard> {
    leads
        .iter()
        .enumerate()
        .map(|(i, lead)| {
            let raw = lead.lead();
            let band = ScoreBand::for_score(lead.score());
            LeadCard {
                index: i + 1,
                title: raw.title().unwrap_or(UNKNOWN).to_string(),
                company: raw.company().unwrap_or(UNKNOWN).to_string(),
                location: raw.location().unwrap_or(UNKNOWN).to_string(),
                profile_url: raw.profile_url().map(str::to_string),
                summary: lead.summary().to_string(),
                score: lead.score(),
                outreach: lead.outreach().to_string(),
                band,
                color: band.color(),
            }
        })
        .collect()
}
