use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One football broadcast listed on the schedule page.
///
/// Field names are serialized capitalized, which is the JSON shape existing
/// consumers of `/schedule.json` read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "League")]
    pub league: String,
    #[serde(rename = "Channel")]
    pub channel: String,
    /// Broadcast time exactly as printed on the page. Kept as text so unusual
    /// upstream formats are shown rather than dropped.
    #[serde(rename = "Time")]
    pub time: String,
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "* {} {} ({}, {})",
            self.time, self.name, self.league, self.channel
        )
    }
}

/// Day label (`YYYY-MM-DD - Weekday`) to the matches of that day in page order.
///
/// Labels start with an ISO date, so key order is chronological.
pub type Schedule = BTreeMap<String, Vec<Match>>;

/// Total number of matches across all days
pub fn match_count(schedule: &Schedule) -> usize {
    schedule.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> Match {
        Match {
            name: "Arsenal - Chelsea".to_string(),
            league: "Premier League".to_string(),
            channel: "Viasat Fotboll".to_string(),
            time: "13:30".to_string(),
        }
    }

    #[test]
    fn test_match_display() {
        assert_eq!(
            sample_match().to_string(),
            "* 13:30 Arsenal - Chelsea (Premier League, Viasat Fotboll)"
        );
    }

    #[test]
    fn test_match_serializes_with_capitalized_fields() {
        let json = serde_json::to_value(sample_match()).unwrap();
        assert_eq!(json["Name"], "Arsenal - Chelsea");
        assert_eq!(json["League"], "Premier League");
        assert_eq!(json["Channel"], "Viasat Fotboll");
        assert_eq!(json["Time"], "13:30");
    }

    #[test]
    fn test_schedule_keys_are_chronological() {
        let mut schedule = Schedule::new();
        schedule.insert("2024-01-02 - Tisdag".to_string(), vec![]);
        schedule.insert("2024-01-01 - Måndag".to_string(), vec![sample_match()]);

        let keys: Vec<_> = schedule.keys().cloned().collect();
        assert_eq!(keys, vec!["2024-01-01 - Måndag", "2024-01-02 - Tisdag"]);
        assert_eq!(match_count(&schedule), 1);
    }
}
