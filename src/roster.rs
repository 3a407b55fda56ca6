use std::collections::BTreeSet;

const NBA_TEAMS: [&str; 30] = [
    "ATL", "BOS", "BKN", "CHA", "CHI", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHX", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];

/// The set of team abbreviations allowed through the pipeline. Anything else
/// the provider emits (exhibition opponents, historical codes) is noise.
#[derive(Debug, Clone)]
pub struct TeamRoster {
    teams: BTreeSet<&'static str>,
}

impl TeamRoster {
    pub fn nba() -> Self {
        TeamRoster {
            teams: NBA_TEAMS.iter().copied().collect(),
        }
    }

    pub fn contains(&self, abbreviation: &str) -> bool {
        self.teams.contains(abbreviation)
    }

    /// Abbreviations in alphabetical order.
    pub fn teams(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.teams.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }
}
