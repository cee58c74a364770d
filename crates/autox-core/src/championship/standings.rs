use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::championship::{ChampionshipDriver, ClassChampionshipDriver};

/// A flat (PAX/novice/ladies) championship table, ranked by season
/// total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedStandings {
    pub year: u16,
    pub organization: String,
    pub drivers: Vec<ChampionshipDriver>,
}

/// Class championship tables, one ranked list per car class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassStandings {
    pub year: u16,
    pub organization: String,
    pub classes: BTreeMap<String, Vec<ClassChampionshipDriver>>,
}

/// The updated standings for every championship kind that was given a
/// prior-standings export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChampionshipResults {
    pub class: Option<ClassStandings>,
    pub pax: Option<IndexedStandings>,
    pub novice: Option<IndexedStandings>,
    pub ladies: Option<IndexedStandings>,
}

impl ChampionshipResults {
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.pax.is_none() && self.novice.is_none() && self.ladies.is_none()
    }
}
