use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// The four championships scored from one event.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    IntoStaticStr,
)]
pub enum ChampionshipKind {
    /// Scored per car class.
    Class,
    /// Index-adjusted, pooled across classes.
    #[strum(serialize = "PAX")]
    Pax,
    /// Rookies only.
    Novice,
    /// Ladies-flagged or newly-declared drivers.
    Ladies,
}

impl ChampionshipKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for ChampionshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
