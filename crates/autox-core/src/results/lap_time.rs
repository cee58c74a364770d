use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Seconds added per struck cone.
pub const CONE_PENALTY_SECONDS: f64 = 2.0;

/// Sentinel run outcomes that carry no numeric time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr,
)]
pub enum Penalty {
    #[strum(serialize = "DNF")]
    Dnf,
    #[strum(serialize = "Re-run")]
    Rerun,
    #[strum(serialize = "DSQ")]
    Dsq,
    #[strum(serialize = "DNS")]
    Dns,
}

impl Penalty {
    /// Parse the raw penalty code as it appears in timing exports.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "DNF" => Some(Self::Dnf),
            "RRN" => Some(Self::Rerun),
            "DSQ" => Some(Self::Dsq),
            "DNS" => Some(Self::Dns),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}

/// One timed run, or a derived best-of/combined value.
///
/// Exactly one of {numeric time, penalty} holds: a clean run carries
/// `raw_seconds` and its cone count, a penalized run carries only the
/// penalty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LapTime {
    pub raw_seconds: Option<f64>,
    pub cone_count: u32,
    pub penalty: Option<Penalty>,
}

impl LapTime {
    pub fn clean(raw_seconds: f64, cone_count: u32) -> Self {
        Self {
            raw_seconds: Some(raw_seconds),
            cone_count,
            penalty: None,
        }
    }

    pub fn penalized(penalty: Penalty) -> Self {
        Self {
            raw_seconds: None,
            cone_count: 0,
            penalty: Some(penalty),
        }
    }

    pub fn dns() -> Self {
        Self::penalized(Penalty::Dns)
    }

    pub fn dsq() -> Self {
        Self::penalized(Penalty::Dsq)
    }

    /// Effective time in seconds: raw time plus cone penalties.
    /// `None` for penalized runs.
    pub fn time(&self) -> Option<f64> {
        match self.penalty {
            Some(_) => None,
            None => self
                .raw_seconds
                .map(|raw| raw + CONE_PENALTY_SECONDS * f64::from(self.cone_count)),
        }
    }

    pub fn is_penalized(&self) -> bool {
        self.penalty.is_some()
    }

    /// Two-day total: sums raw times and cone counts of two clean
    /// operands. If either operand is penalized the result is that
    /// operand, left operand taking precedence.
    pub fn combine(&self, other: &LapTime) -> LapTime {
        if self.is_penalized() {
            self.clone()
        } else if other.is_penalized() {
            other.clone()
        } else {
            LapTime::clean(
                self.raw_seconds.unwrap_or_default() + other.raw_seconds.unwrap_or_default(),
                self.cone_count + other.cone_count,
            )
        }
    }
}

impl Ord for LapTime {
    /// Clean times sort ascending; penalized values sort after every
    /// clean time. Penalized values compare equal to each other, so a
    /// stable sort keeps them in input order.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.time(), other.time()) {
            (Some(lhs), Some(rhs)) => lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for LapTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for LapTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LapTime {}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.penalty, self.time()) {
            (Some(penalty), _) => f.write_str(penalty.label()),
            (None, Some(time)) => {
                if self.cone_count != 0 {
                    write!(f, "{:.3} ({})", time, self.cone_count)
                } else {
                    write!(f, "{:.3}", time)
                }
            }
            // Unreachable for values built through the constructors
            (None, None) => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_time_includes_cone_penalties() {
        assert_eq!(LapTime::clean(45.123, 0).time(), Some(45.123));
        assert_eq!(LapTime::clean(46.5, 1).time(), Some(48.5));
        assert_eq!(LapTime::clean(40.0, 3).time(), Some(46.0));
    }

    #[test]
    fn penalized_time_is_absent() {
        for penalty in [Penalty::Dnf, Penalty::Rerun, Penalty::Dsq, Penalty::Dns] {
            let lap = LapTime::penalized(penalty);
            assert_eq!(lap.time(), None);
            assert_eq!(lap.raw_seconds, None);
            assert_eq!(lap.cone_count, 0);
        }
    }

    #[test]
    fn display_formats() {
        assert_eq!(LapTime::clean(52.288, 0).to_string(), "52.288");
        assert_eq!(LapTime::clean(52.288, 1).to_string(), "54.288 (1)");
        assert_eq!(LapTime::penalized(Penalty::Dnf).to_string(), "DNF");
        assert_eq!(LapTime::penalized(Penalty::Rerun).to_string(), "Re-run");
        assert_eq!(LapTime::penalized(Penalty::Dsq).to_string(), "DSQ");
        assert_eq!(LapTime::dns().to_string(), "DNS");
    }

    #[test]
    fn penalty_codes_parse() {
        assert_eq!(Penalty::from_code("DNF"), Some(Penalty::Dnf));
        assert_eq!(Penalty::from_code(" RRN "), Some(Penalty::Rerun));
        assert_eq!(Penalty::from_code("DSQ"), Some(Penalty::Dsq));
        assert_eq!(Penalty::from_code("DNS"), Some(Penalty::Dns));
        assert_eq!(Penalty::from_code(""), None);
        assert_eq!(Penalty::from_code("1"), None);
    }

    #[test]
    fn ordering_is_antisymmetric() {
        let pairs = [
            (LapTime::clean(45.0, 0), LapTime::clean(46.0, 0)),
            (LapTime::clean(45.0, 1), LapTime::clean(46.0, 0)),
            (LapTime::clean(45.0, 0), LapTime::penalized(Penalty::Dnf)),
            (LapTime::dns(), LapTime::clean(45.0, 0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }

    #[test]
    fn penalized_sorts_after_any_clean_time() {
        let mut laps = vec![
            LapTime::clean(50.0, 0),
            LapTime::penalized(Penalty::Dnf),
            LapTime::clean(44.0, 1),
            LapTime::dns(),
            LapTime::clean(45.0, 0),
        ];
        laps.sort();
        assert_eq!(laps[0].time(), Some(45.0));
        assert_eq!(laps[1].time(), Some(46.0));
        assert_eq!(laps[2].time(), Some(50.0));
        // Penalized values keep their input order; this stability is an
        // inherited behavior of the scoring rules, not a rule-book
        // requirement.
        assert_eq!(laps[3].penalty, Some(Penalty::Dnf));
        assert_eq!(laps[4].penalty, Some(Penalty::Dns));
    }

    #[test]
    fn combine_sums_clean_operands() {
        let total = LapTime::clean(45.0, 1).combine(&LapTime::clean(47.5, 2));
        assert_eq!(total.raw_seconds, Some(92.5));
        assert_eq!(total.cone_count, 3);
        assert_eq!(total.time(), Some(98.5));
    }

    #[test]
    fn combine_left_operand_penalty_wins() {
        let dnf = LapTime::penalized(Penalty::Dnf);
        let dsq = LapTime::dsq();
        let clean = LapTime::clean(45.0, 0);

        assert_eq!(dnf.combine(&clean).penalty, Some(Penalty::Dnf));
        assert_eq!(clean.combine(&dsq).penalty, Some(Penalty::Dsq));
        assert_eq!(dnf.combine(&dsq).penalty, Some(Penalty::Dnf));
        assert_eq!(dsq.combine(&dnf).penalty, Some(Penalty::Dsq));
    }

    #[test]
    fn combine_is_commutative_only_for_clean_operands() {
        let a = LapTime::clean(45.0, 1);
        let b = LapTime::clean(47.5, 0);
        assert_eq!(a.combine(&b), b.combine(&a));
    }
}
