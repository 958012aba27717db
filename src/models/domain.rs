use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Maximum total of the eight kootas
pub const MAX_TOTAL_SCORE: u8 = 36;

/// A koota score, stored in half-point units
///
/// Tara can land on 1.5, every other koota scores whole points. Keeping
/// half-points as an integer makes the sum exact. Whole values serialize as
/// JSON integers (`7`); only a half-point is written as a float (`1.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(u8);

impl Points {
    pub const ZERO: Points = Points(0);

    pub const fn whole(points: u8) -> Self {
        Self(points * 2)
    }

    pub const fn from_half_points(half_points: u8) -> Self {
        Self(half_points)
    }

    pub const fn half_points(self) -> u8 {
        self.0
    }

    /// Whole-point part, rounding half-points down
    pub const fn whole_part(self) -> u8 {
        self.0 / 2
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 2.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl Serialize for Points {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 2 == 0 {
            serializer.serialize_u8(self.0 / 2)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Points {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let half_points = (value * 2.0).round();
        if !(0.0..=f64::from(MAX_TOTAL_SCORE) * 2.0).contains(&half_points) {
            return Err(serde::de::Error::custom(format!("score out of range: {}", value)));
        }
        Ok(Points(half_points as u8))
    }
}

/// The eight kootas, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KootaName {
    Varna,
    Vashya,
    Tara,
    Yoni,
    GrahaMaitri,
    Gana,
    Bhakoot,
    Nadi,
}

pub const KOOTA_ORDER: [KootaName; 8] = [
    KootaName::Varna,
    KootaName::Vashya,
    KootaName::Tara,
    KootaName::Yoni,
    KootaName::GrahaMaitri,
    KootaName::Gana,
    KootaName::Bhakoot,
    KootaName::Nadi,
];

impl KootaName {
    pub const fn max_score(self) -> u8 {
        match self {
            Self::Varna => 1,
            Self::Vashya => 2,
            Self::Tara => 3,
            Self::Yoni => 4,
            Self::GrahaMaitri => 5,
            Self::Gana => 6,
            Self::Bhakoot => 7,
            Self::Nadi => 8,
        }
    }
}

/// Score of one koota with the attributes that drove it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KootaResult {
    pub name: KootaName,
    pub score: Points,
    pub max_score: u8,
    pub rationale: String,
}

impl KootaResult {
    pub fn new(name: KootaName, score: Points, rationale: impl Into<String>) -> Self {
        Self {
            name,
            score,
            max_score: name.max_score(),
            rationale: rationale.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoshaKind {
    Manglik,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,
    Partial,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaWarning {
    #[serde(rename = "type")]
    pub kind: DoshaKind,
    pub present: bool,
    pub severity: Severity,
    pub note: String,
}

/// Recommendation tier derived from the total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    NotRecommended,
    Average,
    Good,
    Excellent,
}

/// Final compatibility report for one chart pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub kootas: Vec<KootaResult>,
    pub total_score: Points,
    pub max_score: u8,
    pub tier: Tier,
    pub dosha_warnings: Vec<DoshaWarning>,
}

impl CompatibilityReport {
    pub fn koota(&self, name: KootaName) -> Option<&KootaResult> {
        self.kootas.iter().find(|k| k.name == name)
    }
}

/// Tunable classical variants of the koota rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct KootaOptions {
    /// Also treat the 2/12 rashi relation as a Bhakoot dosha
    #[serde(default)]
    pub bhakoot_dwirdwadash: bool,
}

/// Which side of the pair the seeker takes when ranking candidates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeekerRole {
    #[default]
    Groom,
    Bride,
}

/// One candidate in a ranked result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub profile_id: String,
    pub report: CompatibilityReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_sum_and_display() {
        let total: Points = [Points::whole(3), Points::from_half_points(3), Points::whole(7)]
            .into_iter()
            .sum();
        assert_eq!(total.half_points(), 23);
        assert_eq!(total.whole_part(), 11);
        assert_eq!(total.to_string(), "11.5");
        assert_eq!(Points::whole(8).to_string(), "8");
    }

    #[test]
    fn test_points_serialize_as_number() {
        assert_eq!(serde_json::to_string(&Points::from_half_points(3)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&Points::whole(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Points::ZERO).unwrap(), "0");
        let parsed: Points = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Points::whole(7));
        let parsed: Points = serde_json::from_str("1.5").unwrap();
        assert_eq!(parsed, Points::from_half_points(3));
        assert!(serde_json::from_str::<Points>("40").is_err());
    }

    #[test]
    fn test_max_scores_total_36() {
        let total: u8 = KOOTA_ORDER.iter().map(|k| k.max_score()).sum();
        assert_eq!(total, MAX_TOTAL_SCORE);
    }

    #[test]
    fn test_dosha_warning_field_names() {
        let warning = DoshaWarning {
            kind: DoshaKind::Manglik,
            present: true,
            severity: Severity::Full,
            note: "note".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["type"], "Manglik");
        assert_eq!(json["severity"], "Full");
    }
}
