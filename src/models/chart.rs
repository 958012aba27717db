use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a name does not belong to one of the closed attribute sets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownAttribute {
    pub kind: &'static str,
    pub value: String,
}

/// Normalize a name for lookup: lowercase, no spaces, dashes or underscores
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn parse_named<T: Copy>(
    kind: &'static str,
    all: &[T],
    names: &[fn(T) -> &'static str],
    value: &str,
) -> Result<T, UnknownAttribute> {
    let wanted = normalize(value);
    all.iter()
        .copied()
        .find(|item| names.iter().any(|name| normalize(name(*item)) == wanted))
        .ok_or_else(|| UnknownAttribute {
            kind,
            value: value.to_string(),
        })
}

macro_rules! display_by_name {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// Nakshatra
// ---------------------------------------------------------------------------

/// The 27 lunar mansions, Ashwini (1) to Revati (27).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

pub const ALL_NAKSHATRAS: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 1-based ordinal (Ashwini=1 .. Revati=27).
    pub const fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1..=27 => Some(ALL_NAKSHATRAS[ordinal as usize - 1]),
            _ => None,
        }
    }
}

impl FromStr for Nakshatra {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("nakshatra", &ALL_NAKSHATRAS, &[Self::name], s)
    }
}

// ---------------------------------------------------------------------------
// Rashi
// ---------------------------------------------------------------------------

/// The 12 moon signs, Mesha (1) to Meena (12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 1-based ordinal (Mesha=1 .. Meena=12).
    pub const fn ordinal(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            1..=12 => Some(ALL_RASHIS[ordinal as usize - 1]),
            _ => None,
        }
    }
}

impl FromStr for Rashi {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("rashi", &ALL_RASHIS, &[Self::name, Self::western_name], s)
    }
}

// ---------------------------------------------------------------------------
// Gana, Varna, Nadi
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gana {
    Deva,
    Manushya,
    Rakshasa,
}

pub const ALL_GANAS: [Gana; 3] = [Gana::Deva, Gana::Manushya, Gana::Rakshasa];

impl Gana {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deva => "Deva",
            Self::Manushya => "Manushya",
            Self::Rakshasa => "Rakshasa",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Gana {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("gana", &ALL_GANAS, &[Self::name], s)
    }
}

/// Varna tiers, declared lowest first so the derived ordering reads
/// Shudra < Vaishya < Kshatriya < Brahmin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Varna {
    Shudra,
    Vaishya,
    Kshatriya,
    Brahmin,
}

pub const ALL_VARNAS: [Varna; 4] = [
    Varna::Brahmin,
    Varna::Kshatriya,
    Varna::Vaishya,
    Varna::Shudra,
];

impl Varna {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Brahmin => "Brahmin",
            Self::Kshatriya => "Kshatriya",
            Self::Vaishya => "Vaishya",
            Self::Shudra => "Shudra",
        }
    }
}

impl FromStr for Varna {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("varna", &ALL_VARNAS, &[Self::name], s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nadi {
    Adi,
    Madhya,
    Antya,
}

pub const ALL_NADIS: [Nadi; 3] = [Nadi::Adi, Nadi::Madhya, Nadi::Antya];

impl Nadi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adi => "Adi",
            Self::Madhya => "Madhya",
            Self::Antya => "Antya",
        }
    }
}

impl FromStr for Nadi {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("nadi", &ALL_NADIS, &[Self::name], s)
    }
}

// ---------------------------------------------------------------------------
// Yoni
// ---------------------------------------------------------------------------

/// The 14 animal symbols. Declaration order is the row order of the yoni
/// matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Yoni {
    Horse,
    Elephant,
    Sheep,
    Serpent,
    Dog,
    Cat,
    Rat,
    Cow,
    Buffalo,
    Tiger,
    Deer,
    Monkey,
    Mongoose,
    Lion,
}

pub const ALL_YONIS: [Yoni; 14] = [
    Yoni::Horse,
    Yoni::Elephant,
    Yoni::Sheep,
    Yoni::Serpent,
    Yoni::Dog,
    Yoni::Cat,
    Yoni::Rat,
    Yoni::Cow,
    Yoni::Buffalo,
    Yoni::Tiger,
    Yoni::Deer,
    Yoni::Monkey,
    Yoni::Mongoose,
    Yoni::Lion,
];

impl Yoni {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Horse => "Horse",
            Self::Elephant => "Elephant",
            Self::Sheep => "Sheep",
            Self::Serpent => "Serpent",
            Self::Dog => "Dog",
            Self::Cat => "Cat",
            Self::Rat => "Rat",
            Self::Cow => "Cow",
            Self::Buffalo => "Buffalo",
            Self::Tiger => "Tiger",
            Self::Deer => "Deer",
            Self::Monkey => "Monkey",
            Self::Mongoose => "Mongoose",
            Self::Lion => "Lion",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Yoni {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("yoni", &ALL_YONIS, &[Self::name], s)
    }
}

// ---------------------------------------------------------------------------
// Vashya group
// ---------------------------------------------------------------------------

/// Vashya (control) groups. The Scorpio group is `Keeta`; some profile
/// stores label it "Vashya", which is accepted as an alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VashyaGroup {
    Chatushpada,
    Manava,
    Jalachara,
    Vanachara,
    #[serde(alias = "Vashya")]
    Keeta,
}

pub const ALL_VASHYA_GROUPS: [VashyaGroup; 5] = [
    VashyaGroup::Chatushpada,
    VashyaGroup::Manava,
    VashyaGroup::Jalachara,
    VashyaGroup::Vanachara,
    VashyaGroup::Keeta,
];

impl VashyaGroup {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Chatushpada => "Chatushpada",
            Self::Manava => "Manava",
            Self::Jalachara => "Jalachara",
            Self::Vanachara => "Vanachara",
            Self::Keeta => "Keeta",
        }
    }

    const fn alias(self) -> &'static str {
        match self {
            Self::Keeta => "Vashya",
            other => other.name(),
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for VashyaGroup {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("vashya group", &ALL_VASHYA_GROUPS, &[Self::name, Self::alias], s)
    }
}

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

/// The nine grahas in traditional order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

pub const ALL_PLANETS: [Planet; 9] = [
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Mercury,
    Planet::Jupiter,
    Planet::Venus,
    Planet::Saturn,
    Planet::Rahu,
    Planet::Ketu,
];

impl Planet {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
            Self::Mercury => "Mercury",
            Self::Jupiter => "Jupiter",
            Self::Venus => "Venus",
            Self::Saturn => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn sanskrit_name(self) -> &'static str {
        match self {
            Self::Sun => "Surya",
            Self::Moon => "Chandra",
            Self::Mars => "Mangal",
            Self::Mercury => "Budh",
            Self::Jupiter => "Guru",
            Self::Venus => "Shukra",
            Self::Saturn => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Planet {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("planet", &ALL_PLANETS, &[Self::name, Self::sanskrit_name], s)
    }
}

display_by_name!(Nakshatra, Rashi, Gana, Varna, Nadi, Yoni, VashyaGroup, Planet);

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Resolved astrological attributes of one person
///
/// Produced by the chart resolver or supplied by a caller that already
/// holds them. Fields are taken as given: they are not cross-checked
/// against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChart {
    pub nakshatra: Nakshatra,
    pub rashi: Rashi,
    pub gana: Gana,
    pub yoni: Yoni,
    pub varna: Varna,
    pub nadi: Nadi,
    pub vashya_group: VashyaGroup,
    pub ruling_planet: Planet,
    pub is_manglik: bool,
}

/// Chart document as stored by the profile store
///
/// Everything is optional and loosely typed; `core::chart::resolve_chart`
/// turns it into a `BirthChart` or reports what is missing or invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    #[serde(default)]
    pub nakshatra: Option<u8>,
    #[serde(default)]
    pub pada: Option<u8>,
    #[serde(default)]
    pub moon_longitude: Option<f64>,
    #[serde(default)]
    pub rashi: Option<u8>,
    #[serde(default)]
    pub gana: Option<String>,
    #[serde(default)]
    pub yoni: Option<String>,
    #[serde(default)]
    pub varna: Option<String>,
    #[serde(default)]
    pub nadi: Option<String>,
    #[serde(default)]
    pub vashya_group: Option<String>,
    #[serde(default)]
    pub ruling_planet: Option<String>,
    #[serde(default)]
    pub is_manglik: Option<bool>,
    #[serde(default)]
    pub mars_house: Option<u8>,
}

impl From<&BirthChart> for ChartRecord {
    fn from(chart: &BirthChart) -> Self {
        Self {
            nakshatra: Some(chart.nakshatra.ordinal()),
            pada: None,
            moon_longitude: None,
            rashi: Some(chart.rashi.ordinal()),
            gana: Some(chart.gana.name().to_string()),
            yoni: Some(chart.yoni.name().to_string()),
            varna: Some(chart.varna.name().to_string()),
            nadi: Some(chart.nadi.name().to_string()),
            vashya_group: Some(chart.vashya_group.name().to_string()),
            ruling_planet: Some(chart.ruling_planet.name().to_string()),
            is_manglik: Some(chart.is_manglik),
            mars_house: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_round_trip_through_tables() {
        for (i, n) in ALL_NAKSHATRAS.iter().enumerate() {
            assert_eq!(n.ordinal() as usize, i + 1);
            assert_eq!(Nakshatra::from_ordinal(n.ordinal()), Some(*n));
        }
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.ordinal() as usize, i + 1);
        }
        assert_eq!(Nakshatra::from_ordinal(0), None);
        assert_eq!(Nakshatra::from_ordinal(28), None);
        assert_eq!(Rashi::from_ordinal(13), None);
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_spacing() {
        assert_eq!("purva_phalguni".parse::<Nakshatra>(), Ok(Nakshatra::PurvaPhalguni));
        assert_eq!("Uttara Bhadrapada".parse::<Nakshatra>(), Ok(Nakshatra::UttaraBhadrapada));
        assert_eq!("sagittarius".parse::<Rashi>(), Ok(Rashi::Dhanu));
        assert_eq!("GURU".parse::<Planet>(), Ok(Planet::Jupiter));
        assert_eq!("vashya".parse::<VashyaGroup>(), Ok(VashyaGroup::Keeta));
    }

    #[test]
    fn test_parse_rejects_unknown_names() {
        let err = "Unicorn".parse::<Yoni>().unwrap_err();
        assert_eq!(err.kind, "yoni");
        assert_eq!(err.value, "Unicorn");
        assert!("Pluto".parse::<Planet>().is_err());
    }

    #[test]
    fn test_varna_ordering() {
        assert!(Varna::Brahmin > Varna::Kshatriya);
        assert!(Varna::Kshatriya > Varna::Vaishya);
        assert!(Varna::Vaishya > Varna::Shudra);
    }

    #[test]
    fn test_chart_serializes_camel_case() {
        let chart = BirthChart {
            nakshatra: Nakshatra::Rohini,
            rashi: Rashi::Vrishabha,
            gana: Gana::Manushya,
            yoni: Yoni::Serpent,
            varna: Varna::Vaishya,
            nadi: Nadi::Antya,
            vashya_group: VashyaGroup::Chatushpada,
            ruling_planet: Planet::Venus,
            is_manglik: false,
        };
        let json = serde_json::to_value(chart).unwrap();
        assert_eq!(json["vashyaGroup"], "Chatushpada");
        assert_eq!(json["rulingPlanet"], "Venus");
        assert_eq!(json["isManglik"], false);
    }
}
