//! Chart resolution: builds a `BirthChart` from whatever the profile store
//! holds.
//!
//! Gana, yoni and nadi follow from the nakshatra; the rashi follows from the
//! nakshatra quarter (pada); varna, vashya group and ruling planet follow from
//! the rashi. Explicit attributes on a record always win over derived ones.

use std::str::FromStr;
use crate::core::error::ScoringError;
use crate::models::chart::{ALL_NAKSHATRAS, ALL_RASHIS};
use crate::models::{BirthChart, ChartRecord, Gana, Nadi, Nakshatra, Planet, Rashi, UnknownAttribute, Varna, VashyaGroup, Yoni};

/// Span of one nakshatra: 360/27 = 13 deg 20'
pub const NAKSHATRA_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: 3 deg 20'
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN / 4.0;

/// Houses (counted from the lagna) in which Mars makes a chart Manglik
pub const MANGLIK_HOUSES: [u8; 6] = [1, 2, 4, 7, 8, 12];

const GANA_BY_NAKSHATRA: [Gana; 27] = {
    use Gana::*;
    [
        Deva, Manushya, Rakshasa, Manushya, Deva, Manushya, Deva, Deva, Rakshasa,
        Rakshasa, Manushya, Manushya, Deva, Rakshasa, Deva, Rakshasa, Deva, Rakshasa,
        Rakshasa, Manushya, Manushya, Deva, Rakshasa, Rakshasa, Manushya, Manushya, Deva,
    ]
};

const YONI_BY_NAKSHATRA: [Yoni; 27] = {
    use Yoni::*;
    [
        Horse, Elephant, Sheep, Serpent, Serpent, Dog, Cat, Sheep, Cat,
        Rat, Rat, Cow, Buffalo, Tiger, Buffalo, Tiger, Deer, Deer,
        Dog, Monkey, Mongoose, Monkey, Lion, Horse, Lion, Cow, Elephant,
    ]
};

pub fn gana_of(nakshatra: Nakshatra) -> Gana {
    GANA_BY_NAKSHATRA[nakshatra.ordinal() as usize - 1]
}

pub fn yoni_of(nakshatra: Nakshatra) -> Yoni {
    YONI_BY_NAKSHATRA[nakshatra.ordinal() as usize - 1]
}

/// Nadi runs Adi, Madhya, Antya, Antya, Madhya, Adi and repeats every six
/// nakshatras.
pub fn nadi_of(nakshatra: Nakshatra) -> Nadi {
    match (nakshatra.ordinal() - 1) % 6 {
        0 | 5 => Nadi::Adi,
        1 | 4 => Nadi::Madhya,
        _ => Nadi::Antya,
    }
}

pub fn varna_of(rashi: Rashi) -> Varna {
    match rashi {
        Rashi::Karka | Rashi::Vrischika | Rashi::Meena => Varna::Brahmin,
        Rashi::Mesha | Rashi::Simha | Rashi::Dhanu => Varna::Kshatriya,
        Rashi::Vrishabha | Rashi::Kanya | Rashi::Makara => Varna::Vaishya,
        Rashi::Mithuna | Rashi::Tula | Rashi::Kumbha => Varna::Shudra,
    }
}

/// Lord of a rashi, used as the chart's ruling planet
pub fn rashi_lord(rashi: Rashi) -> Planet {
    match rashi {
        Rashi::Mesha | Rashi::Vrischika => Planet::Mars,
        Rashi::Vrishabha | Rashi::Tula => Planet::Venus,
        Rashi::Mithuna | Rashi::Kanya => Planet::Mercury,
        Rashi::Karka => Planet::Moon,
        Rashi::Simha => Planet::Sun,
        Rashi::Dhanu | Rashi::Meena => Planet::Jupiter,
        Rashi::Makara | Rashi::Kumbha => Planet::Saturn,
    }
}

/// 0-based index of a nakshatra quarter on the zodiac (0..108)
fn quarter_of(nakshatra: Nakshatra, pada: u8) -> usize {
    (nakshatra.ordinal() as usize - 1) * 4 + pada as usize - 1
}

fn rashi_of_quarter(quarter: usize) -> Rashi {
    ALL_RASHIS[quarter / 9]
}

/// Rashi holding the given nakshatra quarter
///
/// Without a pada the rashi is only known when all four quarters of the
/// nakshatra fall in the same sign.
pub fn rashi_of(nakshatra: Nakshatra, pada: Option<u8>) -> Option<Rashi> {
    match pada {
        Some(pada) => Some(rashi_of_quarter(quarter_of(nakshatra, pada))),
        None => {
            let first = rashi_of_quarter(quarter_of(nakshatra, 1));
            let last = rashi_of_quarter(quarter_of(nakshatra, 4));
            (first == last).then_some(first)
        }
    }
}

/// Vashya group of a rashi
///
/// Dhanu and Makara change group at 15 deg; a pada counts towards the half in
/// which it starts. For those two signs the quarter must be known and lie
/// inside the sign.
pub fn vashya_of(rashi: Rashi, quarter: Option<usize>) -> Option<VashyaGroup> {
    let first_half = || {
        quarter
            .filter(|q| rashi_of_quarter(*q) == rashi)
            .map(|q| q % 9 <= 4)
    };

    match rashi {
        Rashi::Mesha | Rashi::Vrishabha => Some(VashyaGroup::Chatushpada),
        Rashi::Mithuna | Rashi::Kanya | Rashi::Tula | Rashi::Kumbha => Some(VashyaGroup::Manava),
        Rashi::Karka | Rashi::Meena => Some(VashyaGroup::Jalachara),
        Rashi::Simha => Some(VashyaGroup::Vanachara),
        Rashi::Vrischika => Some(VashyaGroup::Keeta),
        Rashi::Dhanu => first_half().map(|first| {
            if first { VashyaGroup::Manava } else { VashyaGroup::Chatushpada }
        }),
        Rashi::Makara => first_half().map(|first| {
            if first { VashyaGroup::Chatushpada } else { VashyaGroup::Jalachara }
        }),
    }
}

pub fn is_manglik_house(house: u8) -> bool {
    MANGLIK_HOUSES.contains(&house)
}

/// Nakshatra and pada (1-4) of a sidereal Moon longitude in degrees
pub fn nakshatra_pada_from_longitude(longitude_deg: f64) -> Result<(Nakshatra, u8), ScoringError> {
    if !longitude_deg.is_finite() {
        return Err(ScoringError::invalid("moonLongitude", longitude_deg));
    }

    let lon = longitude_deg.rem_euclid(360.0);
    let index = ((lon / NAKSHATRA_SPAN).floor() as usize).min(26);
    let within = lon - index as f64 * NAKSHATRA_SPAN;
    let pada = ((within / PADA_SPAN).floor() as u8).min(3) + 1;

    Ok((ALL_NAKSHATRAS[index], pada))
}

impl BirthChart {
    /// Derive every attribute from the Moon's nakshatra and pada
    pub fn derive(nakshatra: Nakshatra, pada: u8, is_manglik: bool) -> Result<Self, ScoringError> {
        if !(1..=4).contains(&pada) {
            return Err(ScoringError::invalid("pada", pada));
        }

        let quarter = quarter_of(nakshatra, pada);
        let rashi = rashi_of_quarter(quarter);
        let vashya_group = vashya_of(rashi, Some(quarter))
            .ok_or_else(|| ScoringError::MissingChartData("vashyaGroup".to_string()))?;

        Ok(Self {
            nakshatra,
            rashi,
            gana: gana_of(nakshatra),
            yoni: yoni_of(nakshatra),
            varna: varna_of(rashi),
            nadi: nadi_of(nakshatra),
            vashya_group,
            ruling_planet: rashi_lord(rashi),
            is_manglik,
        })
    }
}

fn missing(field: &str) -> ScoringError {
    ScoringError::MissingChartData(field.to_string())
}

fn explicit<T>(value: Option<&str>) -> Result<Option<T>, ScoringError>
where
    T: FromStr<Err = UnknownAttribute>,
{
    value.map(str::parse::<T>).transpose().map_err(Into::into)
}

/// Turn a stored chart record into a validated `BirthChart`
pub fn resolve_chart(record: &ChartRecord) -> Result<BirthChart, ScoringError> {
    let from_longitude = record
        .moon_longitude
        .map(nakshatra_pada_from_longitude)
        .transpose()?;

    let nakshatra = match record.nakshatra {
        Some(ordinal) => Nakshatra::from_ordinal(ordinal)
            .ok_or_else(|| ScoringError::invalid("nakshatra", ordinal))?,
        None => from_longitude.map(|(n, _)| n).ok_or_else(|| missing("nakshatra"))?,
    };

    let pada = match record.pada {
        Some(pada @ 1..=4) => Some(pada),
        Some(pada) => return Err(ScoringError::invalid("pada", pada)),
        None => from_longitude
            .filter(|(n, _)| *n == nakshatra)
            .map(|(_, pada)| pada),
    };
    let quarter = pada.map(|p| quarter_of(nakshatra, p));

    let rashi = match record.rashi {
        Some(ordinal) => Rashi::from_ordinal(ordinal)
            .ok_or_else(|| ScoringError::invalid("rashi", ordinal))?,
        None => rashi_of(nakshatra, pada).ok_or_else(|| missing("rashi"))?,
    };

    let vashya_group = match explicit(record.vashya_group.as_deref())? {
        Some(group) => group,
        None => vashya_of(rashi, quarter).ok_or_else(|| missing("vashyaGroup"))?,
    };

    let is_manglik = match (record.is_manglik, record.mars_house) {
        (Some(flag), _) => flag,
        (None, Some(house @ 1..=12)) => is_manglik_house(house),
        (None, Some(house)) => return Err(ScoringError::invalid("marsHouse", house)),
        (None, None) => return Err(missing("isManglik")),
    };

    Ok(BirthChart {
        nakshatra,
        rashi,
        gana: explicit(record.gana.as_deref())?.unwrap_or_else(|| gana_of(nakshatra)),
        yoni: explicit(record.yoni.as_deref())?.unwrap_or_else(|| yoni_of(nakshatra)),
        varna: explicit(record.varna.as_deref())?.unwrap_or_else(|| varna_of(rashi)),
        nadi: explicit(record.nadi.as_deref())?.unwrap_or_else(|| nadi_of(nakshatra)),
        vashya_group,
        ruling_planet: explicit(record.ruling_planet.as_deref())?
            .unwrap_or_else(|| rashi_lord(rashi)),
        is_manglik,
    })
}
