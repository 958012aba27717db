use crate::core::tables::{
    maitri_class, vashya_relation, yoni_relation, BHAKOOT_DOSHA_DISTANCES,
    BHAKOOT_DWIRDWADASH_DISTANCES, GANA_MATRIX, TARA_ALLOWED_HALF_POINTS, TARA_TABLE,
};
use crate::models::{BirthChart, Gana, KootaName, KootaOptions, KootaResult, Points};

/// A koota rule: `a` is conventionally the groom, `b` the bride
pub type KootaRule = fn(&BirthChart, &BirthChart, &KootaOptions) -> KootaResult;

/// The eight rules in report order
pub const KOOTA_RULES: [(KootaName, KootaRule); 8] = [
    (KootaName::Varna, varna_koota),
    (KootaName::Vashya, vashya_koota),
    (KootaName::Tara, tara_koota),
    (KootaName::Yoni, yoni_koota),
    (KootaName::GrahaMaitri, graha_maitri_koota),
    (KootaName::Gana, gana_koota),
    (KootaName::Bhakoot, bhakoot_koota),
    (KootaName::Nadi, nadi_koota),
];

/// Varna (1): the bride's varna must not exceed the groom's
pub fn varna_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let (score, verdict) = if a.varna >= b.varna {
        (1, "groom's varna is not below bride's")
    } else {
        (0, "bride's varna exceeds groom's")
    };

    KootaResult::new(
        KootaName::Varna,
        Points::whole(score),
        format!("groom {} / bride {}: {}", a.varna, b.varna, verdict),
    )
}

pub fn vashya_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let relation = vashya_relation(a.vashya_group, b.vashya_group);

    KootaResult::new(
        KootaName::Vashya,
        Points::whole(relation.points()),
        format!("{} / {}: {}", a.vashya_group, b.vashya_group, relation.label()),
    )
}

/// 1-based count from one ordinal to another on a circle of `modulus`
fn circular_distance(from: u8, to: u8, modulus: u8) -> u8 {
    let diff = (to as i16 - from as i16).rem_euclid(modulus as i16);
    diff as u8 + 1
}

/// Snap a half-point value to the nearest allowed Tara value; ties go down
fn snap_tara(half_points: u8) -> u8 {
    TARA_ALLOWED_HALF_POINTS
        .iter()
        .copied()
        .min_by_key(|allowed| (allowed.abs_diff(half_points), *allowed))
        .unwrap_or(0)
}

/// Tara (3): counted both ways between the birth nakshatras, then averaged
pub fn tara_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let forward = circular_distance(a.nakshatra.ordinal(), b.nakshatra.ordinal(), 27);
    let backward = circular_distance(b.nakshatra.ordinal(), a.nakshatra.ordinal(), 27);

    let tara_ab = TARA_TABLE[(forward % 9) as usize];
    let tara_ba = TARA_TABLE[(backward % 9) as usize];

    let average = (tara_ab.half_points() + tara_ba.half_points()) / 2;
    let score = snap_tara(average);

    KootaResult::new(
        KootaName::Tara,
        Points::from_half_points(score),
        format!(
            "{} -> {}: count {} ({}); {} -> {}: count {} ({})",
            a.nakshatra, b.nakshatra, forward, tara_ab.name(),
            b.nakshatra, a.nakshatra, backward, tara_ba.name(),
        ),
    )
}

pub fn yoni_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let relation = yoni_relation(a.yoni, b.yoni);

    KootaResult::new(
        KootaName::Yoni,
        Points::whole(relation.points()),
        format!("{} / {}: {}", a.yoni, b.yoni, relation.label()),
    )
}

pub fn graha_maitri_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let class = maitri_class(a.ruling_planet, b.ruling_planet);

    KootaResult::new(
        KootaName::GrahaMaitri,
        Points::whole(class.points()),
        format!("{} / {}: {}", a.ruling_planet, b.ruling_planet, class.label()),
    )
}

/// Gana (6): symmetric base table, plus the groom-Rakshasa / bride-Deva
/// exception which only applies in that direction
pub fn gana_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let (score, verdict) = if a.gana == Gana::Rakshasa && b.gana == Gana::Deva {
        (1, "groom Rakshasa with bride Deva exception")
    } else {
        let base = GANA_MATRIX[a.gana.index()][b.gana.index()];
        let verdict = match base {
            6 => "same gana",
            0 => "incompatible ganas",
            _ => "compatible ganas",
        };
        (base, verdict)
    };

    KootaResult::new(
        KootaName::Gana,
        Points::whole(score),
        format!("groom {} / bride {}: {}", a.gana, b.gana, verdict),
    )
}

pub fn bhakoot_koota(a: &BirthChart, b: &BirthChart, options: &KootaOptions) -> KootaResult {
    let distance = circular_distance(a.rashi.ordinal(), b.rashi.ordinal(), 12);

    let dwirdwadash: &[(u8, &str)] = if options.bhakoot_dwirdwadash {
        &BHAKOOT_DWIRDWADASH_DISTANCES
    } else {
        &[]
    };
    let dosha = BHAKOOT_DOSHA_DISTANCES
        .iter()
        .chain(dwirdwadash)
        .find(|(d, _)| *d == distance)
        .map(|(_, name)| *name);

    let (score, verdict) = match dosha {
        Some(name) => (0, format!("{} dosha", name)),
        None => (7, "no dosha".to_string()),
    };

    KootaResult::new(
        KootaName::Bhakoot,
        Points::whole(score),
        format!("{} -> {}: distance {}, {}", a.rashi, b.rashi, distance, verdict),
    )
}

pub fn nadi_koota(a: &BirthChart, b: &BirthChart, _options: &KootaOptions) -> KootaResult {
    let (score, verdict) = if a.nadi == b.nadi {
        (0, "same nadi (nadi dosha)")
    } else {
        (8, "different nadis")
    };

    KootaResult::new(
        KootaName::Nadi,
        Points::whole(score),
        format!("{} / {}: {}", a.nadi, b.nadi, verdict),
    )
}
