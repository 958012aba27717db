//! Static compatibility tables for the koota rules.
//!
//! Symmetric matrices are written as their upper triangle (row by row,
//! diagonal included) and mirrored at compile time, so `m[a][b] == m[b][a]`
//! holds by construction. Directional rules (Varna, the Gana exception) are
//! not tables; they live as explicit branches in `kootas`.

use crate::models::{Planet, VashyaGroup, Yoni};

/// Mirror an upper triangle (row-major, diagonal included) into a full matrix
const fn mirror<const N: usize>(upper: &[u8]) -> [[u8; N]; N] {
    assert!(upper.len() == N * (N + 1) / 2, "upper triangle has the wrong size");

    let mut matrix = [[0; N]; N];
    let mut k = 0;
    let mut i = 0;
    while i < N {
        let mut j = i;
        while j < N {
            matrix[i][j] = upper[k];
            matrix[j][i] = upper[k];
            k += 1;
            j += 1;
        }
        i += 1;
    }
    matrix
}

// ---------------------------------------------------------------------------
// Vashya
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VashyaRelation {
    Same,
    Friendly,
    Unfriendly,
}

impl VashyaRelation {
    pub const fn points(self) -> u8 {
        match self {
            Self::Same => 2,
            Self::Friendly => 1,
            Self::Unfriendly => 0,
        }
    }

    pub const fn from_points(points: u8) -> Self {
        match points {
            2 => Self::Same,
            1 => Self::Friendly,
            _ => Self::Unfriendly,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Same => "same group",
            Self::Friendly => "friendly groups",
            Self::Unfriendly => "unfriendly groups",
        }
    }
}

/// Vashya points. Rows: Chatushpada, Manava, Jalachara, Vanachara, Keeta
pub const VASHYA_MATRIX: [[u8; 5]; 5] = mirror(&[
    2, 1, 1, 0, 1,
    2, 0, 0, 1,
    2, 0, 1,
    2, 0,
    2,
]);

// ---------------------------------------------------------------------------
// Tara
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tara {
    Janma,
    Sampat,
    Vipat,
    Kshema,
    Pratyari,
    Sadhaka,
    Naidhana,
    Mitra,
    ParamaMitra,
}

impl Tara {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Janma => "Janma",
            Self::Sampat => "Sampat",
            Self::Vipat => "Vipat",
            Self::Kshema => "Kshema",
            Self::Pratyari => "Pratyari",
            Self::Sadhaka => "Sadhaka",
            Self::Naidhana => "Naidhana",
            Self::Mitra => "Mitra",
            Self::ParamaMitra => "Parama Mitra",
        }
    }

    /// Score of one direction in half-points (0 or 3 points)
    pub const fn half_points(self) -> u8 {
        match self {
            Self::Vipat | Self::Pratyari | Self::Naidhana => 0,
            _ => 6,
        }
    }
}

/// Indexed by `d mod 9`, where `d` is the 1-based nakshatra count; a
/// remainder of 0 is the ninth tara.
pub const TARA_TABLE: [Tara; 9] = [
    Tara::ParamaMitra,
    Tara::Janma,
    Tara::Sampat,
    Tara::Vipat,
    Tara::Kshema,
    Tara::Pratyari,
    Tara::Sadhaka,
    Tara::Naidhana,
    Tara::Mitra,
];

/// Values a Tara score may take, in half-points (0, 1.5, 3)
pub const TARA_ALLOWED_HALF_POINTS: [u8; 3] = [0, 3, 6];

// ---------------------------------------------------------------------------
// Yoni
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YoniRelation {
    Same,
    Friend,
    Neutral,
    Enemy,
    BitterEnemy,
}

impl YoniRelation {
    pub const fn points(self) -> u8 {
        match self {
            Self::Same => 4,
            Self::Friend => 3,
            Self::Neutral => 2,
            Self::Enemy => 1,
            Self::BitterEnemy => 0,
        }
    }

    pub const fn from_points(points: u8) -> Self {
        match points {
            4 => Self::Same,
            3 => Self::Friend,
            2 => Self::Neutral,
            1 => Self::Enemy,
            _ => Self::BitterEnemy,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Same => "same",
            Self::Friend => "friend",
            Self::Neutral => "neutral",
            Self::Enemy => "enemy",
            Self::BitterEnemy => "bitter enemy",
        }
    }
}

/// Yoni points. Rows follow `Yoni` declaration order: Horse, Elephant,
/// Sheep, Serpent, Dog, Cat, Rat, Cow, Buffalo, Tiger, Deer, Monkey,
/// Mongoose, Lion
pub const YONI_MATRIX: [[u8; 14]; 14] = {
    const S: u8 = YoniRelation::Same.points();
    const F: u8 = YoniRelation::Friend.points();
    const N: u8 = YoniRelation::Neutral.points();
    const E: u8 = YoniRelation::Enemy.points();
    const B: u8 = YoniRelation::BitterEnemy.points();
    mirror(
        &[
            // Horse
            S, N, N, F, N, N, N, E, B, E, F, F, N, E,
            // Elephant
            S, F, F, N, N, N, N, F, E, N, F, N, B,
            // Sheep
            S, N, E, N, E, F, F, E, N, B, F, E,
            // Serpent
            S, N, E, E, E, E, N, N, N, B, N,
            // Dog
            S, N, E, N, N, E, B, N, E, E,
            // Cat
            S, B, N, N, E, F, F, N, E,
            // Rat
            S, N, N, N, N, N, E, N,
            // Cow
            S, F, B, F, N, N, E,
            // Buffalo
            S, E, N, N, N, E,
            // Tiger
            S, E, E, N, E,
            // Deer
            S, N, N, E,
            // Monkey
            S, F, N,
            // Mongoose
            S, N,
            // Lion
            S,
        ],
    )
};

// ---------------------------------------------------------------------------
// Graha Maitri
// ---------------------------------------------------------------------------

/// One planet's natural view of another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaturalRelation {
    Friend,
    Neutral,
    Enemy,
}

/// Natural friendship as seen from `planet` (classical table). Rahu and Ketu
/// are neutral to every planet and every planet is neutral to them.
pub const fn natural_relation(planet: Planet, other: Planet) -> NaturalRelation {
    use NaturalRelation::*;
    use Planet::*;

    match (planet, other) {
        (Rahu | Ketu, _) | (_, Rahu | Ketu) => Neutral,

        (Sun, Moon | Mars | Jupiter) => Friend,
        (Sun, Venus | Saturn) => Enemy,

        (Moon, Sun | Mercury) => Friend,

        (Mars, Sun | Moon | Jupiter) => Friend,
        (Mars, Mercury) => Enemy,

        (Mercury, Sun | Venus) => Friend,
        (Mercury, Moon) => Enemy,

        (Jupiter, Sun | Moon | Mars) => Friend,
        (Jupiter, Mercury | Venus) => Enemy,

        (Venus, Mercury | Saturn) => Friend,
        (Venus, Sun | Moon) => Enemy,

        (Saturn, Mercury | Venus) => Friend,
        (Saturn, Sun | Moon | Mars) => Enemy,

        _ => Neutral,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaitriClass {
    Best,
    Friend,
    Neutral,
    Enemy,
    BitterEnemy,
}

impl MaitriClass {
    pub const fn points(self) -> u8 {
        match self {
            Self::Best => 5,
            Self::Friend => 4,
            Self::Neutral => 3,
            Self::Enemy => 1,
            Self::BitterEnemy => 0,
        }
    }

    pub const fn from_points(points: u8) -> Self {
        match points {
            5 => Self::Best,
            4 => Self::Friend,
            3 => Self::Neutral,
            1 => Self::Enemy,
            _ => Self::BitterEnemy,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Friend => "friend",
            Self::Neutral => "neutral",
            Self::Enemy => "enemy",
            Self::BitterEnemy => "bitter enemy",
        }
    }
}

const fn combine(a: NaturalRelation, b: NaturalRelation) -> MaitriClass {
    use NaturalRelation::*;

    match (a, b) {
        (Friend, Friend) => MaitriClass::Best,
        (Friend, Neutral) | (Neutral, Friend) => MaitriClass::Friend,
        (Neutral, Neutral) => MaitriClass::Neutral,
        (Enemy, Enemy) => MaitriClass::BitterEnemy,
        (Enemy, _) | (_, Enemy) => MaitriClass::Enemy,
    }
}

const fn maitri_upper_triangle() -> [u8; 45] {
    let planets = crate::models::chart::ALL_PLANETS;
    let mut upper = [0; 45];
    let mut k = 0;
    let mut i = 0;
    while i < 9 {
        let mut j = i;
        while j < 9 {
            let class = if i == j {
                MaitriClass::Best
            } else {
                combine(
                    natural_relation(planets[i], planets[j]),
                    natural_relation(planets[j], planets[i]),
                )
            };
            upper[k] = class.points();
            k += 1;
            j += 1;
        }
        i += 1;
    }
    upper
}

/// Graha Maitri points. Rows follow `Planet` declaration order
pub const MAITRI_MATRIX: [[u8; 9]; 9] = mirror(&maitri_upper_triangle());

// ---------------------------------------------------------------------------
// Gana
// ---------------------------------------------------------------------------

/// Base gana points. Rows: Deva, Manushya, Rakshasa
pub const GANA_MATRIX: [[u8; 3]; 3] = mirror(&[
    6, 5, 0,
    6, 0,
    6,
]);

// ---------------------------------------------------------------------------
// Bhakoot
// ---------------------------------------------------------------------------

/// Rashi distances (1-based) that carry Bhakoot dosha, with their names
pub const BHAKOOT_DOSHA_DISTANCES: [(u8, &str); 4] = [
    (5, "5-9 (navpancham)"),
    (9, "5-9 (navpancham)"),
    (6, "6-8 (shadashtak)"),
    (8, "6-8 (shadashtak)"),
];

pub const BHAKOOT_DWIRDWADASH_DISTANCES: [(u8, &str); 2] = [
    (2, "2-12 (dwirdwadash)"),
    (12, "2-12 (dwirdwadash)"),
];

pub fn vashya_relation(a: VashyaGroup, b: VashyaGroup) -> VashyaRelation {
    VashyaRelation::from_points(VASHYA_MATRIX[a.index()][b.index()])
}

pub fn yoni_relation(a: Yoni, b: Yoni) -> YoniRelation {
    YoniRelation::from_points(YONI_MATRIX[a.index()][b.index()])
}

pub fn maitri_class(a: Planet, b: Planet) -> MaitriClass {
    MaitriClass::from_points(MAITRI_MATRIX[a.index()][b.index()])
}
