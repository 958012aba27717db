// Unit tests for Guna Milan

use guna_milan::core::{
    chart::{rashi_lord, rashi_of, varna_of, vashya_of},
    classify, evaluate_dosha, is_manglik_house, nakshatra_pada_from_longitude,
    kootas::{bhakoot_koota, gana_koota, nadi_koota, tara_koota, varna_koota},
    tables::{maitri_class, yoni_relation, MaitriClass, YoniRelation},
};
use guna_milan::models::{
    BirthChart, Gana, KootaOptions, Nadi, Nakshatra, Planet, Points, Rashi, Severity, Tier, Varna,
    VashyaGroup, Yoni,
};

fn create_test_chart() -> BirthChart {
    BirthChart {
        nakshatra: Nakshatra::Magha,
        rashi: Rashi::Simha,
        gana: Gana::Rakshasa,
        yoni: Yoni::Rat,
        varna: Varna::Kshatriya,
        nadi: Nadi::Antya,
        vashya_group: VashyaGroup::Vanachara,
        ruling_planet: Planet::Sun,
        is_manglik: false,
    }
}

#[test]
fn test_longitude_to_nakshatra_pada() {
    assert_eq!(nakshatra_pada_from_longitude(0.0).unwrap(), (Nakshatra::Ashwini, 1));
    // 13 deg 20' starts Bharani
    assert_eq!(nakshatra_pada_from_longitude(13.5).unwrap(), (Nakshatra::Bharani, 1));
    // 45 deg: 5 deg into Rohini, second pada
    assert_eq!(nakshatra_pada_from_longitude(45.0).unwrap(), (Nakshatra::Rohini, 2));
    assert_eq!(nakshatra_pada_from_longitude(359.9).unwrap(), (Nakshatra::Revati, 4));
    assert!(nakshatra_pada_from_longitude(f64::NAN).is_err());
}

#[test]
fn test_rashi_from_nakshatra_quarter() {
    // Krittika pada 1 is in Mesha, padas 2-4 in Vrishabha
    assert_eq!(rashi_of(Nakshatra::Krittika, Some(1)), Some(Rashi::Mesha));
    assert_eq!(rashi_of(Nakshatra::Krittika, Some(2)), Some(Rashi::Vrishabha));
    assert_eq!(rashi_of(Nakshatra::Krittika, None), None);
    assert_eq!(rashi_of(Nakshatra::Rohini, None), Some(Rashi::Vrishabha));
    assert_eq!(rashi_of(Nakshatra::Revati, Some(4)), Some(Rashi::Meena));
}

#[test]
fn test_rashi_attributes() {
    assert_eq!(varna_of(Rashi::Karka), Varna::Brahmin);
    assert_eq!(varna_of(Rashi::Kumbha), Varna::Shudra);
    assert_eq!(rashi_lord(Rashi::Vrischika), Planet::Mars);
    assert_eq!(rashi_lord(Rashi::Meena), Planet::Jupiter);
    assert_eq!(vashya_of(Rashi::Vrischika, None), Some(VashyaGroup::Keeta));
    // Dhanu needs the quarter to pick a half
    assert_eq!(vashya_of(Rashi::Dhanu, None), None);
}

#[test]
fn test_manglik_houses() {
    let houses: Vec<u8> = (1..=12).filter(|h| is_manglik_house(*h)).collect();
    assert_eq!(houses, vec![1, 2, 4, 7, 8, 12]);
}

#[test]
fn test_yoni_and_maitri_are_symmetric() {
    use guna_milan::models::chart::{ALL_PLANETS, ALL_YONIS};

    for a in ALL_YONIS {
        for b in ALL_YONIS {
            assert_eq!(yoni_relation(a, b), yoni_relation(b, a), "{} / {}", a, b);
        }
    }
    for a in ALL_PLANETS {
        for b in ALL_PLANETS {
            assert_eq!(maitri_class(a, b), maitri_class(b, a), "{} / {}", a, b);
        }
    }
}

#[test]
fn test_classical_pairs() {
    assert_eq!(yoni_relation(Yoni::Cat, Yoni::Rat), YoniRelation::BitterEnemy);
    assert_eq!(yoni_relation(Yoni::Cow, Yoni::Tiger), YoniRelation::BitterEnemy);
    assert_eq!(yoni_relation(Yoni::Deer, Yoni::Deer), YoniRelation::Same);
    assert_eq!(maitri_class(Planet::Mars, Planet::Jupiter), MaitriClass::Best);
    assert_eq!(maitri_class(Planet::Rahu, Planet::Ketu), MaitriClass::Neutral);
}

#[test]
fn test_varna_and_gana_are_directional() {
    let opts = KootaOptions::default();
    let groom = BirthChart { varna: Varna::Shudra, gana: Gana::Rakshasa, ..create_test_chart() };
    let bride = BirthChart { varna: Varna::Brahmin, gana: Gana::Deva, ..create_test_chart() };

    assert_eq!(varna_koota(&groom, &bride, &opts).score, Points::ZERO);
    assert_eq!(varna_koota(&bride, &groom, &opts).score, Points::whole(1));
    assert_eq!(gana_koota(&groom, &bride, &opts).score, Points::whole(1));
    assert_eq!(gana_koota(&bride, &groom, &opts).score, Points::ZERO);
}

#[test]
fn test_nadi_zero_iff_equal() {
    let opts = KootaOptions::default();
    for a in [Nadi::Adi, Nadi::Madhya, Nadi::Antya] {
        for b in [Nadi::Adi, Nadi::Madhya, Nadi::Antya] {
            let ca = BirthChart { nadi: a, ..create_test_chart() };
            let cb = BirthChart { nadi: b, ..create_test_chart() };
            let expected = if a == b { 0 } else { 8 };
            assert_eq!(nadi_koota(&ca, &cb, &opts).score, Points::whole(expected));
        }
    }
}

#[test]
fn test_tara_is_bounded() {
    use guna_milan::models::chart::ALL_NAKSHATRAS;

    let opts = KootaOptions::default();
    let allowed = [Points::ZERO, Points::from_half_points(3), Points::whole(3)];
    for a in ALL_NAKSHATRAS {
        for b in ALL_NAKSHATRAS {
            let ca = BirthChart { nakshatra: a, ..create_test_chart() };
            let cb = BirthChart { nakshatra: b, ..create_test_chart() };
            let score = tara_koota(&ca, &cb, &opts).score;
            assert!(allowed.contains(&score), "{} / {}: {}", a, b, score);
        }
    }
}

#[test]
fn test_bhakoot_shadashtak() {
    let opts = KootaOptions::default();
    let a = BirthChart { rashi: Rashi::Mesha, ..create_test_chart() };
    let b = BirthChart { rashi: Rashi::Kanya, ..create_test_chart() };
    let result = bhakoot_koota(&a, &b, &opts);
    assert_eq!(result.score, Points::ZERO);
    assert!(result.rationale.contains("6-8"));
}

#[test]
fn test_tier_boundaries() {
    assert_eq!(classify(Points::whole(17)), Tier::NotRecommended);
    assert_eq!(classify(Points::whole(18)), Tier::Average);
    assert_eq!(classify(Points::whole(24)), Tier::Average);
    assert_eq!(classify(Points::whole(25)), Tier::Good);
    assert_eq!(classify(Points::whole(32)), Tier::Good);
    assert_eq!(classify(Points::whole(33)), Tier::Excellent);
}

#[test]
fn test_manglik_warning_severity() {
    let plain = create_test_chart();
    let manglik = BirthChart { is_manglik: true, ..create_test_chart() };

    assert!(evaluate_dosha(&plain, &plain).is_empty());
    assert_eq!(evaluate_dosha(&manglik, &plain)[0].severity, Severity::Full);
    assert_eq!(evaluate_dosha(&manglik, &manglik)[0].severity, Severity::None);
}
