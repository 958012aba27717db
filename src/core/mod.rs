// Core algorithm exports
pub mod aggregator;
pub mod chart;
pub mod dosha;
pub mod error;
pub mod kootas;
pub mod scorer;
pub mod tables;

pub use aggregator::{aggregate, classify};
pub use chart::{is_manglik_house, nakshatra_pada_from_longitude, resolve_chart};
pub use dosha::evaluate_dosha;
pub use error::ScoringError;
pub use kootas::{KootaRule, KOOTA_RULES};
pub use scorer::{load_chart, Scorer};
