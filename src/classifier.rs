use std::ops::RangeInclusive;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::AnalyzeError;
use crate::models::{Class, ClassificationResult};

pub const HERNIATED_CONFIDENCE: RangeInclusive<u32> = 50..=70;
pub const NON_HERNIATED_CONFIDENCE: RangeInclusive<u32> = 1..=25;

impl Class {
    /// Confidence percentages reported for this class.
    pub fn confidence_range(self) -> RangeInclusive<u32> {
        match self {
            Class::Herniated => HERNIATED_CONFIDENCE,
            Class::NonHerniated => NON_HERNIATED_CONFIDENCE,
        }
    }
}

/// Picks the class from the filename's first letter, case-insensitively.
pub fn class_for(filename: &str) -> Option<Class> {
    let lowered = filename.to_lowercase();
    match lowered.chars().next() {
        Some('h') => Some(Class::Herniated),
        Some('n') => Some(Class::NonHerniated),
        _ => None,
    }
}

pub fn classify<R: Rng + ?Sized>(
    filename: &str,
    rng: &mut R,
) -> Result<ClassificationResult, AnalyzeError> {
    let class = class_for(filename).ok_or(AnalyzeError::InvalidInput)?;
    let percentage = rng.gen_range(class.confidence_range());

    Ok(ClassificationResult {
        class,
        confidence: format!("{}%", percentage),
    })
}

/// Random source handed to the handler through `web::Data`.
#[derive(Debug, Default)]
pub enum EntropySource {
    /// Unseeded per-thread generator; nothing is shared between requests.
    #[default]
    Thread,
    /// Fixed seed, draws serialized behind a lock so runs are reproducible.
    Seeded(Mutex<StdRng>),
}

impl EntropySource {
    pub fn seeded(seed: u64) -> Self {
        EntropySource::Seeded(Mutex::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => EntropySource::Thread,
        }
    }

    pub fn classify(&self, filename: &str) -> Result<ClassificationResult, AnalyzeError> {
        match self {
            EntropySource::Thread => classify(filename, &mut rand::thread_rng()),
            EntropySource::Seeded(rng) => {
                // A poisoned lock still holds a usable generator.
                let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                classify(filename, &mut *rng)
            }
        }
    }
}
