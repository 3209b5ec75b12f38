//! Domain Services
//!
//! Grade statistics for a module: running average and the five-band
//! distribution shown as a pie chart.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::value_object::Score;

/// Score band, lower bound inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradeBand {
    /// `[0, 40)`
    Below40,
    /// `[40, 50)`
    From40To50,
    /// `[50, 60)`
    From50To60,
    /// `[60, 70)`
    From60To70,
    /// `[70, 100]`
    From70,
}

impl GradeBand {
    /// All bands in ascending order
    pub const ALL: [GradeBand; 5] = [
        GradeBand::Below40,
        GradeBand::From40To50,
        GradeBand::From50To60,
        GradeBand::From60To70,
        GradeBand::From70,
    ];

    /// First band, in ascending order, whose upper bound exceeds the score
    pub fn for_score(score: Score) -> Self {
        match score.value() {
            s if s < 40 => GradeBand::Below40,
            s if s < 50 => GradeBand::From40To50,
            s if s < 60 => GradeBand::From50To60,
            s if s < 70 => GradeBand::From60To70,
            _ => GradeBand::From70,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            GradeBand::Below40 => "0-40",
            GradeBand::From40To50 => "40-50",
            GradeBand::From50To60 => "50-60",
            GradeBand::From60To70 => "60-70",
            GradeBand::From70 => "70-100",
        }
    }

    const fn index(&self) -> usize {
        match self {
            GradeBand::Below40 => 0,
            GradeBand::From40To50 => 1,
            GradeBand::From50To60 => 2,
            GradeBand::From60To70 => 3,
            GradeBand::From70 => 4,
        }
    }
}

/// Number of grades per band
///
/// Serialises as `{"0-40": n, "40-50": n, ...}`, always with all five keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [u32; 5],
}

impl GradeDistribution {
    pub fn record(&mut self, score: Score) {
        self.counts[GradeBand::for_score(score).index()] += 1;
    }

    pub fn count(&self, band: GradeBand) -> u32 {
        self.counts[band.index()]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

impl Serialize for GradeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(GradeBand::ALL.len()))?;
        for band in GradeBand::ALL {
            map.serialize_entry(band.label(), &self.count(band))?;
        }
        map.end()
    }
}

/// Aggregate over the graded students of one module
#[derive(Debug, Clone, Default)]
pub struct ModuleStatistics {
    sum: i64,
    count: u32,
    distribution: GradeDistribution,
}

impl ModuleStatistics {
    pub fn record(&mut self, score: Score) {
        self.sum += i64::from(score.value());
        self.count += 1;
        self.distribution.record(score);
    }

    pub fn total_grades(&self) -> u32 {
        self.count
    }

    /// `None` when nothing was graded
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum as f64 / f64::from(self.count))
    }

    pub fn distribution(&self) -> &GradeDistribution {
        &self.distribution
    }

    pub fn into_distribution(self) -> GradeDistribution {
        self.distribution
    }
}
