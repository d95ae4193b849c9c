//! EF severity level table
//!
//! Six ordered tiers, EF0 (weakest) to EF5 (strongest). Cyclic advance wraps,
//! direct selection clamps.

use serde::{Deserialize, Serialize};

use crate::Rgb;

/// Per-level simulation and tint parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Angular speed multiplier (rad/s before per-particle jitter)
    pub swirl_rate: f32,
    /// Vertical ascent speed (units/s before per-particle scaling)
    pub lift_rate: f32,
    /// Horizontal radius of the vortex at ground level
    pub base_radius: f32,
    /// Per-tick chance of spawning one debris entity
    pub debris_probability: f32,
    /// Tint for the body, particles and glow
    pub tint: Rgb,
}

/// Parameter rows, indexed by `EfLevel::index`
pub const LEVELS: [LevelParams; 6] = [
    LevelParams {
        swirl_rate: 1.2,
        lift_rate: 120.0,
        base_radius: 130.0,
        debris_probability: 0.12,
        tint: [180, 200, 220],
    },
    LevelParams {
        swirl_rate: 1.6,
        lift_rate: 160.0,
        base_radius: 155.0,
        debris_probability: 0.18,
        tint: [190, 210, 230],
    },
    LevelParams {
        swirl_rate: 2.2,
        lift_rate: 200.0,
        base_radius: 180.0,
        debris_probability: 0.26,
        tint: [210, 220, 230],
    },
    LevelParams {
        swirl_rate: 2.9,
        lift_rate: 240.0,
        base_radius: 210.0,
        debris_probability: 0.35,
        tint: [230, 230, 235],
    },
    LevelParams {
        swirl_rate: 3.6,
        lift_rate: 300.0,
        base_radius: 240.0,
        debris_probability: 0.47,
        tint: [245, 240, 230],
    },
    LevelParams {
        swirl_rate: 4.5,
        lift_rate: 360.0,
        base_radius: 280.0,
        debris_probability: 0.60,
        tint: [255, 250, 220],
    },
];

/// Enhanced Fujita severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EfLevel {
    #[serde(rename = "EF0", alias = "ef0")]
    Ef0,
    #[serde(rename = "EF1", alias = "ef1")]
    Ef1,
    #[default]
    #[serde(rename = "EF2", alias = "ef2")]
    Ef2,
    #[serde(rename = "EF3", alias = "ef3")]
    Ef3,
    #[serde(rename = "EF4", alias = "ef4")]
    Ef4,
    #[serde(rename = "EF5", alias = "ef5")]
    Ef5,
}

impl EfLevel {
    /// All levels in ascending severity
    pub const ALL: [EfLevel; 6] = [
        EfLevel::Ef0,
        EfLevel::Ef1,
        EfLevel::Ef2,
        EfLevel::Ef3,
        EfLevel::Ef4,
        EfLevel::Ef5,
    ];

    /// Number of levels
    pub const COUNT: usize = Self::ALL.len();

    /// Position in the ordered sequence
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direct selection; indices past the last level clamp to EF5
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::COUNT - 1)]
    }

    /// Cyclic advance (EF5 wraps to EF0)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            EfLevel::Ef0 => "EF0",
            EfLevel::Ef1 => "EF1",
            EfLevel::Ef2 => "EF2",
            EfLevel::Ef3 => "EF3",
            EfLevel::Ef4 => "EF4",
            EfLevel::Ef5 => "EF5",
        }
    }

    pub fn params(self) -> &'static LevelParams {
        &LEVELS[self.index()]
    }
}

impl std::fmt::Display for EfLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_next_wraps_from_ef5() {
        assert_eq!(EfLevel::Ef5.next(), EfLevel::Ef0);
    }

    #[test]
    fn test_next_is_successor_mod_count() {
        for level in EfLevel::ALL {
            assert_eq!(level.next().index(), (level.index() + 1) % 6);
        }
    }

    #[test]
    fn test_from_index_clamps() {
        assert_eq!(EfLevel::from_index(6), EfLevel::Ef5);
        assert_eq!(EfLevel::from_index(usize::MAX), EfLevel::Ef5);
        assert_eq!(EfLevel::from_index(0), EfLevel::Ef0);
    }

    #[test]
    fn test_table_is_monotonic() {
        for pair in LEVELS.windows(2) {
            assert!(pair[1].swirl_rate > pair[0].swirl_rate);
            assert!(pair[1].lift_rate > pair[0].lift_rate);
            assert!(pair[1].base_radius > pair[0].base_radius);
            assert!(pair[1].debris_probability > pair[0].debris_probability);
        }
        for params in &LEVELS {
            assert!((0.0..=1.0).contains(&params.debris_probability));
        }
    }

    #[test]
    fn test_ef2_defaults() {
        let ef2 = EfLevel::default().params();
        assert_eq!(ef2.swirl_rate, 2.2);
        assert_eq!(ef2.lift_rate, 200.0);
        assert_eq!(ef2.base_radius, 180.0);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EfLevel::Ef4).unwrap();
        assert_eq!(json, "\"EF4\"");
        let parsed: EfLevel = serde_json::from_str("\"ef1\"").unwrap();
        assert_eq!(parsed, EfLevel::Ef1);
    }

    proptest! {
        #[test]
        fn prop_from_index_in_range(index in 0usize..1000) {
            let level = EfLevel::from_index(index);
            prop_assert_eq!(level.index(), index.min(5));
        }
    }
}
