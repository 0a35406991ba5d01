use serde::Serialize;

/// * `name` - Compound name as used in the strategies, e.g. Soft
/// * `pace_advantage` - (s) Lap time gain compared to the base lap time of the track
/// * `wear_rate` - Multiplier on the base tire wear per lap
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct TireCompound {
    pub name: &'static str,
    pub pace_advantage: f64,
    pub wear_rate: f64,
}

/// Fixed compound table, the race engine never creates or modifies compounds at runtime.
pub static COMPOUNDS: [TireCompound; 3] = [
    TireCompound {
        name: "Soft",
        pace_advantage: 0.8,
        wear_rate: 1.8,
    },
    TireCompound {
        name: "Medium",
        pace_advantage: 0.3,
        wear_rate: 1.2,
    },
    TireCompound {
        name: "Hard",
        pace_advantage: 0.0,
        wear_rate: 0.8,
    },
];

impl TireCompound {
    pub fn soft() -> &'static TireCompound {
        &COMPOUNDS[0]
    }

    pub fn medium() -> &'static TireCompound {
        &COMPOUNDS[1]
    }

    pub fn hard() -> &'static TireCompound {
        &COMPOUNDS[2]
    }

    /// from_name returns the compound with exactly the given name.
    pub fn from_name(name: &str) -> Option<&'static TireCompound> {
        COMPOUNDS.iter().find(|compound| compound.name == name)
    }

    /// from_name_or_hard returns the compound with the given name. Unknown names fall back to the
    /// hard compound since a race must never abort because of a malformed strategy.
    pub fn from_name_or_hard(name: &str) -> &'static TireCompound {
        match TireCompound::from_name(name) {
            Some(compound) => compound,
            None => {
                log::warn!(
                    "Unknown tire compound {:?} in strategy, falling back to {}",
                    name,
                    TireCompound::hard().name
                );
                TireCompound::hard()
            }
        }
    }
}
