//! Herb catalog used by the quiz

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Herb {
    pub name: &'static str,
    pub category: &'static str,
    pub effect: &'static str,
    pub usage: &'static str,
}

/// Which attribute a quiz question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HerbField {
    Effect,
    Category,
    Usage,
}

impl HerbField {
    pub const ALL: [HerbField; 3] = [HerbField::Effect, HerbField::Category, HerbField::Usage];

    pub fn label(&self) -> &'static str {
        match self {
            HerbField::Effect => "effect",
            HerbField::Category => "category",
            HerbField::Usage => "usage",
        }
    }
}

impl Herb {
    pub fn field(&self, field: HerbField) -> &'static str {
        match field {
            HerbField::Effect => self.effect,
            HerbField::Category => self.category,
            HerbField::Usage => self.usage,
        }
    }
}

pub const HERBS: [Herb; 15] = [
    Herb {
        name: "Ginseng",
        category: "Qi tonic",
        effect: "Strongly replenishes original qi, restores the pulse, strengthens spleen and lung",
        usage: "Decocted separately, 3-9 g",
    },
    Herb {
        name: "Astragalus",
        category: "Qi tonic",
        effect: "Tonifies qi, raises yang, secures the exterior, promotes urination",
        usage: "Decoction, 9-30 g",
    },
    Herb {
        name: "Dang Gui",
        category: "Blood tonic",
        effect: "Nourishes and invigorates blood, regulates menstruation, relieves pain",
        usage: "Decoction, 6-12 g",
    },
    Herb {
        name: "Goji Berry",
        category: "Yin tonic",
        effect: "Nourishes liver and kidney, benefits essence, brightens the eyes",
        usage: "Decoction or eaten directly, 6-12 g",
    },
    Herb {
        name: "Honeysuckle",
        category: "Heat-clearing",
        effect: "Clears heat and toxins, disperses wind-heat",
        usage: "Decoction, 6-15 g",
    },
    Herb {
        name: "Poria",
        category: "Dampness-draining",
        effect: "Drains dampness, strengthens the spleen, calms the mind",
        usage: "Decoction, 10-15 g",
    },
    Herb {
        name: "Tangerine Peel",
        category: "Qi-regulating",
        effect: "Regulates qi, strengthens the spleen, dries dampness, resolves phlegm",
        usage: "Decoction, 3-10 g",
    },
    Herb {
        name: "Notoginseng",
        category: "Blood-stanching",
        effect: "Stops bleeding, disperses stasis, reduces swelling and pain",
        usage: "Powder taken with water, 1-3 g",
    },
    Herb {
        name: "Licorice",
        category: "Qi tonic",
        effect: "Tonifies spleen qi, moistens the lung, harmonizes other herbs",
        usage: "Decoction, 2-10 g",
    },
    Herb {
        name: "Chuan Xiong",
        category: "Blood-invigorating",
        effect: "Invigorates blood, moves qi, dispels wind, relieves pain",
        usage: "Decoction, 3-10 g",
    },
    Herb {
        name: "Bai Zhu",
        category: "Qi tonic",
        effect: "Strengthens the spleen, dries dampness, stops sweating",
        usage: "Decoction, 6-12 g",
    },
    Herb {
        name: "Coptis",
        category: "Heat-clearing",
        effect: "Clears heat, dries dampness, drains fire, resolves toxicity",
        usage: "Decoction, 2-5 g",
    },
    Herb {
        name: "Rehmannia",
        category: "Heat-clearing",
        effect: "Clears heat, cools blood, nourishes yin, generates fluids",
        usage: "Decoction, 10-15 g",
    },
    Herb {
        name: "Ophiopogon",
        category: "Yin tonic",
        effect: "Nourishes yin, moistens the lung, clears heart fire",
        usage: "Decoction, 6-12 g",
    },
    Herb {
        name: "Salvia",
        category: "Blood-invigorating",
        effect: "Invigorates blood, clears heart heat, calms the mind",
        usage: "Decoction, 10-15 g",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique() {
        for (i, a) in HERBS.iter().enumerate() {
            for b in &HERBS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_every_field_has_distractors() {
        // Each field must offer at least three values that differ from any one herb's
        for herb in &HERBS {
            for field in HerbField::ALL {
                let mut others: Vec<&str> = HERBS
                    .iter()
                    .map(|h| h.field(field))
                    .filter(|v| *v != herb.field(field))
                    .collect();
                others.sort_unstable();
                others.dedup();
                assert!(others.len() >= 3, "{} / {}", herb.name, field.label());
            }
        }
    }
}
