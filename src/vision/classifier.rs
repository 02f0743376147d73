//! Maps HSV colors to board cell symbols.
//!
//! Classification walks an ordered rule table and returns the result of the
//! first rule whose predicate matches. The thresholds are calibrated for one
//! specific board palette; rule order matters where ranges overlap.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::hsv::Hsv;

/// A recognized cell: one of the seven pieces or garbage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellSymbol {
    Z,
    L,
    O,
    S,
    I,
    J,
    T,
    /// Garbage / gray cell.
    G,
}

/// Texture order of a board skin atlas, left to right.
const SKIN_ORDER: &str = "zlosijtwgabx";

impl CellSymbol {
    pub const ALL: [CellSymbol; 8] = [
        CellSymbol::Z,
        CellSymbol::L,
        CellSymbol::O,
        CellSymbol::S,
        CellSymbol::I,
        CellSymbol::J,
        CellSymbol::T,
        CellSymbol::G,
    ];

    /// The single uppercase letter used for this symbol.
    pub fn as_char(self) -> char {
        match self {
            Self::Z => 'Z',
            Self::L => 'L',
            Self::O => 'O',
            Self::S => 'S',
            Self::I => 'I',
            Self::J => 'J',
            Self::T => 'T',
            Self::G => 'G',
        }
    }

    /// Parses a symbol letter, case-insensitive.
    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.as_char() == c.to_ascii_uppercase())
    }

    /// Index of this symbol's texture in a skin atlas.
    pub fn skin_index(self) -> usize {
        let letter = self.as_char().to_ascii_lowercase();
        SKIN_ORDER
            .chars()
            .position(|c| c == letter)
            .unwrap_or_default()
    }
}

impl fmt::Display for CellSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One entry of the classification table.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&Hsv) -> bool,
    /// `None` classifies the cell as empty.
    pub result: Option<CellSymbol>,
}

fn within(x: f64, lo: f64, hi: f64) -> bool {
    x >= lo && x <= hi
}

/// Ordered classification table. First match wins.
pub static RULES: &[Rule] = &[
    Rule {
        name: "gray-skin-override",
        matches: |c| {
            within(c.saturation, 0.0, 1.0)
                && (within(c.value, 133.0, 135.0) || within(c.value, 63.0, 88.0))
        },
        result: Some(CellSymbol::G),
    },
    Rule {
        name: "board-background",
        matches: |c| within(c.hue, 220.0, 225.0) && within(c.saturation, 0.0, 0.2) && c.value == 65.0,
        result: None,
    },
    Rule {
        name: "bright-gray",
        matches: |c| c.saturation <= 0.2 && c.value_percent() >= 55.0,
        result: Some(CellSymbol::G),
    },
    Rule {
        name: "too-dark",
        matches: |c| c.value_percent() <= 55.0,
        result: None,
    },
    Rule {
        name: "hue-z",
        matches: |c| within(c.hue, 0.0, 16.0) || within(c.hue, 325.0, 360.0),
        result: Some(CellSymbol::Z),
    },
    Rule {
        name: "hue-l",
        matches: |c| within(c.hue, 16.0, 39.0),
        result: Some(CellSymbol::L),
    },
    Rule {
        name: "hue-o",
        matches: |c| within(c.hue, 39.0, 70.0),
        result: Some(CellSymbol::O),
    },
    Rule {
        name: "hue-s",
        matches: |c| within(c.hue, 70.0, 149.0),
        result: Some(CellSymbol::S),
    },
    Rule {
        name: "hue-i",
        matches: |c| within(c.hue, 149.0, 200.0),
        result: Some(CellSymbol::I),
    },
    Rule {
        name: "hue-j",
        matches: |c| within(c.hue, 200.0, 266.0),
        result: Some(CellSymbol::J),
    },
    Rule {
        name: "hue-t",
        matches: |c| within(c.hue, 266.0, 325.0),
        result: Some(CellSymbol::T),
    },
];

/// Returns the first rule matching `color`, if any.
pub fn matching_rule(color: &Hsv) -> Option<&'static Rule> {
    RULES.iter().find(|rule| (rule.matches)(color))
}

/// Classifies a color. `None` means empty or unrecognized.
pub fn classify(color: &Hsv) -> Option<CellSymbol> {
    matching_rule(color).and_then(|rule| rule.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsv(hue: f64, saturation: f64, value: f64) -> Hsv {
        Hsv { hue, saturation, value }
    }

    #[test]
    fn test_hue_partition() {
        let cases = [
            (10.0, CellSymbol::Z),
            (350.0, CellSymbol::Z),
            (25.0, CellSymbol::L),
            (50.0, CellSymbol::O),
            (100.0, CellSymbol::S),
            (175.0, CellSymbol::I),
            (230.0, CellSymbol::J),
            (290.0, CellSymbol::T),
        ];
        for (hue, expected) in cases {
            assert_eq!(classify(&hsv(hue, 0.5, 200.0)), Some(expected), "hue {hue}");
        }
    }

    #[test]
    fn test_boundaries_resolved_by_order() {
        assert_eq!(classify(&hsv(16.0, 0.5, 200.0)), Some(CellSymbol::Z));
        assert_eq!(classify(&hsv(39.0, 0.5, 200.0)), Some(CellSymbol::L));
        assert_eq!(classify(&hsv(325.0, 0.5, 200.0)), Some(CellSymbol::Z));
    }

    #[test]
    fn test_low_saturation_bright_is_garbage() {
        let value = 60.0 * 2.55;
        for hue in [0.0, 45.0, 120.0, 222.0, 300.0] {
            assert_eq!(classify(&hsv(hue, 0.1, value)), Some(CellSymbol::G), "hue {hue}");
        }
    }

    #[test]
    fn test_dark_is_empty() {
        let value = 40.0 * 2.55;
        for hue in [0.0, 100.0, 250.0] {
            for saturation in [0.0, 0.5, 1.0] {
                assert_eq!(classify(&hsv(hue, saturation, value)), None);
            }
        }
    }

    #[test]
    fn test_skin_override_wins_over_background_rule() {
        // v = 65 falls in the 63..=88 override band, which is checked first.
        let color = hsv(222.0, 0.1, 65.0);
        assert_eq!(matching_rule(&color).map(|r| r.name), Some("gray-skin-override"));
        assert_eq!(classify(&color), Some(CellSymbol::G));
    }

    #[test]
    fn test_override_band_any_hue() {
        assert_eq!(classify(&hsv(100.0, 0.9, 134.0)), Some(CellSymbol::G));
        assert_eq!(classify(&hsv(300.0, 0.9, 80.0)), Some(CellSymbol::G));
    }

    #[test]
    fn test_symbol_letters_round_trip_case_insensitive() {
        for symbol in CellSymbol::ALL {
            assert_eq!(CellSymbol::from_char(symbol.as_char()), Some(symbol));
            assert_eq!(
                CellSymbol::from_char(symbol.as_char().to_ascii_lowercase()),
                Some(symbol)
            );
        }
        assert_eq!(CellSymbol::from_char('X'), None);
    }

    #[test]
    fn test_skin_index() {
        assert_eq!(CellSymbol::Z.skin_index(), 0);
        assert_eq!(CellSymbol::T.skin_index(), 6);
        assert_eq!(CellSymbol::G.skin_index(), 8);
    }
}
