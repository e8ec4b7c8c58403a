use crate::theme::Color;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use strum::{Display, EnumIter};
use unicode_width::UnicodeWidthStr;

/// A single showcase character. The roster is fixed at compile time; nothing
/// here is ever mutated at runtime.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Character {
    pub name: &'static str,
    pub title: &'static str,
    /// Portrait asset key, resolved through [`portrait`].
    pub image: &'static str,
    pub theme_color: Color,
    pub description: &'static str,
    pub abilities: Abilities,
    /// Preview record for the "NEXT" widget. Informational only: displayed
    /// literally, never recomputed from list order.
    pub next: NextCharacter,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Abilities {
    pub tactical: &'static str,
    pub passive: &'static str,
    pub ultimate: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NextCharacter {
    pub name: &'static str,
    pub image: &'static str,
}

/// The three ability rows on the right panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub(crate) enum AbilityKind {
    #[strum(serialize = "TACTICAL ABILITY")]
    Tactical,
    #[strum(serialize = "PASSIVE ABILITY")]
    Passive,
    #[strum(serialize = "ULTIMATE ABILITY")]
    Ultimate,
}

impl AbilityKind {
    /// Single-letter badge drawn next to the ability label.
    pub(crate) fn badge(&self) -> char {
        match self {
            Self::Tactical => 'T',
            Self::Passive => 'P',
            Self::Ultimate => 'U',
        }
    }
}

impl Abilities {
    pub(crate) fn get(&self, kind: AbilityKind) -> &'static str {
        match kind {
            AbilityKind::Tactical => self.tactical,
            AbilityKind::Passive => self.passive,
            AbilityKind::Ultimate => self.ultimate,
        }
    }
}

pub(crate) static CHARACTERS: &[Character] = &[
    Character {
        name: "BLOODHOUND",
        title: "Technological Tracker",
        image: "bloodhound",
        theme_color: Color::new(209, 58, 58),
        description: "Bloodhound is known across the Outlands as one of the greatest game \
                      hunters the Frontier has ever seen – and that's about all anyone knows. \
                      Their identity is a mystery wrapped in layers of rumors.",
        abilities: Abilities {
            tactical: "ALLFATHER EYE",
            passive: "TRACKER",
            ultimate: "BEAST OF THE HUNT",
        },
        next: NextCharacter { name: "MIRAGE", image: "mirage" },
    },
    Character {
        name: "MIRAGE",
        title: "Holographic Trickster",
        image: "mirage",
        theme_color: Color::new(226, 166, 72),
        description: "Mirage is the kind of guy who likes to stand out. The youngest of four \
                      brothers, he perfected the art of fooling around to get attention. The \
                      one thing he took seriously was Holo-Pilot technology.",
        abilities: Abilities {
            tactical: "PSYCHE OUT",
            passive: "NOW YOU SEE ME...",
            ultimate: "LIFE OF THE PARTY",
        },
        next: NextCharacter { name: "WRAITH", image: "wraith" },
    },
    Character {
        name: "WRAITH",
        title: "Interdimensional Skirmisher",
        image: "wraith",
        theme_color: Color::new(85, 70, 122),
        description: "Wraith is a whirlwind fighter, able to execute deadly attacks and \
                      manipulate spacetime by opening rifts in the fabric of reality — but she \
                      has no idea how she got that way.",
        abilities: Abilities {
            tactical: "INTO THE VOID",
            passive: "VOICES FROM THE VOID",
            ultimate: "DIMENSIONAL RIFT",
        },
        next: NextCharacter { name: "LIFELINE", image: "lifeline" },
    },
    Character {
        name: "LIFELINE",
        title: "Combat Medic",
        image: "lifeline",
        theme_color: Color::new(133, 200, 212),
        description: "Ajay Che, aka Lifeline, is a combat medic who has dedicated her life to \
                      helping others. She uses her D.O.C. drone to heal her teammates in the \
                      heat of battle.",
        abilities: Abilities {
            tactical: "D.O.C. HEAL DRONE",
            passive: "COMBAT REVIVE",
            ultimate: "CARE PACKAGE",
        },
        next: NextCharacter { name: "PATHFINDER", image: "pathfinder" },
    },
    Character {
        name: "PATHFINDER",
        title: "Forward Scout",
        image: "pathfinder",
        theme_color: Color::new(117, 185, 239),
        description: "Pathfinder is the picture of optimism, despite having no idea who \
                      created him or why. He's on a journey to find his creator, joining the \
                      Apex Games to gain a following and hopefully draw their attention.",
        abilities: Abilities {
            tactical: "GRAPPLING HOOK",
            passive: "INSIDER KNOWLEDGE",
            ultimate: "ZIPLINE GUN",
        },
        next: NextCharacter { name: "OCTANE", image: "octane" },
    },
    Character {
        name: "OCTANE",
        title: "High-Speed Daredevil",
        image: "octane",
        theme_color: Color::new(155, 245, 78),
        description: "After blowing off his legs in a record-breaking gauntlet run, Octavio \
                      “Octane” Silva is seeking his next adrenaline rush. With his metallic \
                      legs, he's faster, and with his Stim, he's never standing still.",
        abilities: Abilities {
            tactical: "STIM",
            passive: "SWIFT MEND",
            ultimate: "LAUNCH PAD",
        },
        next: NextCharacter { name: "BLOODHOUND", image: "bloodhound" },
    },
];

/// A parsed ASCII-art portrait.
#[derive(Debug)]
pub(crate) struct Portrait {
    pub lines: Vec<&'static str>,
    /// Display width of the widest line.
    pub width: u16,
}

impl Portrait {
    fn parse(art: &'static str) -> Self {
        let lines: Vec<&'static str> = art.lines().collect();
        let width = lines.iter().map(|line| line.width()).max().unwrap_or(0) as u16;
        Self { lines, width }
    }

    pub(crate) fn height(&self) -> u16 {
        self.lines.len() as u16
    }
}

/// One-time table of embedded portraits, keyed by asset key.
static PORTRAITS: OnceCell<HashMap<&'static str, Portrait>> = OnceCell::new();

fn build_portrait_table() -> HashMap<&'static str, Portrait> {
    let mut map = HashMap::new();
    map.insert("bloodhound", Portrait::parse(include_str!("../assets/bloodhound.txt")));
    map.insert("mirage", Portrait::parse(include_str!("../assets/mirage.txt")));
    map.insert("wraith", Portrait::parse(include_str!("../assets/wraith.txt")));
    map.insert("lifeline", Portrait::parse(include_str!("../assets/lifeline.txt")));
    map.insert("pathfinder", Portrait::parse(include_str!("../assets/pathfinder.txt")));
    map.insert("octane", Portrait::parse(include_str!("../assets/octane.txt")));
    map
}

/// Look up the embedded portrait for an asset key. An unknown key yields
/// `None`; rendering skips the portrait rather than failing.
pub(crate) fn portrait(key: &str) -> Option<&'static Portrait> {
    PORTRAITS.get_or_init(build_portrait_table).get(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_roster_is_non_empty() {
        assert!(!CHARACTERS.is_empty());
        assert_eq!(CHARACTERS.len(), 6);
    }

    #[test]
    fn test_every_portrait_key_resolves() {
        for character in CHARACTERS {
            assert!(portrait(character.image).is_some(), "missing portrait for {}", character.name);
            assert!(
                portrait(character.next.image).is_some(),
                "missing next-portrait for {}",
                character.name
            );
        }
    }

    #[test]
    fn test_unknown_portrait_key_is_none() {
        assert!(portrait("revenant").is_none());
    }

    #[test]
    fn test_next_preview_is_stored_literally() {
        // The preview record is authored data; WRAITH declares LIFELINE no
        // matter what the list order says.
        let wraith = CHARACTERS.iter().find(|c| c.name == "WRAITH").unwrap();
        assert_eq!(wraith.next.name, "LIFELINE");
        assert_eq!(wraith.next.image, "lifeline");
    }

    #[test]
    fn test_ability_rows_cover_all_kinds() {
        let character = &CHARACTERS[0];
        let names: Vec<&str> = AbilityKind::iter().map(|k| character.abilities.get(k)).collect();
        assert_eq!(names, vec!["ALLFATHER EYE", "TRACKER", "BEAST OF THE HUNT"]);
    }

    #[test]
    fn test_ability_labels() {
        assert_eq!(AbilityKind::Tactical.to_string(), "TACTICAL ABILITY");
        assert_eq!(AbilityKind::Ultimate.badge(), 'U');
    }

    #[test]
    fn test_portraits_have_consistent_dimensions() {
        for character in CHARACTERS {
            let portrait = portrait(character.image).unwrap();
            assert!(portrait.height() >= 10);
            assert!(portrait.width >= 16);
        }
    }
}
