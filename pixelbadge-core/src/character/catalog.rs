//! Built-in character gallery

use super::animation::AnimationDef;
use super::model::{Character, CharacterDef, CharacterId};
use super::AssetError;
use crate::color::Rgb;

/// Characters shipped with the firmware, in gallery order
pub const CHARACTERS: &[CharacterDef] = &[
    CharacterDef {
        id: "ghost_plain",
        name: "Plain Ghost",
        body: Some("3C7EFFFFFFFFFFAA"),
        highlight: None,
        shadow: None,
        fixed: &[],
        animations: &[AnimationDef {
            name: "blink",
            interval_ms: 3000,
            frame_duration_ms: 50,
            frames: &["0000000024240000", "0000000000240000", "0000000000000000"],
            color: Rgb::WHITE,
            reverse: false,
        }],
    },
    CharacterDef {
        id: "heart",
        name: "Heart",
        body: Some("0066FFFF7E3C1800"),
        highlight: Some("0006030100000000"),
        shadow: Some("0000008040201000"),
        fixed: &[],
        animations: &[AnimationDef {
            name: "blink_heart",
            interval_ms: 7000,
            frame_duration_ms: 50,
            frames: &["0000002424000000", "0000000024000000", "0000000000000000"],
            color: Rgb::WHITE,
            reverse: false,
        }],
    },
    CharacterDef {
        id: "invader",
        name: "Space Invader",
        body: Some("423C7EFF7E422400"),
        highlight: None,
        shadow: None,
        fixed: &[],
        animations: &[AnimationDef {
            name: "blik_invader",
            interval_ms: 7000,
            frame_duration_ms: 50,
            frames: &["0000002400000000", "0000000000000000"],
            color: Rgb::WHITE,
            reverse: false,
        }],
    },
    CharacterDef {
        id: "creeper",
        name: "Creeper",
        body: Some("FFFFFFFFFFFFFFFF"),
        highlight: None,
        shadow: None,
        fixed: &[],
        animations: &[AnimationDef {
            name: "blik_invader",
            interval_ms: 7000,
            frame_duration_ms: 50,
            frames: &["006666187E7E4200", "000066187E7E4200", "000000187E7E4200"],
            color: Rgb::WHITE,
            reverse: false,
        }],
    },
];

/// Validated, ordered set of character definitions
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    defs: &'static [CharacterDef],
}

impl Catalog {
    /// Validate every definition up front
    ///
    /// Decoding each character once here means later `instantiate` calls
    /// cannot fail on asset data.
    pub fn new(defs: &'static [CharacterDef]) -> Result<Self, AssetError> {
        if defs.is_empty() {
            return Err(AssetError::EmptyCatalog);
        }
        for (i, def) in defs.iter().enumerate() {
            Character::build(def, 0)?;
            if defs[..i].iter().any(|other| other.id == def.id) {
                return Err(AssetError::DuplicateId);
            }
        }
        Ok(Self { defs })
    }

    /// The built-in gallery
    pub fn builtin() -> Result<Self, AssetError> {
        Self::new(CHARACTERS)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static CharacterDef> {
        self.defs.get(index)
    }

    /// Position of the character with `id`
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.defs.iter().position(|def| def.id == id)
    }

    /// Index after `index`, wrapping to the start
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.defs.len()
    }

    /// Persistable id of the character at `index`
    pub fn id_at(&self, index: usize) -> Option<CharacterId> {
        let def = self.get(index)?;
        let mut id = CharacterId::new();
        id.push_str(def.id).ok()?;
        Some(id)
    }

    /// Fresh instance of the character at `index`, animations triggered at `now_ms`
    ///
    /// Out of range indices fall back to the first character.
    pub fn instantiate(&self, index: usize, now_ms: u32) -> Result<Character, AssetError> {
        let def = self.defs.get(index).unwrap_or(&self.defs[0]);
        Character::build(def, now_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_valid() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.index_of("heart"), Some(1));
        assert_eq!(catalog.index_of("missing"), None);
        assert_eq!(catalog.next_index(3), 0);
        assert_eq!(catalog.id_at(2).unwrap().as_str(), "invader");
    }

    #[test]
    fn test_heart_layers() {
        let catalog = Catalog::builtin().unwrap();
        let heart = catalog.instantiate(1, 0).unwrap();
        assert_eq!(heart.name(), "Heart");
        assert_eq!(heart.animations().len(), 1);
        assert_eq!(heart.animations()[0].frame_count(), 3);
    }

    #[test]
    fn test_animation_names_match_assets() {
        let catalog = Catalog::builtin().unwrap();
        let names: heapless::Vec<&str, 4> = (0..catalog.len())
            .map(|i| catalog.get(i).unwrap().animations[0].name)
            .collect();
        assert_eq!(
            &names[..],
            &["blink", "blink_heart", "blik_invader", "blik_invader"]
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        static DEFS: [CharacterDef; 2] = [CHARACTERS[0], CHARACTERS[0]];
        assert_eq!(Catalog::new(&DEFS).unwrap_err(), AssetError::DuplicateId);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Catalog::new(&[]).unwrap_err(), AssetError::EmptyCatalog);
    }

    #[test]
    fn test_instantiate_out_of_range_falls_back() {
        let catalog = Catalog::builtin().unwrap();
        let character = catalog.instantiate(99, 0).unwrap();
        assert_eq!(character.id(), "ghost_plain");
    }
}
