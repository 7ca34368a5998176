//! Cosmetic player palettes and the built-in presets.
//!
//! Pure data. The customize overlay lives outside the simulation; it reads
//! these and writes the chosen palette back onto the player.

use serde::{Deserialize, Serialize};

/// Colors for each drawable part of the avatar, as CSS-style hex strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColors {
    pub armor: String,
    pub skin: String,
    pub hair: String,
    pub sword: String,
    pub shield: String,
}

impl Default for PlayerColors {
    fn default() -> Self {
        Self {
            armor: "#4444FF".into(),
            skin: "#FFD700".into(),
            hair: "#8B4513".into(),
            sword: "#C0C0C0".into(),
            shield: "#CD853F".into(),
        }
    }
}

/// A named, ready-made palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPreset {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub colors: PlayerColors,
}

impl PlayerPreset {
    fn new(id: &str, name: &str, emoji: &str, colors: PlayerColors) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            colors,
        }
    }

    /// The built-in presets, in display order
    pub fn defaults() -> Vec<PlayerPreset> {
        vec![
            PlayerPreset::new(
                "knight",
                "騎士",
                "⚔️",
                PlayerColors {
                    armor: "#4A4A4A".into(),
                    skin: "#FFD700".into(),
                    hair: "#8B4513".into(),
                    sword: "#C0C0C0".into(),
                    shield: "#CD853F".into(),
                },
            ),
            PlayerPreset::new(
                "ninja",
                "忍者",
                "🥷",
                PlayerColors {
                    armor: "#000000".into(),
                    skin: "#8B4513".into(),
                    hair: "#000000".into(),
                    sword: "#4A4A4A".into(),
                    shield: "#2F4F4F".into(),
                },
            ),
            PlayerPreset::new(
                "cat",
                "猫",
                "🐱",
                PlayerColors {
                    armor: "#FFA500".into(),
                    skin: "#FFE4B5".into(),
                    hair: "#8B4513".into(),
                    sword: "#DAA520".into(),
                    shield: "#D2691E".into(),
                },
            ),
        ]
    }
}

/// Selectable color choices per avatar part, for the customize overlay
pub mod palette {
    pub const ARMOR: [&str; 5] = ["#4A4A4A", "#8B4513", "#000000", "#4B0082", "#CD853F"];
    pub const SKIN: [&str; 5] = ["#FFD700", "#FFE4B5", "#8B4513", "#FFE4E1", "#E6E6FA"];
    pub const HAIR: [&str; 5] = ["#8B4513", "#000000", "#A020F0", "#F8F8FF", "#FFD700"];
    pub const SWORD: [&str; 5] = ["#C0C0C0", "#DAA520", "#4A4A4A", "#9400D3", "#E6E6FA"];
    pub const SHIELD: [&str; 5] = ["#CD853F", "#D2691E", "#2F4F4F", "#8A2BE2", "#F0F8FF"];
}
