//! Character Unlock Rules
//!
//! AI characters become selectable once the site-wide like total crosses
//! their threshold. Threshold 0 means available from the start.

/// One selectable AI character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub prompt: &'static str,
    pub unlock_threshold: u64,
}

/// Roster, ordered by threshold
pub const CHARACTERS: &[CharacterSpec] = &[
    CharacterSpec {
        id: "chick",
        label: "Baby chick",
        prompt: "cute baby chick, kawaii style, adorable",
        unlock_threshold: 0,
    },
    CharacterSpec {
        id: "hen",
        label: "Hen",
        prompt: "cute chicken, kawaii style, adorable, hen",
        unlock_threshold: 1_000,
    },
];

/// The character selectable from the start
pub fn default_character() -> &'static CharacterSpec {
    CHARACTERS
        .iter()
        .find(|c| c.unlock_threshold == 0)
        .unwrap_or(&CHARACTERS[0])
}

pub fn character_by_id(id: &str) -> Option<&'static CharacterSpec> {
    CHARACTERS.iter().find(|c| c.id == id)
}

pub fn is_unlocked(character: &CharacterSpec, total_likes: u64) -> bool {
    total_likes >= character.unlock_threshold
}

/// The cheapest still-locked character, for the progress readout
pub fn next_locked(total_likes: u64) -> Option<&'static CharacterSpec> {
    CHARACTERS
        .iter()
        .filter(|c| c.unlock_threshold > 0)
        .filter(|c| !is_unlocked(c, total_likes))
        .min_by_key(|c| c.unlock_threshold)
}
