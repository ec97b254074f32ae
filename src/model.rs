//! Record shapes for the two halves of the pipeline: `StatBlock` is what the
//! LLM extracts from one PDF page, `Pokemon` is the database-ready record
//! after reference enrichment. Field names serialize camelCase to match the
//! checkpoint files and the extraction schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PokeType {
    Bug,
    Dark,
    Dragon,
    Electric,
    Fairy,
    Fighting,
    Fire,
    Flying,
    Ghost,
    Grass,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Steel,
    Water,
}

pub const TYPE_NAMES: &[&str] = &[
    "Bug", "Dark", "Dragon", "Electric", "Fairy", "Fighting", "Fire", "Flying", "Ghost", "Grass",
    "Ground", "Ice", "Normal", "Poison", "Psychic", "Rock", "Steel", "Water",
];

/// PTU size class printed in the stat block's height line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Huge,
    Gigantic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub special_attack: i32,
    pub special_defense: i32,
    pub speed: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Abilities {
    pub basic_abilities: Vec<String>,
    pub advanced_abilities: Vec<String>,
    pub high_ability: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub name: String,
    pub level: i32,
    pub stage: i32,
}

/// A level-up move's level column: usually a number, `"Evo"` for moves
/// learned on evolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoveLevel {
    Number(i32),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnedMove {
    #[serde(rename = "move")]
    pub name: String,
    pub level: MoveLevel,
    #[serde(rename = "type")]
    pub kind: PokeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub overland: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swim: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levitate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burrow: Option<i32>,
    pub high_jump: i32,
    pub low_jump: i32,
    pub power: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHeight {
    pub ptu: SizeClass,
    pub imperial: String,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWeight {
    pub ptu: i32,
    pub imperial: String,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSizeInformation {
    pub height: RawHeight,
    pub weight: RawWeight,
}

/// Gender ratio as the stat block prints it; `translate` resolves this into
/// the canonical [`GenderRatio`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGenderRatio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub male: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub female: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub none: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBreedingInformation {
    pub gender_ratio: RawGenderRatio,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub athletics: String,
    pub acrobatics: String,
    pub combat: String,
    pub stealth: String,
    pub perception: String,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMoveList {
    pub level_up: Vec<LearnedMove>,
    pub tm_hm: Vec<String>,
}

/// One page's extraction output, not yet checked against the reference dex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    pub name: String,
    pub types: Vec<PokeType>,
    pub base_stats: BaseStats,
    pub abilities: Abilities,
    pub evolution: Vec<EvolutionStage>,
    pub capabilities: Capabilities,
    pub size_information: RawSizeInformation,
    pub breeding_information: RawBreedingInformation,
    pub diets: Vec<String>,
    pub habitats: Vec<String>,
    pub skills: Skills,
    pub move_list: RawMoveList,
}

// ── Canonical record ──

/// Resolved gender ratio: a split that sums to 100, or genderless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenderRatio {
    Split { male: i32, female: i32 },
    Genderless { none: bool },
}

impl GenderRatio {
    pub fn genderless() -> Self {
        GenderRatio::Genderless { none: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    pub ptu: SizeClass,
    pub freedom: String,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weight {
    pub ptu: i32,
    pub freedom: String,
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInformation {
    pub height: Height,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreedingInformation {
    pub gender_ratio: GenderRatio,
    pub egg_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_hatch_rate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveList {
    pub level_up: Vec<LearnedMove>,
    pub tm_hm: Vec<String>,
    pub egg_moves: Vec<String>,
    pub tutor_moves: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zygarde_cube_moves: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MegaStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_attack: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_defense: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MegaEvolution {
    pub name: String,
    pub types: Vec<PokeType>,
    pub ability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_shift: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    pub stats: MegaStats,
}

/// Catch-all name/value pair for oddities with no field of their own
/// (forme-change notes and the like).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub source: String,
    pub page: String,
    pub dex_number: String,
}

/// Fully normalized, reference-enriched record, ready to persist. Database
/// row ids live outside this struct so record comparison never sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub name: String,
    pub types: Vec<PokeType>,
    pub base_stats: BaseStats,
    pub abilities: Abilities,
    pub evolution: Vec<EvolutionStage>,
    pub size_information: SizeInformation,
    pub breeding_information: BreedingInformation,
    pub diets: Vec<String>,
    pub habitats: Vec<String>,
    pub capabilities: Capabilities,
    pub skills: Skills,
    pub move_list: MoveList,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mega_evolutions: Option<Vec<MegaEvolution>>,
    pub metadata: Metadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<Extra>>,
}

// ── Tests ──
