//! Field-level equality and minimal patches over stored records.
//!
//! Scalar lists (types, abilities, egg groups, diets, habitats, move name
//! lists) compare as unordered sets; structured lists (evolution stages,
//! level-up moves, mega evolutions) compare by existential match, position
//! ignored. `diff` reports the candidate's value for every field its
//! comparison flags, so an operator can review exactly what an overwrite
//! would change.

use serde::Serialize;

use crate::model::{
    Abilities, BaseStats, BreedingInformation, Capabilities, EvolutionStage, Extra, LearnedMove,
    MegaEvolution, Metadata, MoveList, PokeType, Pokemon, SizeInformation, Skills,
};

/// Candidate-side values for every top-level field that differs from the
/// baseline. `name` is always present so the patch identifies its record.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonPatch {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<PokeType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_stats: Option<BaseStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Abilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evolution: Option<Vec<EvolutionStage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_information: Option<SizeInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breeding_information: Option<BreedingInformation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitats: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Capabilities>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Skills>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_list: Option<MoveList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mega_evolutions: Option<Vec<MegaEvolution>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<Extra>>,
}

impl PokemonPatch {
    /// True when only the mandatory `name` field is populated.
    pub fn is_empty(&self) -> bool {
        *self
            == PokemonPatch {
                name: self.name.clone(),
                ..PokemonPatch::default()
            }
    }
}

pub fn is_equal(a: &Pokemon, b: &Pokemon) -> bool {
    a.name == b.name && diff(a, b).is_empty()
}

/// Minimal patch from baseline `a` to candidate `b`.
pub fn diff(a: &Pokemon, b: &Pokemon) -> PokemonPatch {
    PokemonPatch {
        name: b.name.clone(),
        types: (!same_set(&a.types, &b.types)).then(|| b.types.clone()),
        base_stats: (a.base_stats != b.base_stats).then(|| b.base_stats.clone()),
        abilities: abilities_differ(&a.abilities, &b.abilities).then(|| b.abilities.clone()),
        evolution: (!same_evolution(&a.evolution, &b.evolution)).then(|| b.evolution.clone()),
        size_information: (a.size_information != b.size_information)
            .then(|| b.size_information.clone()),
        breeding_information: breeding_differs(&a.breeding_information, &b.breeding_information)
            .then(|| b.breeding_information.clone()),
        diets: (!same_set(&a.diets, &b.diets)).then(|| b.diets.clone()),
        habitats: (!same_set(&a.habitats, &b.habitats)).then(|| b.habitats.clone()),
        capabilities: capabilities_differ(&a.capabilities, &b.capabilities)
            .then(|| b.capabilities.clone()),
        skills: (a.skills != b.skills).then(|| b.skills.clone()),
        move_list: move_list_differs(&a.move_list, &b.move_list).then(|| b.move_list.clone()),
        mega_evolutions: (!same_megas(&a.mega_evolutions, &b.mega_evolutions))
            .then(|| b.mega_evolutions.clone()),
        metadata: (a.metadata != b.metadata).then(|| b.metadata.clone()),
        extras: extras_differ(&a.extras, &b.extras).then(|| b.extras.clone()),
    }
}

// ── Per-field comparisons ──

/// Unordered equality for scalar lists.
fn same_set<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}

/// Unordered equality where absence and an empty list are distinct states.
fn same_opt_set<T: PartialEq>(a: &Option<Vec<T>>, b: &Option<Vec<T>>) -> bool {
    if a.as_ref().map(Vec::len) != b.as_ref().map(Vec::len) {
        return false;
    }
    let a = a.as_deref().unwrap_or_default();
    let b = b.as_deref().unwrap_or_default();
    a.iter().all(|item| b.contains(item))
}

fn abilities_differ(a: &Abilities, b: &Abilities) -> bool {
    !same_set(&a.basic_abilities, &b.basic_abilities)
        || !same_set(&a.advanced_abilities, &b.advanced_abilities)
        || a.high_ability != b.high_ability
}

/// Stages match by name, then level and stage number must agree.
fn same_evolution(a: &[EvolutionStage], b: &[EvolutionStage]) -> bool {
    a.len() == b.len()
        && a.iter().all(|stage| {
            b.iter()
                .find(|other| other.name == stage.name)
                .is_some_and(|other| other.level == stage.level && other.stage == stage.stage)
        })
}

fn breeding_differs(a: &BreedingInformation, b: &BreedingInformation) -> bool {
    a.gender_ratio != b.gender_ratio
        || !same_set(&a.egg_groups, &b.egg_groups)
        || a.average_hatch_rate != b.average_hatch_rate
}

fn capabilities_differ(a: &Capabilities, b: &Capabilities) -> bool {
    a.overland != b.overland
        || a.swim != b.swim
        || a.sky != b.sky
        || a.levitate != b.levitate
        || a.burrow != b.burrow
        || a.high_jump != b.high_jump
        || a.low_jump != b.low_jump
        || a.power != b.power
        || !same_opt_set(&a.other, &b.other)
}

fn same_level_up(a: &[LearnedMove], b: &[LearnedMove]) -> bool {
    a.len() == b.len() && a.iter().all(|learned| b.contains(learned))
}

fn move_list_differs(a: &MoveList, b: &MoveList) -> bool {
    !same_level_up(&a.level_up, &b.level_up)
        || !same_set(&a.tm_hm, &b.tm_hm)
        || !same_set(&a.egg_moves, &b.egg_moves)
        || !same_set(&a.tutor_moves, &b.tutor_moves)
        || !same_opt_set(&a.zygarde_cube_moves, &b.zygarde_cube_moves)
}

/// Every baseline mega must have a matching candidate mega; absent and empty
/// collapse together.
fn same_megas(a: &Option<Vec<MegaEvolution>>, b: &Option<Vec<MegaEvolution>>) -> bool {
    let a = a.as_deref().unwrap_or_default();
    let b = b.as_deref().unwrap_or_default();
    a.iter().all(|mega| b.contains(mega))
}

fn extras_differ(a: &Option<Vec<Extra>>, b: &Option<Vec<Extra>>) -> bool {
    a.as_deref().unwrap_or_default() != b.as_deref().unwrap_or_default()
}

// ── Tests ──
