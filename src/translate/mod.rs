//! Stat block → database record translation.
//!
//! Reference data is fetched once for the whole batch, then every record is
//! translated in order. Translation is all-or-nothing: the first record that
//! cannot be identified aborts the batch.

pub mod capabilities;
pub mod hatch;
pub mod names;

use tracing::warn;

use crate::error::IngestError;
use crate::model::{
    BreedingInformation, Capabilities, GenderRatio, Height, Metadata, MoveList, Pokemon,
    RawGenderRatio, SizeInformation, StatBlock, Weight,
};
use crate::pokeapi::{PokeApi, SpeciesRecord, TranslationData};

/// First dex page of the source book; record 0 lands here.
const FIRST_DEX_PAGE: usize = 48;
const SOURCE_NAME: &str = "Paldea Dex";

/// Translate a whole batch, fetching reference data first. `page_offset` is
/// added to computed page numbers when the batch did not start at the book's
/// first dex page.
pub async fn translate(
    api: &PokeApi,
    blocks: &[StatBlock],
    page_offset: usize,
) -> anyhow::Result<Vec<Pokemon>> {
    let display_names: Vec<String> = blocks.iter().map(|block| block.name.clone()).collect();
    let data = api.fetch_translation_data(&display_names).await?;
    translate_with(&data, blocks, page_offset)
}

/// Pure translation against already-fetched reference data.
pub fn translate_with(
    data: &TranslationData,
    blocks: &[StatBlock],
    page_offset: usize,
) -> anyhow::Result<Vec<Pokemon>> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            translate_one(data, block, index, page_offset).map_err(Into::into)
        })
        .collect()
}

/// Per-record fields pulled out of the reference dex.
struct ReferenceFields {
    egg_groups: Vec<String>,
    national_dex_number: Option<i32>,
    average_hatch_rate: Option<i32>,
}

fn translate_one(
    data: &TranslationData,
    block: &StatBlock,
    index: usize,
    page_offset: usize,
) -> Result<Pokemon, IngestError> {
    let reference = reference_fields(data, block);
    let national = reference
        .national_dex_number
        .ok_or_else(|| IngestError::UnresolvedIdentity(block.name.clone()))?;

    Ok(Pokemon {
        name: display_name(&block.name),
        types: block.types.clone(),
        base_stats: block.base_stats.clone(),
        abilities: block.abilities.clone(),
        evolution: block.evolution.clone(),
        size_information: SizeInformation {
            height: Height {
                ptu: block.size_information.height.ptu,
                freedom: block.size_information.height.imperial.clone(),
                metric: block.size_information.height.metric.clone(),
            },
            weight: Weight {
                ptu: block.size_information.weight.ptu,
                freedom: block.size_information.weight.imperial.clone(),
                metric: block.size_information.weight.metric.clone(),
            },
        },
        breeding_information: BreedingInformation {
            gender_ratio: resolve_gender_ratio(&block.breeding_information.gender_ratio),
            egg_groups: reference.egg_groups,
            average_hatch_rate: reference
                .average_hatch_rate
                .map(|rate| format!("{rate} Days")),
        },
        diets: block.diets.clone(),
        habitats: block.habitats.clone(),
        capabilities: filter_capabilities(&block.capabilities),
        skills: block.skills.clone(),
        move_list: MoveList {
            level_up: block.move_list.level_up.clone(),
            tm_hm: block.move_list.tm_hm.clone(),
            egg_moves: Vec::new(),
            tutor_moves: block.move_list.tm_hm.clone(),
            zygarde_cube_moves: None,
        },
        mega_evolutions: None,
        metadata: Metadata {
            source: SOURCE_NAME.to_string(),
            page: format!("p.{}", FIRST_DEX_PAGE + index + page_offset),
            dex_number: format!("#{national}"),
        },
        extras: None,
    })
}

fn reference_fields(data: &TranslationData, block: &StatBlock) -> ReferenceFields {
    let key = names::normalize(&block.name.to_lowercase());
    let species = key.as_deref().and_then(|k| data.species_by_name.get(k));

    match species {
        Some(species) => ReferenceFields {
            egg_groups: display_egg_groups(data, species),
            national_dex_number: national_entry(species),
            average_hatch_rate: hatch::average_hatch_rate(species.hatch_counter),
        },
        None => ReferenceFields {
            egg_groups: Vec::new(),
            national_dex_number: None,
            average_hatch_rate: None,
        },
    }
}

/// Egg-group slugs → display names. A slug without a display name is a
/// reference-data gap, not a fatal error; the slot is dropped with a warning.
fn display_egg_groups(data: &TranslationData, species: &SpeciesRecord) -> Vec<String> {
    species
        .egg_groups
        .iter()
        .filter_map(|group| {
            let display = data.egg_group_display_names.get(&group.name).cloned();
            if display.is_none() {
                warn!("no display name for egg group {}", group.name);
            }
            display
        })
        .collect()
}

fn national_entry(species: &SpeciesRecord) -> Option<i32> {
    species
        .pokedex_numbers
        .iter()
        .find(|entry| entry.pokedex.name == "national")
        .map(|entry| entry.entry_number)
}

/// A split that sums to exactly 100 stands; anything else (an explicit
/// genderless flag, a missing side, a bad sum) resolves to genderless.
fn resolve_gender_ratio(raw: &RawGenderRatio) -> GenderRatio {
    match (raw.male, raw.female) {
        (Some(male), Some(female)) if male + female == 100 => GenderRatio::Split { male, female },
        _ => GenderRatio::genderless(),
    }
}

/// Movement capabilities a species lacks are absent, not zero, in the output
/// record. `other` is canonicalized and only kept when non-empty.
fn filter_capabilities(raw: &Capabilities) -> Capabilities {
    Capabilities {
        overland: raw.overland,
        swim: raw.swim.filter(|value| *value != 0),
        sky: raw.sky.filter(|value| *value != 0),
        levitate: raw.levitate.filter(|value| *value != 0),
        burrow: raw.burrow.filter(|value| *value != 0),
        high_jump: raw.high_jump,
        low_jump: raw.low_jump,
        power: raw.power,
        other: raw
            .other
            .as_deref()
            .filter(|list| !list.is_empty())
            .map(capabilities::format_other),
    }
}

/// The male and female oinkologne lines share one dex entry; give each
/// written form its own display name. "female" contains "male", so it is
/// checked first.
fn display_name(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("oinkologne") {
        if lower.contains("female") {
            return "Oinkologne (Female)".to_string();
        }
        if lower.contains("male") {
            return "Oinkologne (Male)".to_string();
        }
    }
    name.to_string()
}

// ── Tests ──
