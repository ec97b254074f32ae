//! Reference dex client. The pipeline needs two things from PokeAPI: the
//! species record behind every extracted name (egg groups, hatch counter,
//! dex numbers) and display names for the egg-group slugs. Both lookups run
//! jointly; if either fails the whole batch is unusable, so failures turn
//! into a fatal [`IngestError::ReferenceData`].

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::IngestError;
use crate::translate::names;

const BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokedexNumber {
    pub entry_number: i32,
    pub pokedex: NamedResource,
}

/// The slice of a species record this pipeline consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    #[serde(default)]
    pub hatch_counter: Option<i32>,
    #[serde(default)]
    pub pokedex_numbers: Vec<PokedexNumber>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EggGroup {
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    results: Vec<NamedResource>,
}

/// Everything translation needs from the reference dex, fetched once per
/// batch. Species keys are lower-cased so lookups tolerate input casing.
pub struct TranslationData {
    pub species_by_name: HashMap<String, SpeciesRecord>,
    pub egg_group_display_names: HashMap<String, String>,
}

pub struct PokeApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for PokeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApi {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Species lookups and the egg-group catalogue, awaited jointly.
    pub async fn fetch_translation_data(
        &self,
        display_names: &[String],
    ) -> Result<TranslationData, IngestError> {
        let (species, groups) =
            tokio::join!(self.get_by_names(display_names), self.get_egg_groups());

        let species = species
            .ok_or_else(|| IngestError::ReferenceData("species lookup failed".to_string()))?;
        let groups = groups
            .ok_or_else(|| IngestError::ReferenceData("egg group lookup failed".to_string()))?;

        let species_by_name = species
            .into_iter()
            .map(|record| (record.name.to_lowercase(), record))
            .collect();
        let egg_group_display_names = english_display_names(&groups)?;

        Ok(TranslationData {
            species_by_name,
            egg_group_display_names,
        })
    }

    /// Fetch a species record per display name; any request failure fails
    /// the whole batch by returning `None`.
    async fn get_by_names(&self, display_names: &[String]) -> Option<Vec<SpeciesRecord>> {
        let keys = names::normalize_all(display_names);
        info!("fetching {} species records", keys.len());

        let mut records = Vec::with_capacity(keys.len());
        for key in &keys {
            match self.get_species(key).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    error!("species lookup failed for {}: {}", key, err);
                    return None;
                }
            }
        }
        Some(records)
    }

    async fn get_species(&self, key: &str) -> anyhow::Result<SpeciesRecord> {
        let url = format!("{}/pokemon-species/{}", self.base_url, key);
        let record = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(record)
    }

    async fn get_egg_groups(&self) -> Option<Vec<EggGroup>> {
        match self.try_get_egg_groups().await {
            Ok(groups) => Some(groups),
            Err(err) => {
                error!("egg group lookup failed: {}", err);
                None
            }
        }
    }

    async fn try_get_egg_groups(&self) -> anyhow::Result<Vec<EggGroup>> {
        let url = format!("{}/egg-group?limit=100", self.base_url);
        let list: ResourceList = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut groups = Vec::with_capacity(list.results.len());
        for resource in &list.results {
            let url = format!("{}/egg-group/{}", self.base_url, resource.name);
            let group = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            groups.push(group);
        }
        Ok(groups)
    }
}

/// Pick each group's English localized name. A group without one is fatal:
/// translated records would otherwise carry an unreadable slug.
fn english_display_names(groups: &[EggGroup]) -> Result<HashMap<String, String>, IngestError> {
    groups
        .iter()
        .map(|group| {
            group
                .names
                .iter()
                .find(|localized| localized.language.name == "en")
                .map(|localized| (group.name.clone(), localized.name.clone()))
                .ok_or_else(|| {
                    IngestError::ReferenceData(format!(
                        "no English display name for egg group {}",
                        group.name
                    ))
                })
        })
        .collect()
}

// ── Tests ──
