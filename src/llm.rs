//! LLM-backed stat block extraction. One page of rulebook text goes in, one
//! [`StatBlock`] comes out, shape-enforced by a strict JSON schema on the
//! chat completion. The extractor sits behind a trait so the pipeline can be
//! driven by a stub in tests.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::model::{StatBlock, TYPE_NAMES};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const SYSTEM_INSTRUCTIONS: &str = "You are an assistant that extracts structured data from unstructured Pokémon stat blocks formatted as continuous text. The input will be a raw string containing various categories of information about a Pokémon. Your task is to parse this input and return a JSON object that conforms to a structured output.

## Parsing Rules
- Recognize headers like \"Base Stats\", \"Capabilities\", \"Skill List\", \"Breeding Information\", and \"Move List\" to categorize data correctly.
- Convert stat values and numerical fields to integers where applicable.
- Extract move levels properly, ensuring move names and types are correctly mapped; moves learned on evolution use the literal level \"Evo\".
- Parse evolution information by recognizing stage numbers, Pokémon names, and level requirements.
- Handle spacing and irregular formatting to ensure correct data extraction.
- Ensure all arrays are properly structured and missing fields are null or empty arrays.

Return only the structured JSON output without extra commentary.";

#[async_trait]
pub trait StatBlockExtractor {
    async fn extract(&self, text: &str) -> Result<StatBlock>;
}

pub struct OpenAiExtractor {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl OpenAiExtractor {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY environment variable must be set")?;
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }
}

#[async_trait]
impl StatBlockExtractor for OpenAiExtractor {
    async fn extract(&self, text: &str) -> Result<StatBlock> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTIONS },
                { "role": "user", "content": text },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "stat_block",
                    "strict": true,
                    "schema": stat_block_schema(),
                },
            },
        });

        let response: Value = self
            .client
            .post(OPENAI_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_extraction(&response)
    }
}

/// Pull the structured message out of a chat completion response.
pub fn parse_extraction(response: &Value) -> Result<StatBlock> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .context("no message content in chat completion")?;
    serde_json::from_str(content).context("stat block did not match the expected shape")
}

// ── Schema ──

fn object(properties: Value) -> Value {
    let required: Vec<String> = properties
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

fn nullable(kind: &str) -> Value {
    json!({ "type": [kind, "null"] })
}

fn string_array(description: &str) -> Value {
    json!({ "type": "array", "items": { "type": "string" }, "description": description })
}

fn type_enum(description: &str) -> Value {
    json!({ "type": "string", "enum": TYPE_NAMES, "description": description })
}

/// Strict JSON schema for [`StatBlock`]: every object closes over its
/// properties and optional fields are nullable rather than omitted.
fn stat_block_schema() -> Value {
    let base_stats = object(json!({
        "hp": { "type": "integer", "description": "The base HP of the pokemon" },
        "attack": { "type": "integer", "description": "The base attack (ATK) of the pokemon" },
        "defense": { "type": "integer", "description": "The base defense (DEF) of the pokemon" },
        "specialAttack": { "type": "integer", "description": "The base special attack (Sp.ATK) of the pokemon" },
        "specialDefense": { "type": "integer", "description": "The base special defense (Sp.DEF) of the pokemon" },
        "speed": { "type": "integer", "description": "The base speed (SPD) of the pokemon" },
    }));

    let abilities = object(json!({
        "basicAbilities": string_array("The basic abilities of the pokemon"),
        "advancedAbilities": string_array("The advanced abilities of the pokemon"),
        "highAbility": { "type": "string", "description": "The high ability of the pokemon" },
    }));

    let evolution = json!({
        "type": "array",
        "items": object(json!({
            "name": { "type": "string", "description": "The name of the evolution" },
            "level": { "type": "integer", "description": "The level of the evolution" },
            "stage": { "type": "integer", "description": "The stage of the evolution" },
        })),
    });

    let capabilities = object(json!({
        "overland": { "type": "integer" },
        "swim": nullable("integer"),
        "sky": nullable("integer"),
        "levitate": nullable("integer"),
        "burrow": nullable("integer"),
        "highJump": { "type": "integer" },
        "lowJump": { "type": "integer" },
        "power": { "type": "integer" },
        "other": { "type": ["array", "null"], "items": { "type": "string" } },
    }));

    let size_information = object(json!({
        "height": object(json!({
            "ptu": { "type": "string", "enum": ["Small", "Medium", "Large", "Huge", "Gigantic"] },
            "imperial": { "type": "string" },
            "metric": { "type": "string" },
        })),
        "weight": object(json!({
            "ptu": { "type": "integer" },
            "imperial": { "type": "string" },
            "metric": { "type": "string" },
        })),
    }));

    let breeding_information = object(json!({
        "genderRatio": object(json!({
            "male": nullable("integer"),
            "female": nullable("integer"),
            "none": nullable("boolean"),
        })),
    }));

    let skills = object(json!({
        "athletics": { "type": "string" },
        "acrobatics": { "type": "string" },
        "combat": { "type": "string" },
        "stealth": { "type": "string" },
        "perception": { "type": "string" },
        "focus": { "type": "string" },
    }));

    let move_list = object(json!({
        "levelUp": {
            "type": "array",
            "description": "The level up move list of the pokemon",
            "items": object(json!({
                "move": { "type": "string", "description": "The name of the move" },
                "level": {
                    "anyOf": [
                        { "type": "integer" },
                        { "type": "string", "enum": ["Evo"] },
                    ],
                    "description": "The level of the move",
                },
                "type": type_enum("The type of the move"),
            })),
        },
        "tmHm": string_array("The TM/HM move list of the pokemon"),
    }));

    object(json!({
        "name": { "type": "string", "description": "The name of the pokemon" },
        "types": { "type": "array", "items": type_enum("The type of the pokemon") },
        "baseStats": base_stats,
        "abilities": abilities,
        "evolution": evolution,
        "capabilities": capabilities,
        "sizeInformation": size_information,
        "breedingInformation": breeding_information,
        "diets": string_array("The diets of the pokemon"),
        "habitats": string_array("The habitats of the pokemon"),
        "skills": skills,
        "moveList": move_list,
    }))
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MoveLevel, PokeType};

    const EXTRACTED: &str = r#"{
        "name": "Pikachu",
        "types": ["Electric"],
        "baseStats": {"hp": 4, "attack": 6, "defense": 4, "specialAttack": 5, "specialDefense": 5, "speed": 9},
        "abilities": {"basicAbilities": ["Static"], "advancedAbilities": ["Lightning Rod"], "highAbility": "Sequence"},
        "evolution": [{"name": "Pichu", "level": 1, "stage": 1}],
        "capabilities": {"overland": 7, "swim": null, "sky": null, "levitate": null, "burrow": null, "highJump": 2, "lowJump": 2, "power": 2, "other": ["Zapper"]},
        "sizeInformation": {
            "height": {"ptu": "Small", "imperial": "1'4\"", "metric": "0.4m"},
            "weight": {"ptu": 1, "imperial": "13.2lbs", "metric": "6.0kg"}
        },
        "breedingInformation": {"genderRatio": {"male": 50, "female": 50, "none": null}},
        "diets": ["Herbivore"],
        "habitats": ["Forest"],
        "skills": {"athletics": "3d6", "acrobatics": "3d6+1", "combat": "2d6", "stealth": "3d6+1", "perception": "2d6+1", "focus": "3d6+2"},
        "moveList": {
            "levelUp": [{"move": "Thunderbolt", "level": 42, "type": "Electric"}, {"move": "Volt Tackle", "level": "Evo", "type": "Electric"}],
            "tmHm": ["Wild Charge"]
        }
    }"#;

    fn completion(content: &str) -> Value {
        json!({
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop",
            }],
        })
    }

    #[test]
    fn parses_a_structured_completion() {
        let block = parse_extraction(&completion(EXTRACTED)).unwrap();
        assert_eq!(block.name, "Pikachu");
        assert_eq!(block.types, vec![PokeType::Electric]);
        assert_eq!(block.base_stats.speed, 9);
        assert_eq!(block.capabilities.swim, None);
        assert_eq!(block.capabilities.other, Some(vec!["Zapper".to_string()]));
        assert_eq!(block.breeding_information.gender_ratio.male, Some(50));
        assert_eq!(
            block.move_list.level_up[1].level,
            MoveLevel::Label("Evo".to_string())
        );
    }

    #[test]
    fn missing_content_is_an_error() {
        let response = json!({ "choices": [] });
        assert!(parse_extraction(&response).is_err());
    }

    #[test]
    fn malformed_content_is_an_error() {
        assert!(parse_extraction(&completion("not json")).is_err());
    }

    #[test]
    fn schema_closes_over_every_field() {
        let schema = stat_block_schema();
        assert_eq!(schema["additionalProperties"], json!(false));
        let required = schema["required"].as_array().unwrap();
        for key in [
            "name",
            "types",
            "baseStats",
            "abilities",
            "evolution",
            "capabilities",
            "sizeInformation",
            "breedingInformation",
            "diets",
            "habitats",
            "skills",
            "moveList",
        ] {
            assert!(required.contains(&json!(key)), "missing {key}");
        }
    }
}
