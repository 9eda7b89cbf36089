use crate::console_interface::parse_level;
use crate::core::{Campaign, CampaignError, LevelDefinition, LevelLayout};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_CAMPAIGN: &str = include_str!("../levels/builtin.json");

/// A level in a campaign file: either a tile code matrix or a text drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSource {
    Codes(LevelDefinition),
    Ascii { name: String, ascii: String },
}

impl LevelSource {
    pub fn name(&self) -> &str {
        match self {
            LevelSource::Codes(definition) => &definition.name,
            LevelSource::Ascii { name, .. } => name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignFile {
    pub levels: Vec<LevelSource>,
}

impl CampaignFile {
    pub fn from_json(text: &str) -> anyhow::Result<CampaignFile> {
        serde_json::from_str(text).context("parsing campaign json")
    }

    pub fn load(path: &Path) -> anyhow::Result<CampaignFile> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading campaign {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in campaign {}", path.display()))
    }

    pub fn builtin() -> CampaignFile {
        match Self::from_json(BUILTIN_CAMPAIGN) {
            Ok(file) => file,
            Err(err) => unreachable!("built-in campaign does not parse: {err:#}"),
        }
    }

    pub fn layouts(&self) -> Result<Vec<(String, LevelLayout)>, CampaignError> {
        self.levels
            .iter()
            .enumerate()
            .map(|(index, source)| {
                let layout = match source {
                    LevelSource::Codes(definition) => definition.layout(),
                    LevelSource::Ascii { ascii, .. } => parse_level(ascii),
                };
                layout
                    .map(|layout| (source.name().to_string(), layout))
                    .map_err(|source_err| CampaignError::Level {
                        index,
                        name: source.name().to_string(),
                        source: source_err,
                    })
            })
            .collect()
    }

    pub fn into_campaign(self) -> Result<Campaign, CampaignError> {
        Campaign::from_layouts(self.layouts()?)
    }
}
