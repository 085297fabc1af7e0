use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::UnknownPlatform;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_newtype!(SessionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Linkedin,
    Twitter,
    Bluesky,
    Threads,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Bluesky,
        Platform::Threads,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Bluesky => "bluesky",
            Platform::Threads => "threads",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Linkedin => "LinkedIn",
            Platform::Twitter => "Twitter/X",
            Platform::Bluesky => "Bluesky",
            Platform::Threads => "Threads",
        }
    }

    /// Length hint written into generation prompts. Threads has no fixed
    /// figure, so its prompts describe the format instead.
    pub fn prompt_limit_hint(self) -> Option<usize> {
        match self {
            Platform::Linkedin => Some(1300),
            Platform::Twitter => Some(280),
            Platform::Bluesky => Some(300),
            Platform::Threads => None,
        }
    }

    /// Publishing limit used by formatters and previews. Not enforced here.
    pub fn char_limit(self) -> usize {
        match self {
            Platform::Linkedin => 1300,
            Platform::Twitter => 280,
            Platform::Bluesky => 300,
            Platform::Threads => 500,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == normalized)
            .ok_or_else(|| UnknownPlatform(raw.to_string()))
    }
}

/// One-click refinement instructions offered next to the free-form box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetInstruction {
    MoreEngaging,
    AddStatistics,
    MoreCasual,
    CallToAction,
    TrendingTopics,
    Storytelling,
}

impl PresetInstruction {
    pub const ALL: [PresetInstruction; 6] = [
        PresetInstruction::MoreEngaging,
        PresetInstruction::AddStatistics,
        PresetInstruction::MoreCasual,
        PresetInstruction::CallToAction,
        PresetInstruction::TrendingTopics,
        PresetInstruction::Storytelling,
    ];

    pub fn text(self) -> &'static str {
        match self {
            PresetInstruction::MoreEngaging => {
                "Make this content more engaging and attention-grabbing while maintaining professionalism"
            }
            PresetInstruction::AddStatistics => {
                "Add relevant statistics or data points to strengthen the arguments"
            }
            PresetInstruction::MoreCasual => {
                "Make the tone more casual and conversational while keeping the key insights"
            }
            PresetInstruction::CallToAction => {
                "Add a compelling call-to-action that encourages audience engagement"
            }
            PresetInstruction::TrendingTopics => {
                "Incorporate current trending topics or recent developments in this field"
            }
            PresetInstruction::Storytelling => {
                "Transform this into a more narrative-driven format with storytelling elements"
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PresetInstruction::MoreEngaging => "more-engaging",
            PresetInstruction::AddStatistics => "add-statistics",
            PresetInstruction::MoreCasual => "more-casual",
            PresetInstruction::CallToAction => "call-to-action",
            PresetInstruction::TrendingTopics => "trending-topics",
            PresetInstruction::Storytelling => "storytelling",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        PresetInstruction::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(label))
    }
}

/// Kind of post requested when drafting from a topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    NewsSummary,
    TrendAnalysis,
    DeepDive,
    Tip,
    Opinion,
    Analysis,
    Guide,
    Comparison,
    CaseStudy,
    Tutorial,
    Review,
    Custom(String),
}

impl ContentType {
    /// Maps a free-form label onto a known kind; anything else is kept as a
    /// custom label.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().replace(' ', "_").as_str() {
            "news_summary" => ContentType::NewsSummary,
            "trend_analysis" => ContentType::TrendAnalysis,
            "deep_dive" => ContentType::DeepDive,
            "tip" => ContentType::Tip,
            "opinion" => ContentType::Opinion,
            "analysis" => ContentType::Analysis,
            "guide" => ContentType::Guide,
            "comparison" => ContentType::Comparison,
            "case_study" => ContentType::CaseStudy,
            "tutorial" => ContentType::Tutorial,
            "review" => ContentType::Review,
            _ => ContentType::Custom(label.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ContentType::NewsSummary => "news summary",
            ContentType::TrendAnalysis => "trend analysis",
            ContentType::DeepDive => "deep dive",
            ContentType::Tip => "tip",
            ContentType::Opinion => "opinion",
            ContentType::Analysis => "analysis",
            ContentType::Guide => "guide",
            ContentType::Comparison => "comparison",
            ContentType::CaseStudy => "case study",
            ContentType::Tutorial => "tutorial",
            ContentType::Review => "review",
            ContentType::Custom(label) => label,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
