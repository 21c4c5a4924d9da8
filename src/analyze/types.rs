//! Result types produced by the analysis pipeline.

use serde::{Deserialize, Serialize};

use super::Language;

/// Dominant sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized sentiment scores. The three scores sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub label: SentimentLabel,
}

impl SentimentResult {
    /// Result when no dictionary term matched.
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            negative: 0.0,
            neutral: 1.0,
            label: SentimentLabel::Neutral,
        }
    }

    /// Score of the dominant label.
    pub fn dominant_score(&self) -> f64 {
        match self.label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
        }
    }
}

/// A sector/theme and its score in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorScore {
    pub sector: String,
    pub score: f64,
}

/// Fixed entity categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Organization,
    Person,
    GeoPolitical,
    Monetary,
    Date,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 5] = [
        EntityCategory::Organization,
        EntityCategory::Person,
        EntityCategory::GeoPolitical,
        EntityCategory::Monetary,
        EntityCategory::Date,
    ];

    /// Route a raw provider label. `LOC` folds into geo-political;
    /// unrecognized labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ORG" => Some(EntityCategory::Organization),
            "PERSON" | "PER" => Some(EntityCategory::Person),
            "GPE" | "LOC" => Some(EntityCategory::GeoPolitical),
            "MONEY" => Some(EntityCategory::Monetary),
            "DATE" => Some(EntityCategory::Date),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::Organization => "ORG",
            EntityCategory::Person => "PERSON",
            EntityCategory::GeoPolitical => "GPE",
            EntityCategory::Monetary => "MONEY",
            EntityCategory::Date => "DATE",
        }
    }
}

/// Distinct entity surface strings per category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBag {
    #[serde(rename = "ORG")]
    pub organizations: Vec<String>,
    #[serde(rename = "PERSON")]
    pub persons: Vec<String>,
    #[serde(rename = "GPE")]
    pub geopolitical: Vec<String>,
    #[serde(rename = "MONEY")]
    pub monetary: Vec<String>,
    #[serde(rename = "DATE")]
    pub dates: Vec<String>,
}

impl EntityBag {
    pub fn get(&self, category: EntityCategory) -> &[String] {
        match category {
            EntityCategory::Organization => &self.organizations,
            EntityCategory::Person => &self.persons,
            EntityCategory::GeoPolitical => &self.geopolitical,
            EntityCategory::Monetary => &self.monetary,
            EntityCategory::Date => &self.dates,
        }
    }

    fn get_mut(&mut self, category: EntityCategory) -> &mut Vec<String> {
        match category {
            EntityCategory::Organization => &mut self.organizations,
            EntityCategory::Person => &mut self.persons,
            EntityCategory::GeoPolitical => &mut self.geopolitical,
            EntityCategory::Monetary => &mut self.monetary,
            EntityCategory::Date => &mut self.dates,
        }
    }

    /// Append `text` unless the category already holds the exact string.
    /// Returns whether it was added.
    pub fn insert(&mut self, category: EntityCategory, text: &str) -> bool {
        let list = self.get_mut(category);
        if list.iter().any(|t| t == text) {
            return false;
        }
        list.push(text.to_string());
        true
    }

    /// All surface strings, category by category.
    pub fn iter_all(&self) -> impl Iterator<Item = &String> {
        EntityCategory::ALL
            .into_iter()
            .flat_map(move |c| self.get(c).iter())
    }

    pub fn is_empty(&self) -> bool {
        EntityCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    pub fn len(&self) -> usize {
        EntityCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }
}

/// Combined analysis of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub language: Language,
    pub sentiment: SentimentResult,
    /// Dominant sentiment score, 3 decimals.
    pub confidence: f64,
    pub sectors: Vec<SectorScore>,
    pub primary_sector: Option<String>,
    pub entities: EntityBag,
    pub tickers: Vec<String>,
    pub keywords: Vec<String>,
}

/// A news record for batch summarization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
}

/// One summary emitted by a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: String,
    pub summary: String,
    /// Whether the batch budget cut this summary short.
    #[serde(default)]
    pub truncated: bool,
}
