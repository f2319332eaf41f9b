//! Model families and the model classes that group them in reports

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Model family tag carried by every trial.
///
/// The serialized form is the snake_case tag written by the search driver
/// (`"lstm"`, `"embedding_mixture"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Average-pooling sequence baseline.
    Pooling,
    /// Plain LSTM sequence model.
    Lstm,
    /// Projection mixture (sequence: Mixture-LSTM; factorization: Projection Mixture).
    Mixture,
    /// Second-generation projection mixture.
    Mixture2,
    /// Projection mixture with custom initialization.
    MixtureInit,
    /// Linear mixture.
    LinearMixture,
    /// Mixture with a diversity penalty.
    DiversifiedMixture,
    /// Diversified mixture with fixed penalty weight.
    DiversifiedMixtureFixed,
    /// Mixture over separate embedding tables.
    EmbeddingMixture,
    /// Bilinear factorization baseline.
    Bilinear,
}

impl ModelFamily {
    /// Every known family, in reporting order.
    pub const ALL: [Self; 10] = [
        Self::Pooling,
        Self::Lstm,
        Self::Mixture,
        Self::Mixture2,
        Self::MixtureInit,
        Self::LinearMixture,
        Self::DiversifiedMixture,
        Self::DiversifiedMixtureFixed,
        Self::EmbeddingMixture,
        Self::Bilinear,
    ];

    /// Serialized tag of this family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pooling => "pooling",
            Self::Lstm => "lstm",
            Self::Mixture => "mixture",
            Self::Mixture2 => "mixture2",
            Self::MixtureInit => "mixture_init",
            Self::LinearMixture => "linear_mixture",
            Self::DiversifiedMixture => "diversified_mixture",
            Self::DiversifiedMixtureFixed => "diversified_mixture_fixed",
            Self::EmbeddingMixture => "embedding_mixture",
            Self::Bilinear => "bilinear",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown model family: {s}")))
    }
}

/// A named model as it appears in a report row or plot legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelEntry {
    /// Display name.
    pub label: &'static str,
    /// Family whose trials back this row.
    pub family: ModelFamily,
}

impl ModelEntry {
    const fn new(label: &'static str, family: ModelFamily) -> Self {
        Self { label, family }
    }
}

/// The two classes of models compared in every report.
///
/// Each class has its own result set (one search variant) and its own
/// sub-table / plot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelClass {
    /// Sequence-based recommenders.
    Sequence,
    /// Matrix-factorization recommenders.
    Factorization,
}

const SEQUENCE_MODELS: [ModelEntry; 2] = [
    ModelEntry::new("LSTM", ModelFamily::Lstm),
    ModelEntry::new("Mixture-LSTM", ModelFamily::Mixture),
];

const FACTORIZATION_MODELS: [ModelEntry; 3] = [
    ModelEntry::new("Bilinear", ModelFamily::Bilinear),
    ModelEntry::new("Projection Mixture", ModelFamily::Mixture),
    ModelEntry::new("Embedding Mixture", ModelFamily::EmbeddingMixture),
];

impl ModelClass {
    /// Both classes, in report order.
    pub const ALL: [Self; 2] = [Self::Sequence, Self::Factorization];

    /// Sub-table caption for this class.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::Sequence => "Sequence models",
            Self::Factorization => "Factorization models",
        }
    }

    /// Models compared within this class, in row / legend order.
    #[must_use]
    pub const fn models(self) -> &'static [ModelEntry] {
        match self {
            Self::Sequence => &SEQUENCE_MODELS,
            Self::Factorization => &FACTORIZATION_MODELS,
        }
    }

    /// The mixture family compared in the component-count table.
    #[must_use]
    pub const fn mixture_family(self) -> ModelFamily {
        match self {
            Self::Sequence => ModelFamily::Mixture,
            Self::Factorization => ModelFamily::EmbeddingMixture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_tag_roundtrip() {
        for family in ModelFamily::ALL {
            assert_eq!(family.as_str().parse::<ModelFamily>().unwrap(), family);
        }
    }

    #[test]
    fn test_family_unknown_tag() {
        let err = "transformer".parse::<ModelFamily>().unwrap_err();
        assert!(err.to_string().contains("unknown model family"));
    }

    #[test]
    fn test_family_serde_tag() {
        let json = serde_json::to_string(&ModelFamily::DiversifiedMixtureFixed).unwrap();
        assert_eq!(json, "\"diversified_mixture_fixed\"");
    }

    #[test]
    fn test_model_class_layout() {
        let labels: Vec<_> = ModelClass::Factorization
            .models()
            .iter()
            .map(|m| m.label)
            .collect();
        assert_eq!(labels, ["Bilinear", "Projection Mixture", "Embedding Mixture"]);
        assert_eq!(ModelClass::Sequence.mixture_family(), ModelFamily::Mixture);
    }
}
