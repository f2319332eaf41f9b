//! Hyperparameters - typed configuration of a single trial

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::ModelFamily;
use crate::Error;

/// Hyperparameter record of one trial.
///
/// The search axes shared by the model families are typed fields; a key the
/// record does not know lands in [`extra`](Self::extra). A missing key reads
/// as `None`, never as an error.
///
/// Only the `type` tag is required. A typed axis whose value has another
/// shape (a list-valued `loss`, a fractional `batch`) is kept verbatim in
/// `extra` and its typed getter returns `None`.
///
/// ## Wire Format
///
/// ```json
/// {"type": "mixture", "num_components": 4, "learning_rate": 0.01, "loss": "adaptive_hinge"}
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct Hyperparameters {
    family: ModelFamily,
    num_components: Option<u32>,
    learning_rate: Option<f64>,
    loss: Option<String>,
    batch: Option<u32>,
    embedding_dim: Option<u32>,
    l2: Option<f64>,
    n_iter: Option<u32>,
    extra: BTreeMap<String, Value>,
}

/// Non-negative integer, accepting integral floats (`4.0`) as search
/// drivers frequently emit them.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(v))
        .map(|v| v as u32)
}

/// Remove `key` from `raw` if `convert` accepts it; a mismatched value stays.
fn take<T>(raw: &mut BTreeMap<String, Value>, key: &str, convert: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = raw.get(key)?;
    if value.is_null() {
        raw.remove(key);
        return None;
    }
    match convert(value) {
        Some(typed) => {
            raw.remove(key);
            Some(typed)
        }
        None => {
            debug!(key, %value, "keeping mistyped hyperparameter as untyped");
            None
        }
    }
}

impl TryFrom<BTreeMap<String, Value>> for Hyperparameters {
    type Error = Error;

    fn try_from(mut raw: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        let tag = raw
            .remove("type")
            .ok_or_else(|| Error::InvalidInput("hyperparameters have no `type` tag".to_string()))?;
        let family = match &tag {
            Value::String(name) => name.parse::<ModelFamily>()?,
            other => {
                return Err(Error::InvalidInput(format!("model family tag is not a string: {other}")))
            }
        };

        Ok(Self {
            family,
            num_components: take(&mut raw, "num_components", as_count),
            learning_rate: take(&mut raw, "learning_rate", Value::as_f64),
            loss: take(&mut raw, "loss", |v| v.as_str().map(str::to_string)),
            batch: take(&mut raw, "batch", as_count),
            embedding_dim: take(&mut raw, "embedding_dim", as_count),
            l2: take(&mut raw, "l2", Value::as_f64),
            n_iter: take(&mut raw, "n_iter", as_count),
            extra: raw,
        })
    }
}

impl Hyperparameters {
    /// Create a record carrying only the family tag.
    #[must_use]
    pub fn new(family: ModelFamily) -> Self {
        Self {
            family,
            num_components: None,
            learning_rate: None,
            loss: None,
            batch: None,
            embedding_dim: None,
            l2: None,
            n_iter: None,
            extra: BTreeMap::new(),
        }
    }

    /// Create a builder for constructing a record with optional axes.
    #[must_use]
    pub fn builder(family: ModelFamily) -> HyperparametersBuilder {
        HyperparametersBuilder::new(family)
    }

    /// Get the model family.
    #[must_use]
    pub const fn family(&self) -> ModelFamily {
        self.family
    }

    /// Get the mixture component count, if the family has one.
    #[must_use]
    pub const fn num_components(&self) -> Option<u32> {
        self.num_components
    }

    /// Get the learning rate.
    #[must_use]
    pub const fn learning_rate(&self) -> Option<f64> {
        self.learning_rate
    }

    /// Get the loss name.
    #[must_use]
    pub fn loss(&self) -> Option<&str> {
        self.loss.as_deref()
    }

    /// Get the minibatch size.
    #[must_use]
    pub const fn batch(&self) -> Option<u32> {
        self.batch
    }

    /// Get the embedding dimension.
    #[must_use]
    pub const fn embedding_dim(&self) -> Option<u32> {
        self.embedding_dim
    }

    /// Get the L2 penalty.
    #[must_use]
    pub const fn l2(&self) -> Option<f64> {
        self.l2
    }

    /// Get the number of training epochs.
    #[must_use]
    pub const fn n_iter(&self) -> Option<u32> {
        self.n_iter
    }

    /// Look up an axis this record has no typed field for.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

/// Builder for `Hyperparameters`.
#[derive(Debug)]
pub struct HyperparametersBuilder {
    inner: Hyperparameters,
}

impl HyperparametersBuilder {
    /// Create a new builder with the required family tag.
    #[must_use]
    pub fn new(family: ModelFamily) -> Self {
        Self {
            inner: Hyperparameters::new(family),
        }
    }

    /// Set the mixture component count.
    #[must_use]
    pub const fn num_components(mut self, num_components: u32) -> Self {
        self.inner.num_components = Some(num_components);
        self
    }

    /// Set the learning rate.
    #[must_use]
    pub const fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.inner.learning_rate = Some(learning_rate);
        self
    }

    /// Set the loss name.
    #[must_use]
    pub fn loss(mut self, loss: impl Into<String>) -> Self {
        self.inner.loss = Some(loss.into());
        self
    }

    /// Set the minibatch size.
    #[must_use]
    pub const fn batch(mut self, batch: u32) -> Self {
        self.inner.batch = Some(batch);
        self
    }

    /// Set the embedding dimension.
    #[must_use]
    pub const fn embedding_dim(mut self, embedding_dim: u32) -> Self {
        self.inner.embedding_dim = Some(embedding_dim);
        self
    }

    /// Set the L2 penalty.
    #[must_use]
    pub const fn l2(mut self, l2: f64) -> Self {
        self.inner.l2 = Some(l2);
        self
    }

    /// Set the number of training epochs.
    #[must_use]
    pub const fn n_iter(mut self, n_iter: u32) -> Self {
        self.inner.n_iter = Some(n_iter);
        self
    }

    /// Attach an untyped axis.
    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.inner.extra.insert(key.into(), value);
        self
    }

    /// Build the `Hyperparameters`.
    #[must_use]
    pub fn build(self) -> Hyperparameters {
        self.inner
    }
}
