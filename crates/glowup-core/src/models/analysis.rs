//! Analysis record supplied by the external photo-analysis provider.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Reads an explicit `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single named score produced by the analysis provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MetricReading {
    /// Metric name, e.g. `skin_texture` or "Lighting Quality"; readings
    /// without a key are ignored
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    /// Score on a 0-10 scale; missing when the provider could not rate it
    #[serde(default)]
    pub score: Option<f64>,
    /// Free-text description or feedback for the score
    #[serde(default)]
    pub notes: Option<String>,
}

impl MetricReading {
    /// Convenience constructor for a scored metric with notes.
    pub fn new(key: impl Into<String>, score: f64, notes: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            score: Some(score),
            notes: Some(notes.into()),
        }
    }
}

/// Completed analysis of one photo scan.
///
/// Every field may be absent; a degraded analysis with no usable scores is
/// still a valid input and produces the maintenance week.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AnalysisResult {
    /// Provider-side identifier of the scan
    #[serde(default)]
    pub id: Option<String>,
    /// Named metric scores, in provider order
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: Vec<MetricReading>,
    /// Detected face shape (e.g. "oval")
    #[serde(default)]
    pub face_shape: Option<String>,
    /// Detected skin undertone (e.g. "warm")
    #[serde(default)]
    pub skin_undertone: Option<String>,
    /// Detected hair color
    #[serde(default)]
    pub hair_color: Option<String>,
    /// Colors that flatter the subject
    #[serde(default, deserialize_with = "null_as_default")]
    pub best_colors: Vec<String>,
    /// Colors the subject should avoid
    #[serde(default, deserialize_with = "null_as_default")]
    pub avoid_colors: Vec<String>,
    /// Recommended makeup style
    #[serde(default)]
    pub makeup_style: Option<String>,
}

impl AnalysisResult {
    /// Looks up a metric by key, ignoring case, spaces, hyphens and
    /// underscores.
    pub fn metric(&self, key: &str) -> Option<&MetricReading> {
        let wanted = normalize_key(key);
        self.metrics.iter().find(|m| normalize_key(&m.key) == wanted)
    }

    /// Returns a copy with the given metric score set (or added).
    pub fn with_metric(mut self, key: &str, score: f64, notes: &str) -> Self {
        let wanted = normalize_key(key);
        match self
            .metrics
            .iter_mut()
            .find(|m| normalize_key(&m.key) == wanted)
        {
            Some(existing) => {
                existing.score = Some(score);
                existing.notes = Some(notes.to_string());
            }
            None => self.metrics.push(MetricReading::new(key, score, notes)),
        }
        self
    }
}

/// Canonical form of a metric key: lowercase words joined by underscores.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
