//! Named feature vectors and batch matrices

use ndarray::Array2;
use serde::{Serialize, Deserialize};
use crate::{CascadeError, Result};

/// Insertion-ordered mapping from feature name to value
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    /// Create an empty vector
    pub fn new() -> Self {
        FeatureVector { entries: Vec::new() }
    }

    /// Set a feature, overwriting an existing value in place
    pub fn insert(&mut self, name: &str, value: f64) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Merge named values in order
    pub fn extend<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (name, value) in values {
            self.insert(name, value);
        }
    }

    /// Look up a feature by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter()
            .find(|(n, _)| n == name)
            .map(|&(_, v)| v)
    }

    /// Feature names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dense batch of feature vectors sharing one column order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    /// Column names
    pub names: Vec<String>,
    /// Values [num_samples, num_features]
    pub values: Array2<f64>,
}

impl FeatureMatrix {
    /// Stack vectors into rows using the name order of the first vector
    pub fn from_vectors(vectors: &[FeatureVector]) -> Result<Self> {
        let names: Vec<String> = match vectors.first() {
            Some(first) => first.names().map(str::to_string).collect(),
            None => Vec::new(),
        };

        let mut values = Array2::zeros((vectors.len(), names.len()));
        for (i, vector) in vectors.iter().enumerate() {
            for (j, name) in names.iter().enumerate() {
                values[[i, j]] = vector.get(name)
                    .ok_or_else(|| CascadeError::MissingFeature(name.clone()))?;
            }
        }

        Ok(FeatureMatrix { names, values })
    }

    /// Number of rows
    pub fn num_samples(&self) -> usize {
        self.values.nrows()
    }

    /// Number of columns
    pub fn num_features(&self) -> usize {
        self.values.ncols()
    }

    /// Keep only the rows whose mask entry is true
    pub fn select_rows(&self, mask: &[bool]) -> Array2<f64> {
        let rows: Vec<usize> = mask.iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        self.values.select(ndarray::Axis(0), &rows)
    }
}
