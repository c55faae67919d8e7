//! Explicit registry of named analyses

use crate::analysis::{AnalysisFn, class_distribution, color_histogram, mosaic, size_distribution};
use crate::io::error::{Result, invalid_parameter};

/// Name under which the mosaic analysis is registered
pub const MOSAIC: &str = "mosaic";
/// Name under which the class distribution analysis is registered
pub const CLASS_DISTRIBUTION: &str = "class_distribution";
/// Name under which the size distribution analysis is registered
pub const SIZE_DISTRIBUTION: &str = "size_distribution";
/// Name under which the color histogram analysis is registered
pub const COLOR_HISTOGRAM: &str = "color_histogram";

/// A named analysis
#[derive(Debug, Clone, Copy)]
pub struct RegisteredAnalysis {
    /// Unique name, also used as the figure file name
    pub name: &'static str,
    /// Analysis entry point
    pub run: AnalysisFn,
}

/// Ordered set of analyses the runner executes
#[derive(Debug, Clone, Default)]
pub struct AnalysisRegistry {
    entries: Vec<RegisteredAnalysis>,
}

impl AnalysisRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the four built-in analyses in display order
    ///
    /// # Errors
    ///
    /// Never fails in practice; registration errors are propagated for
    /// consistency with [`AnalysisRegistry::register`].
    pub fn with_default_analyses() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(MOSAIC, mosaic::analyze)?;
        registry.register(CLASS_DISTRIBUTION, class_distribution::analyze)?;
        registry.register(SIZE_DISTRIBUTION, size_distribution::analyze)?;
        registry.register(COLOR_HISTOGRAM, color_histogram::analyze)?;
        Ok(registry)
    }

    /// Append an analysis
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the name is empty or taken.
    pub fn register(&mut self, name: &'static str, run: AnalysisFn) -> Result<()> {
        if name.is_empty() {
            return Err(invalid_parameter("analysis", &name, &"name must not be empty"));
        }
        if self.get(name).is_some() {
            return Err(invalid_parameter("analysis", &name, &"already registered"));
        }
        self.entries.push(RegisteredAnalysis { name, run });
        Ok(())
    }

    /// Keep only the named analyses, preserving registration order
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error naming the first unknown analysis.
    pub fn retain<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if let Some(unknown) = names
            .iter()
            .map(AsRef::as_ref)
            .find(|name| self.get(name).is_none())
        {
            return Err(invalid_parameter(
                "analyses",
                &unknown,
                &format!("unknown analysis, expected one of: {}", self.names().join(", ")),
            ));
        }

        self.entries
            .retain(|entry| names.iter().any(|name| name.as_ref() == entry.name));
        Ok(())
    }

    /// Look up an analysis by name
    pub fn get(&self, name: &str) -> Option<&RegisteredAnalysis> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Registered names in order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|entry| entry.name).collect()
    }

    /// Iterate over registered analyses in order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredAnalysis> {
        self.entries.iter()
    }

    /// Number of registered analyses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
