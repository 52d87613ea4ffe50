//! # Design Studies
//!
//! A `Study` bundles one configuration with the result of optimizing it.
//! Studies serialize to `.jack` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (version, title, timestamps)
//! ├── config: JackConfig (load case, materials, targets, solver)
//! └── result: Option<OptimizationResult> (absent until solved)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use jack_core::config::JackConfig;
//! use jack_core::study::Study;
//!
//! let study = Study::new("3000 lb steel jack", JackConfig::default());
//! assert!(study.result.is_none());
//!
//! let json = serde_json::to_string_pretty(&study).unwrap();
//! assert!(json.contains("3000 lb steel jack"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::JackConfig;
use crate::errors::CalcResult;
use crate::optimization::{self, OptimizationResult};

/// Current schema version for `.jack` files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// File extension for saved studies
pub const STUDY_EXTENSION: &str = "jack";

/// Root container written to study files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    /// Version and bookkeeping
    pub meta: StudyMetadata,

    /// Problem definition
    pub config: JackConfig,

    /// Latest optimization result, if the study has been solved
    #[serde(default)]
    pub result: Option<OptimizationResult>,
}

impl Study {
    /// Create an unsolved study.
    pub fn new(title: impl Into<String>, config: JackConfig) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                title: title.into(),
                created: now,
                modified: now,
            },
            config,
            result: None,
        }
    }

    /// Optimize the configuration and store the result.
    ///
    /// A non-converged run is stored like any other; the returned reference
    /// lets the caller inspect `success`.
    pub fn solve(&mut self) -> CalcResult<&OptimizationResult> {
        let result = optimization::solve(&self.config)?;
        self.touch();
        Ok(&*self.result.insert(result))
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Study {
    fn default() -> Self {
        Study::new("", JackConfig::default())
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Free-form title
    pub title: String,

    /// When the study was created
    pub created: DateTime<Utc>,

    /// When the study was last modified
    pub modified: DateTime<Utc>,
}
