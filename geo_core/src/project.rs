//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of site analyses.
//! Projects serialize to `.geo` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: AnalysisSettings (CRR model, classification scheme)
//! └── items: HashMap<Uuid, SiteInput> (one entry per location)
//! ```
//!
//! Only inputs are stored. Results are recomputed on demand with
//! [`Project::evaluate_item`] / [`Project::evaluate_all`].
//!
//! ## Example
//!
//! ```rust
//! use geo_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("25-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{run_pipeline, AnalysisSettings, PipelineReport, SiteInput};
use crate::errors::{CalcError, CalcResult};

/// Current schema version for .geo files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Method settings applied to every item
    #[serde(default)]
    pub settings: AnalysisSettings,

    /// Site inputs, keyed by UUID
    pub items: HashMap<Uuid, SiteInput>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use geo_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: AnalysisSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a site to the project. Returns the UUID assigned to it.
    pub fn add_item(&mut self, item: SiteInput) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a site by UUID.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<SiteInput> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&SiteInput> {
        self.items.get(id)
    }

    /// Run the full analysis for one site with the project settings.
    pub fn evaluate_item(&self, id: &Uuid) -> CalcResult<PipelineReport> {
        let item = self.get_item(id).ok_or_else(|| CalcError::item_not_found(id))?;
        run_pipeline(item, &self.settings)
    }

    /// Run every site, sorted by label.
    ///
    /// Each site's outcome is independent; one bad sample does not stop the rest.
    pub fn evaluate_all(&self) -> Vec<(Uuid, CalcResult<PipelineReport>)> {
        let mut ids: Vec<&Uuid> = self.items.keys().collect();
        ids.sort_by(|a, b| self.items[*a].label.cmp(&self.items[*b].label).then(a.cmp(b)));
        ids.into_iter()
            .map(|id| (*id, run_pipeline(&self.items[id], &self.settings)))
            .collect()
    }

    /// Replace the method settings.
    pub fn set_settings(&mut self, settings: AnalysisSettings) {
        self.settings = settings;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}
