//! Criteria file loader.
//!
//! Reads the category-grouped JSON criteria file. Loading never fails: a
//! missing or malformed file yields an empty criteria set, and invalid
//! entries are skipped, each with a warning.

use audit_domain::{AuditCriterion, ModelRole};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CriteriaFile {
    #[serde(default)]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    criteria: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CriterionEntry {
    id: String,
    title: String,
    #[serde(default)]
    purpose: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    is_critical: bool,
    #[serde(alias = "score")]
    weight: f64,
    #[serde(default)]
    model: Option<String>,
}

impl CriterionEntry {
    fn into_criterion(self, category: &str) -> Result<AuditCriterion, String> {
        let role = match self.model.as_deref() {
            Some(model) => model.parse::<ModelRole>().map_err(|e| e.to_string())?,
            None => ModelRole::Reasoning,
        };

        let mut criterion = AuditCriterion::new(self.id, self.title, self.weight)
            .with_purpose(self.purpose)
            .with_prompt(self.prompt)
            .with_category(category)
            .with_role(role);
        if self.is_critical {
            criterion = criterion.critical();
        }

        criterion.validate().map_err(|e| e.to_string())?;
        Ok(criterion)
    }
}

pub struct CriteriaLoader;

impl CriteriaLoader {
    /// Load criteria from a JSON file.
    pub fn load(path: &Path) -> Vec<AuditCriterion> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(
                    "Could not read criteria file {}: {}; auditing with no criteria",
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let criteria = Self::parse(&contents);
        debug!(
            "Loaded {} criteria from {}",
            criteria.len(),
            path.display()
        );
        criteria
    }

    /// Parse criteria JSON, in file order.
    pub fn parse(json: &str) -> Vec<AuditCriterion> {
        let file: CriteriaFile = match serde_json::from_str(json) {
            Ok(file) => file,
            Err(e) => {
                warn!("Malformed criteria file: {}; auditing with no criteria", e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut criteria = Vec::new();

        for category in file.categories {
            for (index, raw) in category.criteria.into_iter().enumerate() {
                let criterion = serde_json::from_value::<CriterionEntry>(raw)
                    .map_err(|e| e.to_string())
                    .and_then(|entry| entry.into_criterion(&category.name));

                match criterion {
                    Ok(criterion) if !seen.insert(criterion.id.clone()) => {
                        warn!(
                            "Duplicate criterion id '{}' in category '{}'; keeping the first",
                            criterion.id, category.name
                        );
                    }
                    Ok(criterion) => criteria.push(criterion),
                    Err(reason) => warn!(
                        "Skipping criterion #{} in category '{}': {}",
                        index + 1,
                        category.name,
                        reason
                    ),
                }
            }
        }

        criteria
    }
}
