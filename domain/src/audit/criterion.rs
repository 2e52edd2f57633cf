//! Audit criteria and model roles

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named slot in the pipeline, bound to one provider + model + temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelRole {
    /// Factual extraction (conversation structuring)
    Primary,
    /// Nuanced scoring
    Reasoning,
    /// Thorough checking
    Detail,
    /// Second opinion on the initial report
    Judge,
}

impl ModelRole {
    pub const ALL: [ModelRole; 4] = [
        ModelRole::Primary,
        ModelRole::Reasoning,
        ModelRole::Detail,
        ModelRole::Judge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelRole::Primary => "primary",
            ModelRole::Reasoning => "reasoning",
            ModelRole::Detail => "detail",
            ModelRole::Judge => "judge",
        }
    }

    /// Prefix of the role's environment variables (`PRIMARY_LLM_MODEL`, ...)
    pub fn env_prefix(&self) -> &'static str {
        match self {
            ModelRole::Primary => "PRIMARY",
            ModelRole::Reasoning => "REASONING",
            ModelRole::Detail => "DETAIL",
            ModelRole::Judge => "JUDGE",
        }
    }
}

impl fmt::Display for ModelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        ModelRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownRole(s.to_string()))
    }
}

/// One checklist item a conversation is audited against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditCriterion {
    /// Unique key, echoed back by the model as `step_id`
    pub id: String,
    pub title: String,
    pub purpose: String,
    /// Instruction text embedded in the scoring prompt
    pub prompt: String,
    pub is_critical: bool,
    /// Point value used as the weight in the overall score
    pub weight: f64,
    pub category: String,
    pub role: ModelRole,
}

impl AuditCriterion {
    pub fn new(id: impl Into<String>, title: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            purpose: String::new(),
            prompt: String::new(),
            is_critical: false,
            weight,
            category: String::new(),
            role: ModelRole::Reasoning,
        }
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_role(mut self, role: ModelRole) -> Self {
        self.role = role;
        self
    }

    pub fn critical(mut self) -> Self {
        self.is_critical = true;
        self
    }

    /// Reject criteria that would corrupt scoring.
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidCriterion {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(invalid("weight must be a finite, non-negative number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Judge".parse::<ModelRole>().unwrap(), ModelRole::Judge);
        assert_eq!(" DETAIL ".parse::<ModelRole>().unwrap(), ModelRole::Detail);
        assert!(matches!(
            "critic".parse::<ModelRole>(),
            Err(DomainError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_role_roundtrip() {
        for role in ModelRole::ALL {
            assert_eq!(role.to_string().parse::<ModelRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_serde_is_snake_case() {
        let json = serde_json::to_string(&ModelRole::Reasoning).unwrap();
        assert_eq!(json, "\"reasoning\"");
    }

    #[test]
    fn test_criterion_builder() {
        let criterion = AuditCriterion::new("limo_offering", "Limo Offering", 5.4)
            .with_category("PNR")
            .with_role(ModelRole::Detail)
            .critical();

        assert!(criterion.is_critical);
        assert_eq!(criterion.category, "PNR");
        assert_eq!(criterion.role, ModelRole::Detail);
        assert!(criterion.validate().is_ok());
    }

    #[test]
    fn test_criterion_validation() {
        assert!(AuditCriterion::new("", "Empty", 1.0).validate().is_err());
        assert!(AuditCriterion::new("a", "Negative", -1.0).validate().is_err());
        assert!(AuditCriterion::new("b", "NaN", f64::NAN).validate().is_err());
        assert!(AuditCriterion::new("c", "Zero", 0.0).validate().is_ok());
    }
}
