//! Role bindings from TOML (`[roles.*]` sections)

use audit_domain::{ConfigIssue, ConfigIssueCode, ModelRole, RoleBindings};
use serde::{Deserialize, Serialize};

/// One `[roles.<role>]` table. Unset keys keep the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoleConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRolesConfig {
    pub primary: FileRoleConfig,
    pub reasoning: FileRoleConfig,
    pub detail: FileRoleConfig,
    pub judge: FileRoleConfig,
}

impl FileRolesConfig {
    pub fn get(&self, role: ModelRole) -> &FileRoleConfig {
        match role {
            ModelRole::Primary => &self.primary,
            ModelRole::Reasoning => &self.reasoning,
            ModelRole::Detail => &self.detail,
            ModelRole::Judge => &self.judge,
        }
    }

    fn get_mut(&mut self, role: ModelRole) -> &mut FileRoleConfig {
        match role {
            ModelRole::Primary => &mut self.primary,
            ModelRole::Reasoning => &mut self.reasoning,
            ModelRole::Detail => &mut self.detail,
            ModelRole::Judge => &mut self.judge,
        }
    }

    /// Apply `<ROLE>_LLM_PROVIDER`, `<ROLE>_LLM_MODEL` and
    /// `<ROLE>_LLM_TEMPERATURE` from `lookup`. Unparsable temperatures are
    /// ignored and returned as issues; loading runs before logging is up.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Vec<ConfigIssue>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = Vec::new();
        for role in ModelRole::ALL {
            let var = |key: &str| format!("{}_LLM_{}", role.env_prefix(), key);
            let value = |key: &str| lookup(&var(key)).filter(|v| !v.trim().is_empty());
            let config = self.get_mut(role);

            if let Some(provider) = value("PROVIDER") {
                config.provider = Some(provider.trim().to_string());
            }
            if let Some(model) = value("MODEL") {
                config.model = Some(model.trim().to_string());
            }
            if let Some(raw) = value("TEMPERATURE") {
                match raw.trim().parse::<f32>() {
                    Ok(temperature) => config.temperature = Some(temperature),
                    Err(_) => issues.push(ConfigIssue::warning(
                        ConfigIssueCode::InvalidEnvValue {
                            var: var("TEMPERATURE"),
                            value: raw.clone(),
                        },
                        format!("Ignoring {}: '{}' is not a number", var("TEMPERATURE"), raw),
                    )),
                }
            }
        }
        issues
    }

    /// Resolve against the built-in defaults.
    pub fn to_role_bindings(&self) -> RoleBindings {
        let mut bindings = RoleBindings::default();
        for role in ModelRole::ALL {
            let file = self.get(role);
            let binding = bindings.get_mut(role);
            if let Some(provider) = &file.provider {
                binding.provider = provider.clone();
            }
            if let Some(model) = &file.model {
                binding.model = model.clone();
            }
            if let Some(temperature) = file.temperature {
                binding.temperature = temperature;
            }
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_role_keeps_defaults() {
        let roles: FileRolesConfig = toml::from_str(
            r#"
[judge]
provider = "anthropic"
model = "claude-sonnet-4-5"
"#,
        )
        .unwrap();

        let bindings = roles.to_role_bindings();
        assert_eq!(bindings.judge.provider, "anthropic");
        assert_eq!(bindings.judge.model, "claude-sonnet-4-5");
        assert_eq!(bindings.judge.temperature, 0.0);
        assert_eq!(bindings.reasoning.provider, "openai");
        assert_eq!(bindings.reasoning.temperature, 0.3);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PRIMARY_LLM_PROVIDER", "groq"),
            ("PRIMARY_LLM_MODEL", "llama-3.3-70b-versatile"),
            ("DETAIL_LLM_TEMPERATURE", "0.25"),
            ("JUDGE_LLM_TEMPERATURE", "warm"),
            ("REASONING_LLM_MODEL", ""),
        ]);
        let mut roles = FileRolesConfig::default();
        let issues = roles.apply_env_overrides(|name| env.get(name).map(|v| v.to_string()));

        let bindings = roles.to_role_bindings();
        assert_eq!(bindings.primary.provider, "groq");
        assert_eq!(bindings.primary.model, "llama-3.3-70b-versatile");
        assert_eq!(bindings.detail.temperature, 0.25);
        assert_eq!(bindings.judge.temperature, 0.0);
        assert_eq!(bindings.reasoning.model, "gpt-4o");

        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::InvalidEnvValue {
                var: "JUDGE_LLM_TEMPERATURE".to_string(),
                value: "warm".to_string(),
            }
        );
        assert!(issues[0].message.contains("JUDGE_LLM_TEMPERATURE"));
    }
}
