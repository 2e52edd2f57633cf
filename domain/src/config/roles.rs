//! Role → provider/model bindings

use crate::audit::criterion::ModelRole;

/// Provider + model + temperature for one role.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBinding {
    /// Provider identifier as configured (parsed when the client is built)
    pub provider: String,
    pub model: String,
    pub temperature: f32,
}

impl RoleBinding {
    pub fn new(provider: impl Into<String>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            temperature,
        }
    }
}

/// Bindings for all four roles.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBindings {
    pub primary: RoleBinding,
    pub reasoning: RoleBinding,
    pub detail: RoleBinding,
    pub judge: RoleBinding,
}

impl RoleBindings {
    pub const DEFAULT_PROVIDER: &'static str = "openai";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o";

    pub fn get(&self, role: ModelRole) -> &RoleBinding {
        match role {
            ModelRole::Primary => &self.primary,
            ModelRole::Reasoning => &self.reasoning,
            ModelRole::Detail => &self.detail,
            ModelRole::Judge => &self.judge,
        }
    }

    pub fn get_mut(&mut self, role: ModelRole) -> &mut RoleBinding {
        match role {
            ModelRole::Primary => &mut self.primary,
            ModelRole::Reasoning => &mut self.reasoning,
            ModelRole::Detail => &mut self.detail,
            ModelRole::Judge => &mut self.judge,
        }
    }

    pub fn default_temperature(role: ModelRole) -> f32 {
        match role {
            ModelRole::Primary | ModelRole::Judge => 0.0,
            ModelRole::Reasoning => 0.3,
            ModelRole::Detail => 0.1,
        }
    }

    fn default_binding(role: ModelRole) -> RoleBinding {
        RoleBinding::new(
            Self::DEFAULT_PROVIDER,
            Self::DEFAULT_MODEL,
            Self::default_temperature(role),
        )
    }
}

impl Default for RoleBindings {
    fn default() -> Self {
        Self {
            primary: Self::default_binding(ModelRole::Primary),
            reasoning: Self::default_binding(ModelRole::Reasoning),
            detail: Self::default_binding(ModelRole::Detail),
            judge: Self::default_binding(ModelRole::Judge),
        }
    }
}
