//! Boot-status request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Request payload for a single boot module check.
#[must_use]
#[derive(Debug, Default, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckBootModule {
    /// Registered module name, such as `ATOM_CORE` or `MEMORY_ENGINE`.
    pub module: Option<String>,
}

impl CheckBootModule {
    /// The module name exactly as sent, if present and not empty.
    ///
    /// Names are matched verbatim, so surrounding whitespace makes a name
    /// unregistered rather than missing.
    pub fn module_name(&self) -> Option<&str> {
        self.module.as_deref().filter(|module| !module.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_is_missing() {
        let request = CheckBootModule {
            module: Some(String::new()),
        };
        assert_eq!(request.module_name(), None);
        assert_eq!(CheckBootModule::default().module_name(), None);
    }

    #[test]
    fn module_name_is_not_trimmed() {
        let request = CheckBootModule {
            module: Some(" ATOM_CORE ".to_owned()),
        };
        assert_eq!(request.module_name(), Some(" ATOM_CORE "));
    }
}
