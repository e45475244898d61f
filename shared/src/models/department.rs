//! Department Contact Model

use serde::{Deserialize, Serialize};

/// Social media handles for a municipal department
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SocialHandles {
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// A canonical municipal department contact record.
///
/// Static reference data, immutable at runtime; used only for lookup by
/// the department matcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentContact {
    /// Category keywords for fallback matching
    pub keywords: Vec<String>,
    /// Short names the classifier is likely to emit ("jra", "pikitup", ...)
    pub aliases: Vec<String>,
    /// Display name, may carry a parenthetical suffix
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub sms: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub social: SocialHandles,
}

impl DepartmentContact {
    /// Display name with any parenthetical suffix stripped, case-folded,
    /// for substring matching against classifier suggestions.
    pub fn bare_name(&self) -> String {
        self.name
            .split('(')
            .next()
            .unwrap_or(&self.name)
            .trim()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_strips_parenthetical() {
        let contact = DepartmentContact {
            keywords: vec![],
            aliases: vec![],
            name: "Johannesburg Roads Agency (JRA)".to_string(),
            email: "hotline@jra.org.za".to_string(),
            phone: "0860 562 874".to_string(),
            sms: None,
            website: None,
            social: SocialHandles::default(),
        };
        assert_eq!(contact.bare_name(), "johannesburg roads agency");
    }
}
