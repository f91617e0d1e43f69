//! Resolved link entity: what a clickable element actually renders.

use serde::{Deserialize, Serialize};

/// Browsing context a link opens in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    SameTab,
    #[serde(rename = "_blank")]
    NewTab,
}

impl LinkTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SameTab => "_self",
            Self::NewTab => "_blank",
        }
    }
}

/// Confirmation shown before navigation proceeds.
///
/// The resolver only ever produces [`ConfirmationPolicy::None`] or
/// [`ConfirmationPolicy::LeavingSiteWarning`]. [`ConfirmationPolicy::EmailWarning`]
/// is for callers building a `mailto:` link by hand; the navigation guard
/// applies the email prompt to any `mailto:` destination regardless.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationPolicy {
    #[default]
    None,
    LeavingSiteWarning,
    EmailWarning,
}

/// Concrete navigation data derived from a [`super::LinkDescriptor`].
///
/// Computed fresh per render or request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLink {
    pub href: String,
    pub target: LinkTarget,
    pub confirmation_policy: ConfirmationPolicy,
}

impl ResolvedLink {
    /// Builds a resolved link, falling back to `/` for an empty `href`.
    pub fn new(
        href: impl Into<String>,
        target: LinkTarget,
        confirmation_policy: ConfirmationPolicy,
    ) -> Self {
        let href = href.into();
        Self {
            href: if href.is_empty() { "/".to_string() } else { href },
            target,
            confirmation_policy,
        }
    }

    /// `rel` attribute for the rendered anchor.
    pub fn rel(&self) -> Option<&'static str> {
        match self.target {
            LinkTarget::NewTab => Some("noopener noreferrer"),
            LinkTarget::SameTab => None,
        }
    }
}

impl Default for ResolvedLink {
    fn default() -> Self {
        Self::new("/", LinkTarget::SameTab, ConfirmationPolicy::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_href_defaults_to_root() {
        let link = ResolvedLink::new("", LinkTarget::NewTab, ConfirmationPolicy::None);
        assert_eq!(link.href, "/");
    }

    #[test]
    fn test_rel_only_for_new_tab() {
        let link = ResolvedLink::new("https://x.com", LinkTarget::NewTab, ConfirmationPolicy::None);
        assert_eq!(link.rel(), Some("noopener noreferrer"));
        assert_eq!(ResolvedLink::default().rel(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let link = ResolvedLink::new(
            "https://x.com",
            LinkTarget::NewTab,
            ConfirmationPolicy::LeavingSiteWarning,
        );

        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "href": "https://x.com",
                "target": "_blank",
                "confirmationPolicy": "leavingSiteWarning"
            })
        );
    }
}
