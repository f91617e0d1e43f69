//! DTOs for link resolution.

use serde::Serialize;

use crate::domain::entities::{ConfirmationPolicy, LinkTarget, ResolvedLink};

/// Resolved link plus the anchor attributes a renderer needs.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResponse {
    pub href: String,
    pub target: LinkTarget,
    pub confirmation_policy: ConfirmationPolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<&'static str>,
}

impl From<ResolvedLink> for ResolveResponse {
    fn from(link: ResolvedLink) -> Self {
        let rel = link.rel();
        Self {
            href: link.href,
            target: link.target,
            confirmation_policy: link.confirmation_policy,
            rel,
        }
    }
}
