//! Resolution of link descriptors into concrete navigation data.
//!
//! Every clickable element on the site (buttons, text links, cards) goes
//! through [`resolve`]. The function is pure and performs no I/O, so it can be
//! called from any number of rendering contexts at once.

use crate::domain::entities::{
    ConfirmationPolicy, DocumentType, ExternalLink, LinkDescriptor, LinkTarget, ResolvedLink,
};

/// Resolves a link descriptor to `{ href, target, confirmation_policy }`.
///
/// # Precedence
///
/// 1. Internal reference with a document type set
/// 2. `external` with a non-empty URL
/// 3. `external_one_off` with a non-empty URL
/// 4. `/` in the same tab, without confirmation
///
/// When both external branches carry a URL, `external` wins over
/// `external_one_off`.
///
/// Malformed descriptors never fail: unknown document types and empty slugs
/// resolve to `/`.
pub fn resolve(descriptor: &LinkDescriptor) -> ResolvedLink {
    if let Some(internal) = &descriptor.internal
        && let Some(document_type) = internal.document_type.as_ref().filter(|t| t.is_set())
    {
        return ResolvedLink::new(
            internal_href(document_type, &internal.slug),
            LinkTarget::SameTab,
            ConfirmationPolicy::None,
        );
    }

    [&descriptor.external, &descriptor.external_one_off]
        .into_iter()
        .flatten()
        .find(|link| !link.url.trim().is_empty())
        .map(resolve_external)
        .unwrap_or_default()
}

/// Maps an internal document reference to its site path.
///
/// | type               | path              |
/// |--------------------|-------------------|
/// | `post`             | `/{slug}`         |
/// | `homepage`         | `/`               |
/// | `subPage`          | `/{slug}`         |
/// | `blogHomePage`     | `/posts/page/1`   |
/// | `locationHomePage` | `/locations`      |
/// | `topic`            | `/{slug}/1`       |
/// | `location`         | `/{slug}`         |
/// | anything else      | `/`               |
pub fn internal_href(document_type: &DocumentType, slug: &str) -> String {
    let slug = slug.trim().trim_matches('/');

    match document_type {
        DocumentType::Homepage => "/".to_string(),
        DocumentType::BlogHomePage => "/posts/page/1".to_string(),
        DocumentType::LocationHomePage => "/locations".to_string(),
        DocumentType::Post | DocumentType::SubPage | DocumentType::Location if !slug.is_empty() => {
            format!("/{slug}")
        }
        DocumentType::Topic if !slug.is_empty() => format!("/{slug}/1"),
        _ => "/".to_string(),
    }
}

fn resolve_external(link: &ExternalLink) -> ResolvedLink {
    let target = if link.open_in_new_tab {
        LinkTarget::NewTab
    } else {
        LinkTarget::SameTab
    };
    let policy = if link.show_leave_alert {
        ConfirmationPolicy::LeavingSiteWarning
    } else {
        ConfirmationPolicy::None
    };

    ResolvedLink::new(link.url.trim(), target, policy)
}
