//! Link descriptor entity authored by editors in the CMS.

use serde::{Deserialize, Deserializer, Serialize};
use serde_with::{DefaultOnNull, serde_as};
use std::fmt;

/// Polymorphic description of a link target.
///
/// Exactly one branch is expected to carry a payload. When several do, the
/// resolver applies a fixed precedence (see
/// [`crate::application::services::link_resolver::resolve`]).
///
/// Deserializes from the CMS document shape: camelCase keys, with the
/// `internalLink` / `externalLink` / `externalLinkOneOff` field names
/// accepted as aliases and `null` branches treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDescriptor {
    #[serde(default, alias = "internalLink", skip_serializing_if = "Option::is_none")]
    pub internal: Option<InternalLink>,
    #[serde(default, alias = "externalLink", skip_serializing_if = "Option::is_none")]
    pub external: Option<ExternalLink>,
    #[serde(
        default,
        alias = "externalLinkOneOff",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_one_off: Option<ExternalLink>,
}

impl LinkDescriptor {
    /// Descriptor pointing at an internal document.
    pub fn internal(document_type: DocumentType, slug: impl Into<String>) -> Self {
        Self {
            internal: Some(InternalLink {
                document_type: Some(document_type),
                slug: slug.into(),
            }),
            ..Self::default()
        }
    }

    /// Descriptor pointing at a reusable external link entity.
    pub fn external(link: ExternalLink) -> Self {
        Self {
            external: Some(link),
            ..Self::default()
        }
    }

    /// Descriptor pointing at a URL entered directly on the referencing document.
    pub fn external_one_off(link: ExternalLink) -> Self {
        Self {
            external_one_off: Some(link),
            ..Self::default()
        }
    }

    /// Returns true if no branch carries a usable payload.
    pub fn is_empty(&self) -> bool {
        let internal_set = self
            .internal
            .as_ref()
            .is_some_and(|i| i.document_type.as_ref().is_some_and(DocumentType::is_set));
        let external_set =
            |link: &Option<ExternalLink>| link.as_ref().is_some_and(|l| !l.url.is_empty());

        !internal_set && !external_set(&self.external) && !external_set(&self.external_one_off)
    }
}

/// Reference to a document managed by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalLink {
    #[serde(default, alias = "_type")]
    pub document_type: Option<DocumentType>,
    #[serde(default, deserialize_with = "deserialize_slug")]
    pub slug: String,
}

/// External URL with its presentation flags.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalLink {
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default)]
    pub url: String,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "newTab")]
    pub open_in_new_tab: bool,
    #[serde_as(as = "DefaultOnNull")]
    #[serde(default, alias = "leaveAlert")]
    pub show_leave_alert: bool,
}

impl ExternalLink {
    pub fn new(url: impl Into<String>, open_in_new_tab: bool, show_leave_alert: bool) -> Self {
        Self {
            url: url.into(),
            open_in_new_tab,
            show_leave_alert,
        }
    }
}

/// Kind of internal document a link can reference.
///
/// Values the site does not know about are kept verbatim in [`DocumentType::Other`]
/// so they survive a round trip and resolve to the safe default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Post,
    Homepage,
    SubPage,
    BlogHomePage,
    LocationHomePage,
    Topic,
    Location,
    Other(String),
}

impl DocumentType {
    /// All document types with a dedicated URL template.
    pub const KNOWN: [DocumentType; 7] = [
        DocumentType::Post,
        DocumentType::Homepage,
        DocumentType::SubPage,
        DocumentType::BlogHomePage,
        DocumentType::LocationHomePage,
        DocumentType::Topic,
        DocumentType::Location,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Post => "post",
            Self::Homepage => "homepage",
            Self::SubPage => "subPage",
            Self::BlogHomePage => "blogHomePage",
            Self::LocationHomePage => "locationHomePage",
            Self::Topic => "topic",
            Self::Location => "location",
            Self::Other(other) => other,
        }
    }

    /// Returns false for an empty type name, which editors leave behind when
    /// clearing a reference.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Other(other) if other.trim().is_empty())
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "post" => Self::Post,
            "homepage" => Self::Homepage,
            "subPage" => Self::SubPage,
            "blogHomePage" => Self::BlogHomePage,
            "locationHomePage" => Self::LocationHomePage,
            "topic" => Self::Topic,
            "location" => Self::Location,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        match value {
            DocumentType::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `"my-slug"`, `{ "current": "my-slug" }` or `null`.
fn deserialize_slug<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Slug {
        Plain(String),
        Object { current: Option<String> },
    }

    let slug = Option::<Slug>::deserialize(deserializer)?;
    Ok(match slug {
        Some(Slug::Plain(s)) => s,
        Some(Slug::Object { current }) => current.unwrap_or_default(),
        None => String::new(),
    })
}
