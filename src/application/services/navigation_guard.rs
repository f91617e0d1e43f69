//! Guarded navigation for resolved links.
//!
//! The guard runs when a link is activated. It decides, possibly after
//! asking the user, whether default navigation may proceed. A `false`
//! result maps to cancelling the activation event (`preventDefault`).

use url::Url;

use crate::domain::entities::{ConfirmationPolicy, ResolvedLink};

/// Which disclaimer a prompt is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disclaimer {
    /// Editor-requested warning attached to the link itself.
    LeavingSite,
    /// Privacy notice for `mailto:` links.
    Email,
    /// Generic notice for any other off-site destination.
    ExternalSite,
}

/// Blocking yes/no prompt shown to the user.
///
/// Returns `true` when the user accepts.
pub trait ConfirmPrompt {
    fn confirm(&mut self, disclaimer: Disclaimer, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(Disclaimer, &str) -> bool,
{
    fn confirm(&mut self, disclaimer: Disclaimer, message: &str) -> bool {
        self(disclaimer, message)
    }
}

/// Texts shown by the three prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclaimerTexts {
    pub leaving_site: String,
    pub email: String,
    pub external_site: String,
}

impl Default for DisclaimerTexts {
    fn default() -> Self {
        Self {
            leaving_site: "You are now leaving our website. The site you are about to visit is \
                not operated by us and we are not responsible for its content. Continue?"
                .to_string(),
            email: "Please do not send confidential or personal information by email. Messages \
                sent over the internet may not be secure. Continue?"
                .to_string(),
            external_site: "You are about to visit a third-party website. Its privacy and \
                security policies may differ from ours. Continue?"
                .to_string(),
        }
    }
}

/// Layered confirmation policy applied on link activation.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    site_token: String,
    asset_host: String,
    texts: DisclaimerTexts,
}

impl NavigationGuard {
    /// Creates a guard.
    ///
    /// # Arguments
    ///
    /// - `site_token` - brand token; any destination whose host contains it is on-site
    /// - `asset_host` - CMS asset host; destinations on it are always allowed
    pub fn new(site_token: impl Into<String>, asset_host: impl Into<String>) -> Self {
        Self {
            site_token: site_token.into().to_ascii_lowercase(),
            asset_host: asset_host.into().to_ascii_lowercase(),
            texts: DisclaimerTexts::default(),
        }
    }

    pub fn with_texts(mut self, texts: DisclaimerTexts) -> Self {
        self.texts = texts;
        self
    }

    /// Decides whether navigation to `raw_href` may proceed.
    ///
    /// # Evaluation Order
    ///
    /// 1. `LeavingSiteWarning` policy: prompt; decline cancels
    /// 2. Own site (brand token in the host, relative path) and not `mailto:`, or the CMS
    ///    asset host: allow without further prompts
    /// 3. `mailto:`: email prompt decides
    /// 4. Anything else: external-site prompt decides
    ///
    /// An empty `raw_href` falls back to `resolved.href`.
    pub fn should_navigate<P>(&self, resolved: &ResolvedLink, raw_href: &str, prompt: &mut P) -> bool
    where
        P: ConfirmPrompt + ?Sized,
    {
        let href = match raw_href.trim() {
            "" => resolved.href.as_str(),
            trimmed => trimmed,
        };

        if resolved.confirmation_policy == ConfirmationPolicy::LeavingSiteWarning
            && !prompt.confirm(Disclaimer::LeavingSite, &self.texts.leaving_site)
        {
            return false;
        }

        let is_mailto = resolved.confirmation_policy == ConfirmationPolicy::EmailWarning
            || is_mailto(href);

        if (self.is_own_site(href) && !is_mailto) || self.is_asset_host(href) {
            return true;
        }

        if is_mailto {
            return prompt.confirm(Disclaimer::Email, &self.texts.email);
        }

        prompt.confirm(Disclaimer::ExternalSite, &self.texts.external_site)
    }

    fn is_own_site(&self, href: &str) -> bool {
        let relative = href.starts_with('#')
            || href.starts_with('?')
            || (href.starts_with('/') && !href.starts_with("//"));

        relative
            || (!self.site_token.is_empty()
                && host_of(href).is_some_and(|host| host.contains(&self.site_token)))
    }

    fn is_asset_host(&self, href: &str) -> bool {
        !self.asset_host.is_empty() && host_of(href).is_some_and(|host| host == self.asset_host)
    }
}

/// Lower-cased host of an absolute or protocol-relative href.
fn host_of(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    Url::parse(&absolute)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
}

fn is_mailto(href: &str) -> bool {
    href.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
}
