//! Target site addressing
//!
//! The crawl is bound to one site and one seed article. Both live in
//! [`SiteConfig`](crate::config::SiteConfig); this module turns them and the
//! discovered page names into absolute URLs.

use crate::config::SiteConfig;
use url::Url;

/// Base URL of the encyclopedia crawled by default
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/";

/// Page name of the default seed article
pub const DEFAULT_SEED_PATH: &str = "wiki/Wikipedia";

/// Resolved addresses of the crawled site
#[derive(Debug, Clone)]
pub struct Site {
    base: Url,
    seed: Url,
}

impl Site {
    /// Resolves a site configuration into absolute URLs
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_relay::config::SiteConfig;
    /// use wiki_relay::site::Site;
    ///
    /// let site = Site::from_config(&SiteConfig::default()).unwrap();
    /// assert_eq!(site.seed_url().as_str(), "https://en.wikipedia.org/wiki/Wikipedia");
    /// ```
    pub fn from_config(config: &SiteConfig) -> Result<Self, url::ParseError> {
        let base = Url::parse(&config.base_url)?;
        let seed = base.join(&config.seed_path)?;
        Ok(Self { base, seed })
    }

    /// The site root every article name is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// The seed article the coordinator discovers links from
    pub fn seed_url(&self) -> &Url {
        &self.seed
    }

    /// Builds the absolute URL of a discovered article name
    ///
    /// Names are relative to the site root (`wiki/Rust`); a leading `/` is
    /// accepted too. A name is never read as a scheme, so `wikiX:y` stays a
    /// path under the base.
    pub fn article_url(&self, name: &str) -> Result<Url, url::ParseError> {
        self.base.join(&format!("./{}", name.trim_start_matches('/')))
    }
}
