use crate::config::types::{Config, CrawlerConfig, FetchConfig, OutputConfig, SiteConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_site_config(&config.site)?;
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // One coordinator plus at least one worker
    if config.workers < 1 {
        return Err(ConfigError::Validation(format!(
            "crawl requires at least one worker besides the coordinator, got {} workers",
            config.workers
        )));
    }

    if config.articles == Some(0) {
        return Err(ConfigError::Validation(
            "articles must be a positive integer".to_string(),
        ));
    }

    Ok(())
}

/// Validates the target site
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' must end with '/'",
            config.base_url
        )));
    }

    if config.seed_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "seed-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP timeouts
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the fields that make up the `User-Agent` header
///
/// The header reads `name/version (+url; email)`, so name and version must be
/// product tokens and the contact fields must not break out of the comment.
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    validate_product_token("crawler-name", &config.crawler_name)?;
    validate_product_token("crawler-version", &config.crawler_version)?;

    let contact = Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;
    if contact.scheme() != "http" && contact.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "contact-url '{}' must use HTTP or HTTPS",
            config.contact_url
        )));
    }

    validate_contact_email(&config.contact_email)
}

fn validate_product_token(field: &str, value: &str) -> Result<(), ConfigError> {
    let is_token_char = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if value.is_empty() || !value.chars().all(is_token_char) {
        return Err(ConfigError::Validation(format!(
            "{} must be a non-empty run of letters, digits, '-', '_' or '.', got '{}'",
            field, value
        )));
    }
    Ok(())
}

fn validate_contact_email(email: &str) -> Result<(), ConfigError> {
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    };
    let header_safe = email
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | '(' | ')'));

    if !well_formed || !header_safe {
        return Err(ConfigError::Validation(format!(
            "contact-email '{}' must look like user@host",
            email
        )));
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
