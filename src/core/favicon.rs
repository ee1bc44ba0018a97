use crate::config::toml_config::FaviconConfig;
use url::Url;

pub const PLACEHOLDER_ICON: &str = "data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🔗</text></svg>";

/// Favicon URL for `url` using the default icon service.
pub fn resolve_favicon(url: &str) -> String {
    FaviconResolver::default().resolve(url)
}

#[derive(Debug, Clone)]
pub struct FaviconResolver {
    service_url: String,
    size: u32,
}

impl FaviconResolver {
    pub fn new(config: &FaviconConfig) -> Self {
        Self {
            service_url: config.service_url.clone(),
            size: config.size,
        }
    }

    pub fn resolve(&self, url: &str) -> String {
        match domain_of(url) {
            Some(domain) => format!("{}?domain={}&sz={}", self.service_url, domain, self.size),
            None => {
                tracing::debug!("No domain in '{}', using placeholder icon", url);
                PLACEHOLDER_ICON.to_string()
            }
        }
    }
}

impl Default for FaviconResolver {
    fn default() -> Self {
        Self::new(&FaviconConfig::default())
    }
}

/// Host plus explicit port, if any.
fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str().filter(|h| !h.is_empty())?;
    Some(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_favicon_for_valid_url() {
        assert_eq!(
            resolve_favicon("https://example.com/page"),
            "https://www.google.com/s2/favicons?domain=example.com&sz=64"
        );
    }

    #[test]
    fn test_resolve_favicon_keeps_explicit_port() {
        let favicon = resolve_favicon("http://localhost:8080/admin");
        assert!(favicon.contains("domain=localhost:8080"));
    }

    #[test]
    fn test_resolve_favicon_placeholder_on_malformed_input() {
        assert_eq!(resolve_favicon("not a url"), PLACEHOLDER_ICON);
        assert_eq!(resolve_favicon(""), PLACEHOLDER_ICON);
        assert_eq!(resolve_favicon("mailto:someone@example.com"), PLACEHOLDER_ICON);
    }

    #[test]
    fn test_custom_service() {
        let resolver = FaviconResolver::new(&FaviconConfig {
            service_url: "https://icons.example.net/get".to_string(),
            size: 32,
        });
        assert_eq!(
            resolver.resolve("https://docs.rs/regex"),
            "https://icons.example.net/get?domain=docs.rs&sz=32"
        );
    }
}
