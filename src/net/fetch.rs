//! Page and resource loading: `http(s)` through a blocking reqwest client,
//! `file:` and plain paths from disk.

use std::path::Path;
use std::time::Duration;

use url::Url;

const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; chardow/", env!("CARGO_PKG_VERSION"), ")");

/// A loaded HTML document and the URL it resolved to.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects; `file://` for local documents.
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct FetchError {
    pub message: String,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

fn client(timeout: Duration) -> Result<reqwest::blocking::Client, FetchError> {
    reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| FetchError {
            message: format!("Client error: {}", e),
        })
}

/// Prefix bare host names with `https://`.
pub fn normalize_url(input: &str) -> String {
    let input = input.trim();
    if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Resolve a possibly relative reference against a base URL. Unresolvable
/// input comes back unchanged.
pub fn resolve_url(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") || href.starts_with("data:") {
        return href.to_string();
    }
    if href.starts_with("//") {
        return format!("https:{}", href);
    }
    if let Ok(base_url) = Url::parse(base) {
        if let Ok(resolved) = base_url.join(href) {
            return resolved.to_string();
        }
    }
    href.to_string()
}

/// Fetch a page over the network (blocking).
pub fn fetch_url(url_str: &str) -> Result<FetchResult, FetchError> {
    let url = normalize_url(url_str);
    let parsed = Url::parse(&url).map_err(|e| FetchError {
        message: format!("Invalid URL: {}", e),
    })?;

    let response = client(Duration::from_secs(15))?
        .get(parsed.as_str())
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/html")
        .to_string();
    let final_url = response.url().to_string();

    let html = response.text().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;

    log::info!("Fetched {} ({} bytes, status {})", final_url, html.len(), status);
    Ok(FetchResult {
        html,
        url: final_url,
        status,
        content_type,
    })
}

/// Read a local HTML file. The result's URL is the file's `file://` URL
/// so relative asset references still resolve.
pub fn read_file(path: &Path) -> Result<FetchResult, FetchError> {
    let html = std::fs::read_to_string(path).map_err(|e| FetchError {
        message: format!("Cannot read {}: {}", path.display(), e),
    })?;
    let url = std::fs::canonicalize(path)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
        .map(|u| u.to_string())
        .unwrap_or_else(|| path.display().to_string());

    log::info!("Read {} ({} bytes)", path.display(), html.len());
    Ok(FetchResult {
        html,
        url,
        status: 200,
        content_type: "text/html".to_string(),
    })
}

/// Load a page from a URL, a `file://` URL, or an existing local path.
pub fn load_source(source: &str) -> Result<FetchResult, FetchError> {
    let source = source.trim();
    if let Some(path) = Url::parse(source)
        .ok()
        .filter(|u| u.scheme() == "file")
        .and_then(|u| u.to_file_path().ok())
    {
        return read_file(&path);
    }
    let path = Path::new(source);
    if !source.contains("://") && path.exists() {
        return read_file(path);
    }
    fetch_url(source)
}

/// Raw bytes of a resource (`http(s)` or `file:`).
pub fn fetch_bytes(url_str: &str) -> Result<Vec<u8>, FetchError> {
    let url = Url::parse(url_str).map_err(|e| FetchError {
        message: format!("Invalid URL {}: {}", url_str, e),
    })?;

    if url.scheme() == "file" {
        let path = url.to_file_path().map_err(|_| FetchError {
            message: format!("Not a local path: {}", url_str),
        })?;
        return std::fs::read(&path).map_err(|e| FetchError {
            message: format!("Cannot read {}: {}", path.display(), e),
        });
    }

    let response = client(Duration::from_secs(10))?
        .get(url.as_str())
        .send()
        .map_err(|e| FetchError {
            message: format!("Request failed: {}", e),
        })?;
    if !response.status().is_success() {
        return Err(FetchError {
            message: format!("HTTP {} for {}", response.status().as_u16(), url_str),
        });
    }
    let bytes = response.bytes().map_err(|e| FetchError {
        message: format!("Failed to read body: {}", e),
    })?;
    Ok(bytes.to_vec())
}
