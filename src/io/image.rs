use std::path::Path;

use crate::model::config::ImageConfig;

/// True for references that are already complete URLs.
pub fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

pub fn is_inline(reference: &str) -> bool {
    reference.starts_with("data:")
}

/// Resolve an image reference for display.
///
/// Absolute and inline references pass through. Bundled paths are joined to
/// the remote origin, or to `asset_base` when no origin is configured.
pub fn resolve_image_url(reference: &str, cfg: &ImageConfig) -> String {
    if is_absolute(reference) || is_inline(reference) {
        return reference.to_string();
    }
    let clean = reference.strip_prefix('/').unwrap_or(reference);
    if cfg.base_url.is_empty() {
        let base = if cfg.asset_base.is_empty() {
            "/"
        } else {
            cfg.asset_base.as_str()
        };
        if base.ends_with('/') {
            format!("{}{}", base, clean)
        } else {
            format!("{}/{}", base, clean)
        }
    } else {
        format!("{}/{}", cfg.base_url.trim_end_matches('/'), clean)
    }
}

/// Same URL with the other common raster extension.
fn alternate_extension(url: &str) -> Option<String> {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (url, None),
    };
    let dot = path.rfind('.')?;
    if path[dot..].contains('/') {
        return None;
    }
    let alt = match path[dot + 1..].to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "png",
        "png" => "jpg",
        _ => return None,
    };
    let mut out = format!("{}.{}", &path[..dot], alt);
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Some(out)
}

fn cache_busted(url: &str, attempt: usize) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}retry={}", url, sep, attempt)
}

/// URLs to try, in order, after `url` fails to load: the alternate
/// extension first, then cache-busting variants. At most `max_retries`
/// entries; inline images never retry.
pub fn fallback_sequence(url: &str, max_retries: usize) -> Vec<String> {
    if is_inline(url) || max_retries == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(max_retries);
    if let Some(alt) = alternate_extension(url) {
        out.push(alt);
    }
    let mut attempt = 1;
    while out.len() < max_retries {
        out.push(cache_busted(url, attempt));
        attempt += 1;
    }
    out.truncate(max_retries);
    out
}

/// Decides whether a resolved URL can be loaded.
pub trait ImageProbe {
    fn available(&self, url: &str) -> bool;
}

/// Checks local asset paths on disk. Remote and inline references are
/// assumed available since nothing is fetched.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalProbe;

impl ImageProbe for LocalProbe {
    fn available(&self, url: &str) -> bool {
        if is_absolute(url) || is_inline(url) {
            return true;
        }
        let path = url.split_once('?').map_or(url, |(p, _)| p);
        Path::new(path).is_file()
    }
}

/// Outcome of resolving an image with retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub url: String,
    /// Number of fallbacks tried before `url` (0 = first choice worked).
    pub retries: usize,
    pub available: bool,
}

/// Resolve `reference` and walk the fallback sequence until the probe
/// accepts a URL. Failures are silent: the original URL is returned with
/// `available = false`.
pub fn resolve_with_fallback(reference: &str, cfg: &ImageConfig, probe: &dyn ImageProbe) -> ResolvedImage {
    let url = resolve_image_url(reference, cfg);
    if probe.available(&url) {
        return ResolvedImage {
            url,
            retries: 0,
            available: true,
        };
    }
    for (i, candidate) in fallback_sequence(&url, cfg.max_retries).into_iter().enumerate() {
        if probe.available(&candidate) {
            tracing::debug!(from = %url, to = %candidate, "image fallback");
            return ResolvedImage {
                url: candidate,
                retries: i + 1,
                available: true,
            };
        }
    }
    ResolvedImage {
        url,
        retries: cfg.max_retries,
        available: false,
    }
}
