//! Utility functions for building JSON-RPC object URLs

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static PATH_PARAM: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").ok());

/// Substitute `{name}` placeholders in a URL template.
///
/// Fails with the name of the first parameter that has no value.
pub fn replace_path_params(template: &str, params: &HashMap<&str, String>) -> Result<String, String> {
    let re = PATH_PARAM
        .as_ref()
        .ok_or_else(|| "path parameter pattern unavailable".to_string())?;

    if let Some(missing) = re
        .captures_iter(template)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .find(|name| !params.contains_key(name))
    {
        return Err(format!("Parameter {} is missing", missing));
    }

    Ok(re
        .replace_all(template, |caps: &regex::Captures| {
            params
                .get(&caps[1])
                .cloned()
                .unwrap_or_default()
        })
        .into_owned())
}

/// Escape an object key for use as the last URL segment.
///
/// FortiManager expects slashes inside keys (e.g. "10.0.0.0/24") as `\/`.
pub fn escape_mkey(key: &str) -> String {
    key.replace('/', "\\/")
}

/// URL of one entry in a table
pub fn object_url(collection: &str, key: &str) -> String {
    format!("{}/{}", collection.trim_end_matches('/'), escape_mkey(key))
}
