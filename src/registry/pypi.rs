use reqwest::Client;
use serde_json::Value;

use super::LookupMiss;

/// Fetch the license of a Python package from PyPI's JSON API.
///
/// Uses `info.license`, falling back to the PEP 639 `info.license_expression`.
pub async fn fetch_license(client: &Client, base_url: &str, name: &str) -> Result<String, LookupMiss> {
    let url = format!("{}/{}/json", base_url, name);

    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(LookupMiss::Status(response.status()));
    }

    let data: Value = response.json().await?;
    let info = data.get("info");

    info_field(info, "license")
        .or_else(|| info_field(info, "license_expression"))
        .map(str::to_string)
        .ok_or(LookupMiss::NoLicense)
}

fn info_field<'a>(info: Option<&'a Value>, key: &str) -> Option<&'a str> {
    info.and_then(|i| i.get(key))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
