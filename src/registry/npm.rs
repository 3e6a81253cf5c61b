use reqwest::Client;
use serde_json::Value;

use super::LookupMiss;

/// Fetch the license of the latest published version of an npm package.
pub async fn fetch_license(client: &Client, base_url: &str, name: &str) -> Result<String, LookupMiss> {
    // Scoped packages need URL encoding: @scope/pkg → %40scope%2Fpkg
    let encoded_name = name.replace('@', "%40").replace('/', "%2F");
    let url = format!("{}/{}/latest", base_url, encoded_name);

    let response = client
        .get(&url)
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(LookupMiss::Status(response.status()));
    }

    let data: Value = response.json().await?;
    license_from_manifest(&data).ok_or(LookupMiss::NoLicense)
}

/// Read a license from a published `package.json`.
///
/// Accepts the SPDX string form, the legacy `{ "type": ... }` object, and the
/// legacy `licenses` array (first entry wins).
pub fn license_from_manifest(data: &Value) -> Option<String> {
    let declared = match data.get("license") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(map)) => map.get("type").and_then(Value::as_str),
        _ => None,
    };

    declared
        .or_else(|| {
            data.get("licenses")
                .and_then(Value::as_array)
                .and_then(|list| list.first())
                .and_then(|entry| entry.get("type"))
                .and_then(Value::as_str)
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
