//! Build-time configuration for the backend endpoint with an optional
//! runtime override. The runtime config is read from
//! `window.BACKOFFICE_CONFIG` (if present) so static deployments can point at
//! a different API without rebuilding. Values are public; do not put secrets
//! here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Default request timeout (milliseconds) for session calls.
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;

/// Frontend configuration derived from build-time environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let api_base_url = option_env!("BACKOFFICE_API_BASE_URL").unwrap_or("");
        let request_timeout_ms = option_env!("BACKOFFICE_REQUEST_TIMEOUT_MS")
            .and_then(parse_timeout_ms)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            request_timeout_ms,
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    request_timeout_ms: Option<u32>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.request_timeout_ms {
        config.request_timeout_ms = value;
    }
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("BACKOFFICE_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        request_timeout_ms: read_runtime_timeout(&object, "request_timeout_ms"),
    })
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(feature = "csr")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key))
        .ok()?
        .as_string()?;
    normalize_runtime_value(&value)
}

/// Accepts either a JS number or a numeric string.
#[cfg(feature = "csr")]
fn read_runtime_timeout(object: &js_sys::Object, key: &str) -> Option<u32> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    if let Some(number) = value.as_f64() {
        return parse_timeout_ms(&number.to_string());
    }
    parse_timeout_ms(&value.as_string()?)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a positive millisecond count; fractional values are truncated.
fn parse_timeout_ms(value: &str) -> Option<u32> {
    let trimmed = normalize_runtime_value(value)?;
    let whole = trimmed.split('.').next().unwrap_or_default();
    whole.parse::<u32>().ok().filter(|ms| *ms > 0)
}
