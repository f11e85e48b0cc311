//! REST endpoint registry and request construction
//!
//! Requests are addressed by logical resource name rather than URL. This
//! module only resolves and describes requests and decodes response bodies;
//! sending them is left to whatever HTTP transport the host provides.

use crate::error::{Result, ScadaError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{error, warn};

/// Resource name → endpoint path under the API base URL
const ENDPOINTS: &[(&str, &str)] = &[
    (
        "watertank",
        "device?keyword&type=DATALOGGER&sort=DESC&perPage=10&page=1&roleId",
    ),
    ("waterpumb", "waterpumb"),
    ("gatewave", "gatewave"),
    ("pressure-gauge", "pressure-gauge"),
    ("water-level-sensor", "water-level-sensor"),
    (
        "device",
        "device?type=DMA&sort=DESC&perPage=10&page=1&roleId",
    ),
    ("water-pipe", "water-pipe"),
    ("pipe", "pipe"),
    ("grid-square", "grid-square"),
    ("pressure-meter", "device"),
    ("create", "scada"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(format!(
                "Invalid method: {}. Valid methods are: get, post, put, patch, delete",
                s
            )),
        }
    }
}

/// A fully resolved request, ready for a transport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Builds authenticated requests against the endpoint registry
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Names of every registered resource
    pub fn resources() -> impl Iterator<Item = &'static str> {
        ENDPOINTS.iter().map(|(name, _)| *name)
    }

    /// Full URL for a resource, without extra query parameters
    pub fn endpoint(&self, resource: &str) -> Option<String> {
        ENDPOINTS
            .iter()
            .find(|(name, _)| *name == resource)
            .map(|(_, path)| format!("{}/{}", self.base_url, path))
    }

    pub fn request(
        &self,
        method: Method,
        resource: &str,
        params: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<ApiRequest> {
        let Some(mut url) = self.endpoint(resource) else {
            warn!(resource = %resource, "No endpoint for resource");
            return Err(ScadaError::UnknownResource(resource.to_string()));
        };

        if !params.is_empty() {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", form_urlencode(k), form_urlencode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&query);
        }

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let body = body.map(serde_json::to_string).transpose()?;

        Ok(ApiRequest {
            method,
            url,
            headers,
            body,
        })
    }

    pub fn get(&self, resource: &str, params: &[(String, String)]) -> Result<ApiRequest> {
        self.request(Method::Get, resource, params, None)
    }

    pub fn post(&self, resource: &str, body: Option<&Value>) -> Result<ApiRequest> {
        self.request(Method::Post, resource, &[], body)
    }

    pub fn put(&self, resource: &str, body: Option<&Value>) -> Result<ApiRequest> {
        self.request(Method::Put, resource, &[], body)
    }

    pub fn patch(&self, resource: &str, body: Option<&Value>) -> Result<ApiRequest> {
        self.request(Method::Patch, resource, &[], body)
    }

    pub fn delete(&self, resource: &str) -> Result<ApiRequest> {
        self.request(Method::Delete, resource, &[], None)
    }
}

/// Decode a response body.
///
/// Non-2xx statuses are errors. Bodies that are not JSON come back as a
/// JSON string; an empty body is `null`.
pub fn decode_response(status: u16, body: &str) -> Result<Value> {
    if !(200..300).contains(&status) {
        error!(status, "Fetch failed");
        return Err(ScadaError::HttpStatus(status));
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(body.to_string())))
}

/// application/x-www-form-urlencoded encoding of one key or value
fn form_urlencode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                out.push(char::from(byte))
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
