//! Path substitution and query filtering for outbound calls.

use percent_encoding::percent_decode_str;
use reqwest::Url;

use tourist_core::config::BackendConfig;

use crate::error::ProxyError;

use super::spec::{ParamKind, RouteSpec};

/// Default page number for paginated lists.
pub const DEFAULT_PAGE: &str = "1";
/// Default page size for paginated lists.
pub const DEFAULT_PAGE_SIZE: &str = "20";

/// Builds the backend URL for `spec`, validating and substituting the
/// captured path parameters and appending the allowed query parameters.
pub fn backend_url(
    backend: &BackendConfig,
    spec: &RouteSpec,
    path_params: &[(String, String)],
    query: &[(String, String)],
) -> Result<Url, ProxyError> {
    let mut segments = Vec::new();
    for segment in spec.backend_path.split('/').filter(|s| !s.is_empty()) {
        segments.push(substitute(spec, segment, path_params)?);
    }

    let mut url = Url::parse(&backend.base_url)
        .map_err(|e| ProxyError::internal(format!("Invalid backend base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ProxyError::internal("Backend base URL cannot carry a path"))?
        .pop_if_empty()
        .extend(segments);

    let pairs = allowed_query(spec, query);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(&pairs);
    }

    Ok(url)
}

/// Resolves one template segment. `{name}` placeholders are replaced by the
/// captured value as sent; integer placeholders must parse as `i64`.
fn substitute(
    spec: &RouteSpec,
    segment: &str,
    path_params: &[(String, String)],
) -> Result<String, ProxyError> {
    let Some(name) = segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(segment.to_string());
    };

    let raw = path_params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .ok_or_else(|| ProxyError::internal(format!("Route is missing path parameter '{name}'")))?;

    if let ParamKind::Integer { entity } = spec.param_kind(name) {
        raw.parse::<i64>()
            .map_err(|_| ProxyError::InvalidIdentifier { entity })?;
    }
    Ok(raw.to_string())
}

/// Decodes a raw `application/x-www-form-urlencoded` query string. Escapes
/// that do not decode to UTF-8 are rejected.
pub fn parse_query(raw: Option<&str>) -> Result<Vec<(String, String)>, ProxyError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| -> Result<(String, String), ProxyError> {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            Ok((decode_component(key)?, decode_component(value)?))
        })
        .collect()
}

fn decode_component(raw: &str) -> Result<String, ProxyError> {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ProxyError::InvalidQuery)
}

/// Keeps only allow-listed parameters (first occurrence wins, empty values
/// dropped) and fills in pagination defaults for paginated lists.
pub fn allowed_query(spec: &RouteSpec, query: &[(String, String)]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (key, value) in query {
        if value.is_empty() || !spec.query.contains(&key.as_str()) {
            continue;
        }
        if pairs.iter().any(|(k, _)| k == key) {
            continue;
        }
        pairs.push((key.clone(), value.clone()));
    }

    if spec.paginated {
        for (key, default) in [("page", DEFAULT_PAGE), ("page_size", DEFAULT_PAGE_SIZE)] {
            if !pairs.iter().any(|(k, _)| k == key) {
                pairs.push((key.to_string(), default.to_string()));
            }
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(base: &str) -> BackendConfig {
        BackendConfig {
            base_url: base.to_string(),
            ..BackendConfig::default()
        }
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_query_decodes_pairs() {
        let parsed = parse_query(Some("search=old+fort&city=S%C3%A3o&flag&&page=2")).unwrap();
        assert_eq!(
            parsed,
            pairs(&[("search", "old fort"), ("city", "São"), ("flag", ""), ("page", "2")])
        );
        assert!(parse_query(None).unwrap().is_empty());
    }

    #[test]
    fn test_parse_query_rejects_non_utf8_escape() {
        let err = parse_query(Some("search=%FF")).unwrap_err();
        assert!(matches!(err, ProxyError::InvalidQuery));
    }

    #[test]
    fn test_unlisted_query_params_are_dropped() {
        let spec = RouteSpec::get("/places", "/places", "x").query(&["search"]);
        let out = allowed_query(&spec, &pairs(&[("search", "fort"), ("debug", "1")]));
        assert_eq!(out, pairs(&[("search", "fort")]));
    }

    #[test]
    fn test_pagination_defaults_only_when_absent() {
        let spec = RouteSpec::get("/places", "/places", "x")
            .paginated()
            .query(&["page", "page_size"]);

        let defaulted = allowed_query(&spec, &[]);
        assert_eq!(defaulted, pairs(&[("page", "1"), ("page_size", "20")]));

        let explicit = allowed_query(&spec, &pairs(&[("page", "3")]));
        assert_eq!(explicit, pairs(&[("page", "3"), ("page_size", "20")]));
    }

    #[test]
    fn test_non_paginated_route_gets_no_defaults() {
        let spec = RouteSpec::get("/x", "/x", "x").query(&["status"]);
        assert!(allowed_query(&spec, &[]).is_empty());
    }

    #[test]
    fn test_integer_param_substituted() {
        let spec = RouteSpec::get("/places/{id}", "/places/{id}", "x").int_param("id", "place");
        let url = backend_url(
            &backend("http://backend.test"),
            &spec,
            &pairs(&[("id", "42")]),
            &[],
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://backend.test/places/42");
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let spec = RouteSpec::get("/places/{id}", "/places/{id}", "x").int_param("id", "place");
        let err = backend_url(
            &backend("http://backend.test"),
            &spec,
            &pairs(&[("id", "abc")]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidIdentifier { entity: "place" }));
    }

    #[test]
    fn test_integer_param_forwarded_as_sent() {
        let spec = RouteSpec::get("/places/{id}", "/places/{id}", "x").int_param("id", "place");
        let url = backend_url(
            &backend("http://backend.test"),
            &spec,
            &pairs(&[("id", "007")]),
            &[],
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://backend.test/places/007");
    }

    #[test]
    fn test_padded_integer_param_rejected() {
        let spec = RouteSpec::get("/places/{id}", "/places/{id}", "x").int_param("id", "place");
        let err = backend_url(
            &backend("http://backend.test"),
            &spec,
            &pairs(&[("id", " 5")]),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, ProxyError::InvalidIdentifier { entity: "place" }));
    }

    #[test]
    fn test_text_param_is_percent_encoded() {
        let spec = RouteSpec::get("/v/{code}", "/verify/{code}", "x").text_param("code");
        let url = backend_url(
            &backend("http://backend.test/api/"),
            &spec,
            &pairs(&[("code", "a b/c")]),
            &[],
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://backend.test/api/verify/a%20b%2Fc");
    }

    #[test]
    fn test_query_appended() {
        let spec = RouteSpec::get("/trek", "/trek", "x")
            .paginated()
            .query(&["page", "page_size", "difficulty"]);
        let url = backend_url(
            &backend("http://backend.test"),
            &spec,
            &[],
            &pairs(&[("difficulty", "hard")]),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://backend.test/trek?difficulty=hard&page=1&page_size=20"
        );
    }
}
