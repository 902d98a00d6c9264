//! Per-route proxy configuration.

use axum::http::{Method, StatusCode};
use axum::routing::MethodFilter;

/// HTTP verbs the proxy routes use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Verb {
    /// The outbound HTTP method.
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Put => Method::PUT,
            Self::Patch => Method::PATCH,
            Self::Delete => Method::DELETE,
        }
    }

    /// The axum method filter used when mounting the route.
    pub fn filter(self) -> MethodFilter {
        match self {
            Self::Get => MethodFilter::GET,
            Self::Post => MethodFilter::POST,
            Self::Put => MethodFilter::PUT,
            Self::Patch => MethodFilter::PATCH,
            Self::Delete => MethodFilter::DELETE,
        }
    }

    /// Whether requests with this verb carry a JSON body to forward.
    pub fn has_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method().as_str())
    }
}

/// How a path parameter is validated before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Must parse as an integer; otherwise `400 {"error": "Invalid <entity> ID"}`.
    Integer {
        /// Entity name used in the error message.
        entity: &'static str,
    },
    /// Forwarded as-is (percent-encoded).
    Text,
}

/// A `{name}` placeholder shared by the local path and the backend template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParam {
    /// Placeholder name, without braces.
    pub name: &'static str,
    /// Validation rule.
    pub kind: ParamKind,
}

/// Response rewrite applied to a successful backend body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Relay the body unchanged.
    Passthrough,
    /// Area-type catalogue enriched with colours and icons.
    AreaTypes,
    /// Restricted-area list reshaped for the map view.
    RestrictedAreas,
}

/// Everything that distinguishes one proxy route from another.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    /// Verb, shared by the inbound route and the outbound call.
    pub verb: Verb,
    /// Local path relative to `/api`, axum syntax (`/places/{id}`).
    pub path: &'static str,
    /// Backend path template using the same placeholders.
    pub backend_path: &'static str,
    /// Placeholder validation rules.
    pub params: Vec<PathParam>,
    /// Query parameters forwarded to the backend; everything else is dropped.
    pub query: &'static [&'static str],
    /// Adds `page=1` / `page_size=20` when the caller omits them.
    pub paginated: bool,
    /// Status used for successful responses.
    pub success_status: StatusCode,
    /// Fixed `error` string used when the backend answers non-2xx.
    pub error_message: String,
    /// Success-body rewrite.
    pub transform: Transform,
}

impl RouteSpec {
    fn new(
        verb: Verb,
        path: &'static str,
        backend_path: &'static str,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            verb,
            path,
            backend_path,
            params: Vec::new(),
            query: &[],
            paginated: false,
            success_status: StatusCode::OK,
            error_message: error_message.into(),
            transform: Transform::Passthrough,
        }
    }

    /// A GET route.
    pub fn get(path: &'static str, backend: &'static str, error: impl Into<String>) -> Self {
        Self::new(Verb::Get, path, backend, error)
    }

    /// A POST route.
    pub fn post(path: &'static str, backend: &'static str, error: impl Into<String>) -> Self {
        Self::new(Verb::Post, path, backend, error)
    }

    /// A PUT route.
    pub fn put(path: &'static str, backend: &'static str, error: impl Into<String>) -> Self {
        Self::new(Verb::Put, path, backend, error)
    }

    /// A PATCH route.
    pub fn patch(path: &'static str, backend: &'static str, error: impl Into<String>) -> Self {
        Self::new(Verb::Patch, path, backend, error)
    }

    /// A DELETE route.
    pub fn delete(path: &'static str, backend: &'static str, error: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path, backend, error)
    }

    /// Declares an integer placeholder.
    pub fn int_param(mut self, name: &'static str, entity: &'static str) -> Self {
        self.params.push(PathParam {
            name,
            kind: ParamKind::Integer { entity },
        });
        self
    }

    /// Declares a free-text placeholder.
    pub fn text_param(mut self, name: &'static str) -> Self {
        self.params.push(PathParam {
            name,
            kind: ParamKind::Text,
        });
        self
    }

    /// Sets the query allow-list.
    pub fn query(mut self, allowed: &'static [&'static str]) -> Self {
        self.query = allowed;
        self
    }

    /// Marks the route as a paginated list.
    pub fn paginated(mut self) -> Self {
        self.paginated = true;
        self
    }

    /// Answers successes with `201 Created`.
    pub fn created(mut self) -> Self {
        self.success_status = StatusCode::CREATED;
        self
    }

    /// Sets the success-body rewrite.
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Rule for placeholder `name`; undeclared placeholders are free text.
    pub fn param_kind(&self, name: &str) -> ParamKind {
        self.params
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.kind)
            .unwrap_or(ParamKind::Text)
    }
}
