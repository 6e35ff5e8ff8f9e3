//! Route table and request matching.
//!
//! Routes are tried in declaration order and the first one whose method and
//! path pattern match wins. Per-test overrides are consulted before the
//! default table, newest first.

use std::collections::HashMap;

use crate::envelope::Envelope;
use crate::error::Result;
use crate::mock_api::fixtures::FixtureStore;
use crate::mock_api::handlers;
use crate::mock_api::request::{Method, MockRequest};

/// Default base path all simulated endpoints live under.
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Every endpoint the mock backend simulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    Logout,
    ListUsers,
    CreateUser,
    ListElevages,
    GetElevage,
    CreateElevage,
    UpdateElevage,
    DeleteElevage,
    ListAnimals,
    CreateAnimal,
    ListRaces,
    ListTypesAnimaux,
    ErrorTest,
}

impl Endpoint {
    /// All endpoints, in registration order.
    pub const ALL: [Endpoint; 15] = [
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::Logout,
        Endpoint::ListUsers,
        Endpoint::CreateUser,
        Endpoint::ListElevages,
        Endpoint::GetElevage,
        Endpoint::CreateElevage,
        Endpoint::UpdateElevage,
        Endpoint::DeleteElevage,
        Endpoint::ListAnimals,
        Endpoint::CreateAnimal,
        Endpoint::ListRaces,
        Endpoint::ListTypesAnimaux,
        Endpoint::ErrorTest,
    ];

    pub fn method(&self) -> Method {
        match self {
            Endpoint::Login
            | Endpoint::Register
            | Endpoint::Logout
            | Endpoint::CreateUser
            | Endpoint::CreateElevage
            | Endpoint::CreateAnimal => Method::Post,
            Endpoint::UpdateElevage => Method::Put,
            Endpoint::DeleteElevage => Method::Delete,
            Endpoint::ListUsers
            | Endpoint::ListElevages
            | Endpoint::GetElevage
            | Endpoint::ListAnimals
            | Endpoint::ListRaces
            | Endpoint::ListTypesAnimaux
            | Endpoint::ErrorTest => Method::Get,
        }
    }

    /// Path pattern relative to the base path.
    pub fn pattern(&self) -> &'static str {
        match self {
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::Logout => "/auth/logout",
            Endpoint::ListUsers | Endpoint::CreateUser => "/users",
            Endpoint::ListElevages | Endpoint::CreateElevage => "/elevages",
            Endpoint::GetElevage | Endpoint::UpdateElevage | Endpoint::DeleteElevage => {
                "/elevages/:id"
            }
            Endpoint::ListAnimals | Endpoint::CreateAnimal => "/animals",
            Endpoint::ListRaces => "/races",
            Endpoint::ListTypesAnimaux => "/types-animaux",
            Endpoint::ErrorTest => "/error-test",
        }
    }
}

/// Named path parameters extracted by a match. Values are strings; callers
/// parse numbers themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Parse a parameter as a numeric id. `None` when absent or not a number.
    pub fn id(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A path pattern such as `/api/elevages/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = split_path(pattern)
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            raw: pattern.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match `path`, returning the extracted parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = split_path(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|s| s.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(PathParams(params))
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn join_path(base_path: &str, relative: &str) -> String {
    format!(
        "{}/{}",
        base_path.trim_end_matches('/'),
        relative.trim_start_matches('/')
    )
}

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub endpoint: Endpoint,
}

/// A fixed response registered for a single test.
#[derive(Debug, Clone)]
pub struct RouteOverride {
    pub method: Method,
    pub pattern: PathPattern,
    pub response: Envelope,
}

/// Result of resolving a request against the route table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub endpoint: Endpoint,
    pub params: PathParams,
}

/// Outcome of dispatching a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A route matched and produced an envelope.
    Handled(Envelope),
    /// No route matched. Not an error: the caller decides what to do.
    Unhandled,
}

/// Ordered route table plus per-test overrides.
#[derive(Debug, Clone)]
pub struct Router {
    base_path: String,
    routes: Vec<Route>,
    overrides: Vec<RouteOverride>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PATH)
    }
}

impl Router {
    /// A router with every endpoint registered under `base_path`.
    pub fn new(base_path: &str) -> Self {
        Endpoint::ALL
            .iter()
            .fold(Self::empty(base_path), |router, endpoint| {
                router.route(endpoint.method(), endpoint.pattern(), *endpoint)
            })
    }

    /// A router with no routes.
    pub fn empty(base_path: &str) -> Self {
        Self {
            base_path: base_path.to_string(),
            routes: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Append a route; `pattern` is relative to the base path.
    pub fn route(mut self, method: Method, pattern: &str, endpoint: Endpoint) -> Self {
        self.routes.push(Route {
            method,
            pattern: PathPattern::parse(&join_path(&self.base_path, pattern)),
            endpoint,
        });
        self
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn overrides(&self) -> &[RouteOverride] {
        &self.overrides
    }

    /// Answer `method pattern` with `response` until the next
    /// [`reset_overrides`](Self::reset_overrides). Newer overrides win.
    pub fn use_override(&mut self, method: Method, pattern: &str, response: Envelope) {
        self.overrides.insert(
            0,
            RouteOverride {
                method,
                pattern: PathPattern::parse(&join_path(&self.base_path, pattern)),
                response,
            },
        );
    }

    pub fn reset_overrides(&mut self) {
        self.overrides.clear();
    }

    /// First route matching the request, in declaration order.
    pub fn resolve(&self, request: &MockRequest) -> Option<RouteMatch> {
        self.routes.iter().find_map(|route| {
            if route.method != request.method() {
                return None;
            }
            route.pattern.matches(request.path()).map(|params| RouteMatch {
                endpoint: route.endpoint,
                params,
            })
        })
    }

    /// Route the request and run the matching handler.
    ///
    /// # Errors
    ///
    /// Propagates unexpected handler failures such as a malformed JSON body.
    pub fn dispatch(&self, store: &FixtureStore, request: &MockRequest) -> Result<Dispatch> {
        if let Some(found) = self.overrides.iter().find(|o| {
            o.method == request.method() && o.pattern.matches(request.path()).is_some()
        }) {
            tracing::debug!(
                method = %request.method(),
                pattern = found.pattern.as_str(),
                "request answered by override"
            );
            return Ok(Dispatch::Handled(found.response.clone()));
        }

        match self.resolve(request) {
            Some(matched) => {
                tracing::debug!(
                    method = %request.method(),
                    path = request.path(),
                    endpoint = ?matched.endpoint,
                    "request matched"
                );
                handlers::handle(matched.endpoint, store, request, &matched.params)
                    .map(Dispatch::Handled)
            }
            None => Ok(Dispatch::Unhandled),
        }
    }
}
