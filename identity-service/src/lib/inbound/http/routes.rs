use serde::Deserialize;

use crate::config::GateConfig;

/// How the session gate treats a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteClass {
    /// Static files; never inspected
    Asset,
    /// Login page, authentication endpoints, setup
    Public,
    /// Requires a valid session token
    Protected,
    /// Matches no configured prefix; passes through without a token check
    Unclassified,
}

/// One `(prefix, class)` entry of the gate's route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteRule {
    pub prefix: String,
    pub class: RouteClass,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, class: RouteClass) -> Self {
        Self {
            prefix: prefix.into(),
            class,
        }
    }
}

/// Path classification table consumed by the session gate.
///
/// Classes are checked in the order asset, public, protected; within a class
/// any matching prefix counts. Paths matching nothing are `Unclassified`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
    login_path: String,
    landing_path: String,
    dotted_paths_are_assets: bool,
}

impl RouteTable {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            rules: config.routes.clone(),
            login_path: config.login_path.clone(),
            landing_path: config.landing_path.clone(),
            dotted_paths_are_assets: config.dotted_paths_are_assets,
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn landing_path(&self) -> &str {
        &self.landing_path
    }

    pub fn is_login_path(&self, path: &str) -> bool {
        path == self.login_path
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        if self.dotted_paths_are_assets && has_file_extension(path) {
            return RouteClass::Asset;
        }

        [RouteClass::Asset, RouteClass::Public, RouteClass::Protected]
            .into_iter()
            .find(|class| {
                self.rules
                    .iter()
                    .any(|rule| rule.class == *class && path.starts_with(&rule.prefix))
            })
            .unwrap_or(RouteClass::Unclassified)
    }
}

fn has_file_extension(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
}
