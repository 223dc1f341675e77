//! Route Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Route entity, keyed by name (`route:<name>`)
///
/// Stations are an explicit ordered list; position in the list defines the
/// distance factor used for fares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub stations: Vec<String>,
}

/// Create route payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 2))]
    pub stations: Vec<String>,
}

/// Update route payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RouteUpdate {
    #[validate(length(min = 2))]
    pub stations: Vec<String>,
}
