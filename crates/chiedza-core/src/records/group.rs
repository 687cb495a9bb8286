use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{de_id, de_null_default};

/// Cluster zones groups are registered under.
pub const CLUSTER_ZONES: &[&str] = &["Bulawayo", "Waterfalls", "Bindura"];

/// Cluster used when none is given.
pub const DEFAULT_CLUSTER: &str = "Bulawayo";

/// A village savings and loan association.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavingsGroup {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub cluster_zone: String,
    #[serde(default, deserialize_with = "de_null_default")]
    pub location_lat: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub location_lng: f64,
    #[serde(default, deserialize_with = "de_null_default")]
    pub status: String,
    /// `members(count)` relation: a single-element array.
    #[serde(default, rename = "members", deserialize_with = "de_null_default")]
    member_counts: Vec<CountRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
struct CountRow {
    count: u32,
}

impl SavingsGroup {
    pub fn new(id: &str, name: &str, cluster_zone: &str, lat: f64, lng: f64, members: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            cluster_zone: cluster_zone.to_string(),
            location_lat: lat,
            location_lng: lng,
            status: "active".to_string(),
            member_counts: vec![CountRow { count: members }],
        }
    }

    /// Number of members, 0 when the relation was not embedded.
    pub fn member_count(&self) -> u32 {
        self.member_counts.first().map_or(0, |c| c.count)
    }

    /// True when the group has a non-zero map position.
    pub fn has_location(&self) -> bool {
        self.location_lat != 0.0 || self.location_lng != 0.0
    }
}

/// Insert payload for registering a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewGroup {
    pub name: String,
    pub cluster_zone: String,
    pub location_lat: f64,
    pub location_lng: f64,
    pub status: String,
}

impl NewGroup {
    /// Builds an insert payload from raw form input.
    ///
    /// The name is required; an empty cluster falls back to the default and
    /// coordinates that do not parse become 0.
    ///
    /// # Errors
    /// Returns an error if the name is blank.
    pub fn from_input(name: &str, cluster: Option<&str>, lat: &str, lng: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("Group Name is required");
        }
        let cluster_zone = cluster
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CLUSTER)
            .to_string();

        Ok(Self {
            name: name.to_string(),
            cluster_zone,
            location_lat: parse_coordinate(lat),
            location_lng: parse_coordinate(lng),
            status: "active".to_string(),
        })
    }
}

fn parse_coordinate(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
