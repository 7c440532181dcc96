//! Room Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Resource;

/// Room entity, with its fixed resources embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub fixed_resources: Vec<Resource>,
    #[serde(default, with = "crate::time::naive_opt")]
    pub created_at: Option<NaiveDateTime>,
}

impl Room {
    /// Ids of the embedded fixed resources, in order
    pub fn fixed_resource_ids(&self) -> Vec<i64> {
        self.fixed_resources.iter().map(|r| r.id).collect()
    }

    /// Fixed resource names joined for display
    pub fn fixed_resource_names(&self) -> String {
        self.fixed_resources
            .iter()
            .map(|r| r.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create room payload; fixed resources travel as bare ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomCreate {
    pub name: String,
    pub capacity: i32,
    #[serde(default)]
    pub fixed_resources: Vec<i64>,
}

/// Update room payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_resources: Option<Vec<i64>>,
}
