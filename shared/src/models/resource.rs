//! Resource Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Fixed resources are bound to a room; movable ones are booked per appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Fixed,
    Movable,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Movable => "movable",
        }
    }

    /// Label shown in forms and tables
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fixed => "Fixed",
            Self::Movable => "Movable",
        }
    }
}

impl std::str::FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "movable" => Ok(Self::Movable),
            other => Err(format!("unknown resource type: {other}")),
        }
    }
}

/// Availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Unavailable => "Unavailable",
        }
    }
}

impl std::str::FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            other => Err(format!("unknown availability: {other}")),
        }
    }
}

/// Resource entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub availability: Availability,
    #[serde(default, with = "crate::time::naive_opt")]
    pub created_at: Option<NaiveDateTime>,
}

/// Create resource payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceCreate {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub availability: Availability,
}

/// Update resource payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_field_is_renamed() {
        let json = r#"{"id":3,"name":"Projector","type":"movable","availability":"available","created_at":"2024-01-01T08:00:00"}"#;
        let resource: Resource = serde_json::from_str(json).unwrap();
        assert_eq!(resource.resource_type, ResourceType::Movable);
        assert_eq!(resource.availability, Availability::Available);

        let body = serde_json::to_value(ResourceCreate {
            name: "Whiteboard".into(),
            resource_type: ResourceType::Fixed,
            availability: Availability::Unavailable,
        })
        .unwrap();
        assert_eq!(body["type"], "fixed");
        assert_eq!(body["availability"], "unavailable");
    }

    #[test]
    fn test_partial_update_omits_unset_fields() {
        let body = serde_json::to_value(ResourceUpdate {
            availability: Some(Availability::Unavailable),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"availability": "unavailable"}));
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("Movable".parse::<ResourceType>(), Ok(ResourceType::Movable));
        assert_eq!("unavailable".parse::<Availability>(), Ok(Availability::Unavailable));
        assert!("broken".parse::<ResourceType>().is_err());
    }
}
