//! Resource list with client-side filters

use booking_client::{HttpClient, api};
use shared::models::{Availability, Resource, ResourceType};

use super::{Notice, table};
use crate::booking::TimeWindow;

/// Optional type and availability filters; `None` means all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub resource_type: Option<ResourceType>,
    pub availability: Option<Availability>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        self.resource_type.is_none_or(|t| resource.resource_type == t)
            && self.availability.is_none_or(|a| resource.availability == a)
    }

    pub fn apply(&self, resources: Vec<Resource>) -> Vec<Resource> {
        resources.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceList {
    pub filter: ResourceFilter,
    /// Set when the list shows movable resources free in a window
    pub window: Option<TimeWindow>,
    pub resources: Vec<Resource>,
    pub error: Option<Notice>,
}

impl ResourceList {
    /// All resources, filtered
    pub async fn load<C: HttpClient>(client: &C, filter: ResourceFilter) -> Self {
        let mut list = Self {
            filter,
            ..Self::default()
        };
        match api::resources::list(client).await {
            Ok(resources) => list.resources = filter.apply(resources),
            Err(e) => list.error = Some(Notice::failed("Failed to fetch resources", &e)),
        }
        list
    }

    /// Replace the list with movable resources free for the whole window
    pub async fn find_available_movable<C: HttpClient>(&mut self, client: &C, window: TimeWindow) {
        let (start, end) = (window.start(), window.end());
        match api::resources::movable_available(client, &start, &end).await {
            Ok(resources) => {
                self.window = Some(window);
                self.resources = resources;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to fetch available movable resources", &e))
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Resource List\n");
        if let Some(error) = &self.error {
            out.push_str(&error.render());
            out.push('\n');
            return out;
        }
        if let Some(window) = &self.window {
            out.push_str(&format!(
                "Available movable resources {} - {}\n",
                super::display_time(&window.start()),
                super::display_time(&window.end())
            ));
        }
        let rows: Vec<Vec<String>> = self
            .resources
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.resource_type.label().to_string(),
                    r.availability.label().to_string(),
                ]
            })
            .collect();
        out.push_str(&table(&["Resource Name", "Type", "Availability"], &rows));
        out
    }
}
