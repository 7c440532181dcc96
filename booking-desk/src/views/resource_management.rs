//! Admin: create, edit and delete resources

use booking_client::{HttpClient, api};
use shared::models::{Availability, Resource, ResourceCreate, ResourceType, ResourceUpdate};

use super::{Notice, table};

/// Editor state; a new resource starts fixed and available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceForm {
    pub name: String,
    pub resource_type: ResourceType,
    pub availability: Availability,
}

impl Default for ResourceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            resource_type: ResourceType::Fixed,
            availability: Availability::Available,
        }
    }
}

impl From<&Resource> for ResourceForm {
    fn from(resource: &Resource) -> Self {
        Self {
            name: resource.name.clone(),
            resource_type: resource.resource_type,
            availability: resource.availability,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceEditor {
    pub resource_id: Option<i64>,
    pub form: ResourceForm,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceManagement {
    pub resources: Vec<Resource>,
    pub editor: Option<ResourceEditor>,
    pub error: Option<Notice>,
}

impl ResourceManagement {
    pub async fn load<C: HttpClient>(client: &C) -> Self {
        let mut view = Self::default();
        view.reload(client).await;
        view
    }

    async fn reload<C: HttpClient>(&mut self, client: &C) {
        match api::resources::list(client).await {
            Ok(resources) => self.resources = resources,
            Err(e) => self.error = Some(Notice::failed("Failed to fetch resources", &e)),
        }
    }

    pub fn open_create(&mut self) {
        self.editor = Some(ResourceEditor::default());
    }

    pub fn open_edit(&mut self, resource_id: i64) -> bool {
        let Some(resource) = self.resources.iter().find(|r| r.id == resource_id) else {
            return false;
        };
        self.editor = Some(ResourceEditor {
            resource_id: Some(resource.id),
            form: ResourceForm::from(resource),
        });
        true
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Create or update from the open editor, then reload
    pub async fn submit<C: HttpClient>(&mut self, client: &C) -> bool {
        let Some(editor) = self.editor.clone() else {
            return false;
        };
        let form = editor.form;
        let result = match editor.resource_id {
            Some(id) => {
                let update = ResourceUpdate {
                    name: Some(form.name),
                    resource_type: Some(form.resource_type),
                    availability: Some(form.availability),
                };
                api::resources::update(client, id, &update).await
            }
            None => {
                let create = ResourceCreate {
                    name: form.name,
                    resource_type: form.resource_type,
                    availability: form.availability,
                };
                api::resources::create(client, &create).await
            }
        };
        match result {
            Ok(resource) => {
                tracing::info!(resource_id = resource.id, name = %resource.name, "Resource saved");
                self.editor = None;
                self.error = None;
                self.reload(client).await;
                true
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to submit resource", &e));
                false
            }
        }
    }

    pub async fn delete<C: HttpClient>(&mut self, client: &C, resource_id: i64) -> bool {
        match api::resources::delete(client, resource_id).await {
            Ok(_) => {
                tracing::info!(resource_id, "Resource deleted");
                self.reload(client).await;
                true
            }
            Err(e) => {
                self.error = Some(Notice::failed("Failed to delete resource", &e));
                false
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Resource Management\n");
        if let Some(error) = &self.error {
            out.push_str(&format!("{}\n", error.render()));
        }
        let rows: Vec<Vec<String>> = self
            .resources
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.resource_type.as_str().to_string(),
                    r.availability.as_str().to_string(),
                ]
            })
            .collect();
        out.push_str(&table(&["Id", "Resource Name", "Type", "Availability"], &rows));

        if let Some(editor) = &self.editor {
            out.push_str(if editor.resource_id.is_some() {
                "\nEdit Resource\n"
            } else {
                "\nAdd Resource\n"
            });
            out.push_str(&format!("  Resource Name: {}\n", editor.form.name));
            out.push_str(&format!("  Type: {}\n", editor.form.resource_type.label()));
            out.push_str(&format!("  Availability: {}\n", editor.form.availability.label()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form() {
        let form = ResourceForm::default();
        assert!(form.name.is_empty());
        assert_eq!(form.resource_type, ResourceType::Fixed);
        assert_eq!(form.availability, Availability::Available);
    }

    #[test]
    fn test_edit_prefills_from_row() {
        let mut view = ResourceManagement {
            resources: vec![Resource {
                id: 9,
                name: "Cart".into(),
                resource_type: ResourceType::Movable,
                availability: Availability::Unavailable,
                created_at: None,
            }],
            ..Default::default()
        };
        assert!(!view.open_edit(1));
        assert!(view.open_edit(9));
        let editor = view.editor.unwrap();
        assert_eq!(editor.resource_id, Some(9));
        assert_eq!(editor.form.name, "Cart");
        assert_eq!(editor.form.resource_type, ResourceType::Movable);
    }
}
