use serde::{Deserialize, Serialize};

/// A todo as the task API reports it. Ids are assigned by the server and
/// never minted or changed on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
}

/// Partial update; `None` fields stay out of the JSON body entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodoRequest {
    /// An update that only sets the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todo_matches_the_task_api_shape() {
        let todo: Todo = serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "description": "first",
            "completed": false,
        }))
        .unwrap();
        assert_eq!(todo.id, 1);
        assert_eq!(todo.title, "A");
        assert!(!todo.completed);
    }

    #[test]
    fn toggle_update_serializes_only_the_completed_field() {
        let body = serde_json::to_value(UpdateTodoRequest::completed(true)).unwrap();
        assert_eq!(body, json!({ "completed": true }));
    }

    #[test]
    fn create_request_carries_title_and_description() {
        let request = CreateTodoRequest {
            title: "A".into(),
            description: "first".into(),
        };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body, json!({ "title": "A", "description": "first" }));
    }
}
