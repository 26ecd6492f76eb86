use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{CreateTodoRequest, Todo, UpdateTodoRequest};

pub mod api;
pub mod error;
pub mod service;

use api::ApiClient;
use error::ActionError;
use service::TodoService;

#[derive(Debug, Clone)]
pub enum Msg {
    FetchTodos,
    TodosLoaded(Vec<Todo>),
    SetTitle(String),
    SetDescription(String),
    Submit,
    Submitted(Vec<Todo>),
    ToggleTodo(i64, bool),
    DeleteTodo(i64),
    Failed(ActionError),
}

/// The whole UI state: the current server snapshot, the two form fields,
/// the loading flag and the most recent error. The server stays the source
/// of truth; every mutation is followed by a full refetch and `todos` is
/// replaced wholesale, never patched in place.
#[derive(Debug, Clone)]
pub struct Model {
    service: TodoService,
    todos: Vec<Todo>,
    new_title: String,
    new_description: String,
    loading: bool,
    error: Option<ActionError>,
}

impl Model {
    pub fn new(service: TodoService) -> Self {
        Self {
            service,
            todos: Vec::new(),
            new_title: String::new(),
            new_description: String::new(),
            loading: false,
            error: None,
        }
    }

    fn can_submit(&self) -> bool {
        !self.loading
            && !self.new_title.trim().is_empty()
            && !self.new_description.trim().is_empty()
    }

    // The placeholder only ever covers the very first load; once anything
    // is on screen, later loads keep the list visible.
    fn show_loading_placeholder(&self) -> bool {
        self.loading && self.todos.is_empty()
    }
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        Cmd::new(async { Msg::FetchTodos })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::FetchTodos => {
                self.loading = true;
                let service = self.service.clone();
                Cmd::new(async move {
                    match service.list().await {
                        Ok(todos) => Msg::TodosLoaded(todos),
                        Err(_) => Msg::Failed(ActionError::Fetch),
                    }
                })
            }
            Msg::TodosLoaded(todos) => {
                self.todos = todos;
                self.error = None;
                self.loading = false;
                Cmd::none()
            }
            Msg::SetTitle(title) => {
                self.new_title = title;
                Cmd::none()
            }
            Msg::SetDescription(description) => {
                self.new_description = description;
                Cmd::none()
            }
            Msg::Submit => {
                let title = self.new_title.trim().to_string();
                let description = self.new_description.trim().to_string();
                if title.is_empty() || description.is_empty() {
                    self.error = Some(ActionError::Validation);
                    return Cmd::none();
                }

                self.loading = true;
                let service = self.service.clone();
                Cmd::new(async move {
                    let request = CreateTodoRequest { title, description };
                    if service.create(&request).await.is_err() {
                        return Msg::Failed(ActionError::Create);
                    }
                    match service.list().await {
                        Ok(todos) => Msg::Submitted(todos),
                        Err(_) => Msg::Failed(ActionError::Fetch),
                    }
                })
            }
            Msg::Submitted(todos) => {
                // Inputs are only cleared once both the create and the
                // refetch have succeeded.
                self.todos = todos;
                self.new_title.clear();
                self.new_description.clear();
                self.error = None;
                self.loading = false;
                Cmd::none()
            }
            Msg::ToggleTodo(id, completed) => {
                let service = self.service.clone();
                Cmd::new(async move {
                    let request = UpdateTodoRequest::completed(!completed);
                    if service.update(id, &request).await.is_err() {
                        return Msg::Failed(ActionError::Update);
                    }
                    match service.list().await {
                        Ok(todos) => Msg::TodosLoaded(todos),
                        Err(_) => Msg::Failed(ActionError::Fetch),
                    }
                })
            }
            Msg::DeleteTodo(id) => {
                let service = self.service.clone();
                Cmd::new(async move {
                    if service.delete(id).await.is_err() {
                        return Msg::Failed(ActionError::Delete);
                    }
                    match service.list().await {
                        Ok(todos) => Msg::TodosLoaded(todos),
                        Err(_) => Msg::Failed(ActionError::Fetch),
                    }
                })
            }
            Msg::Failed(kind) => {
                self.error = Some(kind);
                self.loading = false;
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        div(
            [class("mx-auto w-full max-w-md rounded-lg bg-white p-6 shadow-lg")],
            [
                h1([class("mb-6 text-2xl font-bold text-gray-900")], [text("Todo List")]),
                self.view_error(),
                self.view_form(),
                self.view_list(),
            ],
        )
    }
}

impl Model {
    fn view_error(&self) -> Node<Msg> {
        match self.error {
            Some(error) => div(
                [class("mb-4 rounded-lg bg-red-100 p-4 text-red-700")],
                [text(error.to_string())],
            ),
            None => span([], []),
        }
    }

    fn view_form(&self) -> Node<Msg> {
        div(
            [class("mb-6 space-y-4")],
            [
                input(
                    [
                        r#type("text"),
                        placeholder("Task title..."),
                        value(&self.new_title),
                        on_input(|event| Msg::SetTitle(event.value())),
                        disabled(self.loading),
                        class("w-full rounded-lg border px-4 py-2"),
                    ],
                    [],
                ),
                textarea(
                    [
                        placeholder("Task description..."),
                        value(&self.new_description),
                        on_input(|event| Msg::SetDescription(event.value())),
                        disabled(self.loading),
                        class("w-full rounded-lg border px-4 py-2"),
                    ],
                    [],
                ),
                button(
                    [
                        on_click(|_| Msg::Submit),
                        disabled(!self.can_submit()),
                        class("w-full rounded-lg bg-blue-500 px-4 py-2 font-semibold text-white disabled:opacity-50"),
                    ],
                    [if self.loading {
                        text("Adding...")
                    } else {
                        text("Add Todo")
                    }],
                ),
            ],
        )
    }

    fn view_list(&self) -> Node<Msg> {
        div(
            [class("max-h-96 overflow-y-auto rounded-lg border p-4")],
            [if self.show_loading_placeholder() {
                p([class("text-center text-gray-500")], [text("Loading...")])
            } else if self.todos.is_empty() {
                p(
                    [class("text-center text-gray-500")],
                    [text("No todos yet. Add one above!")],
                )
            } else {
                ul(
                    [class("space-y-3")],
                    self.todos
                        .iter()
                        .map(|todo| self.view_todo(todo))
                        .collect::<Vec<_>>(),
                )
            }],
        )
    }

    fn view_todo(&self, todo: &Todo) -> Node<Msg> {
        let id = todo.id;
        let completed = todo.completed;
        li(
            [
                key(todo.id.to_string()),
                class("flex flex-col gap-2 rounded-lg border bg-gray-50 p-3"),
            ],
            [
                div(
                    [class("flex items-center justify-between gap-2")],
                    [
                        div(
                            [class("flex items-center gap-3")],
                            [
                                input(
                                    [
                                        r#type("checkbox"),
                                        checked(todo.completed),
                                        on_click(move |_| Msg::ToggleTodo(id, completed)),
                                        class("h-5 w-5 cursor-pointer"),
                                    ],
                                    [],
                                ),
                                span([class(title_class(todo.completed))], [text(&todo.title)]),
                            ],
                        ),
                        button(
                            [
                                on_click(move |_| Msg::DeleteTodo(id)),
                                class("rounded-lg p-1 text-gray-500 hover:text-red-500"),
                            ],
                            [text("Delete")],
                        ),
                    ],
                ),
                if todo.description.is_empty() {
                    span([], [])
                } else {
                    p([class("text-sm text-gray-600")], [text(&todo.description)])
                },
            ],
        )
    }
}

fn title_class(completed: bool) -> &'static str {
    if completed {
        "text-sm font-medium text-gray-500 line-through"
    } else {
        "text-sm font-medium text-gray-900"
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    let base_url = option_env!("TODO_API_BASE_URL").unwrap_or("/api");
    let service = TodoService::new(ApiClient::new(base_url));
    Program::mount_to_body(Model::new(service));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Model {
        Model::new(TodoService::new(ApiClient::new("/api")))
    }

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            completed,
        }
    }

    #[test]
    fn whitespace_title_submit_sets_validation_error_without_a_request() {
        let mut model = model();
        model.new_title = "  ".into();
        model.new_description = "x".into();

        model.update(Msg::Submit);

        assert_eq!(model.error, Some(ActionError::Validation));
        assert_eq!(
            model.error.unwrap().to_string(),
            "Title and description are required."
        );
        // No request was issued, so the loading gate never opened and the
        // inputs stay as typed.
        assert!(!model.loading);
        assert_eq!(model.new_title, "  ");
        assert_eq!(model.new_description, "x");
    }

    #[test]
    fn whitespace_description_submit_is_rejected_too() {
        let mut model = model();
        model.new_title = "laundry".into();
        model.new_description = "\t ".into();

        model.update(Msg::Submit);

        assert_eq!(model.error, Some(ActionError::Validation));
        assert!(!model.loading);
    }

    #[test]
    fn valid_submit_enters_loading() {
        let mut model = model();
        model.new_title = "laundry".into();
        model.new_description = "whites only".into();

        model.update(Msg::Submit);

        assert!(model.loading);
        assert_eq!(model.error, None);
    }

    #[test]
    fn fetch_sets_loading_and_loaded_replaces_the_collection() {
        let mut model = model();
        model.update(Msg::FetchTodos);
        assert!(model.loading);

        model.update(Msg::TodosLoaded(vec![todo(1, "A", false)]));
        assert!(!model.loading);
        assert_eq!(model.todos.len(), 1);

        // A later load replaces the snapshot wholesale.
        model.update(Msg::TodosLoaded(vec![todo(2, "B", false), todo(3, "C", true)]));
        assert_eq!(
            model.todos.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn failed_fetch_keeps_previous_todos_and_sets_the_fetch_message() {
        let mut model = model();
        model.update(Msg::TodosLoaded(vec![todo(1, "A", false)]));

        model.update(Msg::FetchTodos);
        model.update(Msg::Failed(ActionError::Fetch));

        assert_eq!(model.todos.len(), 1);
        assert_eq!(model.todos[0].title, "A");
        assert_eq!(
            model.error.unwrap().to_string(),
            "Failed to fetch todos. Please try again later."
        );
        assert!(!model.loading);
    }

    #[test]
    fn successful_submit_clears_inputs_and_error() {
        let mut model = model();
        model.error = Some(ActionError::Fetch);
        model.new_title = "laundry".into();
        model.new_description = "whites only".into();
        model.update(Msg::Submit);

        model.update(Msg::Submitted(vec![todo(5, "laundry", false)]));

        assert_eq!(model.new_title, "");
        assert_eq!(model.new_description, "");
        assert_eq!(model.error, None);
        assert!(!model.loading);
        assert_eq!(model.todos[0].id, 5);
    }

    #[test]
    fn failed_create_keeps_inputs_populated() {
        let mut model = model();
        model.new_title = "laundry".into();
        model.new_description = "whites only".into();
        model.update(Msg::Submit);

        model.update(Msg::Failed(ActionError::Create));

        assert_eq!(model.new_title, "laundry");
        assert_eq!(model.new_description, "whites only");
        assert_eq!(
            model.error.unwrap().to_string(),
            "Failed to create todo. Please try again."
        );
        assert!(!model.loading);
    }

    #[test]
    fn refetch_failure_after_create_keeps_inputs_and_reports_fetch() {
        // The submit sequence is create, then refetch, then clear; a
        // refetch failure arrives as Failed(Fetch) and clearing never runs.
        let mut model = model();
        model.new_title = "laundry".into();
        model.new_description = "whites only".into();
        model.update(Msg::Submit);

        model.update(Msg::Failed(ActionError::Fetch));

        assert_eq!(model.new_title, "laundry");
        assert_eq!(model.new_description, "whites only");
        assert_eq!(model.error, Some(ActionError::Fetch));
        assert!(!model.loading);
    }

    #[test]
    fn toggle_round_trips_through_server_snapshots() {
        let mut model = model();
        model.update(Msg::TodosLoaded(vec![todo(1, "A", false)]));
        assert!(!model.todos[0].completed);

        // Each refetch replaces the snapshot; two toggles restore the
        // original displayed state.
        model.update(Msg::ToggleTodo(1, false));
        model.update(Msg::TodosLoaded(vec![todo(1, "A", true)]));
        assert!(model.todos[0].completed);

        model.update(Msg::ToggleTodo(1, true));
        model.update(Msg::TodosLoaded(vec![todo(1, "A", false)]));
        assert!(!model.todos[0].completed);
    }

    #[test]
    fn completed_titles_are_struck_through() {
        assert!(title_class(true).contains("line-through"));
        assert!(!title_class(false).contains("line-through"));
    }

    #[test]
    fn loading_placeholder_only_covers_the_first_load() {
        let mut model = model();
        model.loading = true;
        assert!(model.show_loading_placeholder());

        model.todos = vec![todo(1, "A", false)];
        assert!(!model.show_loading_placeholder());
    }

    #[test]
    fn action_failures_overwrite_the_previous_error() {
        let mut model = model();
        model.update(Msg::Failed(ActionError::Update));
        assert_eq!(model.error, Some(ActionError::Update));

        model.update(Msg::Failed(ActionError::Delete));
        assert_eq!(model.error, Some(ActionError::Delete));

        // Any successful action clears it again.
        model.update(Msg::TodosLoaded(Vec::new()));
        assert_eq!(model.error, None);
    }

    #[test]
    fn submit_is_gated_on_loading_and_non_blank_inputs() {
        let mut model = model();
        assert!(!model.can_submit());

        model.new_title = "laundry".into();
        model.new_description = "whites only".into();
        assert!(model.can_submit());

        model.loading = true;
        assert!(!model.can_submit());

        model.loading = false;
        model.new_description = "   ".into();
        assert!(!model.can_submit());
    }
}
