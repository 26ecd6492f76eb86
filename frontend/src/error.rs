/// User-facing failure kinds. Each action maps to exactly one fixed
/// message; the view shows whichever kind happened most recently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Title and description are required.")]
    Validation,
    #[error("Failed to fetch todos. Please try again later.")]
    Fetch,
    #[error("Failed to create todo. Please try again.")]
    Create,
    #[error("Failed to update todo. Please try again.")]
    Update,
    #[error("Failed to delete todo. Please try again.")]
    Delete,
}
