use std::sync::Arc;

use crate::domain::repositories::{ExpenseRepository, UserRepository};

/// Shared handler state
///
/// Repositories are injected as trait objects: the binary wires the
/// Postgres adapters, tests wire the in-memory store. Handlers never
/// construct an adapter themselves.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub expenses: Arc<dyn ExpenseRepository>,
}
