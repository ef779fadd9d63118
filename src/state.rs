use std::sync::Arc;

use crate::{db::Store, services::report::ReportGenerator};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub reports: Arc<ReportGenerator>,
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<ReportGenerator> {
    fn from_ref(state: &AppState) -> Self {
        state.reports.clone()
    }
}
