use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tasker_core::config::TaskerConfig;
use tasker_tasks::TaskStore;
use tower_http::services::ServeDir;

/// Where "today" comes from. Handlers never read the clock directly.
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    /// Local calendar date of the host.
    System,
    /// A pinned date (`--today`, and tests).
    Fixed(NaiveDate),
}

/// Central shared state — passed as Arc<AppState> to all Axum handlers.
pub struct AppState {
    pub config: TaskerConfig,
    pub tasks: TaskStore,
    pub clock: Clock,
}

impl AppState {
    pub fn new(config: TaskerConfig, tasks: TaskStore) -> Self {
        Self {
            config,
            tasks,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Reference date for validation and repeat calculations.
    pub fn today(&self) -> NaiveDate {
        match self.clock {
            Clock::System => chrono::Local::now().date_naive(),
            Clock::Fixed(date) => date,
        }
    }
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let web = ServeDir::new(&state.config.web.dir);

    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route(
            "/api/nextdate",
            get(crate::http::nextdate::next_date_handler),
        )
        .route(
            "/api/task",
            post(crate::http::tasks::create_task)
                .get(crate::http::tasks::get_task)
                .put(crate::http::tasks::update_task)
                .delete(crate::http::tasks::delete_task),
        )
        .route("/api/task/done", post(crate::http::tasks::complete_task))
        .route("/api/tasks", get(crate::http::tasks::list_tasks))
        .fallback_service(web)
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
