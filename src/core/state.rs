use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool) -> Self {
        Self { inner: Arc::new(InnerState { settings, db }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Today's calendar date in the configured schedule offset.
    pub(crate) fn today(&self) -> time::Date {
        crate::core::time::today_in(self.inner.settings.schedule().utc_offset)
    }
}
