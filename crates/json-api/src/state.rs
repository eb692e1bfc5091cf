//! State

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use tamweely_app::context::AppContext;

use crate::auth::TokenVerifier;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) tokens: TokenVerifier,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, tokens: TokenVerifier) -> Self {
        Self { app, tokens }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, tokens: TokenVerifier) -> Arc<Self> {
        Arc::new(Self::new(app, tokens))
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("State")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
