//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use crate::auth::{Access, Principal};

const PRINCIPAL_DEPOT_KEY: &str = "principal";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<&Principal, StatusError>;

    /// The authenticated caller, provided they may perform `access`.
    fn authorize(&self, access: Access) -> Result<&Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.insert(PRINCIPAL_DEPOT_KEY, principal);
    }

    fn principal_or_401(&self) -> Result<&Principal, StatusError> {
        self.get::<Principal>(PRINCIPAL_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn authorize(&self, access: Access) -> Result<&Principal, StatusError> {
        let principal = self.principal_or_401()?;

        principal.authorize(access)?;

        Ok(principal)
    }
}
