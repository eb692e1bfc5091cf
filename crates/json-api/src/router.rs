//! App Router

use salvo::Router;

use crate::{auth, departments, employees, jobs};

/// Record routes, all behind bearer authentication.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("departments")
                .get(departments::index::handler)
                .post(departments::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(departments::get::handler)
                        .put(departments::update::handler)
                        .delete(departments::delete::handler),
                ),
        )
        .push(
            Router::with_path("jobs")
                .get(jobs::index::handler)
                .post(jobs::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(jobs::get::handler)
                        .put(jobs::update::handler)
                        .delete(jobs::delete::handler),
                ),
        )
        .push(
            Router::with_path("employees")
                .get(employees::index::handler)
                .post(employees::create::handler)
                .push(Router::with_path("export").get(employees::export::handler))
                .push(
                    Router::with_path("{id}")
                        .get(employees::get::handler)
                        .put(employees::update::handler)
                        .delete(employees::delete::handler),
                ),
        )
}
