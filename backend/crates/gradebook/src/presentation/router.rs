//! Gradebook Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::domain::repository::GradebookStore;
use crate::infra::postgres::PgGradebookRepository;
use crate::presentation::handlers::{self, GradebookAppState};

/// Create the gradebook router with PostgreSQL repository
pub fn gradebook_router(repo: PgGradebookRepository) -> Router {
    gradebook_router_generic(repo)
}

/// Create a generic gradebook router for any repository implementation
pub fn gradebook_router_generic<R>(repo: R) -> Router
where
    R: GradebookStore,
{
    let state = GradebookAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        // Grades
        .route("/grades", get(handlers::list_grades::<R>))
        .route("/grades/addGrade", post(handlers::add_grade::<R>))
        .route(
            "/grades/{id}",
            get(handlers::get_grade::<R>).delete(handlers::delete_grade::<R>),
        )
        // Modules
        .route(
            "/modules",
            get(handlers::list_modules::<R>).post(handlers::create_module::<R>),
        )
        .route(
            "/modules/{code}",
            get(handlers::get_module::<R>).delete(handlers::delete_module::<R>),
        )
        .route(
            "/modules/moduleDetails/{module_code}",
            get(handlers::module_details::<R>),
        )
        // Students
        .route(
            "/students",
            get(handlers::list_students::<R>).post(handlers::create_student::<R>),
        )
        .route(
            "/students/{id}",
            get(handlers::get_student::<R>).delete(handlers::delete_student::<R>),
        )
        .route(
            "/students/studentDetail/{id}",
            get(handlers::student_details::<R>),
        )
        .route(
            "/students/studentDetail/addGrade",
            post(handlers::add_grade::<R>),
        )
        .route(
            "/students/studentDetail/register",
            post(handlers::register_student::<R>),
        )
        .route(
            "/students/studentDetail/computeAverage/{id}",
            get(handlers::compute_average::<R>),
        )
        .route(
            "/students/studentDetail/registrations/{student_id}/{module_code}",
            delete(handlers::delete_registration::<R>),
        )
        .with_state(state)
}
