pub mod deadlines;

pub mod evaluations;

pub mod projects;

pub use deadlines::configure_deadline_routes;
pub use evaluations::configure_evaluation_routes;
pub use projects::configure_project_routes;
