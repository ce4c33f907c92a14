pub mod auth;

pub mod users;

pub mod classes;

pub mod subjects;

pub mod questions;

pub mod system;

pub mod frontend;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use frontend::configure_frontend_routes;
pub use questions::configure_questions_routes;
pub use subjects::configure_subjects_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;
