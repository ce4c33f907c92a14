pub mod auth;
pub mod classes;
pub mod questions;
pub mod subjects;
pub mod system;
pub mod users;

pub use auth::AuthService;
pub use classes::ClassService;
pub use questions::QuestionService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use users::UserService;
