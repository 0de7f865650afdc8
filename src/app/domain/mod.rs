pub mod email;
pub mod payment_status;
pub mod project_status;
pub mod task_status;
pub mod user_id;
pub mod user_role;

pub use email::Email;
pub use payment_status::PaymentStatus;
pub use project_status::ProjectStatus;
pub use task_status::{InvalidTransition, TaskStatus};
pub use user_id::UserId;
pub use user_role::UserRole;
