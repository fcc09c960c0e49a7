mod auth;
mod record;
mod update;

pub use auth::TokenManager;
pub use record::RecordError;
pub use record::RecordManager;
pub use update::LastUpdateManager;
