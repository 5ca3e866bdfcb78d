mod permission;
mod role;
mod user;

pub use self::permission::Permission;
pub use self::role::Role;
pub use self::user::User;
