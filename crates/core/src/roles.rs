//! Role name constants shared by the DB and API layers.

/// May process any submitted week and view all submissions.
pub const ROLE_ADMIN: &str = "Admin";

/// May create, edit, and submit their own timesheet entries.
pub const ROLE_EMPLOYEE: &str = "Employee";

/// Account status stored on the `users` table.
pub const USER_ACTIVE: &str = "Active";
pub const USER_INACTIVE: &str = "Inactive";
