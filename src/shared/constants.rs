/// Deepest category level the product form can select (root → child → grandchild)
pub const MAX_SELECTION_DEPTH: usize = 3;

/// Maximum length of a category name
pub const MAX_CATEGORY_NAME_LENGTH: u64 = 100;

/// Maximum length of a category slug
pub const MAX_CATEGORY_SLUG_LENGTH: u64 = 120;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Super admin role - full access to every admin surface
pub const ROLE_SUPER_ADMIN: &str = "super_admin";

/// Catalog admin role - manages categories and products
pub const ROLE_ADMIN: &str = "admin";
