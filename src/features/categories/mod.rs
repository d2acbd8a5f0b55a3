//! Product categories for the admin dashboard and the storefront.
//!
//! Categories form a forest of at most three levels
//! (root → child → grandchild) stored as flat rows with a `parent_id`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | Active categories, flat or `?tree=true` |
//! | GET | `/api/categories/{slug}` | Active category by slug |
//! | GET | `/api/admin/categories` | All categories (`tree`, `include_inactive`) |
//! | POST | `/api/admin/categories` | Create category |
//! | GET | `/api/admin/categories/selection` | Resolve `leaf_id` into level 1/2/3 ids |
//! | GET | `/api/admin/categories/{id}` | Category by id |
//! | PUT | `/api/admin/categories/{id}` | Update or move category |
//! | DELETE | `/api/admin/categories/{id}` | Delete category without children |

pub mod dtos;
pub mod handlers;
pub mod hierarchy;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
