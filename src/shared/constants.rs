/// Default page size for catalog listings
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 50;

/// Largest quantity a single cart line may hold
pub const MAX_CART_QUANTITY: i32 = 99;

/// Products at or below this stock level count as "low stock" on the admin dashboard
pub const LOW_STOCK_THRESHOLD: i32 = 5;

/// Number of featured products shown on the home page
pub const HOME_FEATURED_LIMIT: i64 = 8;

/// Number of collections shown on the home page
pub const HOME_COLLECTIONS_LIMIT: i64 = 6;

// =============================================================================
// SESSION COOKIES
// =============================================================================

/// Cookie carrying the identity provider access token
pub const SESSION_COOKIE: &str = "atelier_session";

/// Cookie carrying the identity provider refresh token
pub const REFRESH_COOKIE: &str = "atelier_refresh";
