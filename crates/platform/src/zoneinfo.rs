//! Time zone database abstraction.
//!
//! Lists come back already serialized (`'\n'`-separated) so the menu can
//! address them with the list codec without building one allocation per
//! zone.

use alloc::string::String;

/// Time zone database
pub trait ZoneDb {
    /// Serialized list of regions (`Africa`, `America`, ...), or `None` if
    /// the database is unavailable.
    fn region_list(&self) -> Option<String>;

    /// Serialized list of zones inside `region`, without the region prefix.
    fn zone_list(&self, region: &str) -> Option<String>;

    /// POSIX `TZ` rule for a full zone name such as `Europe/Berlin`.
    fn posix_tz(&self, zone: &str) -> Option<&str>;
}
