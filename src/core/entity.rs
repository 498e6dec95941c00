//! Entity trait shared by every stored catalog type

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all catalog entities.
///
/// All entities have:
/// - id: Unique identifier
/// - created_at / updated_at: timestamps, newest-first ordering uses `created_at`
/// - a slug field: the English name that `/{plural}/{slug}` URLs resolve against
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs and collection names (e.g., "brands")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "brand")
    fn resource_name_singular() -> &'static str;

    /// Serialized name of the field slugs are matched against
    fn slug_field() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Value of the slug field
    fn slug_source(&self) -> &str;

    /// Mark the entity as modified now
    fn touch(&mut self);
}
