use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{AdminCredential, AdminProperty, Property, PropertyInput, State};
use crate::filter::PropertyQuery;

/// Data access used by the route handlers.
///
/// Implemented over Postgres for deployments and in memory for tests.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Active properties matching `query`, ordered and limited as it says
    async fn search_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, DatabaseError>;

    async fn find_property(&self, id: i32) -> Result<Option<Property>, DatabaseError>;

    /// Every property including inactive ones, newest id first
    async fn list_all_properties(&self) -> Result<Vec<AdminProperty>, DatabaseError>;

    async fn create_property(&self, input: PropertyInput) -> Result<Property, DatabaseError>;

    /// `None` when no property has this id
    async fn update_property(&self, id: i32, input: PropertyInput) -> Result<Option<Property>, DatabaseError>;

    /// Soft delete: clears `active`, keeps the row
    async fn deactivate_property(&self, id: i32) -> Result<Option<Property>, DatabaseError>;

    /// States ordered alphabetically
    async fn list_states(&self) -> Result<Vec<State>, DatabaseError>;

    async fn find_credential(&self, username: &str) -> Result<Option<AdminCredential>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
