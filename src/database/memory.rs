use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{AdminCredential, AdminProperty, Property, PropertyInput, State};
use crate::database::repository::CatalogStore;
use crate::filter::PropertyQuery;

#[derive(Default)]
struct Tables {
    properties: BTreeMap<i32, Property>,
    states: Vec<State>,
    users: Vec<AdminCredential>,
    next_property_id: i32,
}

/// In-process catalog store with the same semantics as the Postgres one.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_state(&self, name: &str) -> State {
        let mut tables = self.tables.write().await;
        let state = State { id: tables.states.len() as i32 + 1, name: name.to_string() };
        tables.states.push(state.clone());
        state
    }

    pub async fn add_credential(&self, username: &str, password_hash: &str) -> AdminCredential {
        let mut tables = self.tables.write().await;
        let credential = AdminCredential {
            id: tables.users.len() as i32 + 1,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(credential.clone());
        credential
    }
}

fn apply(property: &mut Property, input: PropertyInput) {
    property.title = input.title;
    property.property_type = input.property_type;
    property.status = input.status;
    property.state_id = input.state_id;
    property.county = input.county;
    property.address = input.address;
    property.description = input.description;
    property.square_meters = input.square_meters;
    property.bedrooms = input.bedrooms;
    property.bathrooms = input.bathrooms;
    property.parking = input.parking;
    property.image = input.image;
    property.gallery = input.gallery;
    property.price = input.price;
    property.show_price = input.show_price;
    property.lat = input.lat;
    property.lng = input.lng;
    property.active = input.active;
    property.sold = input.sold;
    property.updated_at = Utc::now();
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn search_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, DatabaseError> {
        let tables = self.tables.read().await;
        let mut found: Vec<Property> = tables
            .properties
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();
        // updated_at DESC, then id DESC
        found.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = query.limit {
            found.truncate(limit.max(0) as usize);
        }
        Ok(found)
    }

    async fn find_property(&self, id: i32) -> Result<Option<Property>, DatabaseError> {
        Ok(self.tables.read().await.properties.get(&id).cloned())
    }

    async fn list_all_properties(&self) -> Result<Vec<AdminProperty>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .properties
            .values()
            .rev()
            .map(|p| AdminProperty {
                property: p.clone(),
                state: tables.states.iter().find(|s| s.id == p.state_id).cloned(),
            })
            .collect())
    }

    async fn create_property(&self, input: PropertyInput) -> Result<Property, DatabaseError> {
        let mut tables = self.tables.write().await;
        tables.next_property_id += 1;
        let now = Utc::now();
        let property = Property {
            id: tables.next_property_id,
            title: input.title,
            property_type: input.property_type,
            status: input.status,
            state_id: input.state_id,
            county: input.county,
            address: input.address,
            description: input.description,
            square_meters: input.square_meters,
            bedrooms: input.bedrooms,
            bathrooms: input.bathrooms,
            parking: input.parking,
            image: input.image,
            gallery: input.gallery,
            price: input.price,
            show_price: input.show_price,
            lat: input.lat,
            lng: input.lng,
            active: input.active,
            sold: input.sold,
            created_at: now,
            updated_at: now,
        };
        tables.properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn update_property(&self, id: i32, input: PropertyInput) -> Result<Option<Property>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.properties.get_mut(&id).map(|property| {
            apply(property, input);
            property.clone()
        }))
    }

    async fn deactivate_property(&self, id: i32) -> Result<Option<Property>, DatabaseError> {
        let mut tables = self.tables.write().await;
        Ok(tables.properties.get_mut(&id).map(|property| {
            property.active = false;
            property.updated_at = Utc::now();
            property.clone()
        }))
    }

    async fn list_states(&self) -> Result<Vec<State>, DatabaseError> {
        let mut states = self.tables.read().await.states.clone();
        states.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(states)
    }

    async fn find_credential(&self, username: &str) -> Result<Option<AdminCredential>, DatabaseError> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
