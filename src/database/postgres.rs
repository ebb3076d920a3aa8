use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{AdminCredential, AdminProperty, Property, PropertyInput, PropertyRow, State};
use crate::database::query_builder::QueryBuilder;
use crate::database::repository::CatalogStore;
use crate::filter::PropertyQuery;

const PROPERTY_COLUMNS: &str = "\"title\", \"type\", \"status\", \"state_id\", \"county\", \"address\", \
    \"description\", \"square_meters\", \"bedrooms\", \"bathrooms\", \"parking\", \"image\", \"gallery\", \
    \"price\", \"show_price\", \"lat\", \"lng\", \"active\", \"sold\"";

#[derive(Debug, FromRow)]
struct AdminPropertyRow {
    #[sqlx(flatten)]
    property: PropertyRow,
    state_name: Option<String>,
}

/// Catalog store backed by the Postgres `properties`, `states` and `users` tables
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn bind_input<'q>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, PropertyRow, sqlx::postgres::PgArguments>,
    input: &'q PropertyInput,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, PropertyRow, sqlx::postgres::PgArguments> {
    q.bind(&input.title)
        .bind(input.property_type.as_str())
        .bind(input.status.as_str())
        .bind(input.state_id)
        .bind(&input.county)
        .bind(&input.address)
        .bind(&input.description)
        .bind(input.square_meters)
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(input.parking)
        .bind(&input.image)
        .bind(&input.gallery)
        .bind(input.price)
        .bind(input.show_price)
        .bind(input.lat)
        .bind(input.lng)
        .bind(input.active)
        .bind(input.sold)
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn search_properties(&self, query: &PropertyQuery) -> Result<Vec<Property>, DatabaseError> {
        let sql = query.to_sql();
        tracing::debug!(query = %sql.query, params = sql.params.len(), "property search");
        QueryBuilder::select_all::<PropertyRow>(&self.pool, &sql)
            .await?
            .into_iter()
            .map(Property::try_from)
            .collect()
    }

    async fn find_property(&self, id: i32) -> Result<Option<Property>, DatabaseError> {
        sqlx::query_as::<_, PropertyRow>("SELECT * FROM \"properties\" WHERE \"id\" = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Property::try_from)
            .transpose()
    }

    async fn list_all_properties(&self) -> Result<Vec<AdminProperty>, DatabaseError> {
        let rows = sqlx::query_as::<_, AdminPropertyRow>(
            "SELECT p.*, s.\"name\" AS state_name FROM \"properties\" p \
             LEFT JOIN \"states\" s ON s.\"id\" = p.\"state_id\" \
             ORDER BY p.\"id\" DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let state = row.state_name.map(|name| State { id: row.property.state_id, name });
                Ok(AdminProperty { property: Property::try_from(row.property)?, state })
            })
            .collect()
    }

    async fn create_property(&self, input: PropertyInput) -> Result<Property, DatabaseError> {
        let sql = format!(
            "INSERT INTO \"properties\" ({}, \"created_at\", \"updated_at\") \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, now(), now()) \
             RETURNING *",
            PROPERTY_COLUMNS
        );
        let row = bind_input(sqlx::query_as::<_, PropertyRow>(&sql), &input)
            .fetch_one(&self.pool)
            .await?;
        Property::try_from(row)
    }

    async fn update_property(&self, id: i32, input: PropertyInput) -> Result<Option<Property>, DatabaseError> {
        let sql = format!(
            "UPDATE \"properties\" SET ({}, \"updated_at\") = \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, now()) \
             WHERE \"id\" = $20 RETURNING *",
            PROPERTY_COLUMNS
        );
        bind_input(sqlx::query_as::<_, PropertyRow>(&sql), &input)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Property::try_from)
            .transpose()
    }

    async fn deactivate_property(&self, id: i32) -> Result<Option<Property>, DatabaseError> {
        sqlx::query_as::<_, PropertyRow>(
            "UPDATE \"properties\" SET \"active\" = false, \"updated_at\" = now() WHERE \"id\" = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Property::try_from)
        .transpose()
    }

    async fn list_states(&self) -> Result<Vec<State>, DatabaseError> {
        let states = sqlx::query_as::<_, State>("SELECT \"id\", \"name\" FROM \"states\" ORDER BY \"name\" ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(states)
    }

    async fn find_credential(&self, username: &str) -> Result<Option<AdminCredential>, DatabaseError> {
        let credential = sqlx::query_as::<_, AdminCredential>(
            "SELECT \"id\", \"username\", \"password_hash\" FROM \"users\" WHERE \"username\" = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credential)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
