use sqlx::FromRow;

/// Administrator login record. Never serialized to clients.
#[derive(Debug, Clone, FromRow)]
pub struct AdminCredential {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}
