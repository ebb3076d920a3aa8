use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::state::State;
use crate::database::DatabaseError;

/// Listing status. Wire values are the catalog's own vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyStatus {
    #[serde(rename = "venta")]
    Sale,
    #[serde(rename = "renta")]
    Rent,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 2] = [PropertyStatus::Sale, PropertyStatus::Rent];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyStatus::Sale => "venta",
            PropertyStatus::Rent => "renta",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Casa,
    Departamento,
    Terreno,
    CasaEnCondominio,
    Local,
    Bodega,
    Duplex,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::Casa,
        PropertyType::Departamento,
        PropertyType::Terreno,
        PropertyType::CasaEnCondominio,
        PropertyType::Local,
        PropertyType::Bodega,
        PropertyType::Duplex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Casa => "casa",
            PropertyType::Departamento => "departamento",
            PropertyType::Terreno => "terreno",
            PropertyType::CasaEnCondominio => "casa_en_condominio",
            PropertyType::Local => "local",
            PropertyType::Bodega => "bodega",
            PropertyType::Duplex => "duplex",
        }
    }
}

/// Returned when a string is outside a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

// Matching is exact and case-sensitive
impl FromStr for PropertyStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub state_id: i32,
    pub county: String,
    pub address: String,
    pub description: String,
    pub square_meters: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking: i32,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: Decimal,
    pub show_price: bool,
    pub lat: f64,
    pub lng: f64,
    pub active: bool,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Property as listed in the admin area, with its state attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminProperty {
    #[serde(flatten)]
    pub property: Property,
    pub state: Option<State>,
}

/// Raw `properties` row; enumerations are stored as text
#[derive(Debug, Clone, FromRow)]
pub struct PropertyRow {
    pub id: i32,
    pub title: String,
    #[sqlx(rename = "type")]
    pub property_type: String,
    pub status: String,
    pub state_id: i32,
    pub county: String,
    pub address: String,
    pub description: String,
    pub square_meters: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking: i32,
    pub image: String,
    pub gallery: Vec<String>,
    pub price: Decimal,
    pub show_price: bool,
    pub lat: f64,
    pub lng: f64,
    pub active: bool,
    pub sold: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PropertyRow> for Property {
    type Error = DatabaseError;

    fn try_from(row: PropertyRow) -> Result<Self, Self::Error> {
        let property_type = row.property_type.parse::<PropertyType>().map_err(|e| {
            DatabaseError::Corrupt(format!("property {} column \"type\": {}", row.id, e))
        })?;
        let status = row.status.parse::<PropertyStatus>().map_err(|e| {
            DatabaseError::Corrupt(format!("property {} column \"status\": {}", row.id, e))
        })?;

        Ok(Property {
            id: row.id,
            title: row.title,
            property_type,
            status,
            state_id: row.state_id,
            county: row.county,
            address: row.address,
            description: row.description,
            square_meters: row.square_meters,
            bedrooms: row.bedrooms,
            bathrooms: row.bathrooms,
            parking: row.parking,
            image: row.image,
            gallery: row.gallery,
            price: row.price,
            show_price: row.show_price,
            lat: row.lat,
            lng: row.lng,
            active: row.active,
            sold: row.sold,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn default_true() -> bool {
    true
}

/// Body accepted by the admin create and update endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyInput {
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    pub state_id: i32,
    pub county: String,
    pub address: String,
    pub description: String,
    pub square_meters: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub parking: i32,
    pub image: String,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub price: Decimal,
    #[serde(default)]
    pub show_price: bool,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub sold: bool,
}

impl PropertyInput {
    /// Reject values the catalog cannot display sensibly.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be empty".to_string());
        }
        if self.county.trim().is_empty() {
            return Err("county must not be empty".to_string());
        }
        let counts = [
            ("square_meters", self.square_meters),
            ("bedrooms", self.bedrooms),
            ("bathrooms", self.bathrooms),
            ("parking", self.parking),
        ];
        if let Some((field, _)) = counts.iter().find(|(_, v)| *v < 0) {
            return Err(format!("{} must not be negative", field));
        }
        if self.price.is_sign_negative() {
            return Err("price must not be negative".to_string());
        }
        if !(-90.0..=90.0).contains(&self.lat) || !(-180.0..=180.0).contains(&self.lng) {
            return Err("coordinates out of range".to_string());
        }
        Ok(())
    }
}
