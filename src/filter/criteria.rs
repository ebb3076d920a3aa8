// filter/criteria.rs - Public property search: query string -> predicate

use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::str::FromStr;

use super::error::FilterError;
use super::filter::Filter;
use super::types::{FilterOp, FilterOrderInfo, FilterWhereInfo, SortDirection, SqlResult};
use crate::database::models::{Property, PropertyStatus, PropertyType};

/// Page size of the unfiltered "latest properties" view
pub const LATEST_PAGE_SIZE: i64 = 5;

pub const PROPERTIES_TABLE: &str = "properties";

/// Raw search parameters exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub state_id: Option<String>,
    pub county: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub bedrooms: Option<String>,
    pub parking: Option<String>,
}

/// Parsed search constraints. `None` means the dimension is unconstrained;
/// values inside one set are alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub state_ids: Option<BTreeSet<i32>>,
    pub county: Option<String>,
    pub statuses: Option<BTreeSet<PropertyStatus>>,
    pub types: Option<BTreeSet<PropertyType>>,
    pub bedrooms: Option<BTreeSet<i32>>,
    pub parking: Option<BTreeSet<i32>>,
}

impl FilterCriteria {
    pub fn is_unconstrained(&self) -> bool {
        self == &FilterCriteria::default()
    }

    pub fn matches(&self, property: &Property) -> bool {
        fn allows<T: Ord>(set: &Option<BTreeSet<T>>, value: &T) -> bool {
            set.as_ref().map_or(true, |s| s.contains(value))
        }

        allows(&self.state_ids, &property.state_id)
            && self.county.as_ref().map_or(true, |needle| {
                property.county.to_lowercase().contains(&needle.to_lowercase())
            })
            && allows(&self.statuses, &property.status)
            && allows(&self.types, &property.property_type)
            && allows(&self.bedrooms, &property.bedrooms)
            && allows(&self.parking, &property.parking)
    }

    fn conditions(&self) -> Vec<FilterWhereInfo> {
        fn set_condition<T>(column: &'static str, set: &Option<BTreeSet<T>>, to_value: impl Fn(&T) -> Value) -> Option<FilterWhereInfo> {
            set.as_ref().map(|s| FilterWhereInfo {
                column,
                operator: FilterOp::In,
                data: Value::Array(s.iter().map(&to_value).collect()),
            })
        }

        let mut conditions = vec![];
        conditions.extend(set_condition("state_id", &self.state_ids, |v| json!(v)));
        if let Some(county) = &self.county {
            conditions.push(FilterWhereInfo { column: "county", operator: FilterOp::Contains, data: json!(county) });
        }
        conditions.extend(set_condition("status", &self.statuses, |v| json!(v.as_str())));
        conditions.extend(set_condition("type", &self.types, |v| json!(v.as_str())));
        conditions.extend(set_condition("bedrooms", &self.bedrooms, |v| json!(v)));
        conditions.extend(set_condition("parking", &self.parking, |v| json!(v)));
        conditions
    }
}

/// A complete public search: criteria, the implicit `active` constraint,
/// ordering and page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyQuery {
    pub criteria: FilterCriteria,
    pub order: FilterOrderInfo,
    pub limit: Option<i64>,
}

impl PropertyQuery {
    /// Whether `property` belongs in the result set, ignoring order and limit.
    pub fn matches(&self, property: &Property) -> bool {
        property.active && self.criteria.matches(property)
    }

    pub fn to_sql(&self) -> SqlResult {
        let mut conditions = vec![FilterWhereInfo { column: "active", operator: FilterOp::Eq, data: json!(true) }];
        conditions.extend(self.criteria.conditions());

        let mut filter = Filter::new(PROPERTIES_TABLE);
        filter
            .where_clause(conditions)
            .order(vec![self.order.clone(), FilterOrderInfo { column: "id", sort: SortDirection::Desc }])
            .limit(self.limit);
        filter.to_sql()
    }
}

/// Turn raw search parameters into a query.
///
/// Tokens that do not parse are dropped one by one; a dimension whose tokens
/// were all dropped is treated as absent. Never fails.
///
/// The [`LATEST_PAGE_SIZE`] cap applies whenever no usable filter survives
/// parsing, so `?bedrooms=abc` gets the same capped latest view as no parameters.
pub fn build_predicate(params: &SearchParams) -> PropertyQuery {
    let criteria = FilterCriteria {
        state_ids: parse_set("state_id", params.state_id.as_deref(), parse_int),
        county: params
            .county
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        statuses: parse_set("status", params.status.as_deref(), parse_variant::<PropertyStatus>),
        types: parse_set("type", params.property_type.as_deref(), parse_variant::<PropertyType>),
        bedrooms: parse_set("bedrooms", params.bedrooms.as_deref(), parse_int),
        parking: parse_set("parking", params.parking.as_deref(), parse_int),
    };

    let limit = if criteria.is_unconstrained() { Some(LATEST_PAGE_SIZE) } else { None };

    PropertyQuery {
        criteria,
        order: FilterOrderInfo { column: "updated_at", sort: SortDirection::Desc },
        limit,
    }
}

fn parse_set<T: Ord>(
    param: &'static str,
    raw: Option<&str>,
    parse: impl Fn(&'static str, &str) -> Result<T, FilterError>,
) -> Option<BTreeSet<T>> {
    let raw = raw?;
    let mut set = BTreeSet::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match parse(param, token) {
            Ok(value) => { set.insert(value); }
            Err(e) => tracing::debug!("Dropping search token: {}", e),
        }
    }
    if set.is_empty() { None } else { Some(set) }
}

fn parse_int(param: &'static str, token: &str) -> Result<i32, FilterError> {
    token
        .parse::<i32>()
        .map_err(|_| FilterError::NotNumeric { param, token: token.to_string() })
}

fn parse_variant<T: FromStr>(param: &'static str, token: &str) -> Result<T, FilterError> {
    token
        .parse::<T>()
        .map_err(|_| FilterError::UnknownValue { param, token: token.to_string() })
}
