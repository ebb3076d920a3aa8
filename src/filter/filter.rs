use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterOrderInfo, FilterWhereInfo, SqlResult};

/// Assembles a parameterized SELECT over a single table.
pub struct Filter {
    table_name: &'static str,
    where_data: Vec<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
}

impl Filter {
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            where_data: vec![],
            order_data: vec![],
            limit: None,
        }
    }

    pub fn where_clause(&mut self, conditions: Vec<FilterWhereInfo>) -> &mut Self {
        self.where_data = conditions;
        self
    }

    pub fn order(&mut self, order: Vec<FilterOrderInfo>) -> &mut Self {
        self.order_data = order;
        self
    }

    pub fn limit(&mut self, limit: Option<i64>) -> &mut Self {
        self.limit = limit;
        self
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.where_data, 0);
        let order_clause = FilterOrder::generate(&self.order_data);
        let limit_clause = self.limit.map(|l| format!("LIMIT {}", l)).unwrap_or_default();

        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ].into_iter().filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");

        SqlResult { query, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::types::{FilterOp, SortDirection};
    use serde_json::json;

    #[test]
    fn renders_full_select() {
        let mut filter = Filter::new("properties");
        filter
            .where_clause(vec![FilterWhereInfo { column: "active", operator: FilterOp::Eq, data: json!(true) }])
            .order(vec![FilterOrderInfo { column: "updated_at", sort: SortDirection::Desc }])
            .limit(Some(5));
        let sql = filter.to_sql();
        assert_eq!(
            sql.query,
            "SELECT * FROM \"properties\" WHERE \"active\" = $1 ORDER BY \"updated_at\" DESC LIMIT 5"
        );
        assert_eq!(sql.params, vec![json!(true)]);
    }

    #[test]
    fn omits_empty_clauses() {
        let sql = Filter::new("states").to_sql();
        assert_eq!(sql.query, "SELECT * FROM \"states\" WHERE 1=1");
    }
}
