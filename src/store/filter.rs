use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Conjunction of `field == value` clauses over top-level document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(field: &str, value: impl Into<Value>) -> Self {
        Self::new().and(field, value)
    }

    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((field.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// SQL `WHERE` body plus its positional parameters.
    pub(super) fn to_sql(&self) -> (String, Vec<SqlValue>) {
        if self.clauses.is_empty() {
            return ("1 = 1".to_string(), Vec::new());
        }

        let mut conditions = Vec::with_capacity(self.clauses.len());
        let mut params = Vec::with_capacity(self.clauses.len() * 2);

        for (field, value) in &self.clauses {
            params.push(SqlValue::Text(format!("$.{}", field)));
            let path_index = params.len();

            match to_sql_value(value) {
                Some(sql_value) => {
                    params.push(sql_value);
                    conditions.push(format!(
                        "json_extract(body, ?{}) = ?{}",
                        path_index,
                        params.len()
                    ));
                }
                None => conditions.push(format!("json_extract(body, ?{}) IS NULL", path_index)),
            }
        }

        (conditions.join(" AND "), params)
    }
}

// json_extract hands back SQL scalars for JSON scalars and minified JSON text
// for arrays and objects.
fn to_sql_value(value: &Value) -> Option<SqlValue> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(SqlValue::Integer(i64::from(*flag))),
        Value::Number(number) => Some(match number.as_i64() {
            Some(integer) => SqlValue::Integer(integer),
            None => SqlValue::Real(number.as_f64().unwrap_or_default()),
        }),
        Value::String(text) => Some(SqlValue::Text(text.clone())),
        Value::Array(_) | Value::Object(_) => Some(SqlValue::Text(value.to_string())),
    }
}
