//! Query builder for the remote table protocol

/// Accumulates query-string operators for a table read.
///
/// Values are rendered in the store's `column=op.value` form and passed
/// through the HTTP client's query-string encoder.
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact equality filter
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// Case-insensitive substring filter
    pub fn ilike(mut self, column: &str, term: &str) -> Self {
        self.params
            .push((column.to_string(), format!("ilike.*{}*", term)));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.asc", column)));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.desc", column)));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.params.push(("offset".to_string(), offset.to_string()));
        self
    }

    pub(crate) fn params(&self) -> &[(String, String)] {
        &self.params
    }
}
