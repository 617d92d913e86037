use url::form_urlencoded;

/// Query parameters for a collection fetch.
///
/// Always carries `page[limit]`, so the server never silently truncates a listing. Filters are
/// encoded as `filter[<name>]=<value>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    limit: usize,
    filters: Vec<(String, String)>,
}

impl Query {
    pub fn new(limit: usize) -> Self {
        Query {
            limit,
            filters: vec![],
        }
    }

    /// Add a filter. A `None` value leaves the query untouched.
    pub fn filter(mut self, name: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.filters
                .push((format!("filter[{}]", name), value.to_string()));
        }
        self
    }

    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        ser.append_pair("page[limit]", &self.limit.to_string());
        for (k, v) in self.filters.iter() {
            ser.append_pair(k, v);
        }
        ser.finish()
    }
}
