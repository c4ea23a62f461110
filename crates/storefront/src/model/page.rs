use serde::{Deserialize, Serialize};

/// Paginated list envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// A single page holding all of `results`.
    pub fn of(results: Vec<T>) -> Self {
        Self {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back() {
        let page: Page<u32> = serde_json::from_str(r#"{"results": [1, 2]}"#).unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.results, vec![1, 2]);
        assert!(page.next.is_none());
    }
}
