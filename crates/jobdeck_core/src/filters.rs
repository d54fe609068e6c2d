/// Jobs shown per page.
pub const PAGE_SIZE: u32 = 20;

/// Settle time for free-text search before it is applied, in milliseconds.
pub const SEARCH_SETTLE_MS: u64 = 300;

/// The named filter values of the job list, kept bijective with a shareable
/// string-keyed representation.
///
/// Every structured setter resets `skip` to 0; only `set_skip` preserves the
/// rest. Loss of sync between this state and its query representation is a
/// correctness bug, not a runtime error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub search: String,
    pub status: String,
    pub source: String,
    pub min_score: Option<u32>,
    pub min_salary: Option<u64>,
    pub skip: u32,
}

impl JobFilters {
    /// Applies a settled free-text search and resets pagination.
    pub fn apply_search(&mut self, search: String) {
        self.search = search;
        self.skip = 0;
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
        self.skip = 0;
    }

    pub fn set_source(&mut self, source: String) {
        self.source = source;
        self.skip = 0;
    }

    pub fn set_min_score(&mut self, min_score: Option<u32>) {
        self.min_score = min_score;
        self.skip = 0;
    }

    pub fn set_min_salary(&mut self, min_salary: Option<u64>) {
        self.min_salary = min_salary;
        self.skip = 0;
    }

    /// Moves to another page without touching the other filters.
    pub fn set_skip(&mut self, skip: u32) {
        self.skip = skip;
    }

    /// The fetch query: non-empty filters plus pagination, which is always
    /// carried so the server sees an explicit window.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.named_pairs();
        pairs.push(("skip".to_string(), self.skip.to_string()));
        pairs.push(("limit".to_string(), PAGE_SIZE.to_string()));
        pairs
    }

    /// The shareable representation: empty and default values are omitted,
    /// including `skip` when it is 0.
    pub fn share_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.named_pairs();
        if self.skip > 0 {
            pairs.push(("skip".to_string(), self.skip.to_string()));
        }
        pairs
    }

    /// Inverse of `share_pairs`. Unknown keys and unparseable numeric values
    /// are ignored.
    pub fn from_share_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            match key {
                "search" => filters.search = value.to_string(),
                "status" => filters.status = value.to_string(),
                "source" => filters.source = value.to_string(),
                "min_score" => filters.min_score = value.parse().ok(),
                "min_salary" => filters.min_salary = value.parse().ok(),
                "skip" => filters.skip = value.parse().unwrap_or(0),
                _ => {}
            }
        }
        filters
    }

    fn named_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        if !self.status.is_empty() {
            pairs.push(("status".to_string(), self.status.clone()));
        }
        if !self.source.is_empty() {
            pairs.push(("source".to_string(), self.source.clone()));
        }
        if let Some(min_score) = self.min_score {
            pairs.push(("min_score".to_string(), min_score.to_string()));
        }
        if let Some(min_salary) = self.min_salary {
            pairs.push(("min_salary".to_string(), min_salary.to_string()));
        }
        pairs
    }
}
