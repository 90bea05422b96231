use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsStats {
    pub item_count: usize,
    pub user_count: usize,
    pub avg_item_name_length: f64,
    pub avg_user_username_length: f64,
    pub max_item_name_length: usize,
    pub max_user_username_length: usize,
}

/// Response of `GET /analytics`. `plot` is a `data:` URI that can be dropped
/// straight into an `<img src>`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub stats: AnalyticsStats,
    pub plot: String,
}
