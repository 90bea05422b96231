//! Aggregate statistics over stored items and users, plus the chart that goes
//! with them. Nothing here writes to the store.
pub mod chart;
pub mod stats;

use crate::{
    error::AppError,
    helpers::char_len,
    models::analytics::{AnalyticsReport, AnalyticsStats},
    resources::{ItemResource, UserResource},
    store::RecordStore,
};

use self::stats::summarize;

/// Name lengths read from the store, in characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthSamples {
    pub item_names: Vec<usize>,
    pub usernames: Vec<usize>,
}

pub fn collect_samples(store: &RecordStore) -> Result<LengthSamples, AppError> {
    let items = ItemResource::new(store)?.list()?;
    let users = UserResource::new(store)?.list()?;

    Ok(LengthSamples {
        item_names: items.iter().map(|item| char_len(&item.name)).collect(),
        usernames: users.iter().map(|user| char_len(&user.username)).collect(),
    })
}

pub fn compute_stats(samples: &LengthSamples) -> AnalyticsStats {
    let items = summarize(&samples.item_names);
    let users = summarize(&samples.usernames);

    AnalyticsStats {
        item_count: items.count,
        user_count: users.count,
        avg_item_name_length: items.average,
        avg_user_username_length: users.average,
        max_item_name_length: items.max,
        max_user_username_length: users.max,
    }
}

/// CPU-bound; callers on the async runtime should run it on a blocking thread.
pub fn build_report(samples: &LengthSamples) -> AnalyticsReport {
    let svg = chart::render_svg(&samples.item_names, &samples.usernames);

    AnalyticsReport {
        stats: compute_stats(samples),
        plot: chart::to_data_uri(&svg),
    }
}

pub fn compute_and_render(store: &RecordStore) -> Result<AnalyticsReport, AppError> {
    Ok(build_report(&collect_samples(store)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{item::NewItem, user::NewUser};

    #[test]
    fn empty_items_with_users() {
        let store = RecordStore::open_in_memory().unwrap();
        let users = UserResource::new(&store).unwrap();
        for username in ["alice", "bobby", "carol_smith"] {
            users
                .create(NewUser {
                    username: username.to_string(),
                    bio: None,
                })
                .unwrap();
        }

        let report = compute_and_render(&store).unwrap();

        assert_eq!(report.stats.item_count, 0);
        assert_eq!(report.stats.avg_item_name_length, 0.0);
        assert_eq!(report.stats.max_item_name_length, 0);
        assert_eq!(report.stats.user_count, 3);
        assert_eq!(report.stats.max_user_username_length, 11);
        assert!((report.stats.avg_user_username_length - 7.0).abs() < 1e-9);
        assert!(report.plot.starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn analytics_does_not_touch_records() {
        let store = RecordStore::open_in_memory().unwrap();
        let items = ItemResource::new(&store).unwrap();
        items
            .create(NewItem {
                name: "Desk lamp".to_string(),
                description: None,
            })
            .unwrap();

        let before = items.list().unwrap();
        let report = compute_and_render(&store).unwrap();

        assert_eq!(report.stats.item_count, 1);
        assert_eq!(report.stats.max_item_name_length, 9);
        assert_eq!(items.list().unwrap(), before);
    }
}
