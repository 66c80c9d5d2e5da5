//! Derived list view: search filter and sort order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::User;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Email,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    fn compare(&self, a: &User, b: &User) -> Ordering {
        let ordering = match self.key {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Email => a.email.cmp(&b.email),
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Case-insensitive substring match on name or email; empty term matches all
pub fn matches_search(user: &User, term: &str) -> bool {
    let term = term.to_lowercase();
    user.name.to_lowercase().contains(&term) || user.email.to_lowercase().contains(&term)
}

/// Filter then sort; equal keys keep their relative order
pub fn visible_users<'a>(users: &'a [User], term: &str, sort: SortConfig) -> Vec<&'a User> {
    let mut visible: Vec<&User> = users.iter().filter(|u| matches_search(u, term)).collect();
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}
