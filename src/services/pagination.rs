// src/services/pagination.rs
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::EarningsEntry;

pub const PAGE_SIZE: usize = 10;

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// There is data, just none on the requested page.
    pub fn is_past_end(&self) -> bool {
        self.total_items > 0 && self.items.is_empty()
    }

    /// 1-based index of the first item on this page, 0 when the page is empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_index() + self.items.len() - 1
        }
    }
}

/// Parses a `page` query value. Missing, malformed and non-positive values mean
/// page 1; digit strings too long for `i64` saturate so they land past the end.
pub fn parse_page(raw: Option<&str>) -> i64 {
    let Some(raw) = raw.map(str::trim) else {
        return 1;
    };
    match raw.parse::<i64>() {
        Ok(page) => page.max(1),
        Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => i64::MAX,
        Err(_) => 1,
    }
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

pub fn paginate<T: Clone>(items: &[T], page: i64, page_size: usize) -> Page<T> {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let total_items = items.len();

    let slice = (page - 1)
        .checked_mul(page_size)
        .filter(|start| *start < total_items)
        .map(|start| {
            let end = start.saturating_add(page_size).min(total_items);
            items[start..end].to_vec()
        })
        .unwrap_or_default();

    Page {
        items: slice,
        page,
        page_size,
        total_items,
        total_pages: total_pages(total_items, page_size),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateGroup<'a> {
    pub date: NaiveDate,
    pub entries: Vec<&'a EarningsEntry>,
}

/// Groups entries by report date. Dates appear in first-seen order.
pub fn group_by_date(entries: &[EarningsEntry]) -> Vec<DateGroup<'_>> {
    let mut groups: Vec<DateGroup<'_>> = Vec::new();
    for entry in entries {
        match groups.iter_mut().find(|g| g.date == entry.date) {
            Some(group) => group.entries.push(entry),
            None => groups.push(DateGroup {
                date: entry.date,
                entries: vec![entry],
            }),
        }
    }
    groups
}
