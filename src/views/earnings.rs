// src/views/earnings.rs
use crate::models::{EarningsEntry, ReportTime};
use crate::services::date_filter::DateRangeFilter;
use crate::services::fmp::EarningsWindow;
use crate::services::format::{
    format_eps, format_long_date, format_money, format_short_date, report_time_label,
};
use crate::services::pagination::{group_by_date, DateGroup, Page};

use super::{escape, layout, Theme};

/// Everything the listing page needs, already fetched and paginated.
pub struct EarningsListing<'a> {
    pub filter: DateRangeFilter,
    pub window: EarningsWindow,
    pub page: &'a Page<EarningsEntry>,
    pub window_days: i64,
}

pub fn render_earnings_page(listing: &EarningsListing<'_>) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        "<header>\n<h1>Earnings Calendar</h1>\n<p class=\"muted\">Earnings reports from {} to {}.</p>\n</header>\n",
        escape(&format_short_date(listing.window.start)),
        escape(&format_short_date(listing.window.end)),
    ));

    body.push_str(&render_filter_form(&listing.filter, listing.window_days));

    if listing.filter.is_inverted() {
        body.push_str(
            "<div class=\"card notice\"><p>The start date is after the end date, so no reports can match.</p></div>\n",
        );
    }

    let page = listing.page;
    if page.total_items == 0 {
        body.push_str(&render_no_results(&listing.filter));
    } else if page.is_past_end() {
        body.push_str(&format!(
            "<div class=\"card empty\">\n<h3>No results on page {page}</h3>\n\
<p class=\"muted\">There are only {pages} page(s) of results for this range.</p>\n\
<p><a href=\"{first}\">Go to the first page</a></p>\n</div>\n",
            page = page.page,
            pages = page.total_pages,
            first = escape(&listing.filter.page_url(1)),
        ));
    } else {
        for group in group_by_date(&page.items) {
            body.push_str(&render_group(&group));
        }
    }

    body.push_str(&render_pager(&listing.filter, page));

    layout("Earnings Calendar | FinDash", Theme::Light, &body)
}

fn render_filter_form(filter: &DateRangeFilter, window_days: i64) -> String {
    let hint = if filter.is_empty() {
        format!(
            "<p class=\"muted\">Leave dates empty to view earnings for the next {} days.</p>\n",
            window_days
        )
    } else {
        String::new()
    };

    format!(
        "<form class=\"card\" method=\"get\" action=\"/earnings\">\n<div class=\"filter\">\n\
<label>Start Date<br><input type=\"date\" name=\"startDate\" value=\"{start}\"></label>\n\
<label>End Date<br><input type=\"date\" name=\"endDate\" value=\"{end}\"></label>\n\
<input type=\"hidden\" name=\"page\" value=\"1\">\n\
<button type=\"submit\">Apply</button>\n\
<a href=\"{clear}\">Clear</a>\n</div>\n{hint}</form>\n",
        start = escape(&filter.start_value()),
        end = escape(&filter.end_value()),
        clear = DateRangeFilter::clear_url(),
        hint = hint,
    )
}

fn render_no_results(filter: &DateRangeFilter) -> String {
    let detail = if filter.is_empty() {
        "Check back later or verify your API key."
    } else {
        "Try a different date range."
    };
    format!(
        "<div class=\"card empty\">\n<h3>No earnings found</h3>\n<p class=\"muted\">{}</p>\n</div>\n",
        detail
    )
}

fn time_badge(time: Option<ReportTime>) -> String {
    let class = match time {
        Some(ReportTime::BeforeMarketOpen) => "badge bmo",
        Some(ReportTime::AfterMarketClose) => "badge amc",
        Some(ReportTime::DuringMarketHours) => "badge ime",
        None => "badge muted",
    };
    format!("<span class=\"{}\">{}</span>", class, report_time_label(time))
}

fn render_group(group: &DateGroup<'_>) -> String {
    let mut rows = String::new();
    for entry in &group.entries {
        let symbol = escape(&entry.symbol);
        let last_updated = entry
            .last_updated_date()
            .map(format_short_date)
            .unwrap_or_else(|| "-".to_string());
        rows.push_str(&format!(
            "<tr>\n<td><a href=\"/stock/{href}\">{symbol}</a></td>\n<td>{badge}</td>\n\
<td class=\"num\">{eps_est}</td>\n<td class=\"num\">{eps_act}</td>\n\
<td class=\"num\">{rev_est}</td>\n<td class=\"num\">{rev_act}</td>\n\
<td class=\"num\">{updated}</td>\n</tr>\n",
            href = escape(&url::form_urlencoded::byte_serialize(entry.symbol.as_bytes()).collect::<String>()),
            symbol = symbol,
            badge = time_badge(entry.time),
            eps_est = format_eps(entry.eps_estimated),
            eps_act = format_eps(entry.eps_actual),
            rev_est = format_money(entry.revenue_estimated),
            rev_act = format_money(entry.revenue_actual),
            updated = escape(&last_updated),
        ));
    }

    let count = group.entries.len();
    format!(
        "<section class=\"card\">\n<div class=\"group-head\">\n<h2>{date}</h2>\n\
<span class=\"muted\">{count} {noun}</span>\n</div>\n<table>\n<thead>\n<tr>\
<th>Symbol</th><th>Time</th><th class=\"num\">Est. EPS</th><th class=\"num\">EPS</th>\
<th class=\"num\">Est. Revenue</th><th class=\"num\">Revenue</th><th class=\"num\">Last Updated</th>\
</tr>\n</thead>\n<tbody>\n{rows}</tbody>\n</table>\n</section>\n",
        date = escape(&format_long_date(group.date)),
        count = count,
        noun = if count == 1 { "Company" } else { "Companies" },
        rows = rows,
    )
}

fn render_pager(filter: &DateRangeFilter, page: &Page<EarningsEntry>) -> String {
    if page.total_pages <= 1 && !page.is_past_end() {
        return String::new();
    }

    let previous = if page.has_previous() {
        let target = page.page.min(page.total_pages + 1) - 1;
        format!("<a href=\"{}\">Previous</a>", escape(&filter.page_url(target)))
    } else {
        "<span class=\"muted\">Previous</span>".to_string()
    };
    let next = if page.has_next() {
        format!("<a href=\"{}\">Next</a>", escape(&filter.page_url(page.page + 1)))
    } else {
        "<span class=\"muted\">Next</span>".to_string()
    };

    let summary = if page.items.is_empty() {
        format!("Page {} of {}", page.page, page.total_pages)
    } else {
        format!(
            "Showing {}-{} of {} &middot; Page {} of {}",
            page.first_index(),
            page.last_index(),
            page.total_items,
            page.page,
            page.total_pages
        )
    };

    format!(
        "<nav class=\"pager\">\n{}\n<span class=\"muted\">{}</span>\n{}\n</nav>\n",
        previous, summary, next
    )
}
