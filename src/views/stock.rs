// src/views/stock.rs
use crate::models::CompanyProfile;
use crate::services::format::{
    format_change, format_money, format_price, format_signed_money, format_signed_percent,
    format_volume,
};

use super::chart::ChartWidget;
use super::{escape, layout, Theme};

fn header(symbol: &str, theme: Theme) -> String {
    let toggle = theme.toggled();
    format!(
        "<nav class=\"pager\">\n<a href=\"/earnings\">&larr; Back to Earnings</a>\n\
<a href=\"/stock/{symbol}?theme={toggle}\">{label} theme</a>\n</nav>\n",
        symbol = escape(symbol),
        toggle = toggle.as_str(),
        label = if toggle == Theme::Dark { "Dark" } else { "Light" },
    )
}

fn stat(label: &str, value: &str, class: Option<&str>) -> String {
    let class = class.map(|c| format!(" class=\"{}\"", c)).unwrap_or_default();
    format!(
        "<div class=\"stat\"><span class=\"muted\">{}</span><strong{}>{}</strong></div>\n",
        escape(label),
        class,
        escape(value)
    )
}

fn text_or_dash(value: Option<&str>) -> &str {
    value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("-")
}

pub fn render_stock_page(profile: &CompanyProfile, theme: Theme, widget: &dyn ChartWidget) -> String {
    let change = profile.change.unwrap_or(0.0);
    let direction = if change >= 0.0 { "up" } else { "down" };
    let chart = widget.render(&profile.symbol, theme);

    let mut body = header(&profile.symbol, theme);

    body.push_str(&format!(
        "<header>\n<h1>{name} ({symbol})</h1>\n<p class=\"muted\">Data is delayed by 15 minutes.</p>\n</header>\n",
        name = escape(&profile.company_name),
        symbol = escape(&profile.symbol),
    ));

    body.push_str("<div class=\"grid\">\n");

    body.push_str(&format!(
        "<section class=\"card\">\n<div><span style=\"font-size:2.25rem;font-weight:700\">{price}</span></div>\n\
<div class=\"{direction}\">{change} Today</div>\n{chart}\n</section>\n",
        price = escape(&format_price(profile.price)),
        direction = direction,
        change = escape(&format_change(profile.change, profile.change_percentage)),
        chart = chart,
    ));

    body.push_str("<div>\n<section class=\"card\">\n<h2>More Statistics</h2>\n");
    body.push_str(&stat("Market Cap", &format_money(profile.market_cap), None));
    body.push_str(&stat("Volume (Daily)", &format_volume(profile.volume), None));
    body.push_str(&stat("Avg. Volume", &format_volume(profile.average_volume), None));
    body.push_str(&stat("Day's Change", &format_signed_money(profile.change), Some(direction)));
    body.push_str(&stat(
        "Change %",
        &format_signed_percent(profile.change_percentage),
        Some(direction),
    ));
    body.push_str("</section>\n<section class=\"card\">\n<h2>Company Info</h2>\n");
    body.push_str(&stat("52-Week Range", text_or_dash(profile.range.as_deref()), None));
    body.push_str(&stat("Industry", text_or_dash(profile.industry.as_deref()), None));
    body.push_str(&stat("Sector", text_or_dash(profile.sector.as_deref()), None));
    body.push_str(&stat("Exchange", text_or_dash(profile.exchange.as_deref()), None));
    body.push_str(&stat("CEO", text_or_dash(profile.ceo.as_deref()), None));
    body.push_str("</section>\n</div>\n</div>\n");

    body.push_str(&format!(
        "<section class=\"card\">\n<h2>About {name}</h2>\n<p class=\"muted\">{description}</p>\n</section>\n",
        name = escape(&profile.company_name),
        description = escape(
            profile
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or("No description available.")
        ),
    ));

    let title = format!("{} Stock Details | FinDash", profile.symbol);
    layout(&title, theme, &body)
}

pub fn render_stock_not_found(symbol: &str, theme: Theme) -> String {
    let symbol = symbol.to_ascii_uppercase();
    let mut body = header(&symbol, theme);
    body.push_str(&format!(
        "<div class=\"card empty\">\n<h3>Stock not found</h3>\n\
<p class=\"muted\">Unable to load data for {}. Please try again later.</p>\n</div>\n",
        escape(&symbol)
    ));
    let title = format!("{} Stock Details | FinDash", symbol);
    layout(&title, theme, &body)
}
