// src/views/chart.rs
use serde_json::json;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{escape, Theme};

const TRADINGVIEW_SCRIPT: &str = "https://s3.tradingview.com/tv.js";
const CHART_HEIGHT_PX: u32 = 450;

static NEXT_CONTAINER: AtomicU64 = AtomicU64::new(1);

/// A rendered chart: its container id plus the markup that mounts it.
///
/// The markup is self-contained. It removes the script it injects when the
/// page is hidden, so the embed needs no teardown from the server side.
#[derive(Debug, Clone)]
pub struct ChartEmbed {
    pub container_id: String,
    pub markup: String,
}

impl fmt::Display for ChartEmbed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.markup)
    }
}

pub trait ChartWidget: Send + Sync {
    fn render(&self, symbol: &str, theme: Theme) -> ChartEmbed;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TradingViewWidget;

impl TradingViewWidget {
    fn options(symbol: &str, theme: Theme, container_id: &str) -> serde_json::Value {
        let dark = theme == Theme::Dark;
        let background = if dark { "#18181b" } else { "#ffffff" };
        let grid = if dark { "#27272a" } else { "#e4e4e7" };
        json!({
            "autosize": true,
            "symbol": symbol,
            "interval": "D",
            "timezone": "Etc/UTC",
            "theme": theme.as_str(),
            "style": "1",
            "locale": "en",
            "toolbar_bg": background,
            "enable_publishing": false,
            "hide_top_toolbar": false,
            "hide_legend": false,
            "save_image": false,
            "container_id": container_id,
            "hide_side_toolbar": false,
            "allow_symbol_change": false,
            "studies": [],
            "show_popup_button": false,
            "backgroundColor": background,
            "gridColor": grid,
            "withdateranges": true,
            "range": "1D",
            "hide_volume": false,
            "support_host": "https://www.tradingview.com"
        })
    }
}

impl ChartWidget for TradingViewWidget {
    fn render(&self, symbol: &str, theme: Theme) -> ChartEmbed {
        let seq = NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed);
        let slug: String = symbol
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        let container_id = format!("tradingview_{}_{}", slug, seq);

        // `</script>` must never appear inside the inline script.
        let options = Self::options(symbol, theme, &container_id)
            .to_string()
            .replace('<', "\\u003c");

        let markup = format!(
            r#"<div id="{id}" style="height:{height}px;width:100%"><div class="muted empty">Loading chart...</div></div>
<script>
(function () {{
  var container = document.getElementById("{id}");
  var script = document.createElement("script");
  script.src = "{src}";
  script.async = true;
  script.onload = function () {{
    if (window.TradingView && container) {{
      container.innerHTML = "";
      new window.TradingView.widget({options});
    }}
  }};
  document.head.appendChild(script);
  window.addEventListener("pagehide", function () {{
    if (script.parentNode) {{ script.parentNode.removeChild(script); }}
  }}, {{ once: true }});
}})();
</script>"#,
            id = escape(&container_id),
            height = CHART_HEIGHT_PX,
            src = TRADINGVIEW_SCRIPT,
            options = options,
        );

        ChartEmbed { container_id, markup }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_symbol_and_theme() {
        let embed = TradingViewWidget.render("AAPL", Theme::Dark);
        assert!(embed.container_id.starts_with("tradingview_aapl_"));
        assert!(embed.markup.contains(&format!("id=\"{}\"", embed.container_id)));
        assert!(embed.markup.contains("\"symbol\":\"AAPL\""));
        assert!(embed.markup.contains("\"theme\":\"dark\""));
        assert!(embed.markup.contains(TRADINGVIEW_SCRIPT));
        assert!(embed.markup.contains("pagehide"));
    }

    #[test]
    fn container_ids_are_unique() {
        let a = TradingViewWidget.render("BRK.B", Theme::Light);
        let b = TradingViewWidget.render("BRK.B", Theme::Light);
        assert_ne!(a.container_id, b.container_id);
        assert!(a.container_id.starts_with("tradingview_brk_b_"));
    }

    #[test]
    fn script_breakouts_are_neutralized() {
        let embed = TradingViewWidget.render("</script><b>", Theme::Light);
        assert_eq!(embed.markup.matches("</script>").count(), 1);
    }
}
