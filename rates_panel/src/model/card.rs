//! Price cards and the grid that displays them.
//!
//! Cards are plain HTML fragments. The grid owns the ordered card list and is
//! only ever replaced as a whole, so a reader of `Grid::children` sees either
//! the previous refresh or the next one, never a mix.
use rates_common::Ticker;

use crate::model::rate::PriceColor;

/// One rendered card: symbol, price text and trend color.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCard {
    /// Symbol shown in the card header.
    pub ticker: Ticker,
    /// Price text, already formatted or the placeholder.
    pub price: String,
    /// Trend color.
    pub color: PriceColor,
}

impl PriceCard {
    /// HTML markup of this card.
    pub fn markup(&self) -> String {
        price_card(&self.ticker.to_string(), &self.price, self.color)
    }
}

/// Ordered collection of cards currently on display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    children: Vec<PriceCard>,
}

impl Grid {
    /// Swap in a freshly built card list, dropping the old one.
    pub fn replace_children(&mut self, children: Vec<PriceCard>) {
        self.children = children;
    }

    /// Cards in display order.
    pub fn children(&self) -> &[PriceCard] {
        &self.children
    }

    /// HTML markup of the grid container with all cards.
    pub fn markup(&self) -> String {
        let mut html = String::from("<div class=\"rate-grid\">\n");
        for card in &self.children {
            html.push_str(&card.markup());
        }
        html.push_str("</div>\n");
        html
    }
}

/// Render the markup of a single price card.
pub fn price_card(ticker: &str, price: &str, price_color: PriceColor) -> String {
    format!(
        concat!(
            "  <div class=\"price-card\">\n",
            "    <p class=\"ticker\">{ticker}</p>\n",
            "    <p class=\"price price-{color}\">{price}</p>\n",
            "  </div>\n"
        ),
        ticker = escape_html(ticker),
        color = price_color,
        price = escape_html(price),
    )
}

/// CSS for the grid layout and the three trend colors.
pub fn stylesheet() -> String {
    String::from(
        r#".rate-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(9rem, 1fr));
  gap: 0.75rem;
  font-family: sans-serif;
}
.price-card {
  border: 1px solid #30363d;
  border-radius: 6px;
  padding: 0.5rem 0.75rem;
  background: #161b22;
}
.ticker {
  margin: 0;
  color: #c9d1d9;
  font-weight: bold;
}
.price {
  margin: 0.25rem 0 0;
  font-family: monospace;
  font-size: 1.2rem;
}
.price-up { color: #3fb950; }
.price-down { color: #f85149; }
.price-neutral { color: #8b949e; }
"#,
    )
}

/// Escape the characters that are significant in HTML text.
pub(crate) fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_carries_symbol_price_and_color_class() {
        let html = price_card("BTC", "64012.5", PriceColor::Up);
        assert!(html.contains("<p class=\"ticker\">BTC</p>"));
        assert!(html.contains("<p class=\"price price-up\">64012.5</p>"));
    }

    #[test]
    fn placeholder_text_is_escaped() {
        let html = price_card("ETH", "<n/a>", PriceColor::Neutral);
        assert!(html.contains("&lt;n/a&gt;"));
        assert!(!html.contains("<n/a>"));
    }

    #[test]
    fn stylesheet_defines_every_color() {
        let css = stylesheet();
        for color in [PriceColor::Up, PriceColor::Down, PriceColor::Neutral] {
            assert!(css.contains(&format!(".price-{color}")), "missing {color}");
        }
    }

    #[test]
    fn replace_children_discards_previous_cards() {
        let mut grid = Grid::default();
        let card = |ticker| PriceCard {
            ticker,
            price: "1.0".into(),
            color: PriceColor::Neutral,
        };
        grid.replace_children(vec![card(Ticker::BTC), card(Ticker::ETH)]);
        grid.replace_children(vec![card(Ticker::SOL)]);
        assert_eq!(grid.children().len(), 1);
        assert_eq!(grid.children()[0].ticker, Ticker::SOL);
        assert_eq!(grid.markup().matches("price-card").count(), 1);
    }
}
