//! CSS selectors for the shop listing markup.
//!
//! Every structural signature the parser depends on lives here.
//! Update this file when the shop changes its HTML structure.

use scraper::Selector;
use std::sync::LazyLock;

/// Product card container in the shop grid.
///
/// Matches on the three class tokens, so reordered or extra classes still
/// count as a card.
pub static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.col-md-3.col-sm-4.shop-grid-item").unwrap());

/// Product name link.
pub static NAME: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.title").unwrap());

/// Category tag link.
pub static CATEGORY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.tag").unwrap());

/// Section / section-category label.
pub static SECTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.cat-sec").unwrap());

/// Description block.
pub static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.article-container.style-1").unwrap());

/// Dimensions text. The shop renders it in the slot styled as a price.
pub static DIMENSIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.price").unwrap());

/// Product image.
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

/// Attribute holding the (relative) image path.
pub const IMAGE_SRC_ATTR: &str = "src";

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        let _ = &*CARD;
        let _ = &*NAME;
        let _ = &*CATEGORY;
        let _ = &*SECTION;
        let _ = &*DESCRIPTION;
        let _ = &*DIMENSIONS;
        let _ = &*IMAGE;
    }

    #[test]
    fn test_card_requires_all_class_tokens() {
        let html = Html::parse_document(
            r#"<div class="col-md-3 col-sm-4 shop-grid-item">one</div>
               <div class="shop-grid-item col-sm-4 col-md-3 extra">two</div>
               <div class="col-md-3 shop-grid-item">partial</div>
               <span class="col-md-3 col-sm-4 shop-grid-item">wrong tag</span>"#,
        );

        let cards: Vec<_> = html.select(&CARD).collect();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_description_requires_style_class() {
        let html = Html::parse_document(
            r#"<div class="article-container">no</div>
               <div class="article-container style-1">yes</div>"#,
        );

        let found: Vec<_> = html.select(&DESCRIPTION).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text().collect::<String>(), "yes");
    }
}
