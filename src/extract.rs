use scraper::{ElementRef, Html, Selector};

use crate::error::ParseError;
use crate::formats::{Rating, RawBook};

const PRODUCT: &str = "article.product_pod";
const HEADING: &str = "h3";
const ANCHOR: &str = "a";
const PRICE: &str = "p.price_color";
const AVAILABILITY: &str = "p.instock.availability";
const RATING: &str = "p.star-rating";

#[derive(Debug)]
pub struct BookExtractor {
    product: Selector,
    heading: Selector,
    anchor: Selector,
    price: Selector,
    availability: Selector,
    rating: Selector,
}

impl BookExtractor {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            product: compile(PRODUCT)?,
            heading: compile(HEADING)?,
            anchor: compile(ANCHOR)?,
            price: compile(PRICE)?,
            availability: compile(AVAILABILITY)?,
            rating: compile(RATING)?,
        })
    }

    /// Extracts every product on a listing page, in document order.
    ///
    /// Title, price and availability are required; the rating degrades to
    /// `None` when its marker is absent or unreadable.
    pub fn extract(&self, html: &str) -> Result<Vec<RawBook>, ParseError> {
        let document = Html::parse_document(html);
        document
            .select(&self.product)
            .enumerate()
            .map(|(index, node)| self.extract_product(index, node))
            .collect()
    }

    fn extract_product(&self, index: usize, node: ElementRef<'_>) -> Result<RawBook, ParseError> {
        let title = self.title(index, node)?;

        let price_raw = node
            .select(&self.price)
            .next()
            .map(stripped_text)
            .ok_or(ParseError::MissingElement {
                index,
                field: "price",
                selector: PRICE,
            })?;

        let availability = node
            .select(&self.availability)
            .next()
            .map(stripped_text)
            .ok_or(ParseError::MissingElement {
                index,
                field: "availability",
                selector: AVAILABILITY,
            })?;
        if availability.is_empty() {
            return Err(ParseError::EmptyField {
                index,
                field: "availability",
            });
        }

        Ok(RawBook {
            title,
            price_raw,
            availability,
            rating: self.rating(index, node),
        })
    }

    fn title(&self, index: usize, node: ElementRef<'_>) -> Result<String, ParseError> {
        let missing = |selector| ParseError::MissingElement {
            index,
            field: "title",
            selector,
        };

        let heading = node.select(&self.heading).next().ok_or(missing(HEADING))?;
        let anchor = heading.select(&self.anchor).next().ok_or(missing("h3 a"))?;
        let title = anchor
            .value()
            .attr("title")
            .ok_or(missing("h3 a[title]"))?;
        if title.trim().is_empty() {
            return Err(ParseError::EmptyField {
                index,
                field: "title",
            });
        }

        Ok(title.to_owned())
    }

    fn rating(&self, index: usize, node: ElementRef<'_>) -> Option<Rating> {
        let marker = node.select(&self.rating).next()?;
        // `class="star-rating Three"`: the word is always the second token.
        let word = marker.value().attr("class")?.split_whitespace().nth(1)?;
        match word.parse::<Rating>() {
            Ok(rating) => Some(rating),
            Err(err) => {
                tracing::warn!(index, %err, "unreadable rating marker; recording none");
                None
            }
        }
    }
}

fn compile(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|err| ParseError::InvalidSelector {
        selector: css.to_owned(),
        message: err.to_string(),
    })
}

fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(rating_class: &str, title: &str, price: &str) -> String {
        format!(
            r##"<article class="product_pod">
  <div class="image_container"><a href="#"><img src="x.jpg" alt="{title}"></a></div>
  <p class="{rating_class}"><i class="icon-star"></i></p>
  <h3><a href="catalogue/book/index.html" title="{title}">{title}...</a></h3>
  <div class="product_price">
    <p class="price_color">{price}</p>
    <p class="instock availability">
      <i class="icon-ok"></i>
      In stock
    </p>
  </div>
</article>"##
        )
    }

    fn page(products: &[String]) -> String {
        format!(
            "<!doctype html><html><body><ol class=\"row\">{}</ol></body></html>",
            products
                .iter()
                .map(|p| format!("<li>{p}</li>"))
                .collect::<String>()
        )
    }

    #[test]
    fn extracts_products_in_document_order() -> anyhow::Result<()> {
        let html = page(&[
            product("star-rating Two", "First", "£10.00"),
            product("star-rating Four", "Second", "£25.50"),
        ]);
        let books = BookExtractor::new()?.extract(&html)?;

        assert_eq!(
            books,
            vec![
                RawBook {
                    title: "First".to_owned(),
                    price_raw: "£10.00".to_owned(),
                    availability: "In stock".to_owned(),
                    rating: Some(Rating::Two),
                },
                RawBook {
                    title: "Second".to_owned(),
                    price_raw: "£25.50".to_owned(),
                    availability: "In stock".to_owned(),
                    rating: Some(Rating::Four),
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn page_without_products_is_empty() -> anyhow::Result<()> {
        let html = "<html><body><p>No results.</p></body></html>";
        assert!(BookExtractor::new()?.extract(html)?.is_empty());
        Ok(())
    }

    #[test]
    fn title_comes_from_the_attribute_not_the_truncated_text() -> anyhow::Result<()> {
        let html = page(&[product(
            "star-rating One",
            "It&#39;s Only the Himalayas",
            "£45.17",
        )]);
        let books = BookExtractor::new()?.extract(&html)?;
        assert_eq!(books[0].title, "It's Only the Himalayas");
        Ok(())
    }

    #[test]
    fn single_class_token_rating_is_none() -> anyhow::Result<()> {
        let html = page(&[product("star-rating", "Unrated", "£1.00")]);
        let books = BookExtractor::new()?.extract(&html)?;
        assert_eq!(books[0].rating, None);
        Ok(())
    }

    #[test]
    fn unknown_rating_word_is_none() -> anyhow::Result<()> {
        let html = page(&[product("star-rating Six", "Overrated", "£1.00")]);
        let books = BookExtractor::new()?.extract(&html)?;
        assert_eq!(books[0].rating, None);
        Ok(())
    }

    #[test]
    fn lowercase_rating_word_is_none() -> anyhow::Result<()> {
        let html = page(&[product("star-rating three", "Quiet", "£1.00")]);
        let books = BookExtractor::new()?.extract(&html)?;
        assert_eq!(books[0].rating, None);
        Ok(())
    }

    #[test]
    fn missing_rating_element_is_none() -> anyhow::Result<()> {
        let html = page(&[product("something-else", "No Stars", "£1.00")]);
        let books = BookExtractor::new()?.extract(&html)?;
        assert_eq!(books[0].rating, None);
        Ok(())
    }

    #[test]
    fn missing_price_element_is_an_error() -> anyhow::Result<()> {
        let broken = product("star-rating Three", "Priceless", "£1.00")
            .replace("price_color", "price_colour");
        let html = page(&[product("star-rating One", "Fine", "£2.00"), broken]);

        let err = BookExtractor::new()?
            .extract(&html)
            .expect_err("price element is required");
        assert_eq!(
            err,
            ParseError::MissingElement {
                index: 1,
                field: "price",
                selector: PRICE,
            }
        );
        Ok(())
    }

    #[test]
    fn missing_title_attribute_is_an_error() -> anyhow::Result<()> {
        let html = page(&[product("star-rating One", "Untitled", "£2.00")
            .replace(r#" title="Untitled""#, "")]);
        let err = BookExtractor::new()?
            .extract(&html)
            .expect_err("title attribute is required");
        assert!(matches!(
            err,
            ParseError::MissingElement { field: "title", .. }
        ));
        Ok(())
    }

    #[test]
    fn missing_availability_is_an_error() -> anyhow::Result<()> {
        let html = page(&[product("star-rating One", "Gone", "£2.00")
            .replace("instock availability", "availability")]);
        let err = BookExtractor::new()?
            .extract(&html)
            .expect_err("availability is required");
        assert!(matches!(
            err,
            ParseError::MissingElement {
                field: "availability",
                ..
            }
        ));
        Ok(())
    }
}
