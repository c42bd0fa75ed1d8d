/// A listing exactly as scraped from a marketplace results page.
///
/// Every field is optional because every field can be missing from the page.
/// Consumed once by [`normalize`](crate::normalize).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RawListing {
    pub title: Option<String>,
    pub set_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "market"))]
    pub price_text: Option<String>,
}
impl RawListing {
    pub fn new(title: impl Into<String>, set_name: impl Into<String>, price_text: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            set_name: Some(set_name.into()),
            price_text: Some(price_text.into()),
        }
    }

    /// A listing that only has a title, as happens when the set name and price
    /// elements are missing from the product card.
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), ..Self::default() }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let raw: RawListing =
            serde_json::from_str(r#"{"title":"Pikachu","setName":"Base Set","priceText":"$4.00"}"#).unwrap();
        assert_eq!(raw, RawListing::new("Pikachu", "Base Set", "$4.00"));
    }

    #[test]
    fn test_deserialize_market_alias_and_missing_fields() {
        let raw: RawListing = serde_json::from_str(r#"{"title":"Pikachu","market":"$4.00"}"#).unwrap();
        assert_eq!(raw.set_name, None);
        assert_eq!(raw.price_text.as_deref(), Some("$4.00"));
    }
}
