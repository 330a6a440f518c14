use crate::data::{KeyValue, Row};

/// Resolves the row-key, column-key or clip-key of a row.
/// `None` means the row has no key on this dimension and is skipped.
pub trait KeySelector {
    fn select(&self, row: &Row) -> Option<KeyValue>;
}

impl<F> KeySelector for F
where
    F: Fn(&Row) -> Option<KeyValue>,
{
    fn select(&self, row: &Row) -> Option<KeyValue> {
        self(row)
    }
}

/// Key taken verbatim from one field
#[derive(Debug, Clone, PartialEq)]
pub struct Field(pub String);

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Field(name.into())
    }
}

impl KeySelector for Field {
    fn select(&self, row: &Row) -> Option<KeyValue> {
        row.get(&self.0).to_key()
    }
}

/// Composite key over several fields, joined with `" / "`.
/// A single field behaves exactly like [`Field`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fields(pub Vec<String>);

pub const COMPOSITE_SEPARATOR: &str = " / ";

impl KeySelector for Fields {
    fn select(&self, row: &Row) -> Option<KeyValue> {
        match self.0.as_slice() {
            [] => None,
            [single] => row.get(single).to_key(),
            many => {
                let mut parts = Vec::with_capacity(many.len());
                for name in many {
                    parts.push(row.get(name).to_key()?.to_string());
                }
                Some(KeyValue::Text(parts.join(COMPOSITE_SEPARATOR)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_selector() {
        let row = Row::new().with("day", 3.0).with("name", "");
        assert_eq!(Field::new("day").select(&row), Some(KeyValue::number(3.0)));
        // empty text is still a key
        assert_eq!(Field::new("name").select(&row), Some(KeyValue::text("")));
        assert_eq!(Field::new("missing").select(&row), None);
    }

    #[test]
    fn test_composite_selector() {
        let row = Row::new().with("campaign", "Spring").with("region", "EU");
        let sel = Fields(vec!["campaign".to_string(), "region".to_string()]);
        assert_eq!(sel.select(&row), Some(KeyValue::text("Spring / EU")));

        let partial = Row::new().with("campaign", "Spring");
        assert_eq!(sel.select(&partial), None);
        assert_eq!(Fields(vec![]).select(&row), None);
    }

    #[test]
    fn test_closure_selector() {
        let upper = |row: &Row| row.get("code").to_key().map(|k| KeyValue::text(k.to_string().to_uppercase()));
        let row = Row::new().with("code", "ab");
        assert_eq!(upper.select(&row), Some(KeyValue::text("AB")));
    }
}
