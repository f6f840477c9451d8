use serde::{Deserialize, Serialize};

/// Entry of the attribute dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMenuItem {
    pub name: String,
    pub value: String,
}

/// Turns viewer property names into dropdown entries.
///
/// Viewer property names may carry a `:` separator (`"Dimensions:Mass"`);
/// the first colon is dropped, later ones are kept. Order is preserved.
pub fn attribute_menu<I>(properties: I) -> Vec<AttributeMenuItem>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    properties
        .into_iter()
        .map(|property| {
            let value = property.as_ref().replacen(':', "", 1);
            AttributeMenuItem {
                name: value.clone(),
                value,
            }
        })
        .collect()
}
