// ------------------------------------------------------------
// Collection log item
// ------------------------------------------------------------
//
// One entry of a category's `items` list as returned by the
// collection log service.
//
// Only the two fields this collector consumes are modelled;
// everything else in the item object (id, quantity, sequence)
// is ignored during extraction.
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    /// Display name (e.g. "Baby mole")
    pub name: String,

    /// Whether the player has obtained the item
    pub obtained: bool,
}

// ------------------------------------------------------------
// Summary record
// ------------------------------------------------------------
//
// Derived from one successfully extracted response.
//
// Lifecycle:
// - Built once per member
// - Formatted and appended to the output file
// - Dropped immediately afterwards
//
// Only obtained items are kept, in the order the service (pets)
// or the configuration (pluses) lists them.
//
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    /// Username as reported by the service, not as requested
    pub username: String,

    /// Names of obtained pets
    pub pets: Vec<String>,

    /// Names of obtained plus items
    pub pluses: Vec<String>,
}

impl SummaryRecord {
    pub fn pet_count(&self) -> usize {
        self.pets.len()
    }

    pub fn plus_count(&self) -> usize {
        self.pluses.len()
    }
}

/// Keeps the names of obtained items, preserving order.
pub fn obtained_names<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a CollectionItem>,
{
    items
        .into_iter()
        .filter(|item| item.obtained)
        .map(|item| item.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, obtained: bool) -> CollectionItem {
        CollectionItem {
            name: name.to_string(),
            obtained,
        }
    }

    #[test]
    fn obtained_names_keeps_order_and_drops_missing() {
        let items = [
            item("Pet chaos elemental", true),
            item("Baby mole", false),
            item("Kraken", true),
        ];

        assert_eq!(obtained_names(&items), ["Pet chaos elemental", "Kraken"]);
    }
}
