/// Predicate over the free-text AIS destination field.
///
/// Destination text is unstructured and wildly inconsistent ("BERBERA",
/// "BERBERA ANCHORAGE", "SO BBO"), so relevance is decided by a configurable
/// alias list rather than a literal match. Matching is case-insensitive
/// substring containment.
#[derive(Debug, Clone)]
pub struct DestinationFilter {
    aliases: Vec<String>,
}

impl DestinationFilter {
    pub fn new(aliases: impl IntoIterator<Item = impl Into<String>>) -> DestinationFilter {
        DestinationFilter {
            aliases: aliases
                .into_iter()
                .map(|a| a.into().to_uppercase())
                .collect(),
        }
    }

    /// Whether the destination text plausibly refers to this port.
    /// A missing destination is treated as a non-match.
    pub fn matches(&self, destination: Option<&str>) -> bool {
        let Some(destination) = destination else {
            return false;
        };

        let destination = destination.to_uppercase();
        self.aliases.iter().any(|a| destination.contains(a))
    }
}
