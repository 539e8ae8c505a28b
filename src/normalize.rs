// Collapsing open-ended categories into a small fixed set.
pub const OTHER: &str = "Other";

/// Vehicle types shown individually on the map; everything else is "Other".
pub const MAIN_VEHICLE_TYPES: [&str; 3] = ["4-wheel pickup truck", "private/passenger car", "motorcycle"];

/// Maps raw category values onto an allow-list plus [`OTHER`].
#[derive(Debug, Clone)]
pub struct CategoryNormalizer {
    allowed: Vec<String>,
}

impl CategoryNormalizer {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryNormalizer {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn vehicle_types() -> Self {
        Self::new(MAIN_VEHICLE_TYPES)
    }

    /// Identity for allow-listed values, [`OTHER`] for anything else,
    /// including a missing value.
    pub fn simplify<'a>(&'a self, value: Option<&str>) -> &'a str {
        value
            .and_then(|v| self.allowed.iter().find(|a| a.as_str() == v))
            .map(String::as_str)
            .unwrap_or(OTHER)
    }
}

/// Map colour for a simplified vehicle category.
pub fn vehicle_color(simplified: &str) -> &'static str {
    match simplified {
        "4-wheel pickup truck" => "blue",
        "private/passenger car" => "red",
        "motorcycle" => "green",
        _ => "gray",
    }
}
