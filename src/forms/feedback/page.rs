use serde::Deserialize;

/// Fields posted by the HTML forms of the product page and the admin table.
#[derive(Debug, Deserialize)]
pub struct FeedbackPageForm {
    #[serde(default)]
    pub comment: String,
    // radio buttons send nothing when no star is picked
    #[serde(default, deserialize_with = "empty_as_none")]
    pub rating: Option<i32>,
}

/// Outcome banner of the previous action, passed back through the redirect.
#[derive(Debug, Default, Deserialize)]
pub struct PageStatus {
    pub status: Option<String>,
    pub message: Option<String>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i32>().map(Some).map_err(serde::de::Error::custom),
    }
}
