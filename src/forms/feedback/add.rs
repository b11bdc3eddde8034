use serde::{Deserialize, Serialize};
use serde_valid::Validate;

#[derive(Serialize, Deserialize, Debug, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddFeedback {
    #[validate(minimum = 1)]
    pub product_id: i32,
    #[serde(deserialize_with = "super::trim::trimmed")]
    #[validate(min_length = 1)]
    #[validate(max_length = 1000)]
    pub comment: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 5)]
    pub rating: i32,
}
