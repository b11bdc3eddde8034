use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

impl ListQuery {
    /// `Ok(None)` when the parameter is absent.
    pub fn product_id(&self) -> Result<Option<i32>, String> {
        match self.product_id.as_deref().map(str::trim) {
            None => Ok(None),
            Some(raw) => match raw.parse::<i32>() {
                Ok(id) if id > 0 => Ok(Some(id)),
                _ => Err(format!("Invalid productId: {:?}", raw)),
            },
        }
    }
}
