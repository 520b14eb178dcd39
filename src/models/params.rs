use serde::Deserialize;
use validator::Validate;

pub const MAX_PAGE_SIZE: u32 = 50;

/// Optional filter and paging for listing cars. All fields absent means "everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResourceParameters {
    pub brand_name: Option<String>,
    #[validate(range(min = 1))]
    pub page_number: Option<u32>,
    #[validate(range(min = 1, max = 50))]
    pub page_size: Option<u32>,
}

impl ResourceParameters {
    /// Returns `(offset, limit)` when paging was requested.
    pub fn page_window(&self) -> Option<(u64, u64)> {
        if self.page_number.is_none() && self.page_size.is_none() {
            return None;
        }
        let size = u64::from(self.page_size.unwrap_or(MAX_PAGE_SIZE));
        let number = u64::from(self.page_number.unwrap_or(1).max(1));
        Some(((number - 1) * size, size))
    }
}
