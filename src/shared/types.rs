use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform JSON envelope returned by every API endpoint.
///
/// Success: `{ "success": true, "data": ... }`
/// Failure: `{ "success": false, "error": { "code", "message", "details"? } }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine readable code (e.g. `validation_error`, `cart_item_not_found`)
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(
        code: &str,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.to_string(),
                message: message.into(),
                details,
            }),
        }
    }
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A page of items plus the pagination block of the listing contract.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    /// 1-indexed page derived from `offset / limit`
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`, zero when there are no rows.
    pub fn new(total: i64, page: PageRequest) -> Self {
        let page_size = page.limit.max(1);
        let total = total.max(0);
        let total_pages = (total + page_size - 1) / page_size;

        Self {
            total,
            page: page.offset.max(0) / page_size + 1,
            page_size,
            total_pages,
        }
    }
}

/// Validated `LIMIT`/`OFFSET` pair handed to repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Offset of the previous page, if any
    pub fn previous_offset(&self) -> Option<i64> {
        (self.offset > 0).then(|| (self.offset - self.limit).max(0))
    }

    /// Offset of the next page, if `total` has more rows
    pub fn next_offset(&self, total: i64) -> Option<i64> {
        self.offset
            .checked_add(self.limit)
            .filter(|next| *next < total)
    }
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, page: PageRequest) -> Self {
        Self {
            items,
            pagination: Pagination::new(total, page),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
