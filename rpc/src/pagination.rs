//! Cursor-based pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size when `count` is not specified.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum allowed page size.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Common pagination parameters accepted by list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Opaque cursor from a previous response.
    pub cursor: Option<String>,
    /// Number of items per page (default 100, max 1000).
    pub count: Option<u32>,
}

impl PaginationParams {
    /// Resolve effective page size, clamped to [1, MAX_PAGE_SIZE].
    pub fn effective_count(&self) -> u32 {
        self.count
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Decode the cursor to an offset. Absent or malformed cursors start at 0.
    pub fn decode_offset(&self) -> usize {
        self.cursor
            .as_deref()
            .and_then(decode_cursor)
            .unwrap_or(0)
    }

    /// Slice one page out of `items` and compute the cursor for the next.
    pub fn page<'a, T>(&self, items: &'a [T]) -> (&'a [T], PaginationMeta) {
        let offset = self.decode_offset().min(items.len());
        let count = self.effective_count();
        let end = offset.saturating_add(count as usize).min(items.len());
        let page = &items[offset..end];
        let cursor = next_cursor(offset, page.len(), count);
        (page, PaginationMeta { cursor })
    }
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Cursor to pass for the next page, or `None` if this is the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Encode an offset into an opaque cursor string (hex of the big-endian offset).
pub fn encode_cursor(offset: usize) -> String {
    hex::encode((offset as u64).to_be_bytes())
}

/// Decode a cursor string back to an offset.
pub fn decode_cursor(cursor: &str) -> Option<usize> {
    let bytes: [u8; 8] = hex::decode(cursor).ok()?.try_into().ok()?;
    usize::try_from(u64::from_be_bytes(bytes)).ok()
}

/// Compute the next-page cursor given the current offset and the number of
/// items returned. Returns `None` when fewer items than `count` were returned
/// (meaning we've reached the end).
pub fn next_cursor(current_offset: usize, returned: usize, page_size: u32) -> Option<String> {
    if returned < page_size as usize {
        None
    } else {
        Some(encode_cursor(current_offset + returned))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_roundtrip() {
        for offset in [0usize, 1, 42, 100, 999, 123456789] {
            let encoded = encode_cursor(offset);
            assert_eq!(decode_cursor(&encoded), Some(offset), "roundtrip failed for {offset}");
        }
    }

    #[test]
    fn malformed_cursor_starts_at_zero() {
        let p = PaginationParams {
            cursor: Some("not-a-cursor".into()),
            count: None,
        };
        assert_eq!(p.decode_offset(), 0);
    }

    #[test]
    fn next_cursor_returns_none_at_end() {
        assert!(next_cursor(0, 50, 100).is_none());
    }

    #[test]
    fn effective_count_clamps() {
        let p = PaginationParams {
            cursor: None,
            count: Some(5000),
        };
        assert_eq!(p.effective_count(), 1000);
        let p = PaginationParams {
            cursor: None,
            count: Some(0),
        };
        assert_eq!(p.effective_count(), 1);
    }

    #[test]
    fn pages_walk_the_whole_list() {
        let items: Vec<u32> = (0..5).collect();
        let first = PaginationParams {
            cursor: None,
            count: Some(2),
        };
        let (page, meta) = first.page(&items);
        assert_eq!(page, &[0, 1]);

        let second = PaginationParams {
            cursor: meta.cursor,
            count: Some(2),
        };
        let (page, meta) = second.page(&items);
        assert_eq!(page, &[2, 3]);

        let third = PaginationParams {
            cursor: meta.cursor,
            count: Some(2),
        };
        let (page, meta) = third.page(&items);
        assert_eq!(page, &[4]);
        assert!(meta.cursor.is_none());
    }
}
