use serde::Serialize;

/// One page of a length-aware listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub last_page: i64,
    pub per_page: i64,
    pub total: i64,
    pub from: Option<i64>,
    pub to: Option<i64>,
}

impl<T> Page<T> {
    pub fn last_page(&self) -> i64 {
        if self.per_page <= 0 {
            return 1;
        }
        (self.total / self.per_page + i64::from(self.total % self.per_page != 0)).max(1)
    }

    /// 1-based position of the first item on this page.
    pub fn first_item(&self) -> Option<i64> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.current_page - 1).saturating_mul(self.per_page).saturating_add(1))
        }
    }

    pub fn last_item(&self) -> Option<i64> {
        self.first_item().map(|first| first + self.items.len() as i64 - 1)
    }

    pub fn meta(&self) -> PageMeta {
        PageMeta {
            current_page: self.current_page,
            last_page: self.last_page(),
            per_page: self.per_page,
            total: self.total,
            from: self.first_item(),
            to: self.last_item(),
        }
    }
}
