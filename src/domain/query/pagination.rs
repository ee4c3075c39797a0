// src/domain/query/pagination.rs
use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 15;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Clamps `page` to at least 1 and `per_page` into `1..=100`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
    pub from: u64,
    pub to: u64,
}

impl PageMeta {
    pub fn new(request: PageRequest, total: u64) -> Self {
        let per_page = u64::from(request.per_page());
        let offset = request.offset();
        Self {
            current_page: request.page(),
            per_page: request.per_page(),
            total,
            total_pages: total.div_ceil(per_page),
            from: offset + 1,
            to: (offset + per_page).min(total),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
