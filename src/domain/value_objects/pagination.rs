//! Page requests and pages of results.
//!
//! Mirrors the familiar `page` / `size` / `sort=prop,dir` query convention:
//! pages are zero-based, `sort` may repeat, and unknown sort properties are
//! rejected instead of being passed to SQL.

use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One `ORDER BY` term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Page size bounds taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct PageLimits {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    #[error("Unknown sort property: {0}")]
    UnknownSortProperty(String),
}

/// A request for one page of a sorted listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Build a page request from raw query parameters.
    ///
    /// A missing or zero size falls back to the default; sizes above the
    /// maximum are capped. Each `sort` value is `prop[,prop...][,asc|desc]`.
    pub fn parse(
        page: Option<u32>,
        size: Option<u32>,
        sort: &[String],
        limits: PageLimits,
        sortable: &[&str],
    ) -> Result<Self, PageRequestError> {
        let size = match size {
            None | Some(0) => limits.default_size,
            Some(s) => s.min(limits.max_size),
        };

        let mut orders = Vec::new();
        for value in sort {
            let mut tokens: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();

            let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
                Some(direction) => {
                    tokens.pop();
                    direction
                }
                None => Direction::Asc,
            };

            for property in tokens {
                if !sortable.contains(&property) {
                    return Err(PageRequestError::UnknownSortProperty(property.to_string()));
                }
                orders.push(SortOrder {
                    property: property.to_string(),
                    direction,
                });
            }
        }

        Ok(Self {
            page: page.unwrap_or(0),
            size,
            sort: orders,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of results plus the information needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page number
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total_elements.div_ceil(u64::from(self.size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={} size={}", self.page, self.size)?;
        for order in &self.sort {
            write!(f, " sort={},{}", order.property, order.direction.as_sql().to_lowercase())?;
        }
        Ok(())
    }
}
