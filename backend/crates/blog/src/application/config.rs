//! Application Configuration
//!
//! Configuration for the Blog application layer.

use kernel::pagination::{MAX_PAGE_SIZE, SearchParam};

/// Blog application configuration
#[derive(Debug, Clone)]
pub struct BlogConfig {
    /// Upper bound for `limit` when listing posts
    pub max_post_page_size: u32,
    /// Upper bound for `limit` when listing comments
    pub max_comment_page_size: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            max_post_page_size: MAX_PAGE_SIZE,
            max_comment_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl BlogConfig {
    pub fn post_page(&self, param: SearchParam) -> SearchParam {
        param.with_max_limit(self.max_post_page_size)
    }

    /// Comment listings are not searchable
    pub fn comment_page(&self, param: SearchParam) -> SearchParam {
        SearchParam::new(None, param.page, param.limit).with_max_limit(self.max_comment_page_size)
    }
}
