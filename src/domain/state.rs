use std::fmt;

/// Why the pagination loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The captcha marker was on the page
    Blocked,
    /// No further results page could be reached
    Exhausted,
    /// The requested number of pages was processed
    Capped,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Termination::Blocked => "blocked by captcha",
            Termination::Exhausted => "no more pages",
            Termination::Capped => "page limit reached",
        };
        f.write_str(label)
    }
}

/// Pagination progress for a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    /// 1-based index of the results page currently loaded
    pub current_page: u32,
    pub pages_requested: u32,
    /// Results pages whose items were all handed to the record builder
    pub pages_processed: u32,
    pub blocked: bool,
}

impl RunState {
    pub fn new(pages_requested: u32) -> Self {
        Self {
            current_page: 1,
            pages_requested,
            pages_processed: 0,
            blocked: false,
        }
    }

    pub fn is_capped(&self) -> bool {
        self.current_page > self.pages_requested
    }

    pub fn finish_page(&mut self) {
        self.pages_processed += 1;
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }

    pub fn block(&mut self) {
        self.blocked = true;
    }
}
