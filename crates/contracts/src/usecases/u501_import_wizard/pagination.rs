//! "Load more" paging over a source search

use super::request::SearchParams;

/// Search request handed out by the pager. `ticket` ties the response back
/// to the search generation and page it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: u64,
    pub params: SearchParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    ticket: u64,
    previous_page: u32,
}

/// Page counter of the current search.
///
/// A page shorter than `page_size` ends the results; nothing is fetched
/// automatically after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPager {
    source_id: String,
    query: String,
    page: u32,
    page_size: u32,
    has_more: bool,
    next_ticket: u64,
    in_flight: Option<InFlight>,
}

impl SearchPager {
    pub fn new(page_size: u32) -> Self {
        Self {
            source_id: String::new(),
            query: String::new(),
            page: 0,
            page_size: page_size.max(1),
            has_more: false,
            next_ticket: 0,
            in_flight: None,
        }
    }

    /// New search from page 1. Any response still in flight becomes stale.
    pub fn start(&mut self, source_id: &str, query: &str) -> PageRequest {
        self.source_id = source_id.to_string();
        self.query = query.trim().to_string();
        self.page = 1;
        self.has_more = false;
        self.issue(0)
    }

    /// Forget the search; the ticket counter keeps running
    pub fn reset(&mut self) {
        self.source_id.clear();
        self.query.clear();
        self.page = 0;
        self.has_more = false;
        self.in_flight = None;
    }

    /// Next page, or `None` when the results are exhausted or a request is
    /// already running.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() || !self.has_more {
            return None;
        }
        let previous_page = self.page;
        self.page += 1;
        Some(self.issue(previous_page))
    }

    fn issue(&mut self, previous_page: u32) -> PageRequest {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.in_flight = Some(InFlight {
            ticket,
            previous_page,
        });
        PageRequest {
            ticket,
            params: SearchParams {
                source_id: self.source_id.clone(),
                query: self.query.clone(),
                page: self.page,
                page_size: self.page_size,
            },
        }
    }

    fn take_if_current(&mut self, ticket: u64) -> Option<InFlight> {
        match &self.in_flight {
            Some(current) if current.ticket == ticket => self.in_flight.take(),
            _ => None,
        }
    }

    /// Record a received page. Returns `false` for stale tickets, whose
    /// items must be dropped.
    pub fn complete(&mut self, ticket: u64, received: usize) -> bool {
        if self.take_if_current(ticket).is_none() {
            return false;
        }
        self.has_more = received >= self.page_size as usize;
        true
    }

    /// Roll the page counter back after a failed request. `has_more` keeps
    /// its value so the user can retry; rows already shown stay as they are.
    pub fn fail(&mut self, ticket: u64) -> bool {
        match self.take_if_current(ticket) {
            Some(request) => {
                self.page = request.previous_page;
                true
            }
            None => false,
        }
    }

    /// The current search is still on its first page
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_first_page() {
        let mut pager = SearchPager::new(50);
        let request = pager.start("src-1", "  drill ");
        assert_eq!(request.params.page, 1);
        assert_eq!(request.params.page_size, 50);
        assert_eq!(request.params.query, "drill");
        assert!(pager.is_loading());
        assert!(pager.begin_load_more().is_none());
    }

    #[test]
    fn test_short_page_ends_results() {
        let mut pager = SearchPager::new(50);
        let first = pager.start("src-1", "drill");
        assert!(pager.complete(first.ticket, 50));
        assert!(pager.has_more());

        let second = pager.begin_load_more().unwrap();
        assert_eq!(second.params.page, 2);
        assert!(pager.complete(second.ticket, 37));
        assert!(!pager.has_more());
        assert_eq!(pager.page(), 2);
        assert!(pager.begin_load_more().is_none());
    }

    #[test]
    fn test_failed_load_more_rolls_back_page() {
        let mut pager = SearchPager::new(50);
        let first = pager.start("src-1", "drill");
        pager.complete(first.ticket, 50);
        let second = pager.begin_load_more().unwrap();
        assert_eq!(pager.page(), 2);

        assert!(pager.fail(second.ticket));
        assert_eq!(pager.page(), 1);
        assert!(!pager.is_loading());
        assert!(pager.has_more());

        let retry = pager.begin_load_more().unwrap();
        assert_eq!(retry.params.page, 2);
    }

    #[test]
    fn test_new_search_makes_old_ticket_stale() {
        let mut pager = SearchPager::new(50);
        let old = pager.start("src-1", "drill");
        let new = pager.start("src-1", "saw");
        assert!(!pager.complete(old.ticket, 50));
        assert!(pager.is_loading());
        assert!(pager.complete(new.ticket, 3));
        assert!(!pager.fail(old.ticket));
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let pager = SearchPager::new(0);
        assert_eq!(pager.page_size(), 1);
    }
}
