//! Request identifiers for latest-only async results.

/// Opaque request id for matching async results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Tracks the latest active request and ignores stale results.
#[derive(Debug, Default, Clone)]
pub struct LatestOnly {
    next: u64,
    active: Option<RequestId>,
}

impl LatestOnly {
    /// Start a new request and mark it as active.
    ///
    /// Any previously active request becomes stale.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next = self.next.wrapping_add(1);
        self.active = Some(id);
        id
    }

    /// Cancel any active request.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Returns true if the provided id is still the active request.
    pub fn is_active(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    /// Finish the request if it's still active.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        if self.is_active(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_request_supersedes_older() {
        let mut requests = LatestOnly::default();
        let first = requests.begin();
        let second = requests.begin();

        assert_ne!(first, second);
        assert!(!requests.finish_if_active(first));
        assert!(requests.is_active(second));
        assert!(requests.finish_if_active(second));
        assert!(!requests.is_active(second));
    }

    #[test]
    fn test_cancel_drops_active() {
        let mut requests = LatestOnly::default();
        let id = requests.begin();
        requests.cancel();

        assert!(!requests.is_active(id));
        assert!(!requests.finish_if_active(id));
    }
}
