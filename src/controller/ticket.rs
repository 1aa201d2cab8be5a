use url::Url;

/// One issued fragment fetch.
///
/// The generation increases by one per fetch; the controller only applies
/// the result of the ticket whose generation is the newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    url: Url,
}

impl FetchTicket {
    pub(crate) fn new(generation: u64, url: Url) -> Self {
        Self { generation, url }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch URL, including `partial=1`.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// What happened when a fetch result reached the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The list was replaced and now shows `count` events.
    Applied { count: usize },
    /// The fetch failed; the previous list is still shown.
    Failed,
    /// A newer fetch was issued since; nothing changed.
    Stale,
}
