//! Area lookup: free-text station search with silent failure.
//!
//! - **Threshold**: queries of `min_query_chars` characters or fewer never
//!   reach the directory and clear any suggestions.
//! - **No data**: an empty match list and any directory failure both end in
//!   [`LookupOutcome::NoData`]. Failures are logged, never returned.
//! - **Superseding**: each lookup holds a [`Ticket`]; a response is only worth
//!   applying while its ticket is the latest one issued.
//!
//! # Example
//!
//! ```no_run
//! use airvalue::lookup::{AreaLookup, WaqiDirectory};
//! use airvalue::Config;
//!
//! # async fn run() -> airvalue::Result<()> {
//! let config = Config::load()?;
//! let lookup = AreaLookup::new(WaqiDirectory::from_config(&config)?, 2);
//!
//! for name in lookup.lookup("delhi").await {
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

mod directory;
mod redact;
mod sequence;

use tracing::{debug, info, warn};

pub use directory::{parse_search_response, StationDirectory, WaqiDirectory};
pub use redact::{redact_token, REDACTION_PLACEHOLDER};
pub use sequence::{RequestSequence, Ticket};

#[cfg(test)]
pub(crate) use directory::fake;

/// Message shown when a qualifying query produced no suggestions.
pub const NO_DATA_MESSAGE: &str = "No data available for this area.";

/// What a lookup produced for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The query was too short; suggestions and messages are cleared.
    Cleared,
    /// The directory returned these names, in its order.
    Suggestions(Vec<String>),
    /// Nothing to suggest, either no matches or a swallowed failure.
    NoData,
}

impl LookupOutcome {
    /// The suggestions carried by this outcome (empty unless `Suggestions`).
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::Suggestions(names) => names,
            Self::Cleared | Self::NoData => &[],
        }
    }

    /// The informational message to show, if any.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoData => Some(NO_DATA_MESSAGE),
            Self::Cleared | Self::Suggestions(_) => None,
        }
    }
}

/// A lookup that has been started but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    ticket: Ticket,
    query: String,
}

impl PendingLookup {
    /// The ticket this lookup holds.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// The query being looked up.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A resolved lookup, tagged with the ticket it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResponse {
    /// Ticket the lookup was issued under.
    pub ticket: Ticket,
    /// The query that was looked up.
    pub query: String,
    /// The result.
    pub outcome: LookupOutcome,
}

/// Area lookup against a [`StationDirectory`].
#[derive(Debug)]
pub struct AreaLookup<D> {
    directory: D,
    min_query_chars: usize,
    sequence: RequestSequence,
}

impl<D: StationDirectory> AreaLookup<D> {
    /// Create a lookup that only queries for inputs longer than
    /// `min_query_chars` characters.
    #[must_use]
    pub fn new(directory: D, min_query_chars: usize) -> Self {
        Self {
            directory,
            min_query_chars,
            sequence: RequestSequence::new(),
        }
    }

    /// The underlying directory.
    #[must_use]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The ticket sequence shared by all lookups started here.
    #[must_use]
    pub fn sequence(&self) -> &RequestSequence {
        &self.sequence
    }

    /// Check whether `query` is long enough to reach the directory.
    #[must_use]
    pub fn qualifies(&self, query: &str) -> bool {
        query.chars().count() > self.min_query_chars
    }

    /// Start a lookup for `query`, superseding every earlier one.
    ///
    /// Short queries take a ticket too, so a slow response for an older,
    /// longer query cannot repopulate a list the user has cleared.
    pub fn begin(&self, query: &str) -> PendingLookup {
        PendingLookup {
            ticket: self.sequence.issue(),
            query: query.to_string(),
        }
    }

    /// Resolve a started lookup. Never fails.
    pub async fn resolve(&self, pending: PendingLookup) -> LookupResponse {
        let PendingLookup { ticket, query } = pending;

        let outcome = if self.qualifies(&query) {
            match self.directory.search(&query).await {
                Ok(names) if names.is_empty() => {
                    info!(%ticket, query = %query, "No stations matched");
                    LookupOutcome::NoData
                }
                Ok(names) => {
                    debug!(%ticket, query = %query, count = names.len(), "Stations matched");
                    LookupOutcome::Suggestions(names)
                }
                Err(e) => {
                    warn!(
                        %ticket,
                        query = %query,
                        error = %redact_token(&e.to_string()),
                        "Station lookup failed"
                    );
                    LookupOutcome::NoData
                }
            }
        } else {
            LookupOutcome::Cleared
        };

        LookupResponse {
            ticket,
            query,
            outcome,
        }
    }

    /// Start and resolve a lookup in one step.
    pub async fn search(&self, query: &str) -> LookupResponse {
        let pending = self.begin(query);
        self.resolve(pending).await
    }

    /// Look up matching station names; empty on short queries, no matches,
    /// or any failure.
    pub async fn lookup(&self, query: &str) -> Vec<String> {
        match self.search(query).await.outcome {
            LookupOutcome::Suggestions(names) => names,
            LookupOutcome::Cleared | LookupOutcome::NoData => Vec::new(),
        }
    }

    /// Check whether `response` is still the latest lookup started here.
    #[must_use]
    pub fn is_current(&self, response: &LookupResponse) -> bool {
        self.sequence.is_latest(response.ticket)
    }
}
