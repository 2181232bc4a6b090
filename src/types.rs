//! Core types for favicon-dl

use serde::{Deserialize, Serialize};

/// Host-assigned identifier of a work item
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry to fetch an icon for
///
/// The URL is used as a base string: the fetcher appends the configured icon
/// path without validating or normalizing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Host-assigned identifier
    pub id: ItemId,
    /// Display title (used for logging only)
    #[serde(default)]
    pub title: String,
    /// Base URL the icon path is appended to
    pub url: String,
}

impl WorkItem {
    /// Create a work item without a title
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id: ItemId(id),
            title: String::new(),
            url: url.into(),
        }
    }

    /// Builder-style title setter
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Random 128-bit identifier assigned to every successfully fetched icon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconId(pub u128);

impl IconId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(rand::random())
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Classification of a single fetch attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The resource was retrieved; holds the raw response body
    Success(Vec<u8>),
    /// The server reported the resource does not exist (HTTP 404)
    NotFound,
    /// Any other failure; the message is informational only
    Error(String),
}

impl FetchOutcome {
    /// Short lowercase name used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            FetchOutcome::Success(_) => "success",
            FetchOutcome::NotFound => "not_found",
            FetchOutcome::Error(_) => "error",
        }
    }
}

/// Immutable snapshot of batch progress, passed by value to observers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    /// Items whose icon was downloaded
    pub success: usize,
    /// Items whose server answered 404
    pub not_found: usize,
    /// Items that failed for any other reason
    pub error: usize,
    /// Number of items in the batch
    pub total: usize,
    /// Processed share of the batch, truncated to a whole percent
    pub percent: u8,
}

impl ProgressState {
    /// Items processed so far
    pub fn processed(&self) -> usize {
        self.success + self.not_found + self.error
    }
}

impl std::fmt::Display for ProgressState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Downloading favicons... Success: {} / Not Found: {} / Error: {}",
            self.success, self.not_found, self.error
        )
    }
}

/// A downloaded icon waiting to be committed to the host's store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedIcon {
    /// The item the icon belongs to
    pub item: WorkItem,
    /// Identifier the host should attach to the item
    pub icon_id: IconId,
    /// Raw icon bytes as served
    pub data: Vec<u8>,
}

/// How a batch run ended
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchStatus {
    /// Every item was processed
    Completed,
    /// The cancellation check fired before all items were processed
    Cancelled,
    /// An unexpected failure aborted the remaining items
    Faulted {
        /// Description of the underlying cause
        error: String,
    },
}

impl BatchStatus {
    /// Short label matching the completion log line
    pub fn label(&self) -> &'static str {
        match self {
            BatchStatus::Completed => "done",
            BatchStatus::Cancelled => "cancelled",
            BatchStatus::Faulted { .. } => "error",
        }
    }
}

/// Outcome of one batch run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchResult {
    /// Terminal status
    pub status: BatchStatus,
    /// Final counters
    pub progress: ProgressState,
    /// Successful fetches in item order
    pub icons: Vec<FetchedIcon>,
}

/// Event emitted during a batch run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// One more item was processed
    Progress {
        /// Counters after the item
        progress: ProgressState,
    },

    /// The run finished and its icons were committed
    Finished {
        /// Terminal status
        status: BatchStatus,
        /// Final counters
        progress: ProgressState,
        /// Number of icons handed to the store
        icons: usize,
    },
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_state_formats_as_status_line() {
        let state = ProgressState {
            success: 3,
            not_found: 1,
            error: 2,
            total: 10,
            percent: 60,
        };
        assert_eq!(
            state.to_string(),
            "Downloading favicons... Success: 3 / Not Found: 1 / Error: 2"
        );
        assert_eq!(state.processed(), 6);
    }

    #[test]
    fn icon_id_displays_as_32_hex_digits() {
        assert_eq!(IconId(0xab).to_string(), format!("{:0>32}", "ab"));
        assert_eq!(IconId::generate().to_string().len(), 32);
    }

    #[test]
    fn generated_icon_ids_are_distinct() {
        let ids: std::collections::HashSet<_> = (0..64).map(|_| IconId::generate()).collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn batch_status_labels() {
        assert_eq!(BatchStatus::Completed.label(), "done");
        assert_eq!(BatchStatus::Cancelled.label(), "cancelled");
        assert_eq!(
            BatchStatus::Faulted {
                error: "boom".into()
            }
            .label(),
            "error"
        );
    }

    #[test]
    fn event_serializes_with_type_tag() {
        let event = Event::Finished {
            status: BatchStatus::Faulted {
                error: "boom".into(),
            },
            progress: ProgressState {
                success: 1,
                not_found: 0,
                error: 0,
                total: 2,
                percent: 50,
            },
            icons: 1,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "finished");
        assert_eq!(json["status"]["status"], "faulted");
        assert_eq!(json["status"]["error"], "boom");
        assert_eq!(json["progress"]["percent"], 50);
        assert_eq!(json["icons"], 1);
    }

    #[test]
    fn work_item_title_defaults_to_empty_when_deserialized() {
        let item: WorkItem =
            serde_json::from_str(r#"{"id": 7, "url": "https://example.com/"}"#).unwrap();
        assert_eq!(item, WorkItem::new(7, "https://example.com/"));
        assert_eq!(item.with_title("Example").title, "Example");
    }
}
