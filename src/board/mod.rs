//! Client-held view of the document list
//!
//! The board is a transient projection of what the server returned. After
//! sign, reject or upload the caller refetches the whole list; a delete is
//! applied locally instead. Refetches are tagged with a sequence number and
//! only the response to the latest one is applied, so a slow response can
//! never overwrite fresher state.

use crate::client::DocumentApi;
use crate::client::models::Document;
use crate::error::Result;

/// Sequence number handed out when a refresh starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Actions a user can take on a listed document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentAction {
    Sign,
    Reject,
    Comment,
    Download,
    Delete,
}

impl DocumentAction {
    /// Actions offered for `doc`; signed documents cannot be signed or rejected again
    pub fn available_for(doc: &Document) -> Vec<DocumentAction> {
        let mut actions = Vec::with_capacity(5);
        if doc.can_sign() {
            actions.push(DocumentAction::Sign);
            actions.push(DocumentAction::Reject);
        }
        actions.extend([
            DocumentAction::Comment,
            DocumentAction::Download,
            DocumentAction::Delete,
        ]);
        actions
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentAction::Sign => "Sign",
            DocumentAction::Reject => "Reject",
            DocumentAction::Comment => "Add note",
            DocumentAction::Download => "Get file",
            DocumentAction::Delete => "Delete",
        }
    }

    /// Whether the list must be refetched after this action succeeds
    pub fn refetches(&self) -> bool {
        matches!(self, DocumentAction::Sign | DocumentAction::Reject)
    }
}

/// Local document list with a stale-response guard
#[derive(Debug, Default)]
pub struct DocumentBoard {
    documents: Vec<Document>,
    issued: u64,
    applied: Option<u64>,
}

impl DocumentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a refresh; the returned ticket supersedes all earlier ones
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Apply a fetched list if `ticket` is still the latest issued.
    ///
    /// Returns `false` when the response was stale and discarded.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, documents: Vec<Document>) -> bool {
        if ticket.0 != self.issued {
            log::debug!(
                "Discarding stale document list (request {}, latest {})",
                ticket.0,
                self.issued
            );
            return false;
        }
        self.documents = documents;
        self.applied = Some(ticket.0);
        true
    }

    /// Fetch the list from `api` and apply it.
    ///
    /// Holds `&mut self` across the fetch, so calls through here never
    /// overlap. Callers that run fetches concurrently should take a ticket
    /// with [`begin_refresh`](Self::begin_refresh) per fetch and hand each
    /// result to [`apply_refresh`](Self::apply_refresh), which drops all but
    /// the latest.
    pub async fn refresh<A: DocumentApi + ?Sized>(&mut self, api: &A) -> Result<bool> {
        let ticket = self.begin_refresh();
        let documents = api.list_documents().await?;
        Ok(self.apply_refresh(ticket, documents))
    }

    /// Drop a document locally after the server confirmed its deletion
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.documents.len();
        self.documents.retain(|d| d.id != id);
        self.documents.len() != before
    }

    /// Documents to show; soft-deleted ones are hidden
    pub fn visible(&self) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.is_visible()).collect()
    }

    pub fn get(&self, id: i64) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// True once any refresh has been applied
    pub fn is_loaded(&self) -> bool {
        self.applied.is_some()
    }
}
