//! UI-independent session state, advanced only through [`Session::reduce`].

use crate::error::FetchFailure;
use crate::pair::PairList;
use crate::passes::extract;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    /// Extraction finished with at least one pair.
    Ready,
    /// Extraction finished and found nothing; not an error.
    NoMatches,
    Failed(FetchFailure),
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    UrlChanged(String),
    ExtractionStarted,
    /// Carries the page text, already stripped of markup.
    ExtractionSucceeded(String),
    ExtractionFailed(FetchFailure),
    NameEdited(usize, String),
}

/// Immutable snapshot of one extraction session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub url: String,
    pub pairs: PairList,
    pub status: Status,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// A run may start once a URL is entered and nothing is in flight.
    pub fn can_start(&self) -> bool {
        !self.url.trim().is_empty() && !self.is_loading()
    }

    /// Fixed message to show, if the last run failed.
    pub fn error_message(&self) -> Option<&'static str> {
        match &self.status {
            Status::Failed(f) => Some(f.user_message()),
            _ => None,
        }
    }

    pub fn reduce(&self, event: SessionEvent) -> Session {
        match event {
            SessionEvent::UrlChanged(url) => Session {
                url,
                ..self.clone()
            },
            SessionEvent::ExtractionStarted => Session {
                url: self.url.clone(),
                pairs: PairList::new(),
                status: Status::Loading,
            },
            SessionEvent::ExtractionSucceeded(text) => {
                let pairs = extract(&text);
                let status = if pairs.is_empty() {
                    Status::NoMatches
                } else {
                    Status::Ready
                };
                Session {
                    url: self.url.clone(),
                    pairs,
                    status,
                }
            }
            SessionEvent::ExtractionFailed(reason) => Session {
                url: self.url.clone(),
                pairs: PairList::new(),
                status: Status::Failed(reason),
            },
            SessionEvent::NameEdited(index, name) => {
                if self.is_loading() {
                    return self.clone();
                }
                let mut next = self.clone();
                match next.pairs.set_name(index, name) {
                    Ok(()) => next,
                    Err(_) => self.clone(),
                }
            }
        }
    }
}
