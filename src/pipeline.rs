//! Edit-driven parse and render cycle with an atomically published result
//!
//! Every edit takes a ticket before it parses. A finished cycle publishes
//! only if no edit with a later ticket has published first, so the visible
//! rendering never goes back to an older snapshot.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::adapter;
use crate::config::STARTER_TEXT;
use crate::formatter::{RenderedOutput, TreeFormatter};

/// The published pair of text and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    pub text: Arc<str>,
    pub rendered: RenderedOutput,
    /// Ticket of the edit that produced this state, 0 for the starter text
    pub generation: u64,
}

pub struct PipelineController {
    state: ArcSwap<PipelineState>,
    formatter: TreeFormatter,
    tickets: AtomicU64,
}

impl Default for PipelineController {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineController {
    /// Starts out showing the rendering of the starter program.
    pub fn new() -> Self {
        Self::with_formatter(TreeFormatter::default())
    }

    pub fn with_formatter(formatter: TreeFormatter) -> Self {
        let rendered = formatter.render(&adapter::parse(STARTER_TEXT));
        Self {
            state: ArcSwap::from_pointee(PipelineState {
                text: STARTER_TEXT.into(),
                rendered,
                generation: 0,
            }),
            formatter,
            tickets: AtomicU64::new(0),
        }
    }

    /// Handles one committed edit. Returns whether the result was published.
    pub fn on_text_changed(&self, text: &str) -> bool {
        let ticket = self.next_ticket();
        self.complete(ticket, text)
    }

    /// Reserves the position of an edit in arrival order.
    pub fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Parses and renders `text` for an edit holding `ticket`, then
    /// publishes unless a later edit already has.
    pub fn complete(&self, ticket: u64, text: &str) -> bool {
        let result = adapter::parse(text);
        let rendered = self.formatter.render(&result);
        let next = Arc::new(PipelineState {
            text: text.into(),
            rendered,
            generation: ticket,
        });

        let mut published = false;
        self.state.rcu(|current| {
            published = current.generation <= ticket;
            if published {
                Arc::clone(&next)
            } else {
                Arc::clone(current)
            }
        });

        if published {
            log::debug!(
                "edit {} published ({} bytes, {})",
                ticket,
                text.len(),
                if result.is_tree() { "tree" } else { "failure" }
            );
        } else {
            log::debug!("edit {} discarded, a newer result is already shown", ticket);
        }
        published
    }

    pub fn current_rendered(&self) -> RenderedOutput {
        self.state.load().rendered.clone()
    }

    pub fn current_text(&self) -> Arc<str> {
        Arc::clone(&self.state.load().text)
    }

    /// Snapshot of the whole published state.
    pub fn current_state(&self) -> Arc<PipelineState> {
        self.state.load_full()
    }
}
