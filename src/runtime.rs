//! Async driver for the filter controller.
//!
//! The controller lives on the task that owns the runtime. Fetches run as
//! spawned tasks and report back over a channel, so a slow response never
//! blocks new input and overlapping fetches resolve in whatever order the
//! network delivers them. Dropping the runtime, or calling
//! [`FeedRuntime::cancel`], aborts every fetch still in flight.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::controller::{FetchOutcome, FetchTicket, FilterController};
use crate::page::PageEvent;
use crate::transport::{FeedTransport, FetchError};

/// A finished fetch on its way back to the controller.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: FetchTicket,
    pub result: Result<String, FetchError>,
}

pub struct FeedRuntime<T: FeedTransport + 'static> {
    controller: FilterController,
    transport: Arc<T>,
    tx: mpsc::UnboundedSender<FetchCompletion>,
    rx: mpsc::UnboundedReceiver<FetchCompletion>,
    in_flight: usize,
    tasks: Vec<AbortHandle>,
}

impl<T: FeedTransport + 'static> FeedRuntime<T> {
    pub fn new(controller: FilterController, transport: Arc<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            transport,
            tx,
            rx,
            in_flight: 0,
            tasks: Vec::new(),
        }
    }

    pub fn controller(&self) -> &FilterController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FilterController {
        &mut self.controller
    }

    /// Number of fetches spawned whose results have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Hands `event` to the controller and starts the fetch it asks for.
    pub fn dispatch(&mut self, event: PageEvent) -> Option<FetchTicket> {
        let ticket = self.controller.handle(event)?;
        self.spawn_fetch(ticket.clone());
        Some(ticket)
    }

    /// Refetches the current selection without touching history.
    pub fn refresh(&mut self) -> FetchTicket {
        let ticket = self.controller.refresh();
        self.spawn_fetch(ticket.clone());
        ticket
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let transport = Arc::clone(&self.transport);
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.tasks.retain(|task| !task.is_finished());
        let task = tokio::spawn(async move {
            let result = transport.fetch_fragment(ticket.url()).await;
            if tx.send(FetchCompletion { ticket, result }).is_err() {
                tracing::trace!("Fetch completion dropped (runtime gone)");
            }
        });
        self.tasks.push(task.abort_handle());
    }

    /// Aborts every fetch in flight and drops completions not yet applied.
    /// The page keeps whatever it shows now. Returns the number of fetches
    /// abandoned.
    pub fn cancel(&mut self) -> usize {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        while self.rx.try_recv().is_ok() {}
        let abandoned = std::mem::take(&mut self.in_flight);
        if abandoned > 0 {
            tracing::debug!(abandoned, "Cancelled outstanding feed fetches");
        }
        abandoned
    }

    /// Waits for the next finished fetch.
    ///
    /// Pending forever while nothing is in flight, so it can sit in a
    /// `select!` next to an input source.
    pub async fn next_completion(&mut self) -> FetchCompletion {
        match self.rx.recv().await {
            Some(completion) => completion,
            // the runtime holds a sender, so the channel never closes
            None => std::future::pending().await,
        }
    }

    /// Applies a finished fetch to the page.
    pub fn apply(&mut self, completion: FetchCompletion) -> FetchOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.controller.complete(&completion.ticket, completion.result)
    }

    /// Applies completions until no fetch is in flight. Returns the
    /// outcomes in arrival order.
    pub async fn settle(&mut self) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::new();
        while self.in_flight > 0 {
            let completion = self.next_completion().await;
            outcomes.push(self.apply(completion));
        }
        outcomes
    }
}

impl<T: FeedTransport + 'static> Drop for FeedRuntime<T> {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
