use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;

use crate::data::{ConfirmProvider, ListName, ListStore, Video};

/// Ids move from the unrendered queue to the surface in batches of this
/// size per lazy-load step.
pub const CHUNK_SIZE: usize = 10;

pub const UNSAVE_CONFIRM_MESSAGE: &str = "Remove this video from your shelf?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing rendered and nothing queued; the empty placeholder is shown.
    Empty,
    /// A chunk resolve is in flight; skeleton rows are on the surface.
    Loading,
    HasContent,
    /// Everything in the current list is rendered.
    Exhausted,
    /// The last chunk resolve failed; the surface shows the error message.
    Error,
}

/// A dequeued batch waiting for metadata resolution. Tagged with the view
/// epoch at dequeue time so a completion that crosses a tab switch can be
/// recognized as stale and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    pub epoch: u64,
    pub ids: Vec<String>,
}

/// Where rendered rows live. `show_skeletons` implicitly dismisses any
/// placeholder; `replace_skeletons` swaps all pending skeleton rows for
/// the resolved videos in order.
pub trait VideoSurface {
    fn show_skeletons(&mut self, count: usize);
    fn replace_skeletons(&mut self, videos: &[Video]);
    fn remove_video(&mut self, id: &str);
    fn clear(&mut self);
    fn show_empty(&mut self);
    fn show_error(&mut self, message: &str);
}

/// One-shot end-of-list sentinel with explicit armed state. Disarms itself
/// when the list runs out of queued ids or the rendered set never reached
/// a full chunk; only a tab switch re-arms it.
#[derive(Debug, Clone, Copy)]
pub struct LazyLoadTrigger {
    armed: bool,
}

impl LazyLoadTrigger {
    pub fn new() -> Self {
        Self { armed: true }
    }

    pub fn arm(&mut self) {
        self.armed = true;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// The sentinel came into view. Returns whether a chunk should start;
    /// a short rendered set means the list was genuinely out of data, so
    /// the trigger detaches instead of firing.
    pub fn on_sentinel_visible(&mut self, queued: usize, rendered: usize) -> bool {
        if !self.armed {
            return false;
        }
        if queued == 0 || rendered < CHUNK_SIZE {
            self.armed = false;
            return false;
        }
        true
    }
}

impl Default for LazyLoadTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Chunked-rendering state machine for the saved shelf. Owns the
/// unrendered queue and the rendered id set for the current list and keeps
/// them disjoint; the surface and the metadata resolver stay outside.
pub struct IncrementalListView {
    store: Arc<dyn ListStore>,
    current: ListName,
    other: ListName,
    unrendered: VecDeque<String>,
    rendered: Vec<String>,
    state: ViewState,
    epoch: u64,
    trigger: LazyLoadTrigger,
}

impl IncrementalListView {
    pub fn new(store: Arc<dyn ListStore>, initial: ListName) -> Result<Self> {
        let unrendered = store.get_all(initial)?.into();
        Ok(Self {
            store,
            current: initial,
            other: initial.other(),
            unrendered,
            rendered: Vec::new(),
            state: ViewState::Empty,
            epoch: 0,
            trigger: LazyLoadTrigger::new(),
        })
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn current_list(&self) -> ListName {
        self.current
    }

    pub fn other_list(&self) -> ListName {
        self.other
    }

    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }

    pub fn queued(&self) -> usize {
        self.unrendered.len()
    }

    pub fn trigger_armed(&self) -> bool {
        self.trigger.is_armed()
    }

    /// Dequeues the next chunk and puts skeletons up for it. Returns the
    /// request to resolve off-thread, or `None` when there is nothing new
    /// to render (empty placeholder shown if nothing is rendered at all).
    pub fn begin_chunk(&mut self, surface: &mut dyn VideoSurface) -> Option<ChunkRequest> {
        let take = self.unrendered.len().min(CHUNK_SIZE);
        let batch: Vec<String> = self.unrendered.drain(..take).collect();

        if self.rendered.is_empty() && batch.is_empty() {
            self.state = ViewState::Empty;
            surface.show_empty();
            return None;
        }

        // Reconcile may have re-queued ids that are already on the surface.
        let fresh: Vec<String> = batch
            .into_iter()
            .filter(|id| !self.rendered.contains(id))
            .collect();
        if fresh.is_empty() {
            self.settle();
            return None;
        }

        surface.show_skeletons(fresh.len());
        self.state = ViewState::Loading;
        Some(ChunkRequest {
            epoch: self.epoch,
            ids: fresh,
        })
    }

    /// Applies a resolved chunk. A request minted before the last tab
    /// switch is dropped without touching the surface.
    pub fn complete_chunk(
        &mut self,
        surface: &mut dyn VideoSurface,
        request: ChunkRequest,
        result: Result<Vec<Video>>,
    ) {
        if request.epoch != self.epoch {
            return;
        }
        match result {
            Ok(videos) => {
                // A reconcile that raced this chunk can have put the same
                // ids into a second request; whichever completion lands
                // later keeps only the ids still unrendered.
                let fresh: Vec<String> = request
                    .ids
                    .into_iter()
                    .filter(|id| !self.rendered.contains(id))
                    .collect();
                let videos: Vec<Video> = videos
                    .into_iter()
                    .filter(|video| fresh.contains(&video.id))
                    .collect();
                surface.replace_skeletons(&videos);
                self.rendered.extend(fresh);
                self.settle();
            }
            Err(err) => {
                // Partial or stale rows must not stay visible. The queue is
                // kept so a later tab switch can retry.
                surface.clear();
                self.rendered.clear();
                self.state = ViewState::Error;
                surface.show_error(&err.to_string());
                self.trigger.disarm();
            }
        }
    }

    /// Swaps to `name`. Same-name switches are a strict no-op: no clear,
    /// no reload, no epoch bump.
    pub fn switch_tab(
        &mut self,
        surface: &mut dyn VideoSurface,
        name: ListName,
    ) -> Result<Option<ChunkRequest>> {
        if name == self.current {
            return Ok(None);
        }
        // Read before mutating: a storage failure must leave the view on
        // the old tab, untouched.
        let queue: VecDeque<String> = self.store.get_all(name)?.into();
        self.epoch += 1;
        std::mem::swap(&mut self.current, &mut self.other);
        surface.clear();
        self.rendered.clear();
        self.unrendered = queue;
        self.trigger.arm();
        Ok(self.begin_chunk(surface))
    }

    /// Re-syncs the queue after an out-of-band storage change and renders
    /// one chunk. Rendered rows stay put; the de-duplication filter in
    /// `begin_chunk` absorbs ids that come back from the store.
    pub fn reconcile(&mut self, surface: &mut dyn VideoSurface) -> Result<Option<ChunkRequest>> {
        self.unrendered = self.store.get_all(self.current)?.into();
        Ok(self.begin_chunk(surface))
    }

    /// Moves `id` to the other list and drops its row, without re-fetching
    /// anything that stays rendered.
    pub fn mark_watched(&mut self, surface: &mut dyn VideoSurface, id: &str) -> Result<()> {
        self.store.move_entry(self.current, self.other, id)?;
        self.remove_missing(surface)
    }

    /// Removes `id` from the shelf entirely, gated by the injected
    /// confirmation. Returns whether the removal happened.
    pub fn unsave(
        &mut self,
        surface: &mut dyn VideoSurface,
        confirm: &dyn ConfirmProvider,
        id: &str,
    ) -> Result<bool> {
        if !confirm.confirm(UNSAVE_CONFIRM_MESSAGE) {
            return Ok(false);
        }
        self.store.remove(self.current, id)?;
        self.remove_missing(surface)?;
        Ok(true)
    }

    /// End-of-list sentinel notification from the host. Fires at most one
    /// chunk; a chunk already in flight suppresses it.
    pub fn on_end_reached(&mut self, surface: &mut dyn VideoSurface) -> Option<ChunkRequest> {
        if self.state == ViewState::Loading {
            return None;
        }
        if !self
            .trigger
            .on_sentinel_visible(self.unrendered.len(), self.rendered.len())
        {
            return None;
        }
        self.begin_chunk(surface)
    }

    /// Drops every rendered or queued id the store no longer holds for the
    /// current list.
    fn remove_missing(&mut self, surface: &mut dyn VideoSurface) -> Result<()> {
        let present = self.store.get_all(self.current)?;
        let deleted: Vec<String> = self
            .rendered
            .iter()
            .filter(|id| !present.contains(id))
            .cloned()
            .collect();
        for id in &deleted {
            surface.remove_video(id);
        }
        self.rendered.retain(|id| !deleted.contains(id));
        self.unrendered.retain(|id| present.contains(id));
        if self.rendered.is_empty() {
            self.state = ViewState::Empty;
            surface.show_empty();
        }
        Ok(())
    }

    fn settle(&mut self) {
        self.state = if self.unrendered.is_empty() {
            ViewState::Exhausted
        } else {
            ViewState::HasContent
        };
    }
}
