//! Observation of a running search. Every algorithm hands the grid to a [FrameSink] after each
//! processed node and after each painted path cell, which is where a driver draws and where a
//! quit request takes effect.
use crate::cell::CellState;
use crate::error::SearchError;
use crate::search_grid::SearchGrid;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub trait FrameSink {
    /// Called with the grid between two steps. Returning [ControlFlow::Break] aborts the run.
    fn frame(&mut self, grid: &SearchGrid) -> ControlFlow<()>;

    /// [frame](Self::frame) turned into a [Result] for use with `?` inside the algorithms.
    fn checkpoint(&mut self, grid: &SearchGrid) -> Result<(), SearchError> {
        match self.frame(grid) {
            ControlFlow::Continue(()) => Ok(()),
            ControlFlow::Break(()) => Err(SearchError::Cancelled),
        }
    }
}

impl<F> FrameSink for F
where
    F: FnMut(&SearchGrid) -> ControlFlow<()>,
{
    fn frame(&mut self, grid: &SearchGrid) -> ControlFlow<()> {
        self(grid)
    }
}

/// Discards every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl FrameSink for NoopSink {
    fn frame(&mut self, _: &SearchGrid) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Counts frames, optionally breaking once a limit is reached.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameCounter {
    pub frames: usize,
    pub limit: Option<usize>,
}

impl FrameCounter {
    pub fn new() -> FrameCounter {
        FrameCounter::default()
    }
    /// A counter that cancels the run on frame number `limit`.
    pub fn with_limit(limit: usize) -> FrameCounter {
        FrameCounter {
            frames: 0,
            limit: Some(limit),
        }
    }
}

impl FrameSink for FrameCounter {
    fn frame(&mut self, _: &SearchGrid) -> ControlFlow<()> {
        self.frames += 1;
        match self.limit {
            Some(limit) if self.frames >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

/// Keeps a row-major snapshot of every cell state for each frame.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    frames: Vec<Vec<CellState>>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }
    pub fn frames(&self) -> &[Vec<CellState>] {
        &self.frames
    }
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSink for Recorder {
    fn frame(&mut self, grid: &SearchGrid) -> ControlFlow<()> {
        self.frames.push(grid.states().collect());
        ControlFlow::Continue(())
    }
}

/// Shared quit flag, raised by whatever owns the event loop.
#[derive(Clone, Debug, Default)]
pub struct QuitSignal(Arc<AtomicBool>);

impl QuitSignal {
    pub fn new() -> QuitSignal {
        QuitSignal::default()
    }
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Forwards frames to `inner` until the [QuitSignal] is raised, then breaks at the next frame.
#[derive(Clone, Debug)]
pub struct Cancellable<S> {
    inner: S,
    quit: QuitSignal,
}

impl<S: FrameSink> Cancellable<S> {
    pub fn new(inner: S, quit: QuitSignal) -> Cancellable<S> {
        Cancellable { inner, quit }
    }
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSink> FrameSink for Cancellable<S> {
    fn frame(&mut self, grid: &SearchGrid) -> ControlFlow<()> {
        if self.quit.is_requested() {
            return ControlFlow::Break(());
        }
        if self.inner.frame(grid).is_break() || self.quit.is_requested() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}
