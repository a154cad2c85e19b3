//! Single-flight path request scheduling.
//!
//! Every solve rewrites the grid's node scratch fields, so two searches must
//! never overlap on one [`CostGrid`]. [`PathScheduler`] queues requests in
//! submission order and runs them one at a time as cooperative tasks that
//! yield after building the grid and after searching it.

use std::collections::VecDeque;
use std::fmt;

use waygrid_core::Position;

use crate::error::GridError;
use crate::grid::CostGrid;
use crate::probe::WorldProbe;
use crate::settings::GridSettings;
use crate::solver::{PathResult, PathSolver};

/// Called exactly once with the waypoints and success flag of a request.
pub type Continuation = Box<dyn FnOnce(Vec<Position>, bool)>;

/// Identifier handed out by [`PathScheduler::submit`], in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req#{}", self.0)
    }
}

/// Whether the scheduler has work left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing in flight and nothing queued.
    Idle,
    /// A request is in flight; call [`PathScheduler::poll`] again.
    Busy,
}

struct PathRequest {
    id: RequestId,
    start: Position,
    end: Position,
    on_complete: Continuation,
}

/// Where the in-flight request will resume on the next poll.
enum Stage {
    BuildGrid,
    Search,
    Report(PathResult),
}

struct InFlight {
    request: PathRequest,
    stage: Stage,
}

/// Owns the world probe, the cost grid and the solver, and serializes path
/// requests against them.
///
/// Continuations run while the scheduler is mutably borrowed, so they cannot
/// call [`submit`](Self::submit) themselves; hand results out through shared
/// state or a channel and submit follow-ups from the caller's loop.
pub struct PathScheduler<W: WorldProbe> {
    world: W,
    settings: GridSettings,
    grid: Option<CostGrid>,
    grid_stale: bool,
    solver: PathSolver,
    queue: VecDeque<PathRequest>,
    in_flight: Option<InFlight>,
    next_id: u64,
    completed: usize,
}

impl<W: WorldProbe> PathScheduler<W> {
    /// Create a scheduler for `world`. The grid itself is built lazily when
    /// the first request is dispatched.
    pub fn new(settings: GridSettings, world: W) -> Result<Self, GridError> {
        settings.validate()?;
        Ok(Self {
            world,
            settings,
            grid: None,
            grid_stale: true,
            solver: PathSolver::new(),
            queue: VecDeque::new(),
            in_flight: None,
            next_id: 0,
            completed: 0,
        })
    }

    /// Queue a path request. If nothing is in flight it is dispatched right
    /// away, but no work happens until [`poll`](Self::poll).
    pub fn submit<F>(&mut self, start: Position, end: Position, on_complete: F) -> RequestId
    where
        F: FnOnce(Vec<Position>, bool) + 'static,
    {
        let id = RequestId(self.next_id);
        self.next_id += 1;
        self.queue.push_back(PathRequest {
            id,
            start,
            end,
            on_complete: Box::new(on_complete),
        });
        log::debug!("{id} queued: {start} -> {end} ({} pending)", self.queue.len());
        self.try_dispatch();
        id
    }

    /// Advance the in-flight request by one step.
    pub fn poll(&mut self) -> SchedulerState {
        let Some(mut task) = self.in_flight.take() else {
            return SchedulerState::Idle;
        };
        match std::mem::replace(&mut task.stage, Stage::BuildGrid) {
            Stage::BuildGrid => {
                task.stage = match self.prepare_grid() {
                    Ok(()) => Stage::Search,
                    Err(e) => {
                        log::error!("{}: cannot build grid: {e}", task.request.id);
                        Stage::Report(PathResult::failure())
                    }
                };
                self.in_flight = Some(task);
            }
            Stage::Search => {
                let result = match self.grid.as_mut() {
                    Some(grid) => self.solver.solve(grid, task.request.start, task.request.end),
                    None => PathResult::failure(),
                };
                task.stage = Stage::Report(result);
                self.in_flight = Some(task);
            }
            Stage::Report(result) => self.on_solve_complete(task.request, result),
        }
        self.state()
    }

    /// Poll until every queued request has completed. Returns how many
    /// continuations fired.
    pub fn run_until_idle(&mut self) -> usize {
        let before = self.completed;
        while self.poll() == SchedulerState::Busy {}
        self.completed - before
    }

    pub fn state(&self) -> SchedulerState {
        if self.in_flight.is_some() {
            SchedulerState::Busy
        } else {
            SchedulerState::Idle
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Requests queued behind the in-flight one.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Total continuations fired so far.
    #[inline]
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    /// Mutable access to the world. When grids are not rebuilt for every
    /// request, follow changes with [`invalidate_grid`](Self::invalidate_grid).
    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Force a grid rebuild before the next search.
    pub fn invalidate_grid(&mut self) {
        self.grid_stale = true;
    }

    /// The grid as left by the last search, if one has been built.
    pub fn grid(&self) -> Option<&CostGrid> {
        self.grid.as_ref()
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    fn prepare_grid(&mut self) -> Result<(), GridError> {
        let rebuild = self.grid_stale || self.settings.rebuild_each_request;
        match self.grid.as_mut() {
            Some(grid) if rebuild => grid.rebuild(&self.world),
            Some(_) => {}
            None => self.grid = Some(CostGrid::build(&self.settings, &self.world)?),
        }
        self.grid_stale = false;
        Ok(())
    }

    fn on_solve_complete(&mut self, request: PathRequest, result: PathResult) {
        log::debug!(
            "{} complete: success={} waypoints={}",
            request.id,
            result.success,
            result.waypoints.len()
        );
        (request.on_complete)(result.waypoints, result.success);
        self.completed += 1;
        self.try_dispatch();
    }

    fn try_dispatch(&mut self) {
        if self.in_flight.is_some() {
            return;
        }
        if let Some(request) = self.queue.pop_front() {
            log::debug!("{} dispatched", request.id);
            self.in_flight = Some(InFlight {
                request,
                stage: Stage::BuildGrid,
            });
        }
    }
}

impl<W: WorldProbe> fmt::Debug for PathScheduler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathScheduler")
            .field("pending", &self.queue.len())
            .field("busy", &self.is_busy())
            .field("completed", &self.completed)
            .finish()
    }
}
