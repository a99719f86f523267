//! The dispatcher: priority admission, vehicle assignment and completion.
//!
//! All scheduling state (intake queue, waiting list, in-progress set, resource
//! pool, history) lives behind one `parking_lot::Mutex`, so every operation is
//! a single critical section regardless of how many threads call in. Events
//! are delivered to sinks while the lock is held, which keeps their order
//! identical to the order of the transitions. Completion timers are scheduled
//! after the lock is released.
//!
//! Freed resources always go to the head of the waiting list before any fresh
//! intake is considered, and waiting items are never re-ranked by priority.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::core::{
    Assignment, CompletionTimer, DispatchError, DispatchEvent, EventSink, IntakeQueue, ItemView,
    NewWorkItem, Placement, Resolution, ResolvedHistory, ResourcePool, WaitingList, WorkItem,
};
use crate::util::clock::now_ms;
use crate::util::serde::{ItemId, ResourceId};

/// Outcome of a completion: the resolved item and, if the waiting list was
/// non-empty, the follow-up assignment of the freed resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// The resolved item.
    pub resolved: Resolution,
    /// The waiting item that took over the freed resource.
    pub reassigned: Option<Assignment>,
}

/// Point-in-time counts for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchStats {
    /// Items in the intake queue.
    pub pending: usize,
    /// Items in the waiting list.
    pub waiting: usize,
    /// Items currently assigned.
    pub in_progress: usize,
    /// Free resources.
    pub free_resources: usize,
    /// Registered resources.
    pub pool_size: usize,
    /// Resolutions recorded.
    pub resolved: usize,
}

/// An in-progress item with its assignment order.
struct Active {
    seq: u64,
    item: WorkItem,
}

struct DispatchState<Q> {
    intake: Q,
    waiting: WaitingList,
    in_progress: HashMap<ItemId, Active>,
    next_assignment: u64,
    pool: ResourcePool,
    history: ResolvedHistory,
    sinks: Vec<Box<dyn EventSink>>,
}

impl<Q: IntakeQueue> DispatchState<Q> {
    fn placement_of(&self, id: &str) -> Option<Placement> {
        if self.intake.contains(id) {
            Some(Placement::Queued)
        } else if self.waiting.contains(id) {
            Some(Placement::Waiting)
        } else if self.in_progress.contains_key(id) {
            Some(Placement::InProgress)
        } else {
            None
        }
    }

    fn emit(&mut self, event: &DispatchEvent) {
        for sink in &mut self.sinks {
            sink.record(event);
        }
    }

    /// Bind `resource` to `item` and record the transition.
    fn assign(&mut self, mut item: WorkItem, resource: ResourceId) -> Assignment {
        item.mark_assigned(resource.clone(), now_ms());
        let seq = self.next_assignment;
        self.next_assignment += 1;
        self.in_progress.insert(
            item.id.clone(),
            Active {
                seq,
                item: item.clone(),
            },
        );
        let assignment = Assignment { item, resource };
        self.emit(&DispatchEvent::Assigned(assignment.clone()));
        assignment
    }

    fn resolve(&mut self, id: &str, resource: &str) -> Result<Completion, DispatchError> {
        if !self.pool.is_registered(resource) {
            return Err(DispatchError::UnknownResource(resource.to_string()));
        }
        let assigned = self
            .in_progress
            .get(id)
            .ok_or_else(|| DispatchError::NotFound(id.to_string()))?
            .item
            .assigned_resource
            .clone()
            .unwrap_or_default();
        if assigned != resource {
            return Err(DispatchError::ResourceMismatch {
                id: id.to_string(),
                expected: assigned,
                actual: resource.to_string(),
            });
        }

        let mut item = self
            .in_progress
            .remove(id)
            .ok_or_else(|| DispatchError::NotFound(id.to_string()))?
            .item;
        item.mark_resolved(now_ms());
        let resolved = Resolution {
            item: item.clone(),
            resource: resource.to_string(),
        };
        self.emit(&DispatchEvent::Resolved(resolved.clone()));
        self.history.push(item);
        self.pool.release(resource)?;

        let reassigned = self.waiting.dequeue_oldest().map(|next| {
            let claimed = self.pool.claim(resource);
            debug_assert!(claimed, "released resource must be claimable");
            self.assign(next, resource.to_string())
        });

        Ok(Completion {
            resolved,
            reassigned,
        })
    }

    fn dispatch(&mut self) -> Vec<Assignment> {
        let mut assignments = Vec::new();

        while let Some(resource) = self.pool.acquire() {
            let next = self
                .waiting
                .dequeue_oldest()
                .or_else(|| self.intake.pop_highest());
            let Some(item) = next else {
                if let Err(e) = self.pool.release(&resource) {
                    tracing::error!("failed to return {} to the pool: {}", resource, e);
                }
                break;
            };
            assignments.push(self.assign(item, resource));
        }

        if !self.intake.is_empty() && self.pool.free_count() == 0 {
            let drained = self.intake.drain_all();
            tracing::info!(
                moved = drained.len(),
                "no available vehicles, waiting complaints will be processed as vehicles become available"
            );
            self.waiting.extend(drained);
        }

        assignments
    }
}

struct Shared<Q> {
    state: Mutex<DispatchState<Q>>,
    timer: Arc<dyn CompletionTimer>,
    service_duration: Duration,
}

/// Priority dispatcher over a fixed resource pool.
///
/// Cheap to clone; clones share the same state.
pub struct Dispatcher<Q> {
    shared: Arc<Shared<Q>>,
}

impl<Q> Clone for Dispatcher<Q> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<Q> Dispatcher<Q>
where
    Q: IntakeQueue + 'static,
{
    /// Create a dispatcher from its components.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `service_duration` is zero.
    pub fn new(
        intake: Q,
        pool: ResourcePool,
        timer: Arc<dyn CompletionTimer>,
        service_duration: Duration,
    ) -> Result<Self, DispatchError> {
        if service_duration.is_zero() {
            return Err(DispatchError::InvalidConfig(
                "service duration must be greater than 0".into(),
            ));
        }
        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(DispatchState {
                    intake,
                    waiting: WaitingList::new(),
                    in_progress: HashMap::new(),
                    next_assignment: 0,
                    pool,
                    history: ResolvedHistory::new(),
                    sinks: Vec::new(),
                }),
                timer,
                service_duration,
            }),
        })
    }

    /// Attach an event sink. Sinks receive events in attachment order.
    #[must_use]
    pub fn with_sink(self, sink: Box<dyn EventSink>) -> Self {
        self.add_sink(sink);
        self
    }

    /// Attach an event sink to a running dispatcher.
    pub fn add_sink(&self, sink: Box<dyn EventSink>) {
        self.shared.state.lock().sinks.push(sink);
    }

    /// Fixed time between assignment and completion.
    #[must_use]
    pub fn service_duration(&self) -> Duration {
        self.shared.service_duration
    }

    /// Submit a new complaint into the intake queue.
    ///
    /// # Errors
    ///
    /// `DuplicateId` if the id is queued, waiting or in progress. A rejected
    /// submit leaves no trace.
    pub fn submit(&self, new: NewWorkItem) -> Result<WorkItem, DispatchError> {
        let mut state = self.shared.state.lock();
        if let Some(placement) = state.placement_of(&new.id) {
            tracing::warn!("rejected duplicate complaint {} ({})", new.id, placement);
            return Err(DispatchError::DuplicateId(new.id));
        }
        let item = WorkItem::pending(new);
        state.intake.submit(item.clone())?;
        tracing::info!(
            item_id = %item.id,
            priority = item.priority,
            "complaint '{}' added with priority {}",
            item.description,
            item.priority
        );
        Ok(item)
    }

    /// Cancel a complaint that is still in the intake queue.
    ///
    /// # Errors
    ///
    /// `NotCancelable` for waiting, in-progress or resolved items, `NotFound`
    /// for ids never seen.
    pub fn cancel(&self, id: &str) -> Result<WorkItem, DispatchError> {
        let mut state = self.shared.state.lock();
        if let Some(item) = state.intake.remove_by_id(id) {
            tracing::info!(item_id = %id, "complaint '{}' removed from the queue", item.description);
            return Ok(item);
        }
        let placement = state
            .placement_of(id)
            .or_else(|| state.history.get(id).map(|_| Placement::Resolved));
        match placement {
            Some(placement) => {
                tracing::warn!("complaint {} not cancelable while {}", id, placement);
                Err(DispatchError::NotCancelable {
                    id: id.to_string(),
                    placement,
                })
            }
            None => Err(DispatchError::NotFound(id.to_string())),
        }
    }

    /// Assign free resources to queued work, highest priority first.
    ///
    /// When work remains but the pool is exhausted, all remaining intake moves
    /// to the waiting list in its current order. Returns the assignments made;
    /// with nothing to do, returns an empty list and changes nothing.
    pub fn dispatch_cycle(&self) -> Vec<Assignment> {
        let assignments = {
            let mut state = self.shared.state.lock();
            state.dispatch()
        };
        if assignments.is_empty() {
            tracing::debug!("dispatch cycle made no assignments");
        }
        for assignment in &assignments {
            self.schedule_completion(assignment);
        }
        assignments
    }

    /// Resolve an in-progress item and hand its resource to the oldest
    /// waiting item, if any.
    ///
    /// Normally called by the completion timer, exactly once per assignment.
    ///
    /// # Errors
    ///
    /// `UnknownResource` if `resource` was never registered, `NotFound` if
    /// `id` is not in progress, `ResourceMismatch` if it is in progress on a
    /// different resource.
    pub fn on_completion(&self, id: &str, resource: &str) -> Result<Completion, DispatchError> {
        let completion = {
            let mut state = self.shared.state.lock();
            state.resolve(id, resource)?
        };
        if let Some(next) = &completion.reassigned {
            self.schedule_completion(next);
        }
        Ok(completion)
    }

    fn schedule_completion(&self, assignment: &Assignment) {
        let this = self.clone();
        let id = assignment.item.id.clone();
        let resource = assignment.resource.clone();
        self.shared.timer.schedule(
            &assignment.item.id,
            self.shared.service_duration,
            Box::new(move || {
                if let Err(e) = this.on_completion(&id, &resource) {
                    tracing::error!("completion of {} on {} failed: {}", id, resource, e);
                }
            }),
        );
    }

    /// Ordered snapshot of the intake queue.
    #[must_use]
    pub fn list_pending(&self) -> Vec<WorkItem> {
        self.shared.state.lock().intake.peek_all()
    }

    /// Snapshot of the waiting list, oldest first.
    #[must_use]
    pub fn list_waiting(&self) -> Vec<WorkItem> {
        self.shared.state.lock().waiting.snapshot()
    }

    /// Snapshot of in-progress items, oldest assignment first.
    #[must_use]
    pub fn list_in_progress(&self) -> Vec<WorkItem> {
        let state = self.shared.state.lock();
        let mut active: Vec<&Active> = state.in_progress.values().collect();
        active.sort_by_key(|a| a.seq);
        active.into_iter().map(|a| a.item.clone()).collect()
    }

    /// Snapshot of resolved items in resolution order.
    #[must_use]
    pub fn list_history(&self) -> Vec<WorkItem> {
        self.shared.state.lock().history.snapshot()
    }

    /// Most recently resolved item.
    #[must_use]
    pub fn latest_resolved(&self) -> Option<WorkItem> {
        self.shared.state.lock().history.latest().cloned()
    }

    /// Free resources in registration order.
    #[must_use]
    pub fn free_resources(&self) -> Vec<ResourceId> {
        self.shared.state.lock().pool.free_resources()
    }

    /// Look up an item wherever it is tracked, including history.
    ///
    /// # Errors
    ///
    /// `NotFound` if no item with `id` has been seen.
    pub fn status(&self, id: &str) -> Result<ItemView, DispatchError> {
        let state = self.shared.state.lock();
        let found = state
            .intake
            .get(id)
            .map(|item| (item, Placement::Queued))
            .or_else(|| state.waiting.get(id).map(|item| (item, Placement::Waiting)))
            .or_else(|| {
                state
                    .in_progress
                    .get(id)
                    .map(|active| (&active.item, Placement::InProgress))
            })
            .or_else(|| state.history.get(id).map(|item| (item, Placement::Resolved)));
        found
            .map(|(item, placement)| ItemView {
                item: item.clone(),
                placement,
            })
            .ok_or_else(|| DispatchError::NotFound(id.to_string()))
    }

    /// Point-in-time counts.
    #[must_use]
    pub fn snapshot(&self) -> DispatchStats {
        let state = self.shared.state.lock();
        DispatchStats {
            pending: state.intake.len(),
            waiting: state.waiting.len(),
            in_progress: state.in_progress.len(),
            free_resources: state.pool.free_count(),
            pool_size: state.pool.size(),
            resolved: state.history.len(),
        }
    }
}
