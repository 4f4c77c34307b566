//! Two-phase structure placement.
//!
//! A [`StructurePlan`] accumulates `Place` and `Require` actions while
//! Building. [`StructurePlan::commit`] validates every requirement against the
//! target first; only when all pass are the placements executed, in order.
//! An aborted plan writes nothing.

use glam::IVec3;
use strata_voxel::{BlockId, BlockMask, ChunkBlocks};

/// Block storage a plan validates against and writes into.
pub trait BlockTarget {
    /// Block at a chunk-local position, `None` outside the target.
    fn block_at(&self, pos: IVec3) -> Option<BlockId>;

    /// Writes a block; returns `false` if the position is outside the target.
    fn place(&mut self, pos: IVec3, block: BlockId) -> bool;
}

impl BlockTarget for ChunkBlocks {
    #[inline]
    fn block_at(&self, pos: IVec3) -> Option<BlockId> {
        self.try_get(pos.x, pos.y, pos.z)
    }

    #[inline]
    fn place(&mut self, pos: IVec3, block: BlockId) -> bool {
        self.try_set(pos.x, pos.y, pos.z, block)
    }
}

/// One step of a plan. Offsets are relative to the plan origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanAction {
    Place { offset: IVec3, block: BlockId },
    Require { offset: IVec3, allowed: BlockMask },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanState {
    Building,
    Validating,
    Committed,
    Aborted,
}

/// Result of [`StructurePlan::commit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every requirement held. `clipped` placements fell outside the target.
    Committed { placed: usize, clipped: usize },
    /// The requirement at `failed_at` (position in the action list) failed.
    Aborted { failed_at: usize },
}

impl PlanOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }
}

#[derive(Clone, Debug)]
pub struct StructurePlan {
    origin: IVec3,
    actions: Vec<PlanAction>,
    state: PlanState,
    outcome: Option<PlanOutcome>,
}

impl StructurePlan {
    /// Empty plan anchored at a chunk-local origin.
    pub fn new(origin: IVec3) -> Self {
        Self {
            origin,
            actions: Vec::new(),
            state: PlanState::Building,
            outcome: None,
        }
    }

    pub fn origin(&self) -> IVec3 {
        self.origin
    }

    pub fn place(&mut self, offset: IVec3, block: BlockId) -> &mut Self {
        debug_assert_eq!(self.state, PlanState::Building);
        self.actions.push(PlanAction::Place { offset, block });
        self
    }

    pub fn require(&mut self, offset: IVec3, allowed: BlockMask) -> &mut Self {
        debug_assert_eq!(self.state, PlanState::Building);
        self.actions.push(PlanAction::Require { offset, allowed });
        self
    }

    pub fn actions(&self) -> &[PlanAction] {
        &self.actions
    }

    pub fn state(&self) -> PlanState {
        self.state
    }

    /// Validates all requirements, then executes all placements.
    ///
    /// Requirements outside the target are treated as satisfied; placements
    /// outside it are clipped. A plan runs at most once; later calls return
    /// the first outcome without touching the target.
    pub fn commit<T: BlockTarget + ?Sized>(&mut self, target: &mut T) -> PlanOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let outcome = self.run(target);
        self.outcome = Some(outcome);
        outcome
    }

    fn run<T: BlockTarget + ?Sized>(&mut self, target: &mut T) -> PlanOutcome {
        self.state = PlanState::Validating;
        for (i, action) in self.actions.iter().enumerate() {
            if let PlanAction::Require { offset, allowed } = *action
                && let Some(current) = target.block_at(self.origin + offset)
                && !allowed.contains(current)
            {
                self.state = PlanState::Aborted;
                tracing::trace!(
                    "Structure at {} aborted: requirement {} found block {}",
                    self.origin,
                    i,
                    current.0
                );
                return PlanOutcome::Aborted { failed_at: i };
            }
        }

        let mut placed = 0;
        let mut clipped = 0;
        for action in &self.actions {
            if let PlanAction::Place { offset, block } = *action {
                if target.place(self.origin + offset, block) {
                    placed += 1;
                } else {
                    clipped += 1;
                }
            }
        }
        self.state = PlanState::Committed;
        PlanOutcome::Committed { placed, clipped }
    }
}
