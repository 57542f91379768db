//! The per-tick option selection algorithm.

use gm_agent::NO_OPTION;

use crate::action::Action;
use crate::option::{AgentScratch, OptionCtx, OptionDef};

/// Active-option bookkeeping for one agent, borrowed from the SoA store for
/// the duration of one decision.
pub struct ActiveSlot<'a> {
    /// Index into the role's option list, or [`NO_OPTION`].
    pub option: &'a mut u16,
    /// Consecutive ticks the option has been running.
    pub ticks: &'a mut u32,
}

/// Turns a priority-ordered option list into exactly one action per tick.
///
/// The engine is stateless; everything per-agent lives in the slot and the
/// scratch.  Selection is sticky: an option keeps running until its
/// `should_terminate` fires, except that an interruptible option is preempted
/// the moment a strictly higher-priority option becomes eligible.  Sticky
/// prevents thrashing among near-equal options; the preemption path is what
/// lets survival behaviors cut in front of economic ones.
pub struct OptionEngine;

impl OptionEngine {
    /// Run one agent's decision for this tick.
    ///
    /// Always returns an action; "nothing is eligible" is the idle action,
    /// never an error.  A slot index left over from a different (shorter)
    /// role is treated as empty.
    pub fn decide(
        &self,
        options: &[OptionDef],
        slot: ActiveSlot<'_>,
        ctx: &OptionCtx<'_>,
        scratch: &mut AgentScratch<'_>,
    ) -> Action {
        if (*slot.option as usize) >= options.len() && *slot.option != NO_OPTION {
            *slot.option = NO_OPTION;
            *slot.ticks = 0;
        }

        // Step 1: preemption scan for an interruptible active option.
        if *slot.option != NO_OPTION && options[*slot.option as usize].interruptible {
            let active = *slot.option as usize;
            for (i, opt) in options.iter().enumerate().take(active) {
                if (opt.can_start)(ctx, scratch) {
                    *slot.option = i as u16;
                    *slot.ticks = 0;
                    break;
                }
            }
        }

        // Step 2: activate the first eligible option when none is running.
        if *slot.option == NO_OPTION {
            match options.iter().position(|opt| (opt.can_start)(ctx, scratch)) {
                Some(i) => {
                    *slot.option = i as u16;
                    *slot.ticks = 0;
                }
                None => return Action::idle(),
            }
        }

        // Step 3: act and count the tick.
        let active = &options[*slot.option as usize];
        let action = (active.act)(ctx, scratch);
        *slot.ticks += 1;

        // Step 4: clear the slot on termination; re-selection is next tick's
        // problem.
        if (active.should_terminate)(ctx, scratch) {
            *slot.option = NO_OPTION;
            *slot.ticks = 0;
        }

        action
    }
}
