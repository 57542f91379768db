//! Action vocabulary and the wire encoding handed to the executor.
//!
//! Internal decision logic reasons in target positions and directions; the
//! flattening to `(verb, argument)` bytes happens in exactly one place —
//! [`Action::encode`] — so a malformed pairing can be caught there and
//! downgraded to the idle encoding instead of escaping the core.

use gm_core::Direction;

// ── Verb / argument ───────────────────────────────────────────────────────────

/// Action category.  The discriminant is the wire byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Verb {
    /// Stand still; the universal safe fallback.
    Idle = 0,
    /// Step one tile in the argument direction.
    Move = 1,
    /// Attack the entity one tile away in the argument direction.
    Attack = 2,
    /// Use/harvest the entity one tile away.
    Use = 3,
    /// Swap positions with the adjacent agent.
    Swap = 4,
    /// Hand carried cargo to the adjacent entity.
    Give = 5,
    /// Place a structure; argument indexes the structure kind.
    PlantStructure = 6,
    /// Place a resource node in the adjacent tile.
    PlantResource = 7,
    /// Advance construction of the adjacent site.
    Build = 8,
    /// Turn to face the argument direction without moving.
    Orient = 9,
}

/// What kind of argument a verb carries.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum ArgKind {
    None,
    Dir,
    Index,
}

impl Verb {
    fn arg_kind(self) -> ArgKind {
        match self {
            Verb::Idle => ArgKind::None,
            Verb::Move
            | Verb::Attack
            | Verb::Use
            | Verb::Swap
            | Verb::Give
            | Verb::PlantResource
            | Verb::Build
            | Verb::Orient => ArgKind::Dir,
            Verb::PlantStructure => ArgKind::Index,
        }
    }
}

/// Argument payload of an [`Action`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionArg {
    None,
    Dir(Direction),
    /// Build-target index (structure kind to place).
    Index(u8),
}

impl ActionArg {
    fn kind(self) -> ArgKind {
        match self {
            ActionArg::None => ArgKind::None,
            ActionArg::Dir(_) => ArgKind::Dir,
            ActionArg::Index(_) => ArgKind::Index,
        }
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// One agent's chosen action for one tick, pre-encoding.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub verb: Verb,
    pub arg: ActionArg,
}

impl Action {
    #[inline]
    pub fn idle() -> Action {
        Action { verb: Verb::Idle, arg: ActionArg::None }
    }

    #[inline]
    pub fn step(dir: Direction) -> Action {
        Action { verb: Verb::Move, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn attack(dir: Direction) -> Action {
        Action { verb: Verb::Attack, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn use_adjacent(dir: Direction) -> Action {
        Action { verb: Verb::Use, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn swap(dir: Direction) -> Action {
        Action { verb: Verb::Swap, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn give(dir: Direction) -> Action {
        Action { verb: Verb::Give, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn plant_structure(kind_index: u8) -> Action {
        Action { verb: Verb::PlantStructure, arg: ActionArg::Index(kind_index) }
    }

    #[inline]
    pub fn plant_resource(dir: Direction) -> Action {
        Action { verb: Verb::PlantResource, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn build(dir: Direction) -> Action {
        Action { verb: Verb::Build, arg: ActionArg::Dir(dir) }
    }

    #[inline]
    pub fn orient(dir: Direction) -> Action {
        Action { verb: Verb::Orient, arg: ActionArg::Dir(dir) }
    }

    /// Flatten to the wire pair, downgrading any verb/argument mismatch to
    /// the idle encoding.  A mismatch indicates a buggy option, and the
    /// policy for internal failures is "the agent stands still this tick".
    pub fn encode(self) -> EncodedAction {
        if self.verb.arg_kind() != self.arg.kind() {
            return EncodedAction::IDLE;
        }
        let arg = match self.arg {
            ActionArg::None => 0,
            ActionArg::Dir(dir) => dir.index() as u8,
            ActionArg::Index(i) => i,
        };
        EncodedAction { verb: self.verb as u8, arg }
    }
}

/// The `(verb, argument)` byte pair consumed by the external executor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodedAction {
    pub verb: u8,
    pub arg: u8,
}

impl EncodedAction {
    pub const IDLE: EncodedAction = EncodedAction { verb: Verb::Idle as u8, arg: 0 };
}
