//! Button masks and their one-byte compacted form.
//!
//! The game reports sixteen input bits per tick. Only eight of them matter
//! for movement playback; those are packed into contiguous bits of a single
//! stored byte. Everything else is dropped on the wire.

use bitflags::bitflags;

bitflags! {
    /// Semantic 16-bit input mask as reported by the game each tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u16 {
        /// Primary attack.
        const ATTACK = 1 << 0;
        /// Jump.
        const JUMP = 1 << 1;
        /// Crouch.
        const DUCK = 1 << 2;
        /// Move forward.
        const FORWARD = 1 << 3;
        /// Move backward.
        const BACK = 1 << 4;
        /// Use.
        const USE = 1 << 5;
        /// Cancel.
        const CANCEL = 1 << 6;
        /// Turn left.
        const LEFT = 1 << 7;
        /// Turn right.
        const RIGHT = 1 << 8;
        /// Strafe left.
        const MOVELEFT = 1 << 9;
        /// Strafe right.
        const MOVERIGHT = 1 << 10;
        /// Secondary attack.
        const ATTACK2 = 1 << 11;
        /// Walk modifier.
        const RUN = 1 << 12;
        /// Reload.
        const RELOAD = 1 << 13;
        /// Alternate action.
        const ALT1 = 1 << 14;
        /// Scoreboard.
        const SCORE = 1 << 15;
    }
}

bitflags! {
    /// The eight recorded buttons, packed into one byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CompactKeys: u8 {
        /// [`Buttons::JUMP`].
        const JUMP = 1 << 0;
        /// [`Buttons::DUCK`].
        const DUCK = 1 << 1;
        /// [`Buttons::FORWARD`].
        const FORWARD = 1 << 2;
        /// [`Buttons::BACK`].
        const BACK = 1 << 3;
        /// [`Buttons::MOVELEFT`].
        const MOVELEFT = 1 << 4;
        /// [`Buttons::MOVERIGHT`].
        const MOVERIGHT = 1 << 5;
        /// [`Buttons::LEFT`].
        const LEFT = 1 << 6;
        /// [`Buttons::RIGHT`].
        const RIGHT = 1 << 7;
    }
}

/// Bijection between recorded buttons and their compact bit.
const KEY_MAP: [(Buttons, CompactKeys); 8] = [
    (Buttons::JUMP, CompactKeys::JUMP),
    (Buttons::DUCK, CompactKeys::DUCK),
    (Buttons::FORWARD, CompactKeys::FORWARD),
    (Buttons::BACK, CompactKeys::BACK),
    (Buttons::MOVELEFT, CompactKeys::MOVELEFT),
    (Buttons::MOVERIGHT, CompactKeys::MOVERIGHT),
    (Buttons::LEFT, CompactKeys::LEFT),
    (Buttons::RIGHT, CompactKeys::RIGHT),
];

impl Buttons {
    /// Every button that survives a trip through [`CompactKeys`].
    pub const RECORDED: Buttons = Buttons::JUMP
        .union(Buttons::DUCK)
        .union(Buttons::FORWARD)
        .union(Buttons::BACK)
        .union(Buttons::MOVELEFT)
        .union(Buttons::MOVERIGHT)
        .union(Buttons::LEFT)
        .union(Buttons::RIGHT);

    /// Pack the recorded buttons into one byte, dropping all others.
    pub fn compact(self) -> CompactKeys {
        KEY_MAP
            .iter()
            .filter(|(button, _)| self.contains(*button))
            .fold(CompactKeys::empty(), |acc, (_, bit)| acc | *bit)
    }

    /// The buttons that a round trip through [`CompactKeys`] preserves.
    pub fn recorded(self) -> Buttons {
        self & Self::RECORDED
    }

    /// Both strafe keys held at once.
    pub fn is_overlapping(self) -> bool {
        self.contains(Buttons::MOVELEFT | Buttons::MOVERIGHT)
    }
}

impl CompactKeys {
    /// Expand back to the semantic button mask.
    pub fn expand(self) -> Buttons {
        KEY_MAP
            .iter()
            .filter(|(_, bit)| self.contains(*bit))
            .fold(Buttons::empty(), |acc, (button, _)| acc | *button)
    }
}
