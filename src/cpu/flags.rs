//! Represents flags that aid in implementation but aren't a part of the Chip-8 itself

use super::{Quirks, Reg};

/// Instructions executed per 60 Hz frame, unless configured otherwise
pub const DEFAULT_IPF: usize = 10;

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when the emulator is paused by the user and should not update
    pub pause: bool,
    /// Set when the last instruction faulted. Cleared by a reset or reload.
    pub halted: bool,
    /// Set to the destination register while `Fx0A` waits for a key press
    pub keypause: Option<Reg>,
    /// Represents the number of instructions to run per tick of the timers
    pub ipf: usize,
    /// Represents the set of emulator [Quirks] to enable
    pub quirks: Quirks,
}

impl Flags {
    /// Toggles pause
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.pause);
    /// // Pause the cpu
    /// cpu.flags.pause();
    /// assert_eq!(true, cpu.flags.pause);
    /// ```
    pub fn pause(&mut self) {
        self.pause = !self.pause
    }

    /// Whether [CPU::tick](super::CPU::tick) would refuse to run right now
    pub fn is_paused(&self) -> bool {
        self.pause || self.halted || self.keypause.is_some()
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            pause: false,
            halted: false,
            keypause: None,
            ipf: DEFAULT_IPF,
            quirks: Quirks::default(),
        }
    }
}
