// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal [Keypad]

use crate::error::{Error, Result};

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 16;

/// Sixteen key-down flags, `0x0` through `0xF`.
///
/// Mapping host input onto these codes is the host's business.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Sets the state of a key, and reports whether it changed.
    /// If the key does not exist, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut keypad = Keypad::default();
    /// // press key `7`
    /// assert!(keypad.set(0x7, true).unwrap());
    /// // it was already pressed, so nothing's changed.
    /// assert!(!keypad.set(0x7, true).unwrap());
    /// assert!(keypad.is_down(0x7));
    /// ```
    pub fn set(&mut self, key: usize, down: bool) -> Result<bool> {
        let keyref = self.keys.get_mut(key).ok_or(Error::InvalidKey { key })?;
        let changed = *keyref != down;
        *keyref = down;
        Ok(changed)
    }

    /// Whether `key` is held. Keys that don't exist are never held.
    pub fn is_down(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Releases every key
    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Iterates over the codes of every held key
    pub fn held(&self) -> impl Iterator<Item = usize> + '_ {
        self.keys
            .iter()
            .enumerate()
            .filter_map(|(key, &down)| down.then_some(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_reports_change() {
        let mut keypad = Keypad::default();
        keypad.set(0xa, true).unwrap();
        assert!(keypad.set(0xa, false).unwrap());
        assert!(!keypad.set(0xa, false).unwrap());
        assert!(!keypad.is_down(0xa));
    }

    #[test]
    fn invalid_key_changes_nothing() {
        let mut keypad = Keypad::default();
        keypad
            .set(0x10, true)
            .expect_err("This should produce an Error::InvalidKey");
        assert_eq!(keypad, Keypad::default());
        assert!(!keypad.is_down(0x10));
    }

    #[test]
    fn held_and_release_all() {
        let mut keypad = Keypad::default();
        for key in [0x1, 0x5, 0xf] {
            keypad.set(key, true).unwrap();
        }
        assert_eq!(keypad.held().collect::<Vec<_>>(), vec![0x1, 0x5, 0xf]);
        keypad.release_all();
        assert_eq!(keypad.held().count(), 0);
    }
}
