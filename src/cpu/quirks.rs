//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` everywhere (the [Default]) is the canonical behavior: binary ops
/// leave vF alone, shifts act on vX, and `Fx55`/`Fx65` leave I unchanged.
/// `true` is COSMAC-VIP-like behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// COSMAC VIP: Binary ops in `8xy`(`1`, `2`, `3`) set vF to 0
    pub vf_reset: bool,
    /// COSMAC VIP: Shift ops in `8xy`(`6`, `E`) shift vY, and store the result in vX
    pub shift_vy: bool,
    /// COSMAC VIP: DMA instructions `Fx55`/`Fx65` leave I at I + x + 1
    pub dma_inc: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            vf_reset: value,
            shift_vy: value,
            dma_inc: value,
        }
    }
}
