// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod quirks;
pub mod screen;

use self::{
    flags::Flags,
    instruction::Insn,
    keypad::Keypad,
    mem::{Mem, FONT_START, PROGRAM_START},
    quirks::Quirks,
    screen::Screen,
};
use crate::error::{Error, Result};
use log::{debug, error, info, trace};
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// Represents the internal state of the CPU interpreter
#[derive(Clone, Debug, PartialEq)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], instructions per frame, etc.
    pub flags: Flags,
    // memory
    mem: Mem,
    font: Adr,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    // I/O
    screen: Screen,
    keypad: Keypad,
    // Execution data
    cycle: usize,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Flags], and nothing loaded
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let cpu = CPU::new(Flags {
    ///     ipf: 20,
    ///     quirks: Quirks::from(true),
    ///     ..Default::default()
    /// });
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(flags: Flags) -> Self {
        CPU {
            flags,
            mem: Mem::new(),
            font: FONT_START,
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            screen: Screen::new(),
            keypad: Keypad::default(),
            cycle: 0,
        }
    }

    /// Loads a program from disk into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space, and [resets](CPU::reset) the CPU.
    ///
    /// A program too large for memory is rejected with [Error::Load],
    /// and the CPU is left untouched.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x12, 0x00]).unwrap();
    /// assert!(cpu.load_program_bytes(&[0; 0x1000]).is_err());
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem.load_program(rom)?;
        self.reset();
        info!("Loaded program [size: {}]", rom.len());
        Ok(self)
    }

    /// Sets the state of a key, and reports whether the key's state changed.
    /// If the key does not exist, returns [Error::InvalidKey].
    ///
    /// If the CPU is waiting on `Fx0A`, a key going down completes the wait:
    /// its code lands in the waiting register, and execution resumes at the
    /// following instruction.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// assert!(cpu.set_key(0x7, true).unwrap());
    /// // press key `7` again, even though it's already pressed
    /// assert!(!cpu.set_key(0x7, true).unwrap());
    /// // release it
    /// assert!(cpu.set_key(0x7, false).unwrap());
    /// ```
    pub fn set_key(&mut self, key: usize, down: bool) -> Result<bool> {
        let changed = self.keypad.set(key, down)?;
        if changed && down {
            if let Some(x) = self.flags.keypause.take() {
                self.set_v(x, key as u8)?;
                self.pc = self.pc.wrapping_add(2);
                debug!("Key {key:X} pressed, resuming at {:03x}", self.pc);
            }
        }
        Ok(changed)
    }

    /// Presses a key. See [CPU::set_key].
    pub fn press(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, true)
    }

    /// Releases a key. See [CPU::set_key].
    pub fn release(&mut self, key: usize) -> Result<bool> {
        self.set_key(key, false)
    }

    /// Whether `key` is currently held
    pub fn is_down(&self, key: usize) -> bool {
        self.keypad.is_down(key)
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(cpu.v()[4], 0x41);
    /// assert!(cpu.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        let gpr = self.v.get_mut(reg).ok_or(Error::InvalidRegister { reg })?;
        *gpr = value;
        Ok(())
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Whether a tone should be playing (the sound timer is nonzero)
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the return addresses on the call stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the display buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the keypad
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Gets the CPU's memory
    pub fn memory(&self) -> &Mem {
        &self.mem
    }

    /// The register an `Fx0A` is waiting to fill, if any
    pub fn awaiting_key(&self) -> Option<Reg> {
        self.flags.keypause
    }

    /// Whether execution is suspended on `Fx0A`
    pub fn is_awaiting_key(&self) -> bool {
        self.flags.keypause.is_some()
    }

    /// Resets the emulator.
    ///
    /// Touches the run-state [Flags] (halted, keypause), stack, pc,
    /// registers, timers, screen, keys, and cycle count.
    ///
    /// Does not touch [Quirks], pause, instructions per frame, or memory.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.flags.keypause = Some(3);
    /// cpu.set_v(3, 0xaa).unwrap();
    /// cpu.reset();
    /// assert!(!cpu.is_awaiting_key());
    /// assert_eq!(cpu.v()[3], 0);
    /// ```
    pub fn reset(&mut self) {
        self.flags = Flags {
            halted: false,
            keypause: None,
            ..self.flags.clone()
        };
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = PROGRAM_START;
        // Zero the registers
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.screen.clear();
        self.keypad.release_all();
        // Execution data
        self.cycle = 0;
        info!("Reset CPU");
    }

    /// Executes a single instruction
    ///
    /// Does nothing while paused, halted, or waiting on a key.
    ///
    /// Any error halts the CPU, with pc left on the faulting instruction,
    /// until the next [CPU::reset] or [CPU::load_program_bytes].
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jp #202
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::Decode] if the instruction is not a CHIP-8 instruction.
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    /// ]).unwrap();
    /// cpu.tick()
    ///     .expect_err("Should return Error::Decode { pc: 0x200, word: 0xffff }");
    /// assert!(cpu.flags.halted);
    /// ```
    pub fn tick(&mut self) -> Result<&mut Self> {
        if self.flags.is_paused() {
            return Ok(self);
        }
        let pc = self.pc;
        if let Err(e) = self.fetch_and_execute() {
            error!("Halted at {pc:03x}: {e}");
            self.pc = pc;
            self.flags.halted = true;
            return Err(e);
        }
        Ok(self)
    }

    /// Decrements each nonzero timer by one. Call this at 60 Hz.
    pub fn tick_timers(&mut self) -> &mut Self {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        self
    }

    /// Runs one 60 Hz frame: up to [Flags::ipf] instructions, then one
    /// [timer tick](CPU::tick_timers).
    ///
    /// Stops issuing instructions early if `Fx0A` starts waiting, but the
    /// timers still tick. Nothing happens at all while paused or halted.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x60, 0x03, // ld v0, #03
    ///     0xf0, 0x15, // ld DT, v0
    ///     0x12, 0x04, // jp #204
    /// ]).unwrap();
    /// cpu.frame().unwrap();
    /// assert_eq!(cpu.delay(), 2);
    /// ```
    pub fn frame(&mut self) -> Result<&mut Self> {
        if self.flags.pause || self.flags.halted {
            return Ok(self);
        }
        for _ in 0..self.flags.ipf.max(1) {
            if self.flags.is_paused() {
                break;
            }
            self.tick()?;
        }
        Ok(self.tick_timers())
    }

    /// Unpauses the emulator for a single instruction,
    /// even if cpu.flags.pause is set.
    ///
    /// NOTE: does not tick the timers
    pub fn singlestep(&mut self) -> Result<&mut Self> {
        let pause = std::mem::replace(&mut self.flags.pause, false);
        let result = self.tick().map(|_| ());
        self.flags.pause = pause;
        result.map(|()| self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "{}: {gpr:02x}{}",
                        format!("v{i:X}").bright_black(),
                        match i % 4 {
                            3 => "\n",
                            _ => " ",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

// fetch/decode
impl CPU {
    fn fetch_and_execute(&mut self) -> Result<()> {
        let pc = self.pc;
        let word = self.mem.read_word(pc)?;
        let insn = Insn::decode_word(word).ok_or(Error::Decode { pc, word })?;
        trace!("{:6} {pc:03x}: {insn}", self.cycle);
        self.pc = pc.wrapping_add(2);
        self.execute(insn, pc)?;
        self.cycle += 1;
        Ok(())
    }
}

impl Default for CPU {
    /// Constructs a new CPU with the default [Flags]
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    /// | ipf    |`10`     | Instructions per 60 Hz frame.
    fn default() -> Self {
        Self::new(Flags::default())
    }
}
