// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! Every flag-setting instruction computes its flag from the operands as they
//! were before the instruction, writes vF, and only then writes vX. When vX is
//! vF, the result therefore wins over the flag.

use super::*;
use rand::random;

impl CPU {
    /// Executes a single [Insn]. `pc` is the address it was fetched from;
    /// self.pc already points past it.
    #[rustfmt::skip]
    #[allow(non_snake_case)]
    pub(super) fn execute(&mut self, instruction: Insn, pc: Adr) -> Result<()> {
        match instruction {
            Insn::Cls               => self.clear_screen(),
            Insn::Ret               => self.ret(pc)?,
            Insn::Jp      {    A }  => self.jump(A),
            Insn::Call    {    A }  => self.call(A, pc)?,
            Insn::SeByte  { x, B }  => self.skip_equals_immediate(x, B),
            Insn::SneByte { x, B }  => self.skip_not_equals_immediate(x, B),
            Insn::Se      { x, y }  => self.skip_equals(x, y),
            Insn::LdByte  { x, B }  => self.load_immediate(x, B),
            Insn::AddByte { x, B }  => self.add_immediate(x, B),
            Insn::Ld      { x, y }  => self.load(x, y),
            Insn::Or      { x, y }  => self.or(x, y),
            Insn::And     { x, y }  => self.and(x, y),
            Insn::Xor     { x, y }  => self.xor(x, y),
            Insn::Add     { x, y }  => self.add(x, y),
            Insn::Sub     { x, y }  => self.sub(x, y),
            Insn::Shr     { x, y }  => self.shift_right(x, y),
            Insn::Subn    { x, y }  => self.backwards_sub(x, y),
            Insn::Shl     { x, y }  => self.shift_left(x, y),
            Insn::Sne     { x, y }  => self.skip_not_equals(x, y),
            Insn::LdI     {    A }  => self.load_i_immediate(A),
            Insn::JpV0    {    A }  => self.jump_indexed(A),
            Insn::Rnd     { x, B }  => self.rand(x, B),
            Insn::Drw   { x, y, n } => self.draw(x, y, n)?,
            Insn::Skp     { x    }  => self.skip_key_equals(x),
            Insn::Sknp    { x    }  => self.skip_key_not_equals(x),
            Insn::LdVxDt  { x    }  => self.load_delay_timer(x),
            Insn::LdVxK   { x    }  => self.wait_for_key(x, pc),
            Insn::LdDtVx  { x    }  => self.store_delay_timer(x),
            Insn::LdStVx  { x    }  => self.store_sound_timer(x),
            Insn::AddI    { x    }  => self.add_i(x),
            Insn::LdF     { x    }  => self.load_sprite(x),
            Insn::LdB     { x    }  => self.bcd_convert(x)?,
            Insn::LdIVx   { x    }  => self.store_dma(x)?,
            Insn::LdVxI   { x    }  => self.load_dma(x)?,
        }
        Ok(())
    }

    /// Bytes `I..I+len`, as a memory range
    fn i_range(&self, len: usize) -> std::ops::Range<usize> {
        self.i as usize..self.i as usize + len
    }
}

/// |`00En`| Screen and subroutine control
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.clear();
    }
    /// |`00ee`| Returns from subroutine
    #[inline(always)]
    pub(super) fn ret(&mut self, pc: Adr) -> Result<()> {
        self.pc = self.stack.pop().ok_or(Error::StackUnderflow { pc })?;
        Ok(())
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl CPU {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl CPU {
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a
    ///
    /// The pushed pc is the address of the instruction after the call.
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr, pc: Adr) -> Result<()> {
        if self.stack.len() >= STACK_DEPTH {
            return Err(Error::StackOverflow { pc });
        }
        self.stack.push(self.pc);
        self.pc = a;
        Ok(())
    }
}

/// |`3xbb`..`9xy0`| Conditional skips
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`3xbb`| Skip next instruction if vX == b   |
/// |`4xbb`| Skip next instruction if vX != b   |
/// |`5xy0`| Skip next instruction if vX == vY  |
/// |`9xy0`| Skip next instruction if vX != vY  |
impl CPU {
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] == b)
    }
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] != b)
    }
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] == self.v[y])
    }
    /// |`9xy0`| Skips the next instruction if register X != register Y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] != self.v[y])
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl CPU {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`7xbb`| Adds immediate byte b to register vX. vF is untouched.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X | Y                          |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=!borrow          |
/// |`8xy6`| X = X >> 1; Set vF=bit shifted out |
/// |`8xy7`| X = Y - X; Set vF=!borrow          |
/// |`8xyE`| X = X << 1; Set vF=bit shifted out |
impl CPU {
    /// Writes vF, then vX
    #[inline(always)]
    fn set_with_flag(&mut self, x: Reg, value: u8, flag: bool) {
        self.v[0xf] = flag.into();
        self.v[x] = value;
    }
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// [Quirks::vf_reset] zeroes vF afterward, as the COSMAC VIP did
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
        if self.flags.quirks.vf_reset {
            self.v[0xf] = 0;
        }
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// [Quirks::vf_reset] zeroes vF afterward, as the COSMAC VIP did
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
        if self.flags.quirks.vf_reset {
            self.v[0xf] = 0;
        }
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    ///
    /// # Quirk
    /// [Quirks::vf_reset] zeroes vF afterward, as the COSMAC VIP did
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
        if self.flags.quirks.vf_reset {
            self.v[0xf] = 0;
        }
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX.
    /// vF is 1 iff the true sum exceeds 255.
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
        self.set_with_flag(x, sum, carry);
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX.
    /// vF is 1 iff vX >= vY.
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let (difference, borrow) = self.v[x].overflowing_sub(self.v[y]);
        self.set_with_flag(x, difference, !borrow);
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    ///
    /// # Quirk
    /// [Quirks::shift_vy] shifts vY into vX instead
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, y: Reg) {
        let src = self.v[if self.flags.quirks.shift_vy { y } else { x }];
        self.set_with_flag(x, src >> 1, src & 1 != 0);
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX.
    /// vF is 1 iff vY >= vX.
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let (difference, borrow) = self.v[y].overflowing_sub(self.v[x]);
        self.set_with_flag(x, difference, !borrow);
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    ///
    /// # Quirk
    /// [Quirks::shift_vy] shifts vY into vX instead
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, y: Reg) {
        let src = self.v[if self.flags.quirks.shift_vy { y } else { x }];
        self.set_with_flag(x, src << 1, src >> 7 != 0);
    }
}

/// |`Aaaa`| Load address #a into register I
impl CPU {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }
}

/// |`Baaa`| Jump to &adr + v0
impl CPU {
    /// |`Badr`| Jump to &adr + v0
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        self.pc = a.wrapping_add(self.v[0] as Adr);
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = random::<u8>() & b;
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// vF is set to 1 if any lit pixel was erased, else 0
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib) -> Result<()> {
        let (x, y) = (self.v[x] as usize, self.v[y] as usize);
        let sprite = self.mem.get(self.i_range(n as usize))?;
        let collision = self.screen.draw(x, y, sprite);
        self.v[0xf] = collision.into();
        Ok(())
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip next instruction if key vX is held     |
/// |`eXa1`| Skip next instruction if key vX is not held |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key vX is held
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        self.skip_if(self.keypad.is_down(self.v[x] as usize & 0xf))
    }
    /// |`ExA1`| Skip next instruction if key vX is not held
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        self.skip_if(!self.keypad.is_down(self.v[x] as usize & 0xf))
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.delay;
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Rewinds pc onto this instruction and suspends execution.
    /// [CPU::set_key] finishes the instruction when a key goes down.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg, pc: Adr) {
        self.pc = pc;
        self.flags.keypause = Some(x);
        debug!("Waiting at {pc:03x} for a key press into v{x:X}");
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.delay = self.v[x];
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.sound = self.v[x];
    }
    /// |`Fx1e`| Add vX to I,
    /// ```py
    /// I += vX;
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        self.i = self.i.wrapping_add(self.v[x] as Adr);
    }
    /// |`Fx29`| Load sprite for character x into I
    /// ```py
    /// I = sprite(X);
    /// ```
    /// Only the low nibble of vX selects the glyph.
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = self.font + mem::GLYPH_SIZE * (self.v[x] as Adr & 0xf);
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) -> Result<()> {
        let x = self.v[x];
        let range = self.i_range(3);
        self.mem
            .get_mut(range)?
            .copy_from_slice(&[x / 100, x / 10 % 10, x % 10]);
        Ok(())
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// # Quirk
    /// [Quirks::dma_inc] leaves I at I+X+1 once the transfer is done
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) -> Result<()> {
        let range = self.i_range(x + 1);
        self.mem.get_mut(range)?.copy_from_slice(&self.v[..=x]);
        if self.flags.quirks.dma_inc {
            self.i = self.i.wrapping_add(x as Adr + 1);
        }
        Ok(())
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// # Quirk
    /// [Quirks::dma_inc] leaves I at I+X+1 once the transfer is done
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) -> Result<()> {
        let range = self.i_range(x + 1);
        self.v[..=x].copy_from_slice(self.mem.get(range)?);
        if self.flags.quirks.dma_inc {
            self.i = self.i.wrapping_add(x as Adr + 1);
        }
        Ok(())
    }
}
