// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs one of every opcode through fetch, decode, and execute.
//!
//! Every test starts with vN = N, so the expected values below can be worked
//! out from the opcode alone.
use super::*;

const IDENTITY: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

/// Runs `word` on a brand new CPU, and returns the CPU for inspection
fn run_single_op(word: u16) -> CPU {
    try_single_op(word).unwrap_or_else(|e| panic!("{word:04x} should execute: {e}"))
}

fn try_single_op(word: u16) -> Result<CPU> {
    try_single_op_at(word, 0)
}

/// Runs `word` on a brand new CPU, with I = `i`
fn try_single_op_at(word: u16, i: u16) -> Result<CPU> {
    let mut cpu = CPU::default();
    cpu.load_program_bytes(&word.to_be_bytes())?;
    cpu.v = IDENTITY;
    cpu.i = i;
    cpu.tick()?;
    Ok(cpu)
}

/// Asserts that `word` is not an instruction
fn rejects(word: u16) {
    match try_single_op(word) {
        Err(Error::Decode { pc: 0x200, word: w }) if w == word => {}
        other => panic!("{word:04x} should not decode, got {other:?}"),
    }
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test] fn cls()      { assert_eq!(0x202, run_single_op(0x00e0).pc); }
    #[test] fn ret_empty() { assert!(matches!(try_single_op(0x00ee), Err(Error::StackUnderflow { pc: 0x200 }))); }
    #[test] fn sys_0123() { rejects(0x0123) }
    #[test] fn sys_0000() { rejects(0x0000) }
}
#[rustfmt::skip]
mod jp {
    use super::*;
    #[test] fn even() { assert_eq!(0x230, run_single_op(0x1230).pc); }
    #[test] fn odd()  { assert_eq!(0x231, run_single_op(0x1231).pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn target()   { assert_eq!(0x346, run_single_op(0x2346).pc); }
    #[test] fn pushes()   { assert_eq!(&[0x202], run_single_op(0x2346).stack()); }
}
#[rustfmt::skip]
mod se_byte {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(0x3000).pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(0x3001).pc); }
    #[test] fn high()    { assert_eq!(0x204, run_single_op(0x3f0f).pc); }
}
#[rustfmt::skip]
mod sne_byte {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(0x4001).pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(0x4000).pc); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(0x5000).pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(0x5010).pc); }
    #[test] fn invalid() { (1..=0xf).for_each(|n| rejects(0x5120 | n)) }
}
#[rustfmt::skip]
mod ld_byte {
    use super::*;
    #[test] fn zero() { assert_eq!(0x00, run_single_op(0x6100).v[1]); }
    #[test] fn mid()  { assert_eq!(0x5a, run_single_op(0x625a).v[2]); }
    #[test] fn full() { assert_eq!(0xff, run_single_op(0x6fff).v[0xf]); }
}
#[rustfmt::skip]
mod add_byte {
    use super::*;
    #[test] fn zero() { assert_eq!(0x01, run_single_op(0x7100).v[1]); }
    #[test] fn mid()  { assert_eq!(0x5c, run_single_op(0x725a).v[2]); }
    #[test] fn wrap() { assert_eq!(0x02, run_single_op(0x73ff).v[3]); }
    #[test] fn no_carry() { assert_eq!(0x0f, run_single_op(0x73ff).v[0xf]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn ld()   { assert_eq!(0x02, run_single_op(0x8120).v[1]); }
    #[test] fn or()   { assert_eq!(0x03, run_single_op(0x8121).v[1]); }
    #[test] fn and()  { assert_eq!(0x00, run_single_op(0x8122).v[1]); }
    #[test] fn xor()  { assert_eq!(0x03, run_single_op(0x8123).v[1]); }
    #[test] fn add()  { assert_eq!([0x03, 0], { let c = run_single_op(0x8124); [c.v[1], c.v[0xf]] }); }
    #[test] fn sub()  { assert_eq!([0xff, 0], { let c = run_single_op(0x8125); [c.v[1], c.v[0xf]] }); }
    #[test] fn shr()  { assert_eq!([0x00, 1], { let c = run_single_op(0x8126); [c.v[1], c.v[0xf]] }); }
    #[test] fn subn() { assert_eq!([0x01, 1], { let c = run_single_op(0x8127); [c.v[1], c.v[0xf]] }); }
    #[test] fn shl()  { assert_eq!([0x02, 0], { let c = run_single_op(0x812e); [c.v[1], c.v[0xf]] }); }
    #[test] fn invalid() { [0x8, 0x9, 0xa, 0xb, 0xc, 0xd, 0xf].into_iter().for_each(|n| rejects(0x8120 | n)) }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(0x9010).pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(0x9000).pc); }
    #[test] fn invalid() { (1..=0xf).for_each(|n| rejects(0x9ff0 | n)) }
}
#[rustfmt::skip]
mod ld_i {
    use super::*;
    #[test] fn even() { assert_eq!(0x230, run_single_op(0xa230).i()); }
    #[test] fn odd()  { assert_eq!(0xfff, run_single_op(0xafff).i()); }
}
#[rustfmt::skip]
mod jp_v0 {
    use super::*;
    // v0 is 0 here; see tests.rs for the indexed cases
    #[test] fn target() { assert_eq!(0x230, run_single_op(0xb230).pc); }
}
#[rustfmt::skip]
mod rnd {
    use super::*;
    #[test] fn masked() { assert!(run_single_op(0xc001).v[0] <= 1); }
    #[test] fn zero()   { assert_eq!(0, run_single_op(0xc500).v[5]); }
}
#[rustfmt::skip]
mod drw {
    use super::*;
    #[test] fn glyph()   { assert_eq!(14, run_single_op(0xd005).screen().lit()); }
    #[test] fn nothing() { assert_eq!(0, run_single_op(0xd000).screen().lit()); }
}
#[rustfmt::skip]
mod key {
    use super::*;
    #[test] fn skp()     { assert_eq!(0x202, run_single_op(0xe09e).pc); }
    #[test] fn sknp()    { assert_eq!(0x204, run_single_op(0xe0a1).pc); }
    #[test] fn invalid() { rejects(0xe0ff); rejects(0xe09f); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn ld_vx_dt()  { assert_eq!(0x0, run_single_op(0xf707).v[7]); }
    #[test] fn ld_vx_k()   { assert_eq!(Some(0x3), run_single_op(0xf30a).awaiting_key()); }
    #[test] fn ld_dt_vx()  { assert_eq!(0xf, run_single_op(0xff15).delay()); }
    #[test] fn ld_st_vx()  { assert_eq!(0xf, run_single_op(0xff18).sound()); }
    #[test] fn add_i()     { assert_eq!(0xe, run_single_op(0xfe1e).i); }
    #[test] fn ld_f()      { assert_eq!(0x19, run_single_op(0xf529).i); }
    #[test] fn ld_b()      { assert_eq!(&[0, 1, 3], try_single_op_at(0xfd33, 0x300).unwrap().mem.get(0x300..0x303).unwrap()); }
    #[test] fn ld_b_font() { assert!(matches!(try_single_op(0xfd33), Err(Error::AddressOutOfRange { .. }))); }
    #[test] fn ld_i_vx()   { assert_eq!(&IDENTITY, try_single_op_at(0xff55, 0x300).unwrap().mem.get(0x300..0x310).unwrap()); }
    #[test] fn ld_i_vx_font() { assert!(matches!(try_single_op(0xff55), Err(Error::AddressOutOfRange { range }) if range == (0..16))); }
    #[test] fn ld_vx_i()   { assert_eq!(&mem::FONT[..16], run_single_op(0xff65).v()); }
    #[test] fn invalid()   { rejects(0xffff); rejects(0xf000); rejects(0xf166); }
}
