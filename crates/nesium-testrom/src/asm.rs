//! A tiny two-pass 6502 assembler.
//!
//! Instructions are appended in order; operands that name a label are left as
//! zero placeholders and recorded as fixups. [`Assembler::finish`] resolves every
//! fixup once all labels are known:
//!
//! - relative branches store `target - (origin + 2)` as a signed byte;
//! - absolute operands store `base + target` little-endian.
//!
//! Builder methods never fail on their own. The first error is latched and
//! reported by `finish`, which keeps program listings free of `?` noise.

use std::collections::BTreeMap;
use std::ops::Range;

use thiserror::Error;
use tracing::debug;

use crate::cpu::{Addressing, Instruction, Mnemonic};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AsmError {
    #[error("no 6502 encoding for {0}")]
    Unencodable(Instruction),
    #[error("operand does not fit {instruction} at offset {offset:#06x}")]
    OperandMismatch {
        instruction: Instruction,
        offset: usize,
    },
    #[error("label `{0}` defined twice")]
    DuplicateLabel(&'static str),
    #[error("label `{0}` is never defined")]
    UndefinedLabel(&'static str),
    #[error("branch at {origin:#06x} to `{label}` ({target:#06x}) is out of range")]
    BranchOutOfRange {
        label: &'static str,
        origin: usize,
        target: usize,
    },
    #[error("origin {requested:#06x} is behind the current offset {current:#06x}")]
    OriginBackwards { current: usize, requested: usize },
    #[error("program needs {needed} bytes but the region holds {limit}")]
    RegionOverflow { needed: usize, limit: usize },
}

/// Operand supplied to [`Assembler::op`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implied and accumulator forms.
    None,
    /// Immediate value, zero-page address or raw branch displacement.
    Byte(u8),
    /// Absolute address.
    Word(u16),
    /// Offset of a label, resolved in [`Assembler::finish`].
    Label(&'static str),
}

impl From<u8> for Operand {
    fn from(value: u8) -> Self {
        Operand::Byte(value)
    }
}

impl From<u16> for Operand {
    fn from(value: u16) -> Self {
        Operand::Word(value)
    }
}

impl From<&'static str> for Operand {
    fn from(value: &'static str) -> Self {
        Operand::Label(value)
    }
}

/// One assembled instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Offset of the opcode byte from the start of the region.
    pub offset: usize,
    pub instruction: Instruction,
    /// Label the operand refers to, if any.
    pub target: Option<&'static str>,
}

impl Line {
    /// Offset of the first byte after this instruction.
    pub fn end(&self) -> usize {
        self.offset + self.instruction.byte_len()
    }
}

#[derive(Debug, Clone, Copy)]
struct Fixup {
    line: usize,
    label: &'static str,
}

#[derive(Debug)]
pub struct Assembler {
    base: u16,
    limit: usize,
    bytes: Vec<u8>,
    symbols: BTreeMap<&'static str, usize>,
    lines: Vec<Line>,
    data: Vec<Range<usize>>,
    fixups: Vec<Fixup>,
    error: Option<AsmError>,
}

impl Assembler {
    /// Starts an empty region whose offset 0 is visible to the CPU at `base`
    /// and which may grow to at most `limit` bytes.
    pub fn new(base: u16, limit: usize) -> Self {
        Self {
            base,
            limit,
            bytes: Vec::with_capacity(limit),
            symbols: BTreeMap::new(),
            lines: Vec::new(),
            data: Vec::new(),
            fixups: Vec::new(),
            error: None,
        }
    }

    /// Offset the next byte will be written to.
    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    /// Pads with zeroes up to `offset`.
    pub fn org(&mut self, offset: usize) -> &mut Self {
        if offset < self.offset() {
            self.fail(AsmError::OriginBackwards {
                current: self.offset(),
                requested: offset,
            });
        } else if self.reserve(offset - self.offset()) {
            self.bytes.resize(offset, 0);
        }
        self
    }

    /// Binds `name` to the current offset.
    pub fn label(&mut self, name: &'static str) -> &mut Self {
        let offset = self.offset();
        if self.symbols.insert(name, offset).is_some() {
            self.fail(AsmError::DuplicateLabel(name));
        }
        self
    }

    /// Emits an instruction without operand bytes.
    pub fn implied(&mut self, mnemonic: Mnemonic) -> &mut Self {
        self.op(mnemonic, Addressing::Implied, Operand::None)
    }

    /// Emits one instruction.
    pub fn op(
        &mut self,
        mnemonic: Mnemonic,
        addressing: Addressing,
        operand: impl Into<Operand>,
    ) -> &mut Self {
        let instruction = Instruction::new(mnemonic, addressing);
        let operand = operand.into();
        let offset = self.offset();

        let Some(opcode) = instruction.opcode() else {
            self.fail(AsmError::Unencodable(instruction));
            return self;
        };

        // Label operands stay zero until `finish`.
        let operand_bytes: [u8; 2] = match (addressing.operand_len(), operand) {
            (0, Operand::None) => [0, 0],
            (1, Operand::Byte(value)) => [value, 0],
            (2, Operand::Word(value)) => value.to_le_bytes(),
            (1, Operand::Label(_)) if addressing == Addressing::Relative => [0, 0],
            (2, Operand::Label(_)) => [0, 0],
            _ => {
                self.fail(AsmError::OperandMismatch {
                    instruction,
                    offset,
                });
                return self;
            }
        };

        if !self.reserve(instruction.byte_len()) {
            return self;
        }

        let target = match operand {
            Operand::Label(label) => {
                self.fixups.push(Fixup {
                    line: self.lines.len(),
                    label,
                });
                Some(label)
            }
            _ => None,
        };

        self.bytes.push(opcode);
        self.bytes
            .extend_from_slice(&operand_bytes[..addressing.operand_len()]);
        self.lines.push(Line {
            offset,
            instruction,
            target,
        });
        self
    }

    /// Emits raw data bytes.
    pub fn data(&mut self, bytes: &[u8]) -> &mut Self {
        if self.reserve(bytes.len()) {
            let start = self.offset();
            self.bytes.extend_from_slice(bytes);
            self.data.push(start..self.offset());
        }
        self
    }

    /// Resolves every label reference and returns the assembled region.
    pub fn finish(mut self) -> Result<Assembled, AsmError> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }

        for fixup in &self.fixups {
            let line = self.lines[fixup.line];
            let target = *self
                .symbols
                .get(fixup.label)
                .ok_or(AsmError::UndefinedLabel(fixup.label))?;

            if line.instruction.addressing == Addressing::Relative {
                let displacement = target as isize - line.end() as isize;
                let displacement =
                    i8::try_from(displacement).map_err(|_| AsmError::BranchOutOfRange {
                        label: fixup.label,
                        origin: line.offset,
                        target,
                    })?;
                self.bytes[line.offset + 1] = displacement as u8;
                debug!(
                    "{} at {:#06x} -> {} ({:#06x}), displacement {}",
                    line.instruction.mnemonic, line.offset, fixup.label, target, displacement
                );
            } else {
                let address = cpu_address(self.base, target);
                self.bytes[line.offset + 1..line.end()].copy_from_slice(&address.to_le_bytes());
                debug!(
                    "{} at {:#06x} -> {} (${:04X})",
                    line.instruction.mnemonic, line.offset, fixup.label, address
                );
            }
        }

        Ok(Assembled {
            base: self.base,
            bytes: self.bytes,
            symbols: self.symbols,
            lines: self.lines,
            data: self.data,
        })
    }

    fn reserve(&mut self, len: usize) -> bool {
        let needed = self.offset() + len;
        if needed > self.limit {
            self.fail(AsmError::RegionOverflow {
                needed,
                limit: self.limit,
            });
            return false;
        }
        true
    }

    fn fail(&mut self, error: AsmError) {
        self.error.get_or_insert(error);
    }
}

// Offsets are bounded by `limit`, which never reaches past the 16-bit space.
fn cpu_address(base: u16, offset: usize) -> u16 {
    base.wrapping_add(offset as u16)
}

/// Output of [`Assembler::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    base: u16,
    bytes: Vec<u8>,
    symbols: BTreeMap<&'static str, usize>,
    lines: Vec<Line>,
    data: Vec<Range<usize>>,
}

impl Assembled {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// CPU address of offset 0.
    pub fn base(&self) -> u16 {
        self.base
    }

    /// Region offset of a label.
    pub fn symbol(&self, label: &str) -> Option<usize> {
        self.symbols.get(label).copied()
    }

    /// CPU address of a label.
    pub fn address_of(&self, label: &str) -> Option<u16> {
        self.symbol(label)
            .map(|offset| cpu_address(self.base, offset))
    }

    /// Every instruction in emission order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Byte ranges emitted through [`Assembler::data`].
    pub fn data_ranges(&self) -> &[Range<usize>] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    use Addressing::*;
    use Mnemonic::*;

    #[test]
    fn backward_branch_resolves_to_label() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(LDX, Immediate, 0x02u8)
            .label("wait")
            .op(LDA, Absolute, 0x2002u16)
            .op(BPL, Relative, "wait")
            .implied(DEX)
            .op(BNE, Relative, "wait");
        let out = asm.finish().expect("assembles");

        assert_eq!(
            out.bytes(),
            &[0xA2, 0x02, 0xAD, 0x02, 0x20, 0x10, 0xFB, 0xCA, 0xD0, 0xF8]
        );
    }

    #[test]
    fn forward_jump_uses_cpu_address() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(JMP, Absolute, "skip")
            .org(0x10)
            .label("skip")
            .op(JMP, Absolute, "skip");
        let out = asm.finish().expect("assembles");

        assert_eq!(&out.bytes()[..3], &[0x4C, 0x10, 0x80]);
        assert_eq!(&out.bytes()[0x10..], &[0x4C, 0x10, 0x80]);
        assert_eq!(out.address_of("skip"), Some(0x8010));
    }

    #[test]
    fn indexed_label_operand_is_absolute() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(LDA, AbsoluteX, "table")
            .org(0x50)
            .label("table")
            .data(&[1, 2, 3]);
        let out = asm.finish().expect("assembles");

        assert_eq!(&out.bytes()[..3], &[0xBD, 0x50, 0x80]);
        assert_eq!(out.data_ranges(), &[0x50..0x53]);
    }

    #[test]
    fn undefined_label_is_reported() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(BNE, Relative, "nowhere");
        assert_eq!(asm.finish(), Err(AsmError::UndefinedLabel("nowhere")));
    }

    #[test]
    fn duplicate_label_is_reported() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.label("a").implied(NOP).label("a");
        assert_eq!(asm.finish(), Err(AsmError::DuplicateLabel("a")));
    }

    #[test]
    fn branch_out_of_range_is_reported() {
        let mut asm = Assembler::new(0x8000, 0x200);
        asm.op(BNE, Relative, "far").org(0x100).label("far");
        assert_eq!(
            asm.finish(),
            Err(AsmError::BranchOutOfRange {
                label: "far",
                origin: 0,
                target: 0x100,
            })
        );
    }

    #[test]
    fn unencodable_and_mismatched_operands_are_reported() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(STA, Immediate, 0x00u8);
        assert!(matches!(asm.finish(), Err(AsmError::Unencodable(_))));

        let mut asm = Assembler::new(0x8000, 0x100);
        asm.op(LDA, Immediate, 0x2002u16);
        assert!(matches!(
            asm.finish(),
            Err(AsmError::OperandMismatch { offset: 0, .. })
        ));
    }

    #[test]
    fn origin_cannot_move_backwards() {
        let mut asm = Assembler::new(0x8000, 0x100);
        asm.data(&[0; 4]).org(2);
        assert_eq!(
            asm.finish(),
            Err(AsmError::OriginBackwards {
                current: 4,
                requested: 2,
            })
        );
    }

    #[test]
    fn region_limit_is_enforced() {
        let mut asm = Assembler::new(0x8000, 4);
        asm.op(LDA, Absolute, 0x2002u16).op(STA, Absolute, 0x2007u16);
        assert_eq!(
            asm.finish(),
            Err(AsmError::RegionOverflow {
                needed: 6,
                limit: 4,
            })
        );
    }

    proptest! {
        #[test]
        fn branches_land_on_their_label(pad_before in 0usize..120, pad_after in 0usize..120) {
            let mut asm = Assembler::new(0x8000, 0x400);
            asm.org(pad_before)
                .label("back")
                .org(pad_before + pad_after + 1)
                .op(BNE, Relative, "back")
                .op(BEQ, Relative, "ahead")
                .org(pad_before + pad_after + 5 + pad_after)
                .label("ahead");
            let out = asm.finish().expect("assembles");

            for line in out.lines() {
                let displacement = out.bytes()[line.offset + 1] as i8;
                let resolved = line.end() as isize + displacement as isize;
                let expected = out.symbol(line.target.expect("label operand")).expect("defined");
                prop_assert_eq!(resolved, expected as isize);
            }
        }
    }
}
