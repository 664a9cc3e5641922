//! 6502 instruction encoding.
//!
//! The generator never executes code; it only needs to know which opcode byte
//! encodes a given mnemonic/addressing pair and how long the result is. The
//! [`LOOKUP_TABLE`] is indexed by opcode, so decoding is a table read and
//! encoding is a reverse search over the 151 official slots.

use std::fmt::Display;

use crate::cpu::lookup::LOOKUP_TABLE;

mod addressing;
mod lookup;
mod mnemonic;

pub use addressing::Addressing;
pub use mnemonic::Mnemonic;

/// A mnemonic paired with the addressing mode it is encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub addressing: Addressing,
}

impl Instruction {
    pub const fn new(mnemonic: Mnemonic, addressing: Addressing) -> Self {
        Self {
            mnemonic,
            addressing,
        }
    }

    /// Encoded length in bytes, opcode included.
    pub const fn byte_len(&self) -> usize {
        self.addressing.instruction_len()
    }

    /// Opcode byte for this instruction, or `None` when the 6502 has no such encoding.
    pub fn opcode(&self) -> Option<u8> {
        LOOKUP_TABLE
            .iter()
            .position(|slot| slot.as_ref() == Some(self))
            .map(|index| index as u8)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.mnemonic, self.addressing)
    }
}

/// Decodes an opcode byte into its official instruction.
pub fn decode(opcode: u8) -> Option<Instruction> {
    LOOKUP_TABLE[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn official_opcode_count() {
        assert_eq!(LOOKUP_TABLE.iter().flatten().count(), 151);
    }

    #[test]
    fn encode_and_decode_agree_for_every_slot() {
        for opcode in 0..=u8::MAX {
            if let Some(instruction) = decode(opcode) {
                assert_eq!(instruction.opcode(), Some(opcode), "{instruction}");
            }
        }
    }

    #[test]
    fn known_encodings() {
        let cases = [
            (Mnemonic::LDX, Addressing::Immediate, 0xA2),
            (Mnemonic::LDA, Addressing::Absolute, 0xAD),
            (Mnemonic::BPL, Addressing::Relative, 0x10),
            (Mnemonic::DEX, Addressing::Implied, 0xCA),
            (Mnemonic::BNE, Addressing::Relative, 0xD0),
            (Mnemonic::STA, Addressing::Absolute, 0x8D),
            (Mnemonic::LDA, Addressing::AbsoluteX, 0xBD),
            (Mnemonic::CPX, Addressing::Immediate, 0xE0),
            (Mnemonic::TXA, Addressing::Implied, 0x8A),
            (Mnemonic::CPY, Addressing::Immediate, 0xC0),
            (Mnemonic::JMP, Addressing::Absolute, 0x4C),
            (Mnemonic::RTI, Addressing::Implied, 0x40),
        ];
        for (mnemonic, addressing, opcode) in cases {
            assert_eq!(Instruction::new(mnemonic, addressing).opcode(), Some(opcode));
        }
    }

    #[test]
    fn missing_encoding_is_none() {
        assert_eq!(
            Instruction::new(Mnemonic::STA, Addressing::Immediate).opcode(),
            None
        );
        assert_eq!(decode(0x02), None);
    }

    #[test]
    fn relative_mode_is_only_used_by_branches() {
        for instruction in LOOKUP_TABLE.iter().flatten() {
            assert_eq!(
                instruction.addressing == Addressing::Relative,
                instruction.mnemonic.is_branch(),
                "{instruction}"
            );
        }
    }
}
