use std::fmt::Display;

/// Operand shapes of the 6502 instruction set.
///
/// The assembler only needs the mode to know how many bytes follow the opcode
/// and how to encode a label operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// `DEX`, `RTI`
    Implied,
    /// `ASL A`
    Accumulator,
    /// `LDX #$02`
    Immediate,
    /// `LDA $2002`, `JMP $8060`
    Absolute,
    /// `LDA $8050,X`
    AbsoluteX,
    AbsoluteY,
    /// `JMP ($xxxx)`
    Indirect,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// `(zp,X)`
    IndirectX,
    /// `(zp),Y`
    IndirectY,
    /// Signed displacement from the byte after the branch, e.g. `BNE $F6`.
    Relative,
}

impl Addressing {
    /// Number of operand bytes following the opcode.
    pub const fn operand_len(self) -> usize {
        match self {
            Addressing::Implied | Addressing::Accumulator => 0,
            Addressing::Immediate
            | Addressing::ZeroPage
            | Addressing::ZeroPageX
            | Addressing::ZeroPageY
            | Addressing::IndirectX
            | Addressing::IndirectY
            | Addressing::Relative => 1,
            Addressing::Absolute
            | Addressing::AbsoluteX
            | Addressing::AbsoluteY
            | Addressing::Indirect => 2,
        }
    }

    /// Total encoded length, opcode included.
    pub const fn instruction_len(self) -> usize {
        1 + self.operand_len()
    }
}

impl Display for Addressing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Addressing::Implied => "implied".fmt(f),
            Addressing::Accumulator => "accumulator".fmt(f),
            Addressing::Immediate => "immediate".fmt(f),
            Addressing::Absolute => "absolute".fmt(f),
            Addressing::AbsoluteX => "absolute_x".fmt(f),
            Addressing::AbsoluteY => "absolute_y".fmt(f),
            Addressing::Indirect => "indirect".fmt(f),
            Addressing::ZeroPage => "zero_page".fmt(f),
            Addressing::ZeroPageX => "zero_page_x".fmt(f),
            Addressing::ZeroPageY => "zero_page_y".fmt(f),
            Addressing::IndirectX => "indirect_x".fmt(f),
            Addressing::IndirectY => "indirect_y".fmt(f),
            Addressing::Relative => "relative".fmt(f),
        }
    }
}
