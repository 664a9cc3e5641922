use std::fmt::Display;

/// The 56 documented 6502 mnemonics. Undocumented opcodes are not assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // loads and stores
    LDA,
    LDX,
    LDY,
    STA,
    STX,
    STY,
    // register moves
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    // stack
    PHA,
    PHP,
    PLA,
    PLP,
    // shifts and rotates
    ASL,
    LSR,
    ROL,
    ROR,
    // bitwise
    AND,
    BIT,
    EOR,
    ORA,
    // add, subtract, compare
    ADC,
    CMP,
    CPX,
    CPY,
    SBC,
    // increments
    DEC,
    DEX,
    DEY,
    INC,
    INX,
    INY,
    // jumps and interrupts
    BRK,
    JMP,
    JSR,
    RTI,
    RTS,
    // conditional branches
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BVC,
    BVS,
    // status flags
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,

    NOP,
}

impl Mnemonic {
    /// Conditional branches, the only users of [`super::Addressing::Relative`].
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::BCC
                | Mnemonic::BCS
                | Mnemonic::BEQ
                | Mnemonic::BMI
                | Mnemonic::BNE
                | Mnemonic::BPL
                | Mnemonic::BVC
                | Mnemonic::BVS
        )
    }
}

impl Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
