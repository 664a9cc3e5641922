use crate::cpu::addressing::Addressing as A;
use crate::cpu::mnemonic::Mnemonic as M;
use crate::cpu::Instruction as I;

// Three-letter mode names keep each table row on one line.
const IMP: A = A::Implied;
const ACC: A = A::Accumulator;
const IMM: A = A::Immediate;
const REL: A = A::Relative;
const ZP: A = A::ZeroPage;
const ZPX: A = A::ZeroPageX;
const ZPY: A = A::ZeroPageY;
const ABS: A = A::Absolute;
const ABX: A = A::AbsoluteX;
const ABY: A = A::AbsoluteY;
const IND: A = A::Indirect;
const INX: A = A::IndirectX;
const INY: A = A::IndirectY;

macro_rules! op {
    ($ins:ident, $addr:ident) => {
        Some(I::new(M::$ins, $addr))
    };
}

// Undocumented opcode slot; the assembler never emits these.
const ___: Option<I> = None;

#[rustfmt::skip]
pub(crate) static LOOKUP_TABLE: [Option<I>; 256] = [
    // 0               1               2               3               4               5               6               7
    // 8               9               A               B               C               D               E               F

    // 0x00
    op!(BRK, IMP), op!(ORA, INX), ___,           ___,           ___,           op!(ORA, ZP),  op!(ASL, ZP),  ___,
    op!(PHP, IMP), op!(ORA, IMM), op!(ASL, ACC), ___,           ___,           op!(ORA, ABS), op!(ASL, ABS), ___,

    // 0x10
    op!(BPL, REL), op!(ORA, INY), ___,           ___,           ___,           op!(ORA, ZPX), op!(ASL, ZPX), ___,
    op!(CLC, IMP), op!(ORA, ABY), ___,           ___,           ___,           op!(ORA, ABX), op!(ASL, ABX), ___,

    // 0x20
    op!(JSR, ABS), op!(AND, INX), ___,           ___,           op!(BIT, ZP),  op!(AND, ZP),  op!(ROL, ZP),  ___,
    op!(PLP, IMP), op!(AND, IMM), op!(ROL, ACC), ___,           op!(BIT, ABS), op!(AND, ABS), op!(ROL, ABS), ___,

    // 0x30
    op!(BMI, REL), op!(AND, INY), ___,           ___,           ___,           op!(AND, ZPX), op!(ROL, ZPX), ___,
    op!(SEC, IMP), op!(AND, ABY), ___,           ___,           ___,           op!(AND, ABX), op!(ROL, ABX), ___,

    // 0x40
    op!(RTI, IMP), op!(EOR, INX), ___,           ___,           ___,           op!(EOR, ZP),  op!(LSR, ZP),  ___,
    op!(PHA, IMP), op!(EOR, IMM), op!(LSR, ACC), ___,           op!(JMP, ABS), op!(EOR, ABS), op!(LSR, ABS), ___,

    // 0x50
    op!(BVC, REL), op!(EOR, INY), ___,           ___,           ___,           op!(EOR, ZPX), op!(LSR, ZPX), ___,
    op!(CLI, IMP), op!(EOR, ABY), ___,           ___,           ___,           op!(EOR, ABX), op!(LSR, ABX), ___,

    // 0x60
    op!(RTS, IMP), op!(ADC, INX), ___,           ___,           ___,           op!(ADC, ZP),  op!(ROR, ZP),  ___,
    op!(PLA, IMP), op!(ADC, IMM), op!(ROR, ACC), ___,           op!(JMP, IND), op!(ADC, ABS), op!(ROR, ABS), ___,

    // 0x70
    op!(BVS, REL), op!(ADC, INY), ___,           ___,           ___,           op!(ADC, ZPX), op!(ROR, ZPX), ___,
    op!(SEI, IMP), op!(ADC, ABY), ___,           ___,           ___,           op!(ADC, ABX), op!(ROR, ABX), ___,

    // 0x80
    ___,           op!(STA, INX), ___,           ___,           op!(STY, ZP),  op!(STA, ZP),  op!(STX, ZP),  ___,
    op!(DEY, IMP), ___,           op!(TXA, IMP), ___,           op!(STY, ABS), op!(STA, ABS), op!(STX, ABS), ___,

    // 0x90
    op!(BCC, REL), op!(STA, INY), ___,           ___,           op!(STY, ZPX), op!(STA, ZPX), op!(STX, ZPY), ___,
    op!(TYA, IMP), op!(STA, ABY), op!(TXS, IMP), ___,           ___,           op!(STA, ABX), ___,           ___,

    // 0xA0
    op!(LDY, IMM), op!(LDA, INX), op!(LDX, IMM), ___,           op!(LDY, ZP),  op!(LDA, ZP),  op!(LDX, ZP),  ___,
    op!(TAY, IMP), op!(LDA, IMM), op!(TAX, IMP), ___,           op!(LDY, ABS), op!(LDA, ABS), op!(LDX, ABS), ___,

    // 0xB0
    op!(BCS, REL), op!(LDA, INY), ___,           ___,           op!(LDY, ZPX), op!(LDA, ZPX), op!(LDX, ZPY), ___,
    op!(CLV, IMP), op!(LDA, ABY), op!(TSX, IMP), ___,           op!(LDY, ABX), op!(LDA, ABX), op!(LDX, ABY), ___,

    // 0xC0
    op!(CPY, IMM), op!(CMP, INX), ___,           ___,           op!(CPY, ZP),  op!(CMP, ZP),  op!(DEC, ZP),  ___,
    op!(INY, IMP), op!(CMP, IMM), op!(DEX, IMP), ___,           op!(CPY, ABS), op!(CMP, ABS), op!(DEC, ABS), ___,

    // 0xD0
    op!(BNE, REL), op!(CMP, INY), ___,           ___,           ___,           op!(CMP, ZPX), op!(DEC, ZPX), ___,
    op!(CLD, IMP), op!(CMP, ABY), ___,           ___,           ___,           op!(CMP, ABX), op!(DEC, ABX), ___,

    // 0xE0
    op!(CPX, IMM), op!(SBC, INX), ___,           ___,           op!(CPX, ZP),  op!(SBC, ZP),  op!(INC, ZP),  ___,
    op!(INX, IMP), op!(SBC, IMM), op!(NOP, IMP), ___,           op!(CPX, ABS), op!(SBC, ABS), op!(INC, ABS), ___,

    // 0xF0
    op!(BEQ, REL), op!(SBC, INY), ___,           ___,           ___,           op!(SBC, ZPX), op!(INC, ZPX), ___,
    op!(SED, IMP), op!(SBC, ABY), ___,           ___,           ___,           op!(SBC, ABX), op!(INC, ABX), ___,
];
