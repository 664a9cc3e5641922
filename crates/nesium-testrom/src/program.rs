//! PRG ROM contents: the boot program, its palette table and the CPU vectors.
//!
//! The program waits two VBlanks for the PPU to warm up, uploads the background
//! palette from [`PALETTE`], fills nametable 0 with an incrementing tile ramp,
//! assigns one palette per 2x2 quadrant in the attribute table and turns
//! rendering on before parking in an endless loop.
//!
//! Only three ranges of the zero-filled bank are written: the program from
//! offset 0, the palette table and the reset vector. The NMI and IRQ vectors
//! stay zero.
//!
//! The palette table sits at the fixed offset [`PALETTE_OFFSET`], in the middle
//! of where the code would otherwise run, so the code jumps over it and resumes
//! at [`ATTRIBUTES_OFFSET`].

use tracing::debug;

use crate::asm::{AsmError, Assembled, Assembler};
use crate::cpu::Addressing::{Absolute, AbsoluteX, Immediate, Relative};
use crate::cpu::Mnemonic::*;
use crate::error::Error;
use crate::header::PRG_ROM_UNIT;
use crate::memory::cpu::{PRG_ROM_START, Vector, prg_offset};
use crate::memory::ppu::{
    ATTRIBUTE_TABLE_BASE, ATTRIBUTE_TABLE_SIZE, BACKGROUND_PALETTE_SIZE, NAMETABLE_BASE,
    NAMETABLE_SIZE, PALETTE_BASE, Register,
};
use crate::ppu::{DISPLAY_CONTROL, DISPLAY_MASK};

/// Size of the single NROM-128 PRG bank.
pub const PRG_ROM_SIZE: usize = PRG_ROM_UNIT;

/// CPU address of the first instruction; the reset vector points here.
pub const LOAD_ADDRESS: u16 = PRG_ROM_START;

/// Bank offset of the 16-byte background palette table.
pub const PALETTE_OFFSET: usize = 0x0050;

/// Bank offset where code resumes after the palette table.
pub const ATTRIBUTES_OFFSET: usize = PALETTE_OFFSET + BACKGROUND_PALETTE_SIZE;

/// Code and data must end before the vector table at `$FFFA`.
pub const CODE_LIMIT: usize = prg_offset(Vector::Nmi.addr());

/// Four background palettes: grays, reds, greens, blues.
pub const PALETTE: [u8; BACKGROUND_PALETTE_SIZE] = [
    0x0F, 0x00, 0x10, 0x30, //
    0x0F, 0x06, 0x16, 0x26, //
    0x0F, 0x09, 0x19, 0x29, //
    0x0F, 0x01, 0x11, 0x21, //
];

/// Attribute byte selecting palettes 0/1/2/3 for the four quadrants of a 32x32 block.
pub const ATTRIBUTE_FILL: u8 = 0b11_10_01_00;

/// Label names bound in the assembled program.
pub mod labels {
    pub const RESET: &str = "reset";
    pub const VBLANK_WAIT: &str = "vblank_wait";
    pub const PALETTE_LOOP: &str = "palette_loop";
    pub const NAME_LOOP: &str = "name_loop";
    pub const PALETTE: &str = "palette";
    pub const ATTRIBUTES: &str = "attributes";
    pub const ATTRIBUTE_LOOP: &str = "attribute_loop";
    pub const FOREVER: &str = "forever";
}

const fn hi(addr: u16) -> u8 {
    (addr >> 8) as u8
}

const fn lo(addr: u16) -> u8 {
    addr as u8
}

/// Assembles the boot program at [`LOAD_ADDRESS`].
pub fn assemble_program() -> Result<Assembled, AsmError> {
    let status = Register::Status.addr();
    let addr = Register::Addr.addr();
    let data = Register::Data.addr();
    let nametable_pages = (NAMETABLE_SIZE >> 8) as u8;

    let mut asm = Assembler::new(LOAD_ADDRESS, CODE_LIMIT);

    // Two VBlanks pass before the PPU accepts writes.
    asm.label(labels::RESET)
        .op(LDX, Immediate, 0x02u8)
        .label(labels::VBLANK_WAIT)
        .op(LDA, Absolute, status)
        .op(BPL, Relative, labels::VBLANK_WAIT)
        .implied(DEX)
        .op(BNE, Relative, labels::VBLANK_WAIT);

    // Background palettes.
    asm.op(LDA, Immediate, hi(PALETTE_BASE))
        .op(STA, Absolute, addr)
        .op(LDA, Immediate, lo(PALETTE_BASE))
        .op(STA, Absolute, addr)
        .op(LDX, Immediate, 0x00u8)
        .label(labels::PALETTE_LOOP)
        .op(LDA, AbsoluteX, labels::PALETTE)
        .op(STA, Absolute, data)
        .implied(INX)
        .op(CPX, Immediate, BACKGROUND_PALETTE_SIZE as u8)
        .op(BNE, Relative, labels::PALETTE_LOOP);

    // Nametable 0: X runs 256 times per page, Y counts the pages.
    asm.op(LDA, Immediate, hi(NAMETABLE_BASE))
        .op(STA, Absolute, addr)
        .op(LDA, Immediate, lo(NAMETABLE_BASE))
        .op(STA, Absolute, addr)
        .op(LDX, Immediate, 0x00u8)
        .op(LDY, Immediate, 0x00u8)
        .label(labels::NAME_LOOP)
        .implied(TXA)
        .op(STA, Absolute, data)
        .implied(INX)
        .op(BNE, Relative, labels::NAME_LOOP)
        .implied(INY)
        .op(CPY, Immediate, nametable_pages)
        .op(BNE, Relative, labels::NAME_LOOP)
        .op(JMP, Absolute, labels::ATTRIBUTES);

    asm.org(PALETTE_OFFSET)
        .label(labels::PALETTE)
        .data(&PALETTE)
        .org(ATTRIBUTES_OFFSET);

    // Attribute table, overwriting what the nametable ramp spilled into it.
    asm.label(labels::ATTRIBUTES)
        .op(LDA, Immediate, hi(ATTRIBUTE_TABLE_BASE))
        .op(STA, Absolute, addr)
        .op(LDA, Immediate, lo(ATTRIBUTE_TABLE_BASE))
        .op(STA, Absolute, addr)
        .op(LDX, Immediate, 0x00u8)
        .label(labels::ATTRIBUTE_LOOP)
        .op(LDA, Immediate, ATTRIBUTE_FILL)
        .op(STA, Absolute, data)
        .implied(INX)
        .op(CPX, Immediate, ATTRIBUTE_TABLE_SIZE as u8)
        .op(BNE, Relative, labels::ATTRIBUTE_LOOP);

    asm.op(LDA, Immediate, DISPLAY_CONTROL.bits())
        .op(STA, Absolute, Register::Control.addr())
        .op(LDA, Immediate, DISPLAY_MASK.bits())
        .op(STA, Absolute, Register::Mask.addr());

    asm.label(labels::FOREVER)
        .op(JMP, Absolute, labels::FOREVER);

    asm.finish()
}

/// The 16 KiB PRG bank together with the program it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrgRom {
    bytes: Box<[u8; PRG_ROM_SIZE]>,
    program: Assembled,
}

impl PrgRom {
    pub fn as_bytes(&self) -> &[u8; PRG_ROM_SIZE] {
        &self.bytes
    }

    pub fn program(&self) -> &Assembled {
        &self.program
    }

    /// Handler address stored in `vector`.
    pub fn vector(&self, vector: Vector) -> u16 {
        let offset = prg_offset(vector.addr());
        u16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

/// Builds the zero-filled PRG bank holding the program and the vectors.
pub fn build_prg_rom() -> Result<PrgRom, Error> {
    let program = assemble_program()?;
    let mut bytes = Box::new([0u8; PRG_ROM_SIZE]);

    let reset = label_address(&program, labels::RESET)?;
    write_vector(&mut bytes, Vector::Reset, reset);

    bytes[..program.bytes().len()].copy_from_slice(program.bytes());

    debug!(
        "PRG: {} program bytes, reset ${:04X}",
        program.bytes().len(),
        reset
    );

    Ok(PrgRom { bytes, program })
}

fn label_address(program: &Assembled, label: &'static str) -> Result<u16, AsmError> {
    program
        .address_of(label)
        .ok_or(AsmError::UndefinedLabel(label))
}

fn write_vector(bytes: &mut [u8; PRG_ROM_SIZE], vector: Vector, target: u16) {
    let offset = prg_offset(vector.addr());
    bytes[offset..offset + 2].copy_from_slice(&target.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::{self, Addressing, Mnemonic};

    fn prg() -> PrgRom {
        build_prg_rom().expect("program assembles")
    }

    #[test]
    fn reset_vector_points_at_first_instruction() {
        let prg = prg();
        assert_eq!(&prg.as_bytes()[0x3FFC..0x3FFE], &[0x00, 0x80]);
        assert_eq!(prg.vector(Vector::Reset), LOAD_ADDRESS);
        assert_eq!(prg.program().base(), LOAD_ADDRESS);
        assert_eq!(prg.program().symbol(labels::RESET), Some(0));
        assert_eq!(prg.program().lines()[0].offset, 0);
    }

    #[test]
    fn interrupt_vectors_stay_zero() {
        let prg = prg();
        assert_eq!(
            &prg.as_bytes()[0x3FFA..],
            &[0x00, 0x00, 0x00, 0x80, 0x00, 0x00]
        );
        assert_eq!(prg.vector(Vector::Nmi), 0);
        assert_eq!(prg.vector(Vector::Irq), 0);
    }

    #[test]
    fn program_opens_with_vblank_wait() {
        assert_eq!(
            &prg().as_bytes()[..10],
            &[0xA2, 0x02, 0xAD, 0x02, 0x20, 0x10, 0xFB, 0xCA, 0xD0, 0xF8]
        );
    }

    // Offsets recomputed by hand from the instruction lengths.
    #[test]
    fn labels_sit_at_documented_offsets() {
        let prg = prg();
        let program = prg.program();
        let expected = [
            (labels::RESET, 0x00),
            (labels::VBLANK_WAIT, 0x02),
            (labels::PALETTE_LOOP, 0x16),
            (labels::NAME_LOOP, 0x2F),
            (labels::PALETTE, 0x50),
            (labels::ATTRIBUTES, 0x60),
            (labels::ATTRIBUTE_LOOP, 0x6C),
            (labels::FOREVER, 0x80),
        ];
        for (label, offset) in expected {
            assert_eq!(program.symbol(label), Some(offset), "{label}");
        }
    }

    #[test]
    fn branch_operands_resolve_to_their_targets() {
        let prg = prg();
        let bytes = prg.as_bytes();
        let branches: Vec<_> = prg
            .program()
            .lines()
            .iter()
            .filter(|line| line.instruction.addressing == Addressing::Relative)
            .collect();
        assert_eq!(branches.len(), 6);

        for line in branches {
            let displacement = bytes[line.offset + 1] as i8;
            let resolved = (line.offset + 2) as isize + displacement as isize;
            let target = prg
                .program()
                .symbol(line.target.expect("branch names a label"))
                .expect("label defined");
            assert_eq!(resolved, target as isize, "branch at {:#06x}", line.offset);
        }
    }

    #[test]
    fn hand_encoded_displacements() {
        let bytes = prg();
        let bytes = bytes.as_bytes();
        // (offset of the operand byte, displacement)
        for (offset, displacement) in [
            (0x06, 0xFB),
            (0x09, 0xF8),
            (0x20, 0xF5),
            (0x35, 0xF9),
            (0x3A, 0xF4),
            (0x75, 0xF6),
        ] {
            assert_eq!(bytes[offset], displacement, "operand at {offset:#06x}");
        }
    }

    #[test]
    fn absolute_jumps_target_cpu_addresses() {
        let prg = prg();
        let bytes = prg.as_bytes();
        // JMP attributes
        assert_eq!(&bytes[0x3B..0x3E], &[0x4C, 0x60, 0x80]);
        // JMP forever
        assert_eq!(&bytes[0x80..0x83], &[0x4C, 0x80, 0x80]);
    }

    #[test]
    fn palette_table_is_referenced_by_indexed_load() {
        let prg = prg();
        let bytes = prg.as_bytes();
        assert_eq!(&bytes[PALETTE_OFFSET..PALETTE_OFFSET + 16], &PALETTE);

        let load = prg
            .program()
            .lines()
            .iter()
            .find(|line| line.instruction.addressing == Addressing::AbsoluteX)
            .expect("indexed load present");
        let operand = u16::from_le_bytes([bytes[load.offset + 1], bytes[load.offset + 2]]);
        assert_eq!(operand, LOAD_ADDRESS + PALETTE_OFFSET as u16);
    }

    #[test]
    fn code_never_overlaps_the_palette_table() {
        let prg = prg();
        let table = PALETTE_OFFSET..PALETTE_OFFSET + PALETTE.len();
        assert_eq!(prg.program().data_ranges(), &[table.clone()]);
        for line in prg.program().lines() {
            assert!(
                line.end() <= table.start || line.offset >= table.end,
                "{} at {:#06x} overlaps the palette table",
                line.instruction,
                line.offset
            );
        }
    }

    #[test]
    fn linear_disassembly_matches_listing() {
        let prg = prg();
        let bytes = prg.as_bytes();
        for line in prg.program().lines() {
            let decoded = cpu::decode(bytes[line.offset]).expect("official opcode");
            assert_eq!(decoded, line.instruction);
        }
        // Everything after the last instruction is zero except the reset vector.
        let end = prg.program().lines().last().expect("non-empty").end();
        assert_eq!(end, 0x83);
        assert!(bytes[end..0x3FFC].iter().all(|&b| b == 0));
        assert!(bytes[0x3FFE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn display_is_enabled_last() {
        let prg = prg();
        let bytes = prg.as_bytes();
        let lines = prg.program().lines();
        let stores: Vec<u16> = lines
            .iter()
            .filter(|line| {
                line.instruction.mnemonic == Mnemonic::STA
                    && line.instruction.addressing == Addressing::Absolute
            })
            .map(|line| u16::from_le_bytes([bytes[line.offset + 1], bytes[line.offset + 2]]))
            .collect();
        assert_eq!(
            &stores[stores.len() - 2..],
            &[Register::Control.addr(), Register::Mask.addr()]
        );
    }

    #[test]
    fn only_program_table_and_reset_vector_are_written() {
        let prg = prg();
        let code_end = prg.program().bytes().len();
        let reset = prg_offset(Vector::Reset.addr());
        for (offset, &byte) in prg.as_bytes().iter().enumerate() {
            let written = offset < code_end || (reset..reset + 2).contains(&offset);
            if !written {
                assert_eq!(byte, 0, "stray byte at {offset:#06x}");
            }
        }
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(prg(), prg());
    }
}
