use crate::error::MachineError;
use crate::instruction::Instruction;
use crate::instruction::Register::*;
use crate::machine::{Condition, Machine};
use crate::sign_extend::SignExtend;
use log::trace;

/// Dispatches one decoded instruction against the machine. `machine.pc` has
/// already been incremented past the instruction by the time this runs, so
/// every PC-relative handler below is adding to the *next* instruction's
/// address, as the architecture requires.
pub fn execute(machine: &mut Machine, instruction: Instruction) -> Result<(), MachineError> {
    match instruction {
        // BR - Conditional Branch
        //
        // Tests the condition codes named by the instruction's n/z/p bits
        // against the machine's current condition code; if any named flag
        // matches, branches to PC + sign_extend(pc_offset9).
        Instruction::BR(nzp, pc_offset) => {
            trace!("BR {:?} {:#05x}", nzp, pc_offset);
            let taken = (nzp.n && machine.condition == Condition::N)
                || (nzp.z && machine.condition == Condition::Z)
                || (nzp.p && machine.condition == Condition::P);
            if taken {
                machine.pc = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            }
        }

        // ADD - Addition, register form: DR <- SR1 + SR2
        Instruction::ADD(dr, sr1, sr2) => {
            trace!("ADD {:?} {:?} {:?}", dr, sr1, sr2);
            let value = machine.registers.read(sr1).wrapping_add(machine.registers.read(sr2));
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // ADD - Addition, immediate form: DR <- SR1 + sign_extend(imm5)
        Instruction::ADDIMM(dr, sr1, imm5) => {
            trace!("ADD {:?} {:?} #{}", dr, sr1, imm5.sign_extend(5) as i16);
            let value = machine.registers.read(sr1).wrapping_add(imm5.sign_extend(5));
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // AND - Bit-wise Logical AND, register form
        Instruction::AND(dr, sr1, sr2) => {
            trace!("AND {:?} {:?} {:?}", dr, sr1, sr2);
            let value = machine.registers.read(sr1) & machine.registers.read(sr2);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // AND - Bit-wise Logical AND, immediate form
        Instruction::ANDIMM(dr, sr1, imm5) => {
            trace!("AND {:?} {:?} #{}", dr, sr1, imm5.sign_extend(5) as i16);
            let value = machine.registers.read(sr1) & imm5.sign_extend(5);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // NOT - Bit-wise complement. Dispatched here even though the
        // original source's switch statement has no case for opcode 9; see
        // DESIGN.md for that open question.
        Instruction::NOT(dr, sr) => {
            trace!("NOT {:?} {:?}", dr, sr);
            let value = !machine.registers.read(sr);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // LD - Load: DR <- bus[PC + sign_extend(pc_offset9)]
        Instruction::LD(dr, pc_offset) => {
            trace!("LD {:?} {:#05x}", dr, pc_offset);
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let value = machine.bus_read(address);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // LDI - Load Indirect: both the pointer fetch and the final access
        // are routed through the MMIO bus.
        Instruction::LDI(dr, pc_offset) => {
            trace!("LDI {:?} {:#05x}", dr, pc_offset);
            let pointer_address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let pointer = machine.bus_read(pointer_address);
            let value = machine.bus_read(pointer);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // LDR - Load Base+offset: DR <- bus[BaseR + sign_extend(offset6)]
        Instruction::LDR(dr, base_r, offset) => {
            trace!("LDR {:?} {:?} {:#04x}", dr, base_r, offset);
            let address = machine.registers.read(base_r).wrapping_add(offset.sign_extend(6));
            let value = machine.bus_read(address);
            machine.registers.write(dr, value);
            machine.set_condition(dr);
        }

        // ST - Store: bus[PC + sign_extend(pc_offset9)] <- SR
        Instruction::ST(sr, pc_offset) => {
            trace!("ST {:?} {:#05x}", sr, pc_offset);
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            machine.bus_write(address, machine.registers.read(sr));
        }

        // STI - Store Indirect: pointer fetch and final store both routed.
        Instruction::STI(sr, pc_offset) => {
            trace!("STI {:?} {:#05x}", sr, pc_offset);
            let pointer_address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            let pointer = machine.bus_read(pointer_address);
            machine.bus_write(pointer, machine.registers.read(sr));
        }

        // STR - Store Base+offset: bus[BaseR + sign_extend(offset6)] <- SR
        Instruction::STR(sr, base_r, offset) => {
            trace!("STR {:?} {:?} {:#04x}", sr, base_r, offset);
            let address = machine.registers.read(base_r).wrapping_add(offset.sign_extend(6));
            machine.bus_write(address, machine.registers.read(sr));
        }

        // LEA - Load Effective Address. Computes PC + offset without
        // touching memory at all; the router is never invoked.
        Instruction::LEA(dr, pc_offset) => {
            trace!("LEA {:?} {:#05x}", dr, pc_offset);
            let address = machine.pc.wrapping_add(pc_offset.sign_extend(9));
            machine.registers.write(dr, address);
            machine.set_condition(dr);
        }

        // JSR - Jump to Subroutine. The JSRR form (bit 11 clear, jump via a
        // base register) is a non-goal and has no decoder variant; this
        // always uses the 11-bit PC-relative offset.
        Instruction::JSR(pc_offset) => {
            trace!("JSR {:#05x}", pc_offset);
            let return_address = machine.pc;
            machine.pc = machine.pc.wrapping_add(pc_offset.sign_extend(11));
            machine.registers.write(R7, return_address);
        }

        // RET - Return from Subroutine. The general JMP BaseR form is a
        // non-goal; this is always PC <- R7.
        Instruction::RET => {
            trace!("RET");
            machine.pc = machine.registers.read(R7);
        }

        // TRAP - System Call. R7 <- PC (incremented), PC <- RAM[trapvect8].
        // The vector-table read bypasses the MMIO router to match the
        // original implementation; a well-formed trap routine halts by
        // storing 0 to MCR, or returns via RET.
        Instruction::TRAP(trap_vector) => {
            trace!("TRAP {:#04x}", trap_vector);
            let return_address = machine.pc;
            machine.registers.write(R7, return_address);
            machine.pc = machine.ram.read(trap_vector);
        }

        Instruction::UNUSED => {
            return Err(MachineError::UnsupportedOpcode { pc: machine.pc, opcode: 0b1000 });
        }

        Instruction::RESERVED => {
            return Err(MachineError::UnsupportedOpcode { pc: machine.pc, opcode: 0b1101 });
        }
    }

    Ok(())
}
