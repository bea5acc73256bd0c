mod disassemble;

use crate::debugger::disassemble::disassemble;
use crate::error::MachineError;
use crate::instruction::Instruction;
use crate::machine::Machine;
use crate::opcode::Opcode;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref READ_REGEX: Regex = Regex::new(r"^read 0x([a-fA-F0-9]{1,4})$").unwrap();
    static ref BREAK_ADDRESS_REGEX: Regex = Regex::new(r"^break-address 0x([a-fA-F0-9]{1,4})$").unwrap();
}

/// Drives the machine one REPL command at a time instead of straight
/// through `Machine::run`. Holds the one piece of state the core has no use
/// for on its own: an optional address to stop at.
struct Debugger {
    break_address: Option<u16>,
    exited: bool,
}

impl Debugger {
    fn new() -> Self {
        Self { break_address: None, exited: false }
    }
}

/// Runs `machine` under the REPL until the user exits or the machine halts.
/// Returns the same error `Machine::run` would on an unsupported opcode.
pub fn run(machine: &mut Machine) -> Result<(), MachineError> {
    let mut rl = rustyline::Editor::<()>::new();
    let mut debugger = Debugger::new();

    while machine.is_running() && !debugger.exited {
        let readline = rl.readline(&format!("{:#06x}> ", machine.pc));

        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_ref());

                if line == "c" || line == "continue" {
                    run_until_break_or_halt(machine, &mut debugger)?;
                } else {
                    handle_command(&line, machine, &mut debugger)?;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                debugger.exited = true;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                debugger.exited = true;
            }
        }
    }

    Ok(())
}

/// Runs freely until the break address is hit or the machine halts, without
/// prompting per instruction the way single-stepping does.
fn run_until_break_or_halt(machine: &mut Machine, debugger: &mut Debugger) -> Result<(), MachineError> {
    loop {
        if !machine.is_running() {
            return Ok(());
        }
        if Some(machine.pc) == debugger.break_address {
            debugger.break_address = None;
            return Ok(());
        }
        machine.step()?;
    }
}

fn handle_command(line: &str, machine: &mut Machine, debugger: &mut Debugger) -> Result<(), MachineError> {
    let instruction = Instruction::decode(machine.ram_peek(machine.pc));

    match line {
        "s" | "step" => machine.step()?,

        "i" | "inspect" => {
            let opcode = Opcode::from_instruction(machine.ram_peek(machine.pc));
            println!(
                "pc: {:#06x}, opcode: {:?}, condition: {:?}, registers: {:?}, display: {:?}, mcr: {:#06x}",
                machine.pc,
                opcode,
                machine.condition,
                machine.registers.all(),
                machine.display(),
                machine.mcr()
            );
        }

        "d" | "disassemble" => println!("{}", disassemble(&instruction)),

        line if READ_REGEX.is_match(line) => {
            let address = READ_REGEX.captures(line).unwrap().get(1).unwrap();
            let address = u16::from_str_radix(address.as_str(), 16).unwrap();
            let value = machine.ram_peek(address);
            println!("{:#06x}, {:#018b}", value, value);
        }

        line if BREAK_ADDRESS_REGEX.is_match(line) => {
            let address = BREAK_ADDRESS_REGEX.captures(line).unwrap().get(1).unwrap();
            let address = u16::from_str_radix(address.as_str(), 16).unwrap();
            debugger.break_address = Some(address);
            println!("Break address set to {:#06x}", address);
        }

        "h" | "help" => {
            println!("c, continue               Run until break-address (if set) or halt.");
            println!("s, step                   Step one instruction.");
            println!("i, inspect                Inspect machine state.");
            println!("d, disassemble            Disassemble the instruction at pc.");
            println!("   read <addr>            Read and display a memory address, e.g. read 0x3000");
            println!("   break-address <addr>   Run until pc reaches an address, e.g. break-address 0x3010");
            println!("exit                      Leave the debugger.");
        }

        "exit" => debugger.exited = true,

        "" => {}

        _ => println!("Unknown command {:?}", line),
    }

    Ok(())
}
