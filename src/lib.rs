mod config;
mod cpu;
mod debugger;
mod error;
mod instruction;
mod loader;
mod machine;
mod mmio;
mod opcode;
mod sign_extend;

pub use crate::config::Config;
pub use crate::error::MachineError;
pub use crate::loader::{load_file, LoadError};
pub use crate::machine::{Condition, Machine};
pub use crate::sign_extend::SignExtend;

use std::error::Error;

/// Loads every file in `config.files`, in order, then either drops into the
/// REPL debugger or runs the machine straight through. Each load overlays
/// the previous one and repoints the PC at its own start address, matching
/// how the original simulator's `main` looped over its argv.
pub fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let mut machine = Machine::new();

    for path in &config.files {
        let (start_addr, words) = load_file(path)?;
        log::debug!("loaded {} words from {} at {:#06x}", words.len(), path, start_addr);
        machine.load(start_addr, &words);
    }

    if config.debug {
        debugger::run(&mut machine)?;
    } else {
        machine.run()?;
    }

    Ok(())
}
