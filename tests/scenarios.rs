use lc3::{Condition, Machine};

/// S1 — a trap vector routine that stores 0 to MCR halts the machine, with
/// R7 pointing back at the instruction after TRAP.
#[test]
fn halt_trap_stops_the_run_loop() {
    let mut machine = Machine::new();
    machine.load(0x3000, &[0xE000, 0xF025]); // LEA R0,#0 ; TRAP x25
    machine.bus_write(0x0025, 0x0400); // trap vector table entry

    machine.step().unwrap(); // LEA
    machine.step().unwrap(); // TRAP: pc <- RAM[0x25] = 0x0400, r7 <- 0x3002

    assert_eq!(machine.pc, 0x0400);
    assert_eq!(machine.registers.all()[7], 0x3002);
    assert!(machine.is_running());

    // A well-formed trap routine is responsible for halting; simulate the
    // tail of one that stores 0 to MCR.
    machine.bus_write(0xFFFE, 0);
    assert!(!machine.is_running());
}

/// S2 — building a character in R0 and storing it to DDR marks a character
/// pending; the next cycle's fetch drains it back to idle.
#[test]
fn character_output_round_trips_through_the_display_device() {
    let mut machine = Machine::new();
    machine.load(
        0x3000,
        &[
            0x5020, // AND R0,R0,#0
            0x102F, // ADD R0,R0,#15
            0x102F, // ADD R0,R0,#15
            0x102F, // ADD R0,R0,#15
            0x102F, // ADD R0,R0,#15
            0x1025, // ADD R0,R0,#5      -- R0 = 65 ('A')
            0x2202, // LD R1,#2          -- pointer lands two words ahead
            0x7040, // STR R0,R1,#0
            0xFFFF, // unused filler so the data word lands at +2 from the LD
            0xFE06, // data: the DDR address
        ],
    );

    for _ in 0..8 {
        machine.step().unwrap();
    }

    assert_eq!(machine.registers.all()[0], u16::from(b'A'));
    assert_eq!(machine.display().data, u16::from(b'A'));
    assert_eq!(machine.display().status, 0x0000);

    // The next cycle's fetch drains the pending character before executing.
    machine.step().unwrap();
    assert_eq!(machine.display().status, 0x8000);
}

/// S3 — adding -1 (sign-extended) to a freshly-zeroed register wraps to
/// 0xFFFF and the condition code reads negative.
#[test]
fn add_immediate_wraps_and_sets_negative_condition() {
    let mut machine = Machine::new();
    machine.load(0x3000, &[0x5020, 0x103F]); // AND R0,R0,#0 ; ADD R0,R0,#-1

    machine.step().unwrap();
    machine.step().unwrap();

    assert_eq!(machine.registers.all()[0], 0xFFFF);
    assert_eq!(machine.condition, Condition::N);

    machine.bus_write(0xFFFE, 0);
    assert!(!machine.is_running());
}

/// S4 — LDI whose pointer resolves to DDR reads the display's pending
/// character (zero on a fresh machine) through the router.
#[test]
fn ldi_through_ddr_reads_the_pending_character() {
    let mut machine = Machine::new();
    machine.load(0x3000, &[0xA24F]); // LDI R1, #0x4F (pointer at 0x3050)
    machine.bus_write(0x3050, 0xFE06);
    machine.bus_write(0xFE06, 99); // pretend a character is already latched

    machine.step().unwrap();

    assert_eq!(machine.registers.all()[1], 99);
    assert_eq!(machine.registers.all()[1], machine.display().data);
    assert_eq!(machine.condition, Condition::P);
}

/// S5 — an always-taken BR skips the two ADDs that would otherwise bump R0.
#[test]
fn br_unconditional_skips_the_following_instructions() {
    let mut machine = Machine::new();
    machine.load(0x3000, &[0x0E02, 0x1021, 0x1021]); // BRnzp +2 ; ADD #1 ; ADD #1

    machine.step().unwrap();
    assert_eq!(machine.pc, 0x3003);

    machine.bus_write(0xFFFE, 0);
    assert!(!machine.is_running());
    assert_eq!(machine.registers.all()[0], 0);
}

/// S6 — JSR followed eventually by RET returns to the instruction after the
/// call, with R7 holding the saved return address.
#[test]
fn jsr_and_ret_round_trip() {
    let mut machine = Machine::new();
    machine.load(
        0x3000,
        &[
            0x4803, // JSR +3      -- target at 0x3001 + 3 = 0x3004
            0x0000, // (never reached directly)
            0x0000,
            0x0000,
            0x1027, // target (0x3004): ADD R0,R0,#7
            0xC000, // RET
        ],
    );

    machine.step().unwrap(); // JSR
    assert_eq!(machine.pc, 0x3004);
    assert_eq!(machine.registers.all()[7], 0x3001);

    machine.step().unwrap(); // ADD R0,R0,#7
    machine.step().unwrap(); // RET

    assert_eq!(machine.pc, 0x3001);
    assert_eq!(machine.registers.all()[0], 7);
}
