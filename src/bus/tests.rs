use crate::bus::{Bus, CpuBus};
use crate::config::{BusConfig, UnmappedPolicy};
use crate::test_utils::{bus_with_prg, open_bus_config, prg_with_program, recording_port};

fn strict() -> BusConfig {
    BusConfig {
        unmapped: UnmappedPolicy::Strict,
    }
}

fn bus(config: BusConfig) -> Bus {
    bus_with_prg(prg_with_program(&[0xA9, 0x42]), config)
}

#[test]
fn ram_mirrors_every_2k() {
    let mut bus = bus(strict());
    bus.write(0x0000, 0x42);
    for addr in [0x0000, 0x0800, 0x1000, 0x1800] {
        assert_eq!(bus.read(addr), 0x42, "mirror ${addr:04X}");
    }
    bus.write(0x1FFF, 0x17);
    assert_eq!(bus.read(0x07FF), 0x17);
}

#[test]
fn cartridge_window_reads_prg() {
    let mut bus = bus(strict());
    assert_eq!(bus.read(0x8000), 0xA9);
    assert_eq!(bus.read(0x8001), 0x42);
    assert_eq!(bus.read_word(0xFFFC), 0x8000);
}

#[test]
fn prg_ram_through_bus() {
    let mut bus = bus(strict());
    bus.write(0x6123, 0x5A);
    assert_eq!(bus.read(0x6123), 0x5A);
    assert_eq!(bus.cartridge().borrow().prg_ram()[0x123], 0x5A);
}

#[test]
fn ppu_window_forwards_canonical_register() {
    let mut bus = bus(strict());
    let ppu = recording_port();
    bus.attach_ppu(ppu.clone());

    bus.write(0x2000, 0x80);
    bus.write(0x3456, 0x01); // mirror of $2006
    let _ = bus.read(0x2002);
    let _ = bus.read(0x3FFA); // mirror of $2002
    bus.write(0x4014, 0x02); // OAM DMA

    let port = ppu.borrow();
    assert_eq!(port.writes, vec![(0x2000, 0x80), (0x2006, 0x01), (0x4014, 0x02)]);
    assert_eq!(port.reads, vec![0x2002, 0x2002]);
}

#[test]
fn repeated_reads_are_not_cached() {
    let mut bus = bus(strict());
    let ppu = recording_port();
    bus.attach_ppu(ppu.clone());
    let first = bus.read(0x2002);
    let second = bus.read(0x2002);
    assert_ne!(first, second);
    assert_eq!(ppu.borrow().reads.len(), 2);
}

#[test]
fn apu_and_input_windows_split_at_4016() {
    let mut bus = bus(strict());
    let apu = recording_port();
    let input = recording_port();
    bus.attach_apu(apu.clone());
    bus.attach_input(input.clone());

    bus.write(0x4000, 0x30);
    bus.write(0x4015, 0x0F);
    bus.write(0x4016, 0x01);
    bus.write(0x4017, 0x40);
    let _ = bus.read(0x4015);
    let _ = bus.read(0x4016);
    let _ = bus.read(0x4017);

    assert_eq!(
        apu.borrow().writes,
        vec![(0x4000, 0x30), (0x4015, 0x0F), (0x4017, 0x40)]
    );
    assert_eq!(apu.borrow().reads, vec![0x4015]);
    assert_eq!(input.borrow().writes, vec![(0x4016, 0x01)]);
    assert_eq!(input.borrow().reads, vec![0x4016, 0x4017]);
}

#[test]
fn open_bus_returns_last_byte() {
    let mut bus = bus(open_bus_config());
    assert_eq!(bus.read(0x8001), 0x42);
    assert_eq!(bus.read(0x4018), 0x42);
    // Expansion area is not connected on NROM.
    assert_eq!(bus.read(0x5000), 0x42);
    // Writes drive the data bus too.
    bus.write(0x0010, 0x99);
    assert_eq!(bus.read(0x2002), 0x99); // no PPU attached
    assert_eq!(bus.open_bus(), 0x99);
}

#[test]
fn open_bus_drops_unmapped_writes() {
    let mut bus = bus(open_bus_config());
    bus.write(0x401A, 0x12);
    bus.write(0x4020, 0x34);
    assert_eq!(bus.read(0x0000), 0x00);
}

#[test]
#[should_panic(expected = "unmapped CPU read at $4018")]
fn strict_read_panics() {
    let mut bus = bus(strict());
    let _ = bus.read(0x4018);
}

#[test]
#[should_panic(expected = "unmapped CPU write $07 at $2001")]
fn strict_write_to_detached_ppu_panics() {
    let mut bus = bus(strict());
    bus.write(0x2001, 0x07);
}

#[test]
fn peek_has_no_side_effects() {
    let mut bus = bus(strict());
    let ppu = recording_port();
    bus.attach_ppu(ppu.clone());
    bus.write(0x0002, 0xAB);

    assert_eq!(bus.peek(0x0802), Some(0xAB));
    assert_eq!(bus.peek(0x8000), Some(0xA9));
    assert_eq!(bus.peek(0x2002), None);
    assert_eq!(bus.peek(0x4018), None);
    assert!(ppu.borrow().reads.is_empty());
    // Peeking never moves the open-bus latch.
    assert_eq!(bus.open_bus(), 0xAB);
}

#[test]
fn instances_are_independent() {
    let mut a = bus(strict());
    let mut b = bus(strict());
    a.write(0x0100, 1);
    b.write(0x0100, 2);
    a.interrupts_mut().pulse_nmi();
    assert_eq!(a.read(0x0100), 1);
    assert_eq!(b.read(0x0100), 2);
    assert!(!b.interrupts().nmi_pending());
}
