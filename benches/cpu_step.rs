use criterion::{Criterion, black_box, criterion_group, criterion_main};

use nescore::bus::FlatMemory;
use nescore::{Bus, BusConfig, Cartridge, CartridgeImage, Cpu};

// loop: LDA $10; ADC #$03; STA $10; INX; LDA $0200,X; DEY; BNE loop; JMP $8000
const LOOP: &[u8] = &[
    0xA5, 0x10, 0x69, 0x03, 0x85, 0x10, 0xE8, 0xBD, 0x00, 0x02, 0x88, 0xD0, 0xF3, 0x4C, 0x00,
    0x80,
];

fn nrom_bus() -> Bus {
    let mut prg = vec![0xEA; 0x8000];
    prg[..LOOP.len()].copy_from_slice(LOOP);
    prg[0x7FFC] = 0x00;
    prg[0x7FFD] = 0x80;
    let cartridge = Cartridge::from_image(CartridgeImage::new(prg), 0)
        .expect("32 KiB NROM image is valid");
    Bus::with_cartridge(cartridge, BusConfig::default())
}

fn flat_memory() -> FlatMemory {
    let mut mem = FlatMemory::new();
    mem.load(0x8000, LOOP);
    mem.set_word(0xFFFC, 0x8000);
    mem
}

fn bench_step(c: &mut Criterion) {
    c.bench_function("step_1000_nrom_bus", |b| {
        let mut bus = nrom_bus();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        b.iter(|| {
            for _ in 0..1000 {
                black_box(cpu.step(&mut bus));
            }
        })
    });

    c.bench_function("step_1000_flat_memory", |b| {
        let mut mem = flat_memory();
        let mut cpu = Cpu::new();
        cpu.reset(&mut mem);
        b.iter(|| {
            for _ in 0..1000 {
                black_box(cpu.step(&mut mem));
            }
        })
    });

    c.bench_function("clock_3000_nrom_bus", |b| {
        let mut bus = nrom_bus();
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        b.iter(|| {
            for _ in 0..3000 {
                black_box(cpu.clock(&mut bus));
            }
        })
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
