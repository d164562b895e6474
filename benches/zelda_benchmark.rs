use criterion::{criterion_group, criterion_main, Criterion};
use dotmatrix_core::emulator::EmulatorMode;
use dotmatrix_core::Machine;
use std::fs::read;

fn emulator_benchmark(c: &mut Criterion) {
    let rom = read("../roms/Zelda.gb").unwrap();
    let mut machine = Machine::new(&rom, None, EmulatorMode::Dmg).unwrap();

    c.bench_function("Step one frame", |b| b.iter(|| machine.step_frame(0)));
}

criterion_group!(benches, emulator_benchmark);
criterion_main!(benches);
