//! Build the three-antenna network by hand, connect it and walk it.
//!
//! Usage:
//!   cargo run -p nefasto --example small_network
//!
//! Expected: both searches from (1, 1) visit (1, 1) then (2, 2); the 'B'
//! antenna at (1, 2) stays isolated.

use nefasto::api::{bfs, connect_same_frequency, dfs, Traversal};
use nefasto::{Bounds, Frequency, Pos, Registry};

fn main() -> nefasto::Result<()> {
    let mut reg = Registry::sorted();
    reg.insert_new(Frequency::try_from('A')?, 1, 1)?;
    reg.insert_new(Frequency::try_from('B')?, 1, 2)?;
    reg.insert_new(Frequency::try_from('A')?, 2, 2)?;
    let edges = connect_same_frequency(&mut reg);
    println!("antennas={} directed_edges={edges}", reg.len());

    let bounds = Bounds::new(10, 10);
    show("dfs", &dfs(&reg, Pos::new(1, 1), bounds));
    show("bfs", &bfs(&reg, Pos::new(1, 1), bounds));
    Ok(())
}

fn show(label: &str, t: &Traversal<'_>) {
    println!("{label}:");
    for v in t.iter() {
        println!("  {} {}", v.pos, v.antenna.frequency);
    }
}
