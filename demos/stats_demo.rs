use clap::Parser;
use probe_table::Config;
use probe_table::ProbeTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.5)]
    load_factor: f32,

    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: u64,

    /// Remove every other key after filling, to exercise backward-shift
    /// deletion.
    #[arg(long = "remove_half")]
    remove_half: bool,
}

fn main() -> Result<(), probe_table::Error> {
    let args = Args::parse();

    let config = Config::new()
        .initial_capacity(args.initial_capacity)
        .load_factor(args.load_factor);
    let mut table: ProbeTable<u64, u64> = ProbeTable::with_config(config)?;

    println!(
        "Creating ProbeTable with initial capacity {} and load factor {}",
        table.capacity(),
        args.load_factor
    );
    println!("Filling table with {} u64 keys...", args.entries);

    for key in 0..args.entries {
        table.insert(key, key)?;
    }

    if args.remove_half {
        for key in (0..args.entries).step_by(2) {
            table.remove(&key);
        }
        println!("Removed every other key");
    }

    println!(
        "Final: {} entries in {} slots ({:.2}% load)",
        table.len(),
        table.capacity(),
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.print_probe_histogram();
    table.debug_stats().print();

    Ok(())
}
