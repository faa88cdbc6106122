use chain_hash::HashTable;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    /// Number of distinct keys to insert.
    #[arg(short = 'n', long = "keys", default_value_t = 1000)]
    keys: u64,

    /// Initial bucket count.
    #[arg(short = 'c', long = "initial_capacity", default_value_t = 16)]
    initial_capacity: usize,

    /// Also insert a value under the null key.
    #[arg(long = "with_null")]
    with_null: bool,
}

fn main() {
    let args = Args::parse();

    let created = HashTable::try_with_capacity(args.initial_capacity);
    let mut table: HashTable<u64, u64> = match created {
        Ok(table) => table,
        Err(error) => {
            eprintln!("Cannot create table: {error}");
            std::process::exit(1);
        }
    };

    println!("Initial capacity: {}", table.capacity());
    println!("Inserting {} keys...", args.keys);

    let mut resizes = 0;
    for key in 0..args.keys {
        let capacity = table.capacity();
        table.insert(key, key * 2);
        if table.capacity() != capacity {
            resizes += 1;
        }
    }
    if args.with_null {
        table.insert_null(0);
    }

    println!(
        "Inserted {} entries, {} resizes, final capacity {}",
        table.len(),
        resizes,
        table.capacity()
    );

    table.chain_stats().print();
}
