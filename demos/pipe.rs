// In demos/pipe.rs
use scull_fifo::{trace, FifoBuilder, FifoError, Signal};
use sha2::{Digest, Sha256};
use std::env;
use std::sync::Arc;
use std::thread;

fn main() -> std::io::Result<()> {
    trace::init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <num_messages> [producers] [consumers]", args[0]);
        std::process::exit(1);
    }

    let num_messages: usize = args[1].parse().expect("Invalid number of messages");
    let producers: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(2);
    let consumers: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(2);

    // SCULL_FIFO_SIZE / SCULL_FIFO_ELEMSZ override the geometry.
    let fifo = Arc::new(FifoBuilder::from_env()?.build()?);
    println!("Pipe: {:?}", fifo);

    // Ctrl+C interrupts every blocked reader and writer.
    let signal = Signal::new();
    let signal_for_handler = signal.clone();
    ctrlc::set_handler(move || signal_for_handler.raise()).expect("Error setting Ctrl+C handler");

    let start = std::time::Instant::now();

    let mut writers = Vec::new();
    for p_id in 0..producers {
        let fifo = Arc::clone(&fifo);
        let signal = signal.clone();
        writers.push(thread::spawn(move || -> Result<usize, FifoError> {
            let mut sent = 0;
            for i in (p_id..num_messages).step_by(producers) {
                // Format: "message_number:hash"
                let hash = format!("{:x}", Sha256::digest(format!("message_{}", i).as_bytes()));
                let message = format!("{}:{}", i, hash);
                fifo.write(message.as_bytes(), message.len(), &signal)?;
                sent += 1;
            }
            Ok(sent)
        }));
    }

    let mut readers = Vec::new();
    for c_id in 0..consumers {
        let fifo = Arc::clone(&fifo);
        let signal = signal.clone();
        let quota = num_messages / consumers + usize::from(c_id < num_messages % consumers);
        readers.push(thread::spawn(move || -> Result<(usize, usize), FifoError> {
            let mut record = Vec::new();
            let (mut ok, mut bad) = (0, 0);
            for _ in 0..quota {
                fifo.read(&mut record, fifo.max_record_size(), &signal)?;
                let text = String::from_utf8_lossy(&record);
                match text.split_once(':') {
                    Some((i, hash))
                        if format!("{:x}", Sha256::digest(format!("message_{}", i).as_bytes()))
                            == hash =>
                    {
                        ok += 1
                    }
                    _ => bad += 1,
                }
            }
            Ok((ok, bad))
        }));
    }

    let mut sent = 0;
    for writer in writers {
        match writer.join().expect("writer panicked") {
            Ok(n) => sent += n,
            Err(e) => eprintln!("Writer stopped: {}", e),
        }
    }

    let (mut verified, mut corrupted) = (0, 0);
    for reader in readers {
        match reader.join().expect("reader panicked") {
            Ok((ok, bad)) => {
                verified += ok;
                corrupted += bad;
            }
            Err(e) => eprintln!("Reader stopped: {}", e),
        }
    }

    let elapsed = start.elapsed();
    println!("Pipe: Sent {} messages in {:.2?}", sent, elapsed);
    println!("Pipe: Verified {} hashes, {} corrupted", verified, corrupted);
    println!(
        "Pipe: Throughput: {:.2} messages/sec",
        verified as f64 / elapsed.as_secs_f64()
    );
    println!("Pipe: Final state {:?}", fifo.stats());

    if corrupted > 0 {
        std::process::exit(2);
    }
    Ok(())
}
