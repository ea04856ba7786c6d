use scull_fifo::{trace, FifoBuilder, FifoError, Signal};
use std::io::BufRead;
use std::sync::Arc;
use std::thread;

// Lines typed on stdin are queued by a writer thread and printed by a
// blocking reader. Ctrl+C interrupts both.
fn main() -> std::io::Result<()> {
    trace::init_tracing();

    let fifo = Arc::new(FifoBuilder::from_env()?.build()?);
    let signal = Signal::new();

    let signal_for_handler = signal.clone();
    ctrlc::set_handler(move || signal_for_handler.raise()).expect("Error setting Ctrl+C handler");

    println!(
        "Blocking Consumer: {} slots of up to {} bytes, waiting for lines...",
        fifo.capacity(),
        fifo.max_record_size()
    );

    let writer = {
        let fifo = Arc::clone(&fifo);
        let signal = signal.clone();
        thread::spawn(move || -> std::io::Result<()> {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let accepted = fifo.write(line.as_bytes(), line.len(), &signal)?;
                if accepted < line.len() {
                    eprintln!("Truncated line to {} bytes", accepted);
                }
            }
            Ok(())
        })
    };

    let mut record = Vec::new();
    loop {
        match fifo.read(&mut record, fifo.max_record_size(), &signal) {
            Ok(_) => println!("Received: {}", String::from_utf8_lossy(&record)),
            Err(FifoError::Interrupted) => {
                println!("Blocking Consumer: Interrupted, shutting down");
                break;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    // The writer may still be waiting on stdin; it is detached on exit.
    if writer.is_finished() {
        if let Err(e) = writer.join().expect("writer panicked") {
            eprintln!("Writer stopped: {}", e);
        }
    }
    Ok(())
}
