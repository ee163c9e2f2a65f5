//! Basic example of recording and reading a stopwatch timeline.

use std::thread;
use std::time::Duration;

use pinwatch::{Registry, TimeUnit};

fn main() -> pinwatch::Result<()> {
    let registry = Registry::new();

    let watch = registry.get_or_create("dinner");
    println!("Started at: {} ns", watch.start()?);

    thread::sleep(Duration::from_millis(120));
    println!("Pinned at: {} ns", watch.pin()?);
    println!(
        "Interval: {} ms",
        watch.last_interval_in(TimeUnit::Milliseconds)?
    );

    thread::sleep(Duration::from_millis(80));
    watch.pin_named("started eating")?;

    // A phone call does not count toward dinner.
    watch.pause();
    thread::sleep(Duration::from_millis(300));
    watch.keep();

    thread::sleep(Duration::from_millis(150));
    watch.pin_named("finished eating")?;

    println!(
        "Eating took: {} ms",
        watch.pin_interval_in("started eating", "finished eating", TimeUnit::Milliseconds)
    );
    println!("Stopped at: {} ns", watch.stop()?);
    println!();
    println!("{watch}");

    Ok(())
}
