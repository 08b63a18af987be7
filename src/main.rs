// src/main.rs
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{error, info};

use support_timer::models::format_hms;
use support_timer::{
    AppError, BillingPolicy, CallLedger, CallRecord, CallTimer, SettingsStore, SystemClock,
    APP_NAME,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting {}", APP_NAME);

    let store = SettingsStore::resolve();
    let settings = store.load_or_create();
    let policy = BillingPolicy::from_settings(&settings);
    let ledger = CallLedger::new(store.storage_root());
    let mut timer = CallTimer::new(SystemClock);

    println!("{}", APP_NAME);
    println!(
        "Rate: ${:.2} / hour — minimum time: {} min (≤ free)",
        settings.rate_per_hour, settings.minimum_minutes
    );
    println!("Settings: {}", store.path().display());
    println!("Commands: new, pause, end, status, watch, quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "new" => on_new(&mut timer)?,
            "pause" => {
                timer.pause();
                print_status(&timer, &policy);
            }
            "end" => on_end(&mut timer, &policy, &ledger)?,
            "status" => print_status(&timer, &policy),
            "watch" => watch(&timer, &policy),
            "quit" | "exit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }
    Ok(())
}

fn on_new(timer: &mut CallTimer<SystemClock>) -> io::Result<()> {
    match timer.start() {
        Ok(()) => println!("Call started."),
        Err(AppError::CallInProgress) => {
            if confirm("A call is already in progress. Reset the timer? (y/n) ")? {
                timer.force_start();
                println!("Call started.");
            }
        }
        Err(e) => println!("{}", e),
    }
    Ok(())
}

fn on_end(
    timer: &mut CallTimer<SystemClock>,
    policy: &BillingPolicy,
    ledger: &CallLedger,
) -> io::Result<()> {
    let summary = match timer.end(policy) {
        Ok(summary) => summary,
        Err(AppError::NoActiveCall) => {
            println!("No active call. Start one with 'new'.");
            return Ok(());
        }
        Err(e) => {
            println!("{}", e);
            return Ok(());
        }
    };

    println!("\n--- Call Summary ---");
    println!("{}", summary.text());
    println!();

    let name = prompt("Customer name: ")?;
    let number = prompt("Customer number: ")?;
    let notes = prompt("Tech notes: ")?;
    let record = CallRecord::from_summary(&summary, &name, &number, &notes);

    loop {
        if confirm("Save log? (y/n) ")? {
            match ledger.append(&record) {
                Ok(path) => {
                    println!("Saved to {}", path.display());
                    break;
                }
                Err(e) => {
                    error!("{}", e);
                    println!("{}", e);
                    println!("The record was NOT saved — retry, or answer 'n' to discard it.");
                }
            }
        } else {
            println!("Skipped — call was not logged.");
            break;
        }
    }
    timer.reset();
    Ok(())
}

fn print_status(timer: &CallTimer<SystemClock>, policy: &BillingPolicy) {
    let elapsed = timer.elapsed().as_secs();
    let cost = policy.effective_cost(elapsed);
    let hint = match timer.remaining_free(policy) {
        Some(remaining) => format!(" (free for another {})", format_hms(remaining.as_secs())),
        None => String::new(),
    };
    println!(
        "[{:?}] {} — ${:.2}{}",
        timer.phase(),
        format_hms(elapsed),
        cost,
        hint
    );
}

/// Live view for a few seconds, refreshing at the timer's suggested cadence.
fn watch(timer: &CallTimer<SystemClock>, policy: &BillingPolicy) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        let elapsed = timer.elapsed().as_secs();
        print!(
            "\r[{:?}] {} — ${:.2}   ",
            timer.phase(),
            format_hms(elapsed),
            policy.effective_cost(elapsed)
        );
        let _ = io::stdout().flush();
        std::thread::sleep(timer.poll_interval());
    }
    println!();
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm(question: &str) -> io::Result<bool> {
    Ok(prompt(question)?.eq_ignore_ascii_case("y"))
}
