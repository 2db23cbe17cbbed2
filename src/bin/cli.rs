//! birdctl CLI Client
//!
//! Sends commands to a running BIRD daemon and prints the replies.

use std::cell::{Cell, RefCell};
use std::io::BufRead;
use std::rc::Rc;

use birdctl::config::DEFAULT_SOCKET_PATH;
use birdctl::protocol::codes;
use birdctl::{BirdError, Config, DesyncPolicy, EventKind, Notifiable, Response, Session};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// birdctl
#[derive(Parser, Debug)]
#[command(name = "birdctl")]
#[command(about = "Send commands to the BIRD routing daemon control socket")]
#[command(version)]
struct Args {
    /// Control socket path
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: String,

    /// Give up when the daemon is silent this long (0 = wait forever)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    /// Log unattributable replies instead of dropping the connection
    #[arg(long)]
    lenient: bool,

    /// Command to run; read one command per stdin line when omitted
    command: Vec<String>,
}

type Outcome = Rc<RefCell<Option<(Option<BirdError>, Response)>>>;

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,birdctl=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    }
}

/// Returns `Ok(false)` if any command got an error reply
fn run(args: Args) -> birdctl::Result<bool> {
    let config = Config::builder()
        .socket_path(&args.socket)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .desync_policy(if args.lenient {
            DesyncPolicy::Warn
        } else {
            DesyncPolicy::Fatal
        })
        .build();
    config.validate()?;

    let commands = if args.command.is_empty() {
        read_commands()?
    } else {
        vec![args.command.join(" ")]
    };

    let mut session = Session::new(config);

    let ready = Rc::new(Cell::new(false));
    let ready_flag = Rc::clone(&ready);
    session.on(EventKind::Ready, move |_, _| ready_flag.set(true));
    session.on(EventKind::Error, |_, event| {
        if let Some(e) = event.error() {
            tracing::error!("Session error: {}", e);
        }
    });

    session.open()?;
    session.run_until(|_| ready.get())?;
    tracing::debug!("BIRD v{} client ready", birdctl::VERSION);

    let mut all_ok = true;
    for command in commands {
        let outcome: Outcome = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&outcome);
        session.command(command.as_str(), move |_, error, response| {
            *slot.borrow_mut() = Some((error, response));
        })?;
        session.run_until(|_| outcome.borrow().is_some())?;

        let taken = outcome.borrow_mut().take();
        if let Some((error, response)) = taken {
            print!("{}", response.body);
            match error {
                Some(e) => {
                    eprintln!("{}", e);
                    all_ok = false;
                }
                None if response.body.is_empty() => {
                    let text = codes::describe(response.code).unwrap_or("");
                    println!("{} {}", response.code, text);
                }
                None => {}
            }
        }
    }

    session.close()?;
    Ok(all_ok)
}

/// One command per non-empty stdin line
fn read_commands() -> birdctl::Result<Vec<String>> {
    let mut commands = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            commands.push(trimmed.to_string());
        }
    }
    Ok(commands)
}
