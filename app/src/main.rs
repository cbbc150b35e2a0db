//! Terminal front end for a remote todo list.
//!
//! # Design
//! One task owns the `Session` and is the only place state changes. Input
//! lines, settled requests and expired error timers all arrive on one
//! channel. Requests run on blocking worker threads and may settle in any
//! order; nothing is ever cancelled.

use std::io::{self, Write};

use clap::Parser;
use tokio::sync::mpsc::{self, UnboundedSender};
use todo_app::{
    config::Cli,
    intent::{Intent, IntentError, HELP},
    render,
    session::Session,
    timer, transport,
};
use todo_core::{BannerTimer, Effect, ListSynchronizer, Outcome, Ticket, TodoClient};
use tracing_subscriber::EnvFilter;

enum Event {
    Line(String),
    InputClosed,
    Settled(Ticket, Outcome),
    ErrorExpired(BannerTimer),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut out = io::stdout();
    let Some(user) = cli.user() else {
        writeln!(out, "{}", render::user_warning())?;
        return Ok(());
    };
    tracing::info!(base_url = %cli.base_url, %user, "starting");

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_stdin(tx.clone());

    let agent = transport::agent();
    let mut session = Session::new(ListSynchronizer::new(TodoClient::new(&cli.base_url, user)));
    let effects = session.start();
    perform(effects, &agent, &tx);
    writeln!(out, "{}", render::render(&session))?;

    let mut input_closed = false;
    while let Some(event) = rx.recv().await {
        match event {
            Event::Line(line) => match Intent::parse(&line) {
                Ok(intent) => match session.handle(intent) {
                    Ok(reaction) if reaction.quit => break,
                    Ok(reaction) => {
                        if reaction.show_help {
                            writeln!(out, "{HELP}")?;
                        }
                        perform(reaction.effects, &agent, &tx);
                    }
                    Err(err) => writeln!(out, "{err}")?,
                },
                Err(IntentError::Empty) => {}
                Err(err) => writeln!(out, "{err}")?,
            },
            Event::InputClosed => input_closed = true,
            Event::Settled(ticket, outcome) => {
                let effects = session.settle(ticket, outcome);
                perform(effects, &agent, &tx);
            }
            Event::ErrorExpired(timer) => session.expire_error(timer),
        }

        // Let in-flight requests land before leaving on end of input.
        if input_closed && session.view().pending_requests() == 0 {
            break;
        }
        writeln!(out, "{}", render::render(&session))?;
    }
    Ok(())
}

/// Carry out the effects the session could not handle itself.
fn perform(effects: Vec<Effect>, agent: &ureq::Agent, tx: &UnboundedSender<Event>) {
    for effect in effects {
        match effect {
            Effect::Send { ticket, request } => {
                let agent = agent.clone();
                let tx = tx.clone();
                tokio::task::spawn_blocking(move || {
                    let outcome = transport::execute(&agent, request);
                    // The loop is gone only when we are shutting down.
                    let _ = tx.send(Event::Settled(ticket, outcome));
                });
            }
            Effect::ScheduleErrorExpiry(expiry) => {
                let tx = tx.clone();
                timer::schedule_expiry(expiry, move |timer| {
                    let _ = tx.send(Event::ErrorExpired(timer));
                });
            }
            Effect::ClearInput | Effect::FocusInput => {}
        }
    }
}

/// Stdin is read on a plain thread so a pending read never holds up
/// runtime shutdown.
fn spawn_stdin(tx: UnboundedSender<Event>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Event::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    tracing::warn!(%err, "reading input failed");
                    break;
                }
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}
