//! Interactive OTP signup.
//!
//! One task multiplexes countdown ticks and stdin lines, so a tick never
//! lands while a verification or resend request is being handled.

use std::sync::Arc;

use tracing::{debug, info};

use auth_client_lib::otp::{IntervalTicker, OtpState, Ticker};
use auth_client_lib::{AuthClient, RegistrationFlow};
use common::AppResult;
use domain::OtpCode;

use crate::args::SignupArgs;
use crate::console::Console;

/// What a line typed at the code prompt asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OtpCommand {
    Code(String),
    Resend,
    Status,
    Quit,
    Empty,
}

impl OtpCommand {
    fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "" => Self::Empty,
            "resend" | "r" => Self::Resend,
            "status" | "s" => Self::Status,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Code(line.trim().to_string()),
        }
    }
}

pub async fn run(client: Arc<AuthClient>, console: &mut Console, args: SignupArgs) -> AppResult<()> {
    let password = console.prompt("Password: ").await?;
    let mut flow =
        RegistrationFlow::start(client, &args.email, &args.name, &password, args.role).await?;

    println!(
        "A 6-digit code was sent to {}. You can request a new one in {}.",
        flow.pending().email(),
        flow.entry().countdown()
    );
    println!("Enter the code, or type resend, status or quit.");

    let mut ticker = IntervalTicker::every_second();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let was_open = flow.entry().can_resend();
                flow.tick();
                if !was_open && flow.entry().can_resend() {
                    println!("You can now request a new code (type resend).");
                }
            }
            line = console.next_line() => {
                let Some(line) = line? else {
                    info!("input closed, signup abandoned");
                    return Ok(());
                };
                if handle(&mut flow, OtpCommand::parse(&line)).await {
                    return Ok(());
                }
            }
        }
    }
}

/// Returns true once the flow is over.
async fn handle(flow: &mut RegistrationFlow, command: OtpCommand) -> bool {
    match command {
        OtpCommand::Empty => false,
        OtpCommand::Quit => {
            println!("Signup cancelled.");
            true
        }
        OtpCommand::Status => {
            print_status(flow);
            false
        }
        OtpCommand::Resend => {
            match flow.resend().await {
                Ok(()) => println!("A new code is on its way."),
                Err(e) => println!("{}", e.user_message()),
            }
            false
        }
        OtpCommand::Code(raw) => {
            if let Err(e) = OtpCode::new(&raw) {
                println!("{}", e);
                return false;
            }

            flow.type_text(&raw);
            match flow.submit().await {
                Ok(session) => {
                    println!(
                        "Welcome, {}! Signed in as {}.",
                        session.user.display_name(),
                        session.user.role
                    );
                    true
                }
                Err(e) => {
                    println!("{}", e.user_message());
                    if flow.entry().state() == OtpState::Locked {
                        println!(
                            "Too many failed attempts. Request a new code in {}.",
                            flow.entry().countdown()
                        );
                    } else if !e.is_validation() {
                        println!("{} attempt(s) left.", flow.entry().attempts_remaining());
                    }
                    debug!(attempts = flow.entry().attempts(), "code rejected");
                    false
                }
            }
        }
    }
}

fn print_status(flow: &RegistrationFlow) {
    let entry = flow.entry();
    let state = match entry.state() {
        OtpState::Entering => "waiting for code",
        OtpState::Verifying => "verifying",
        OtpState::Verified => "verified",
        OtpState::Locked => "locked",
    };
    let resend = if entry.can_resend() {
        "available now".to_string()
    } else {
        format!("in {}", entry.countdown())
    };

    println!(
        "{}: {}, {} attempt(s) left, resend {}",
        flow.pending().email(),
        state,
        entry.attempts_remaining(),
        resend
    );
}
