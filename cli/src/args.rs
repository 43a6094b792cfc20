//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

use domain::Role;

/// Recruiting portal sign-up and sign-in from the terminal
#[derive(Parser, Debug)]
#[command(name = "recruit-auth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL, overrides API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account with an emailed one-time code
    Signup(SignupArgs),

    /// Sign in with email and password
    Login(LoginArgs),

    /// Sign in with a Google ID token
    Google(GoogleArgs),

    /// Print the LinkedIn authorization URL
    LinkedinUrl(RoleArgs),

    /// Check the URL LinkedIn redirected back to
    LinkedinCallback {
        /// Full redirect URL including the query string
        url: String,
    },

    /// Exchange the refresh token for a new session
    Refresh,

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Change the account email
    EmailUpdate {
        #[command(subcommand)]
        action: EmailUpdateAction,
    },
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    #[arg(short, long)]
    pub email: String,

    /// Full name shown on the profile
    #[arg(short, long)]
    pub name: String,

    /// candidate or recruiter
    #[arg(short, long, default_value = "candidate")]
    pub role: Role,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub email: String,
}

#[derive(Args, Debug)]
pub struct GoogleArgs {
    /// ID token returned by Google Identity Services
    #[arg(long)]
    pub credential: String,

    #[arg(short, long, default_value = "candidate")]
    pub role: Role,
}

#[derive(Args, Debug)]
pub struct RoleArgs {
    #[arg(short, long, default_value = "candidate")]
    pub role: Role,
}

#[derive(Subcommand, Debug)]
pub enum EmailUpdateAction {
    /// Send a code to the new address
    Request { email: String },

    /// Confirm the new address with the code
    Verify { email: String, otp: String },
}
