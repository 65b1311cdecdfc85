//! Line-oriented command loop around a single `GigClient`.

use std::io::{self, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::{debug, warn};

use gigs_core::{ApiError, Config, CredentialStore, GigClient, User};

use crate::format::{gig_detail, gig_row};

const HELP: &str = "\
Commands:
  signup     create an account
  login      sign in (remembers the password in the OS keychain)
  logout     forget the token and the local gig list (optionally the stored password)
  list       fetch all gigs
  add        post a new gig
  show <n>   show gig number n from the last list
  help       show this message
  quit       exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SignUp,
    Login,
    Logout,
    List,
    Add,
    Show(usize),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();

        let command = match name.as_str() {
            "signup" | "register" => Command::SignUp,
            "login" | "signin" => Command::Login,
            "logout" | "signout" => Command::Logout,
            "list" | "ls" => Command::List,
            "add" | "new" => Command::Add,
            "show" => {
                let n = arg
                    .and_then(|a| a.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| "usage: show <n> (n starts at 1)".to_string())?;
                return Ok(Command::Show(n));
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(command)
    }
}

/// Parse a due date typed at the prompt.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`. Values without an
/// offset are taken as UTC.
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    bail!("could not read '{}' as a date (use YYYY-MM-DD or YYYY-MM-DD HH:MM)", input)
}

/// Interpret a yes/no answer. An empty answer takes `default`; closed input is no.
pub fn confirm(answer: Option<&str>, default: bool) -> bool {
    match answer.map(|a| a.trim().to_ascii_lowercase()) {
        None => false,
        Some(a) if a.is_empty() => default,
        Some(a) if a == "y" || a == "yes" => true,
        Some(a) if a == "n" || a == "no" => false,
        Some(_) => default,
    }
}

/// Print `label` and read one line. `None` means stdin is closed.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn prompt_required(label: &str) -> Result<String> {
    match prompt(label)? {
        Some(value) if !value.is_empty() => Ok(value),
        Some(_) => bail!("a value is required"),
        None => bail!("input closed"),
    }
}

pub struct Shell {
    client: GigClient,
    config: Config,
    credentials: CredentialStore,
}

impl Shell {
    pub fn new(client: GigClient, config: Config) -> Self {
        Self {
            client,
            config,
            credentials: CredentialStore::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("gigs - type 'help' for commands");

        loop {
            let label = if self.client.is_signed_in() { "gigs* > " } else { "gigs> " };
            let Some(line) = prompt(label)? else {
                println!();
                break;
            };
            if line.is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(message) => {
                    eprintln!("{}", message);
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            if let Err(e) = self.execute(command).await {
                eprintln!("Error: {:#}", e);
                if e.downcast_ref::<ApiError>().is_some_and(ApiError::is_auth_error) {
                    eprintln!("Run 'login' to sign in.");
                }
            }
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        debug!(?command, "Executing command");
        match command {
            Command::SignUp => self.sign_up().await,
            Command::Login => self.login().await,
            Command::Logout => self.logout(),
            Command::List => self.list().await,
            Command::Add => self.add().await,
            Command::Show(n) => self.show(n),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn read_username(&self) -> Result<String> {
        match self.config.last_username.as_deref() {
            Some(last) => {
                let input = prompt(&format!("Username [{}]: ", last))?.unwrap_or_default();
                Ok(if input.is_empty() { last.to_string() } else { input })
            }
            None => prompt_required("Username: "),
        }
    }

    async fn sign_up(&mut self) -> Result<()> {
        let username = prompt_required("Username: ")?;
        let password = rpassword::prompt_password("Password: ")?;
        let confirmation = rpassword::prompt_password("Confirm password: ")?;
        if password != confirmation {
            bail!("passwords do not match");
        }

        self.client
            .sign_up(&User::new(username, password))
            .await
            .context("Sign up failed")?;
        println!("Account created. Run 'login' to sign in.");
        Ok(())
    }

    async fn login(&mut self) -> Result<()> {
        let username = self.read_username()?;

        let use_stored = self.credentials.has_credentials(&username)
            && confirm(prompt("Use stored password? [Y/n]: ")?.as_deref(), true);

        let user = if use_stored {
            self.credentials.recall(&username)?
        } else {
            User::new(username, rpassword::prompt_password("Password: ")?)
        };

        self.client.sign_in(&user).await.context("Sign in failed")?;
        println!("Signed in as {}.", user.username);

        if let Err(e) = self.credentials.remember(&user) {
            warn!(error = %e, "Could not store password in keychain");
        }
        self.config.last_username = Some(user.username.clone());
        if let Err(e) = self.config.save() {
            warn!(error = %e, "Failed to save config");
        }
        Ok(())
    }

    /// Sign out, optionally dropping the stored password for the last user.
    fn logout(&mut self) -> Result<()> {
        self.client.sign_out();
        println!("Signed out.");

        let Some(username) = self.config.last_username.clone() else {
            return Ok(());
        };
        if self.credentials.has_credentials(&username)
            && confirm(
                prompt(&format!("Forget stored password for {}? [y/N]: ", username))?.as_deref(),
                false,
            )
        {
            self.credentials.forget(&username)?;
            println!("Stored password for {} removed.", username);
        }
        Ok(())
    }

    async fn list(&mut self) -> Result<()> {
        let gigs = self.client.list_gigs().await.context("Could not fetch gigs")?;
        if gigs.is_empty() {
            println!("No gigs yet.");
        }
        for (i, gig) in gigs.iter().enumerate() {
            println!("{}", gig_row(i, gig));
        }
        Ok(())
    }

    async fn add(&mut self) -> Result<()> {
        if !self.client.is_signed_in() {
            return Err(ApiError::NotAuthenticated.into());
        }

        let title = prompt_required("Title: ")?;
        let description = prompt("Description: ")?.unwrap_or_default();
        let due_date = parse_due_date(&prompt_required("Due date (YYYY-MM-DD [HH:MM]): ")?)?;

        let gig = self
            .client
            .create_gig(title, description, due_date)
            .await
            .context("Could not create gig")?;
        println!("Created '{}' due {}.", gig.title, gig.formatted_due_date());
        Ok(())
    }

    fn show(&self, n: usize) -> Result<()> {
        let gigs = self.client.gigs();
        let gig = gigs
            .get(n - 1)
            .with_context(|| format!("no gig {} (run 'list' first; {} known)", n, gigs.len()))?;
        println!("{}", gig_detail(gig));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("login".parse::<Command>(), Ok(Command::Login));
        assert_eq!("  LIST ".parse::<Command>(), Ok(Command::List));
        assert_eq!("signup".parse::<Command>(), Ok(Command::SignUp));
        assert_eq!("show 2".parse::<Command>(), Ok(Command::Show(2)));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_show_requires_positive_index() {
        assert!("show".parse::<Command>().is_err());
        assert!("show 0".parse::<Command>().is_err());
        assert!("show two".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.contains("unknown command 'dance'"));
    }

    #[test]
    fn test_confirm_answers() {
        assert!(confirm(Some(""), true));
        assert!(!confirm(Some(""), false));
        assert!(confirm(Some("Y"), false));
        assert!(confirm(Some(" yes "), false));
        assert!(!confirm(Some("n"), true));
        assert!(!confirm(Some("No"), true));
        assert!(!confirm(Some("maybe"), false));
        assert!(!confirm(None, true));
    }

    #[test]
    fn test_parse_due_date_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 6, 19, 0, 0, 0).unwrap();
        assert_eq!(parse_due_date("2019-06-19").unwrap(), expected);

        let expected = Utc.with_ymd_and_hms(2019, 6, 19, 15, 30, 0).unwrap();
        assert_eq!(parse_due_date("2019-06-19 15:30").unwrap(), expected);
        assert_eq!(parse_due_date("2019-06-19T17:30:00+02:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_due_date_rejects_garbage() {
        assert!(parse_due_date("tomorrow").is_err());
        assert!(parse_due_date("2019-13-01").is_err());
    }
}
