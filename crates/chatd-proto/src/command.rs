//! Client command classification.
//!
//! Lines are classified without allocation: every [`Command`] borrows from
//! the input line.

use thiserror::Error;

/// Recognized command keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// `/name <name>`
    Name,
    /// `/help`
    Help,
    /// `/list_users`
    ListUsers,
    /// `/history`
    History,
    /// `/pm <user> <text>`
    Pm,
    /// `/ban <user>`
    Ban,
    /// `/unban <user>`
    Unban,
    /// `/mute <user>`
    Mute,
    /// `/unmute <user>`
    Unmute,
    /// `/broadcast <text>`
    Broadcast,
    /// `/exit`
    Exit,
}

impl Verb {
    /// Keyword as typed by the client, leading slash included.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Name => "/name",
            Self::Help => "/help",
            Self::ListUsers => "/list_users",
            Self::History => "/history",
            Self::Pm => "/pm",
            Self::Ban => "/ban",
            Self::Unban => "/unban",
            Self::Mute => "/mute",
            Self::Unmute => "/unmute",
            Self::Broadcast => "/broadcast",
            Self::Exit => "/exit",
        }
    }

    /// Static label for metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Help => "help",
            Self::ListUsers => "list_users",
            Self::History => "history",
            Self::Pm => "pm",
            Self::Ban => "ban",
            Self::Unban => "unban",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Broadcast => "broadcast",
            Self::Exit => "exit",
        }
    }

    /// Usage string shown when arguments are missing.
    pub fn usage(self) -> &'static str {
        match self {
            Self::Name => "/name <yourname>",
            Self::Help => "/help",
            Self::ListUsers => "/list_users",
            Self::History => "/history",
            Self::Pm => "/pm <user> <message>",
            Self::Ban => "/ban <user>",
            Self::Unban => "/unban <user>",
            Self::Mute => "/mute <user>",
            Self::Unmute => "/unmute <user>",
            Self::Broadcast => "/broadcast <message>",
            Self::Exit => "/exit",
        }
    }

    /// Commands reserved for the admin identity.
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Ban | Self::Unban | Self::Mute | Self::Unmute)
    }
}

/// Active-state keywords in dispatch priority order. `/name` is not here:
/// once named, a `/name ...` line is ordinary chat.
const ACTIVE_VERBS: [Verb; 10] = [
    Verb::Help,
    Verb::ListUsers,
    Verb::History,
    Verb::Pm,
    Verb::Ban,
    Verb::Unban,
    Verb::Mute,
    Verb::Unmute,
    Verb::Broadcast,
    Verb::Exit,
];

/// A classified line from a named session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// Show the command summary.
    Help,
    /// List online users.
    ListUsers,
    /// Dump buffered history.
    History,
    /// Private message.
    PrivMsg {
        /// Receiver display name.
        target: &'a str,
        /// Message body.
        text: &'a str,
    },
    /// Ban a user (admin).
    Ban(&'a str),
    /// Lift a ban (admin).
    Unban(&'a str),
    /// Mute a user (admin).
    Mute(&'a str),
    /// Lift a mute (admin).
    Unmute(&'a str),
    /// Marked broadcast.
    Broadcast(&'a str),
    /// Leave the chat.
    Exit,
    /// Anything else: ordinary chat text.
    Plain(&'a str),
}

/// Errors classifying an active-state line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A recognized keyword without its required argument.
    #[error("missing argument for {}", .0.keyword())]
    MissingArgument(Verb),
    /// A user argument that cannot be a display name.
    #[error("invalid target for {}", .0.keyword())]
    InvalidTarget(Verb),
}

impl CommandError {
    /// The keyword the client attempted.
    pub fn verb(&self) -> Verb {
        match *self {
            Self::MissingArgument(v) | Self::InvalidTarget(v) => v,
        }
    }
}

/// Split `line` into the matching keyword and its (untrimmed) argument.
///
/// A keyword matches only as the whole line or followed by a space, so
/// `/helpme` is not `/help`.
fn split_keyword(line: &str, verb: Verb) -> Option<&str> {
    let rest = line.strip_prefix(verb.keyword())?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn target(verb: Verb, arg: &str) -> Result<&str, CommandError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(verb));
    }
    if arg.contains(char::is_whitespace) {
        return Err(CommandError::InvalidTarget(verb));
    }
    Ok(arg)
}

impl<'a> Command<'a> {
    /// Classify a line received in the active state.
    ///
    /// The line should already be stripped of its terminator; surrounding
    /// whitespace is ignored.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        let line = line.trim();

        let Some((verb, arg)) = ACTIVE_VERBS
            .iter()
            .find_map(|&v| split_keyword(line, v).map(|arg| (v, arg)))
        else {
            return Ok(Self::Plain(line));
        };

        let cmd = match verb {
            Verb::Help => Self::Help,
            Verb::ListUsers => Self::ListUsers,
            Verb::History => Self::History,
            Verb::Exit => Self::Exit,
            Verb::Pm => {
                let mut parts = arg.trim_start().splitn(2, ' ');
                let target = parts.next().unwrap_or_default();
                let text = parts.next().map(str::trim).unwrap_or_default();
                if target.is_empty() || text.is_empty() {
                    return Err(CommandError::MissingArgument(verb));
                }
                Self::PrivMsg { target, text }
            }
            Verb::Ban => Self::Ban(target(verb, arg)?),
            Verb::Unban => Self::Unban(target(verb, arg)?),
            Verb::Mute => Self::Mute(target(verb, arg)?),
            Verb::Unmute => Self::Unmute(target(verb, arg)?),
            Verb::Broadcast => {
                let text = arg.trim();
                if text.is_empty() {
                    return Err(CommandError::MissingArgument(verb));
                }
                Self::Broadcast(text)
            }
            // Not in ACTIVE_VERBS; renaming while active is chat.
            Verb::Name => Self::Plain(line),
        };

        Ok(cmd)
    }

    /// The keyword behind this command, or `None` for plain chat.
    pub fn verb(&self) -> Option<Verb> {
        Some(match self {
            Self::Help => Verb::Help,
            Self::ListUsers => Verb::ListUsers,
            Self::History => Verb::History,
            Self::PrivMsg { .. } => Verb::Pm,
            Self::Ban(_) => Verb::Ban,
            Self::Unban(_) => Verb::Unban,
            Self::Mute(_) => Verb::Mute,
            Self::Unmute(_) => Verb::Unmute,
            Self::Broadcast(_) => Verb::Broadcast,
            Self::Exit => Verb::Exit,
            Self::Plain(_) => return None,
        })
    }
}

/// Reasons a naming-state line is not an acceptable `/name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameError {
    /// Not a `/name` line at all.
    #[error("expected /name <yourname>")]
    NotNameCommand,
    /// `/name` with nothing after it.
    #[error("name is empty")]
    Empty,
    /// Longer than the configured limit (in characters).
    #[error("name longer than {0} characters")]
    TooLong(usize),
    /// Names are single tokens.
    #[error("name contains whitespace")]
    Whitespace,
}

/// Extract the requested display name from a naming-state line.
pub fn parse_name(line: &str, max_len: usize) -> Result<&str, NameError> {
    let line = line.trim();
    let arg = split_keyword(line, Verb::Name).ok_or(NameError::NotNameCommand)?;
    let name = arg.trim();

    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(char::is_whitespace) {
        return Err(NameError::Whitespace);
    }
    if name.chars().count() > max_len {
        return Err(NameError::TooLong(max_len));
    }
    Ok(name)
}
