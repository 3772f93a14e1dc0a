//! Server-to-client lines.
//!
//! Every line the server writes is built here so the wording stays in one
//! place. None of these include the line terminator.

use crate::command::Verb;

/// First line on a fresh connection.
pub const NAME_PROMPT: &str = "Enter username: /name <yourname>";

/// Reply to anything other than a valid `/name` during naming.
pub const INVALID_NAME_COMMAND: &str = "❌ Invalid command. Use /name <yourname>";

/// Sent to a banned name attempting to register, and before disconnect.
pub const BANNED: &str = "❌ You are banned from this chat.";

/// Sent to a muted user whose plain message was suppressed.
pub const MUTED: &str = "❌ You are muted.";

/// Target user is not online.
pub const USER_NOT_FOUND: &str = "❌ User not found.";

/// History store could not be read.
pub const HISTORY_UNAVAILABLE: &str = "❌ Failed to load history.";

/// History store could not be written.
pub const HISTORY_NOT_SAVED: &str = "❌ Failed to save message to history.";

/// Header for `/history` output.
pub const HISTORY_HEADER: &str = "📜 Chat History:";

/// Header for `/list_users` output.
pub const ONLINE_USERS_HEADER: &str = "👥 Online Users:";

/// Reply to `/exit`.
pub const GOODBYE: &str = "Goodbye!";

/// Over-length input line.
pub const INPUT_TOO_LONG: &str = "❌ Input line too long.";

/// Line carried a control character and was dropped.
pub const ILLEGAL_CHARACTERS: &str = "❌ Control characters are not allowed.";

/// Naming not completed in time.
pub const NAMING_TIMEOUT: &str = "❌ Timed out waiting for /name.";

/// Lines of the `/help` reply.
pub const HELP: [&str; 11] = [
    "Commands:",
    "/name <username> - Set your username",
    "/list_users - Show online users",
    "/pm <user> <msg> - Send a private message",
    "/history - View chat history",
    "/ban <user> - (Admin only) Ban a user",
    "/unban <user> - (Admin only) Unban a user",
    "/mute <user> - (Admin only) Mute a user",
    "/unmute <user> - (Admin only) Unmute a user",
    "/broadcast <msg> - Send a global message",
    "/exit - Leave the chat",
];

/// Join announcement.
pub fn joined(name: &str) -> String {
    format!("✅ {name} joined the chat.")
}

/// Departure announcement.
pub fn left(name: &str) -> String {
    format!("❌ {name} left the chat.")
}

/// Requested name already online.
pub fn name_taken(name: &str) -> String {
    format!("❌ Name {name} is already taken. Choose another with /name <yourname>")
}

/// Requested name contains whitespace.
pub const NAME_HAS_WHITESPACE: &str = "❌ Names cannot contain spaces. Use /name <yourname>";

/// Requested name exceeds the length limit.
pub fn name_too_long(max: usize) -> String {
    format!("❌ Names are limited to {max} characters. Use /name <yourname>")
}

/// Ordinary chat line; also the persisted history format.
pub fn chat(sender: &str, text: &str) -> String {
    format!("{sender}: {text}")
}

/// Marked broadcast.
pub fn broadcast(sender: &str, text: &str) -> String {
    format!("📢 [BROADCAST] {sender}: {text}")
}

/// Private message as delivered to the receiver.
pub fn private_message(sender: &str, text: &str) -> String {
    format!("📩 [PM from {sender}]: {text}")
}

/// Copy of a private message for the admin.
pub fn private_message_mirror(sender: &str, receiver: &str, text: &str) -> String {
    format!("👀 [PM: {sender} -> {receiver}] {text}")
}

/// One row of `/list_users`.
pub fn user_entry(name: &str) -> String {
    format!("- {name}")
}

/// Sent to the banned user before the connection closes.
pub fn banned_by(admin: &str) -> String {
    format!("❌ You have been banned by {admin}.")
}

/// Departure announcement for a banned user.
pub fn was_banned(target: &str, admin: &str) -> String {
    format!("🚫 {target} was banned by {admin}")
}

/// Public unban announcement.
pub fn was_unbanned(target: &str, admin: &str) -> String {
    format!("✅ {target} was unbanned by {admin}")
}

/// Admin confirmation of a mute.
pub fn muted(target: &str) -> String {
    format!("🔇 {target} has been muted.")
}

/// Admin confirmation of an unmute.
pub fn unmuted(target: &str) -> String {
    format!("🔊 {target} has been unmuted.")
}

/// Non-admin tried a privileged command.
pub fn admin_only(verb: Verb) -> String {
    format!("❌ Only the admin can use {}.", verb.keyword())
}

/// Missing or malformed arguments.
pub fn usage(verb: Verb) -> String {
    format!("❌ Usage: {}", verb.usage())
}

/// Flood warning.
pub fn flood_warning(strikes: u8, max: u8) -> String {
    format!("⚠️ Slow down: flooding detected ({strikes}/{max} strikes).")
}

/// Sent before a flood disconnect.
pub const EXCESS_FLOOD: &str = "❌ Excess flood. Disconnecting.";
