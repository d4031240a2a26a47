//! User-facing message copy, in Telegram HTML markup.

use ravon_telegram::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::domain::types::CHECK_MEMBERSHIP;

pub const HELP: &str = "<b>Ravon bot help</b>\n\n\
    Commands:\n\
    /start - get a login code\n\
    /code - get a fresh code\n\
    /help - this message\n\n\
    How to log in:\n\
    1. Send /start\n\
    2. Copy the 6-digit code\n\
    3. Open the web app and enter the code";

pub const ISSUANCE_FAILED: &str = "Something went wrong. Please try again in a moment.";

pub const ISSUANCE_FAILED_EDIT: &str =
    "Could not generate a code.\nPlease send /start to try again.";

pub const NOT_A_MEMBER_ALERT: &str =
    "You have not joined the channel yet. Join it first, then press the button again.";

pub fn join_prompt(first_name: &str, channel_username: &str) -> String {
    format!(
        "Hi, {first_name}!\n\n\
         To use Ravon, join our channel first:\n\n\
         {channel_username}\n\n\
         Once you have joined, press \"Check membership\"."
    )
}

pub fn join_keyboard(channel_username: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::rows(vec![
        InlineKeyboardButton::url("Join the channel", channel_url(channel_username)),
        InlineKeyboardButton::callback("Check membership", CHECK_MEMBERSHIP),
    ])
}

pub fn code_message(first_name: &str, code: &str) -> String {
    format!(
        "Hi, {first_name}!\n\n\
         Your login code:\n\n\
         <code>{code}</code>\n\n\
         The code is valid for 5 minutes.\n\n\
         1. Tap the code to copy it\n\
         2. Open the web app\n\
         3. Enter the code\n\n\
         Do not share the code with anyone."
    )
}

pub fn membership_confirmed(code: &str) -> String {
    format!(
        "Membership confirmed!\n\n\
         Your login code:\n\n\
         <code>{code}</code>\n\n\
         The code is valid for 5 minutes.\n\n\
         1. Tap the code to copy it\n\
         2. Open the web app\n\
         3. Enter the code"
    )
}

pub fn web_app_keyboard(web_app_url: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::rows(vec![InlineKeyboardButton::url(
        "Open the web app",
        web_app_url,
    )])
}

fn channel_url(channel_username: &str) -> String {
    format!("https://t.me/{}", channel_username.trim_start_matches('@'))
}
