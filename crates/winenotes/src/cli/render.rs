use console::style;
use winenotesapp::commands::{CmdMessage, MessageLevel};

pub fn format_message(message: &CmdMessage) -> String {
    match message.level {
        MessageLevel::Info => message.content.clone(),
        MessageLevel::Success => style(&message.content).green().to_string(),
        MessageLevel::Warning => style(&message.content).yellow().to_string(),
        MessageLevel::Error => style(&message.content).red().to_string(),
    }
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        println!("{}", format_message(message));
    }
}
