use std::io::{self, Write};

use crate::models::{CLIConfig, MoodReply};

pub fn banner(cfg: &CLIConfig) {
    println!("Microtips Debug CLI");
    println!("API: {}  User: {}", cfg.base_url, cfg.user_id);
    if cfg.token.is_none() {
        println!("No token set, requests will be rejected. Use /token <token>.");
    }
    println!("Type a mood (or /sad), /help for commands.");
}

pub fn prompt() {
    print!("mood> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                 Show commands");
    println!("  /exit | /quit          Exit");
    println!("  /sad                   Send the sad mood");
    println!("  /user <id>             Set user id");
    println!("  /token <token>         Update bearer token");
    println!("  /base <url>            Update base URL");
    println!("  /health                Show service health");
    println!("  /config                Show current config");
    println!("Any other line is sent as the mood.");
}

pub fn reply(reply: &MoodReply) {
    match reply {
        MoodReply::Tip(tip) => {
            println!(
                "[{}] {} -> {}",
                tip.timestamp,
                tip.user_id.as_deref().unwrap_or("-"),
                tip.tip
            );
        }
        MoodReply::NoContent => println!("(204) no tip for that mood"),
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    println!("  user: {}", cfg.user_id);
    println!("  token: {}", if cfg.token.is_some() { "set" } else { "unset" });
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
