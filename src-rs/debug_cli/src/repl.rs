use std::io;

use crate::client::HTTPClient;
use crate::models::{CLIConfig, MoodRequest};
use crate::render;

const SAD_MOOD: &str = "😢";

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt();
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            self.send(&line);
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "sad" => self.send(SAD_MOOD),
            "user" => {
                if rest.is_empty() {
                    render::info(&format!("user: {}", self.config.user_id));
                } else {
                    self.config.user_id = rest.to_string();
                    render::info("user updated");
                }
            }
            "config" => render::config(&self.config),
            "health" => match self.client.health() {
                Ok(value) => render::info(&value.to_string()),
                Err(err) => render::error(&err),
            },
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    self.config.base_url = rest.to_string();
                    self.rebuild_client("base url updated");
                }
            }
            "token" => {
                if rest.is_empty() {
                    render::error("usage: /token <token>");
                } else {
                    self.config.token = Some(rest.to_string());
                    self.rebuild_client("token updated");
                }
            }
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn rebuild_client(&mut self, msg: &str) {
        match HTTPClient::new(&self.config.base_url, self.config.token.clone()) {
            Ok(client) => {
                self.client = client;
                render::info(msg);
            }
            Err(err) => render::error(&err),
        }
    }

    fn send(&self, mood: &str) {
        let req = MoodRequest {
            user_id: self.config.user_id.clone(),
            mood: mood.to_string(),
        };
        match self.client.send_mood(&req) {
            Ok(reply) => render::reply(&reply),
            Err(err) => render::error(&err),
        }
    }
}
