use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cs_core::{Campaign, Contact, CoreError, Template};
use cs_session::{Notice, SessionConfig, SessionRunner};

const HELP: &str = "\
Console Commands:
  contact add <name> | <phone> [| <company>]   Add a contact
  template add <name> | <body>                 Save a script template
  queue add <contact#> <template#>             Queue a call
  queue clear                                  Remove all queued calls
  contacts | templates | queue                 List entries
  run                                          Run the queued calls
  stop                                         Stop after the current call
  status                                       Show campaign status
  help                                         Show this help
  quit                                         Exit

Placeholders: {{name}}, {{company}}, {{phone}}";

pub async fn run(pace_ms: u64, from: Option<&Path>) -> Result<(), String> {
    let campaign = match from {
        Some(path) => super::load_campaign(path)?,
        None => Campaign::new(),
    };
    let mut console = Console::new(campaign, SessionConfig::default().with_pace_millis(pace_ms));

    println!("  {} Build your first campaign.", "Ready.".bold());
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break; // EOF
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match console.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
                if is_quit(input) {
                    break;
                }
            }
            Err(e) => {
                println!("{}\n", e.yellow());
            }
        }
    }

    console.wait().await;
    Ok(())
}

struct ActiveSession {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Interactive campaign editor. Sessions run on a background task so the
/// console keeps taking commands while calls are placed.
struct Console {
    campaign: Arc<Mutex<Campaign>>,
    runner: Arc<SessionRunner>,
    session: Option<ActiveSession>,
}

impl Console {
    fn new(campaign: Campaign, config: SessionConfig) -> Self {
        Self {
            campaign: Arc::new(Mutex::new(campaign)),
            runner: Arc::new(SessionRunner::new(config)),
            session: None,
        }
    }

    fn campaign(&self) -> MutexGuard<'_, Campaign> {
        self.campaign.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle one line of input.
    fn process(&mut self, input: &str) -> Result<String, String> {
        let (cmd, rest) = split_word(input.trim());

        match cmd.as_str() {
            "contact" => self.do_contact(rest),
            "contacts" => Ok(self.list_contacts()),
            "template" => self.do_template(rest),
            "templates" => Ok(self.list_templates()),
            "queue" => self.do_queue(rest),
            "run" => Ok(self.do_run()),
            "stop" => Ok(self.do_stop()),
            "status" => Ok(self.do_status()),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" if rest.is_empty() => {
                self.do_stop();
                Ok("Goodbye!".to_string())
            }
            "quit" | "q" => Err("usage: quit".to_string()),
            other => Err(format!("unknown command: {other} (type 'help')")),
        }
    }

    /// Wait for a running session to finish.
    async fn wait(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Err(e) = session.handle.await {
            tracing::warn!(error = %e, "session task failed");
        }
    }

    fn do_contact(&mut self, rest: &str) -> Result<String, String> {
        const USAGE: &str = "usage: contact add <name> | <phone> [| <company>]";

        let (sub, args) = split_word(rest);
        if sub != "add" {
            return Err(USAGE.to_string());
        }
        let fields: Vec<&str> = args.split('|').map(str::trim).collect();
        let contact = match fields.as_slice() {
            [name, phone] => Contact::new(*name, *phone),
            [name, phone, company] => Contact::new(*name, *phone).with_company(*company),
            _ => return Err(USAGE.to_string()),
        };

        let mut campaign = self.campaign();
        let pos = campaign.add_contact(contact).map_err(|e| e.to_string())?;
        Ok(format!(
            "Contact added: {}. {}",
            pos + 1,
            campaign.contacts()[pos]
        ))
    }

    fn do_template(&mut self, rest: &str) -> Result<String, String> {
        const USAGE: &str = "usage: template add <name> | <body>";

        let (sub, args) = split_word(rest);
        if sub != "add" {
            return Err(USAGE.to_string());
        }
        let Some((name, body)) = args.split_once('|') else {
            return Err(USAGE.to_string());
        };

        let mut campaign = self.campaign();
        let pos = campaign
            .add_template(Template::new(name, body))
            .map_err(|e| e.to_string())?;
        Ok(format!(
            "Template saved: {}. {}",
            pos + 1,
            campaign.templates()[pos]
        ))
    }

    fn do_queue(&mut self, rest: &str) -> Result<String, String> {
        let (sub, args) = split_word(rest);
        match sub.as_str() {
            "" => Ok(self.list_queue()),
            "add" => {
                const USAGE: &str = "usage: queue add <contact#> <template#>";
                let numbers: Vec<&str> = args.split_whitespace().collect();
                let [contact, template] = numbers.as_slice() else {
                    return Err(USAGE.to_string());
                };
                let contact = parse_position(contact).ok_or(USAGE)?;
                let template = parse_position(template).ok_or(USAGE)?;

                let mut campaign = self.campaign();
                campaign
                    .enqueue(contact, template)
                    .map_err(|e| describe_queue_error(&e))?;
                let line = campaign.queue_lines().pop().unwrap_or_default();
                Ok(format!("Call added to queue: {line}"))
            }
            "clear" => {
                let removed = self.campaign().clear_queue();
                Ok(format!("Queue cleared ({removed} calls removed)."))
            }
            _ => Err("usage: queue [add <contact#> <template#> | clear]".to_string()),
        }
    }

    fn do_run(&mut self) -> String {
        let mut out = super::echo;
        let plan = {
            let mut campaign = self.campaign();
            match self.runner.begin(&mut campaign, &mut out) {
                Ok(plan) => plan,
                // The refusal was already printed as a notice.
                Err(_) => return String::new(),
            }
        };

        out(Notice::plain(format!(
            "Starting automated session ({} calls).",
            plan.len()
        )));

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let campaign = Arc::clone(&self.campaign);
        let runner = Arc::clone(&self.runner);
        let handle = tokio::spawn(async move {
            let mut out = super::echo;
            let report = runner.execute(plan, &mut out, &token).await;
            let mut campaign = campaign.lock().unwrap_or_else(PoisonError::into_inner);
            runner.finish(&mut campaign, &report, &mut out);
        });

        self.session = Some(ActiveSession { handle, cancel });
        String::new()
    }

    fn do_stop(&mut self) -> String {
        match &self.session {
            Some(session) if !session.handle.is_finished() => {
                session.cancel.cancel();
                "Stopping after the current call.".to_string()
            }
            _ => "No session is running.".to_string(),
        }
    }

    fn do_status(&self) -> String {
        let campaign = self.campaign();
        format!(
            "Contacts: {}\nTemplates: {}\nQueued calls: {}\nSession: {}\nPace: {}ms",
            campaign.contacts().len(),
            campaign.templates().len(),
            campaign.queue().len(),
            if campaign.is_running() { "running" } else { "idle" },
            self.runner.config().pace.as_millis()
        )
    }

    fn list_contacts(&self) -> String {
        let campaign = self.campaign();
        numbered(campaign.contacts().iter().map(|c| c.to_string()))
    }

    fn list_templates(&self) -> String {
        let campaign = self.campaign();
        numbered(campaign.templates().iter().map(|t| t.to_string()))
    }

    fn list_queue(&self) -> String {
        let lines = self.campaign().queue_lines();
        if lines.is_empty() {
            "No items yet.".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Split off the first word, lowercased.
fn split_word(input: &str) -> (String, &str) {
    let (word, rest) = input.split_once(' ').unwrap_or((input, ""));
    (word.to_lowercase(), rest.trim())
}

/// Whether the line is a bare `quit` or `q`.
fn is_quit(input: &str) -> bool {
    let (cmd, rest) = split_word(input.trim());
    matches!(cmd.as_str(), "quit" | "q") && rest.is_empty()
}

/// Parse a one-based console position into a zero-based index.
fn parse_position(s: &str) -> Option<usize> {
    s.trim_start_matches('#')
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
}

fn describe_queue_error(err: &CoreError) -> String {
    match err {
        CoreError::ContactOutOfRange { index, count } => {
            format!("no contact #{} ({count} contacts)", index + 1)
        }
        CoreError::TemplateOutOfRange { index, count } => {
            format!("no template #{} ({count} templates)", index + 1)
        }
        other => other.to_string(),
    }
}

fn numbered(items: impl Iterator<Item = String>) -> String {
    let lines: Vec<String> = items
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect();
    if lines.is_empty() {
        "No items yet.".to_string()
    } else {
        lines.join("\n")
    }
}
