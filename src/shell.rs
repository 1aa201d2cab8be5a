//! Line-command shell over a headless feed page.

use std::io;
use std::str::FromStr;

use chrono::Local;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::controller::FetchOutcome;
use crate::page::{MemoryPage, PageEvent};
use crate::runtime::{FeedRuntime, FetchCompletion};
use crate::transport::FeedTransport;

pub const HELP: &str = "\
commands:
  check <genre>      check a genre box
  uncheck <genre>    uncheck a genre box
  preset <token>     pick a date preset (tonight, this-week, this-weekend)
  clear-date         drop the date preset
  clear              uncheck every genre
  chip <genre>       click a genre chip in the event list
  back | forward     move through history
  drawer             toggle the filter drawer
  show               print the page state
  wait               wait for outstanding fetches
  help | quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{0}' needs a genre or preset argument")]
    MissingArgument(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Check(String),
    Uncheck(String),
    Preset(String),
    ClearDate,
    Clear,
    Chip(String),
    Back,
    Forward,
    Drawer,
    Show,
    Wait,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ShellError::UnknownCommand(String::new()));
        };
        let mut argument = |command: &'static str| {
            words
                .next()
                .map(str::to_string)
                .ok_or(ShellError::MissingArgument(command))
        };
        match name {
            "check" => Ok(Self::Check(argument("check")?)),
            "uncheck" => Ok(Self::Uncheck(argument("uncheck")?)),
            "preset" => Ok(Self::Preset(argument("preset")?)),
            "chip" => Ok(Self::Chip(argument("chip")?)),
            "clear-date" => Ok(Self::ClearDate),
            "clear" => Ok(Self::Clear),
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            "drawer" => Ok(Self::Drawer),
            "show" => Ok(Self::Show),
            "wait" => Ok(Self::Wait),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

pub struct Shell<T: FeedTransport + 'static> {
    page: MemoryPage,
    runtime: FeedRuntime<T>,
}

impl<T: FeedTransport + 'static> Shell<T> {
    pub fn new(page: MemoryPage, runtime: FeedRuntime<T>) -> Self {
        Self { page, runtime }
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }

    pub fn runtime(&self) -> &FeedRuntime<T> {
        &self.runtime
    }

    /// Reads commands from `input` until `quit` or end of input, printing
    /// replies and fetch results to `output` as they happen. At end of
    /// input outstanding fetches are applied before returning; `quit`
    /// abandons them.
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut quit = false;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let replies = match line.parse::<ShellCommand>() {
                        Ok(ShellCommand::Quit) => {
                            quit = true;
                            break;
                        }
                        Ok(command) => self.execute(command).await,
                        Err(e) => vec![e.to_string()],
                    };
                    write_lines(&mut output, &replies).await?;
                }
                completion = self.runtime.next_completion() => {
                    if let Some(reply) = self.on_completion(completion) {
                        write_lines(&mut output, &[reply]).await?;
                    }
                }
            }
        }

        if quit {
            self.runtime.cancel();
        } else {
            let replies: Vec<String> = self
                .runtime
                .settle()
                .await
                .into_iter()
                .filter_map(outcome_line)
                .collect();
            write_lines(&mut output, &replies).await?;
        }
        output.flush().await
    }

    /// Runs one command and returns the lines to print.
    pub async fn execute(&mut self, command: ShellCommand) -> Vec<String> {
        match command {
            ShellCommand::Check(slug) => self.set_genre(&slug, true),
            ShellCommand::Uncheck(slug) => self.set_genre(&slug, false),
            ShellCommand::Preset(token) => {
                let reply = format!("unknown preset '{}'", token);
                self.send(PageEvent::PresetClicked { token }, reply)
            }
            ShellCommand::ClearDate => self.send(PageEvent::ClearDateClicked, String::new()),
            ShellCommand::Clear => {
                if self.page.snapshot().has_clear_genres {
                    self.send(PageEvent::ClearGenresClicked, String::new())
                } else {
                    vec!["page has no clear-genres button".to_string()]
                }
            }
            ShellCommand::Chip(slug) => {
                let reply = format!("no '{}' chip in the current list", slug);
                self.send(PageEvent::ChipClicked { slug }, reply)
            }
            ShellCommand::Back => match self.page.back() {
                Some(event) => self.send(event, String::new()),
                None => vec!["already at the oldest entry".to_string()],
            },
            ShellCommand::Forward => match self.page.forward() {
                Some(event) => self.send(event, String::new()),
                None => vec!["already at the newest entry".to_string()],
            },
            ShellCommand::Drawer => {
                self.runtime.dispatch(PageEvent::DrawerToggled);
                match self.page.snapshot().sidebar_open {
                    Some(true) => vec!["filters open".to_string()],
                    Some(false) => vec!["filters closed".to_string()],
                    None => vec!["page has no filter drawer".to_string()],
                }
            }
            ShellCommand::Show => self.show(),
            ShellCommand::Wait => self
                .runtime
                .settle()
                .await
                .into_iter()
                .filter_map(outcome_line)
                .collect(),
            ShellCommand::Help => HELP.lines().map(str::to_string).collect(),
            ShellCommand::Quit => Vec::new(),
        }
    }

    /// Applies a finished fetch; returns a line to print unless the result
    /// was stale.
    pub fn on_completion(&mut self, completion: FetchCompletion) -> Option<String> {
        outcome_line(self.runtime.apply(completion))
    }

    fn set_genre(&mut self, slug: &str, checked: bool) -> Vec<String> {
        let current = self
            .page
            .snapshot()
            .genres
            .into_iter()
            .find(|genre| genre.slug == slug)
            .map(|genre| genre.checked);
        match current {
            None => vec![format!("no '{}' genre on this page", slug)],
            Some(state) if state == checked => {
                let verb = if checked { "checked" } else { "unchecked" };
                vec![format!("'{}' is already {}", slug, verb)]
            }
            Some(_) => match self.page.click_genre(slug) {
                Some(event) => self.send(event, String::new()),
                None => Vec::new(),
            },
        }
    }

    /// Dispatches `event`; prints the address bar when a fetch started and
    /// `ignored` otherwise.
    fn send(&mut self, event: PageEvent, ignored: String) -> Vec<String> {
        match self.runtime.dispatch(event) {
            Some(_) => vec![format!("loading {}", self.page.snapshot().url())],
            None if ignored.is_empty() => Vec::new(),
            None => vec![ignored],
        }
    }

    fn show(&self) -> Vec<String> {
        let snap = self.page.snapshot();
        let state = self.runtime.controller().state();
        let mut out = vec![format!("url:     {}", snap.url())];

        let count = snap.count_text.as_deref().unwrap_or("");
        let loading = if snap.loading { " (loading)" } else { "" };
        out.push(format!("results: {}{}", count, loading));

        let genres = snap.checked_genres();
        out.push(format!(
            "genres:  {}",
            if genres.is_empty() {
                "any".to_string()
            } else {
                genres.join(", ")
            }
        ));

        match state.date_range {
            Some(preset) => {
                let (start, end) = preset.window(Local::now().naive_local());
                out.push(format!(
                    "dates:   {} ({} to {})",
                    preset.label(),
                    start.format("%a %d %b %H:%M"),
                    end.format("%a %d %b %H:%M")
                ));
            }
            None => out.push("dates:   any".to_string()),
        }

        let chips: Vec<&str> = self
            .runtime
            .controller()
            .rendered()
            .chips()
            .iter()
            .map(|chip| chip.slug.as_str())
            .collect();
        if !chips.is_empty() {
            out.push(format!("chips:   {}", chips.join(", ")));
        }
        if let Some(open) = snap.sidebar_open {
            out.push(format!("drawer:  {}", if open { "open" } else { "closed" }));
        }
        out
    }
}

fn outcome_line(outcome: FetchOutcome) -> Option<String> {
    match outcome {
        FetchOutcome::Applied { count } => Some(crate::feed::count_label(count)),
        FetchOutcome::Failed => Some("refresh failed, keeping the current list".to_string()),
        FetchOutcome::Stale => None,
    }
}

async fn write_lines<W: AsyncWrite + Unpin>(output: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    Ok(())
}
