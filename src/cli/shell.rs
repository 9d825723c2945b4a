//! Line-oriented interactive session
//!
//! Each input line is one user action against the session. Items are
//! addressed by id prefix as shown in `tree`. Which headings are collapsed is
//! display state of the shell, not part of the cost structures.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::application::{report, Session};
use crate::cli::error::{CliError, CliResult};
use crate::domain::{CostType, Horizon, ItemId, LineItem, Side};

pub const HELP: &str = "\
commands:
  heading <side> <type> <name>                add a category
  item <side> <type> <heading|-> <name> <cost> add a cost entry
  edit <side> <id> <name> [cost]              rename / change cost
  rm <side> <id>                              delete (headings take children along)
  copy <side> <id>                            copy category or item to the other side
  collapse <side> <id>                        toggle showing a category's items
  horizon <12|36|60>   currency <code>   growth <percent>
  tree [side]   summary   table   chart [step]   help   quit
sides: office, coworking   types: opex, capex, startup
quote names containing spaces: \"Desk rent\"";

/// Whether the shell should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<W: Write> {
    session: Session,
    collapsed: HashSet<ItemId>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self {
            session,
            collapsed: HashSet::new(),
            out,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Read and execute lines until EOF or `quit`.
    ///
    /// Bad commands are reported on the output and do not stop the loop.
    pub fn run<R: BufRead>(&mut self, input: R, prompt: bool) -> CliResult<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(self.out, "spacecost> ").map_err(write_err)?;
                self.out.flush().map_err(write_err)?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.map_err(|e| CliError::io("read input", e))?;
            match self.execute(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(self.out, "error: {}", e).map_err(write_err)?,
            }
        }
        Ok(())
    }

    /// Execute a single command line.
    pub fn execute(&mut self, line: &str) -> CliResult<Flow> {
        let tokens = tokenize(line)?;
        let Some((command, args)) = tokens.split_first() else {
            return Ok(Flow::Continue);
        };
        debug!("shell command: {} {:?}", command, args);
        match command.as_str() {
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => self.say(HELP)?,
            "heading" => self.heading(args)?,
            "item" => self.item(args)?,
            "edit" => self.edit(args)?,
            "rm" | "delete" => self.remove(args)?,
            "copy" => self.copy(args)?,
            "collapse" => self.collapse(args)?,
            "horizon" => {
                let months = parse_arg::<u32>(arg(args, 0, "months")?, "months")?;
                let horizon = Horizon::from_months(months)
                    .map_err(|e| CliError::InvalidArgs(e.to_string()))?;
                self.session.set_horizon(horizon);
            }
            "currency" => self.session.set_currency(arg(args, 0, "code")?),
            "growth" => {
                let rate = parse_arg::<f64>(arg(args, 0, "percent")?, "percent")?;
                self.session.set_growth_rate(rate);
            }
            "tree" => self.tree(args)?,
            "summary" => {
                let text = report::summary(&self.session);
                self.say(text.trim_end())?
            }
            "table" => {
                let text = report::table(&self.session);
                self.say(text.trim_end())?
            }
            "chart" => {
                let step = match args.first() {
                    Some(s) => parse_arg::<usize>(s, "step")?,
                    None => 1,
                };
                let text = report::chart(&self.session, step);
                self.say(text.trim_end())?
            }
            other => {
                return Err(CliError::Usage(format!(
                    "unknown command: {other} (try 'help')"
                )))
            }
        }
        Ok(Flow::Continue)
    }

    fn heading(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let cost_type = parse_type(arg(args, 1, "type")?)?;
        let name = args.get(2).map(String::as_str).unwrap_or_default();
        match self.session.add_heading(side, cost_type, name) {
            Some(id) => self.say(&format!("added heading [{}]", id.short())),
            None => Ok(()),
        }
    }

    fn item(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let cost_type = parse_type(arg(args, 1, "type")?)?;
        let parent = match arg(args, 2, "heading")? {
            "-" => None,
            prefix => Some(self.resolve(side, prefix)?),
        };
        let name = args.get(3).map(String::as_str).unwrap_or_default();
        let cost = args.get(4).map(String::as_str).unwrap_or_default();
        match self.session.add_item(side, cost_type, parent, name, cost) {
            Some(id) => self.say(&format!("added item [{}]", id.short())),
            None => Ok(()),
        }
    }

    fn edit(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let id = self.resolve(side, arg(args, 1, "id")?)?;
        let name = args.get(2).map(String::as_str).unwrap_or_default();
        // without a cost argument the entry keeps its current cost
        let cost = match args.get(3) {
            Some(cost) => cost.clone(),
            None => self
                .session
                .structure(side)
                .get(id)
                .and_then(LineItem::cost)
                .map(|c| c.to_string())
                .unwrap_or_default(),
        };
        self.session.edit_item(side, id, name, &cost);
        Ok(())
    }

    fn remove(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let id = self.resolve(side, arg(args, 1, "id")?)?;
        let removed = self.session.remove_item(side, id);
        self.collapsed.remove(&id);
        self.say(&format!("removed {} item(s)", removed))
    }

    fn copy(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let id = self.resolve(side, arg(args, 1, "id")?)?;
        let is_heading = self
            .session
            .structure(side)
            .get(id)
            .is_some_and(|i| i.is_heading());
        let copied = if is_heading {
            self.session.copy_category(side, id)
        } else {
            self.session.copy_item(side, id)
        };
        self.say(&format!(
            "copied {} item(s) to {}",
            copied.len(),
            side.other()
        ))
    }

    fn collapse(&mut self, args: &[String]) -> CliResult<()> {
        let side = parse_side(arg(args, 0, "side")?)?;
        let id = self.resolve(side, arg(args, 1, "id")?)?;
        if !self.collapsed.remove(&id) {
            self.collapsed.insert(id);
        }
        Ok(())
    }

    fn tree(&mut self, args: &[String]) -> CliResult<()> {
        let sides = match args.first() {
            Some(s) => vec![parse_side(s)?],
            None => vec![Side::Office, Side::Coworking],
        };
        let collapsed: Vec<ItemId> = self.collapsed.iter().copied().collect();
        for side in sides {
            let tree = report::item_tree(&self.session, side, &collapsed);
            self.say(tree.to_string().trim_end())?;
        }
        Ok(())
    }

    fn resolve(&self, side: Side, prefix: &str) -> CliResult<ItemId> {
        self.session
            .resolve(side, prefix)
            .map_err(|e| CliError::InvalidArgs(e.to_string()))
    }

    fn say(&mut self, msg: &str) -> CliResult<()> {
        writeln!(self.out, "{}", msg).map_err(write_err)
    }
}

fn write_err(e: io::Error) -> CliError {
    CliError::io("write output", e)
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> CliResult<&'a str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing <{name}>")))
}

fn parse_arg<T: std::str::FromStr>(raw: &str, name: &str) -> CliResult<T> {
    raw.parse::<T>()
        .map_err(|_| CliError::InvalidArgs(format!("invalid {name}: {raw}")))
}

fn parse_side(raw: &str) -> CliResult<Side> {
    raw.parse::<Side>()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))
}

fn parse_type(raw: &str) -> CliResult<CostType> {
    raw.parse::<CostType>()
        .map_err(|e| CliError::InvalidArgs(e.to_string()))
}

/// Split a line on whitespace; double quotes group words, `""` is an empty token.
pub fn tokenize(line: &str) -> CliResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if in_quotes {
        return Err(CliError::InvalidArgs("unterminated quote".into()));
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    Ok(tokens)
}
