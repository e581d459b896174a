//! # Interactive Shell
//!
//! Reads one command per line, runs it against [`AppState`], and prints
//! the result as text or, with `--json`, one JSON document per line.
//!
//! ## Commands
//! ```text
//! help                         this list
//! status                       price list state, open tab, cart size
//! show                         quote for the open tab
//! options                      selectable values, disabled ones marked
//! tab hmi|plc                  switch product category
//! set <field> <value>          edit the selection (size, voltage, output,
//!                              ai, ao, relay, sd, lan | model, sd)
//! confirm                      add the selection to the cart
//! cart                         list the cart
//! qty <line> <n>               set the quantity of a cart line
//! remove <part-number>         remove a cart line
//! clear                        empty the cart
//! order <name> | <company>     compose the order message and link
//! reload                       re-read the price list
//! quit                         leave
//! ```

use pacs_core::{Money, Selection};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands::cart::{CartResponse, ConfirmResponse};
use crate::commands::catalog::StatusResponse;
use crate::commands::configure::{OptionsResponse, QuoteResponse};
use crate::commands::order::OrderResponse;
use crate::commands::{cart, catalog, configure, order};
use crate::error::ApiError;
use crate::state::{AppState, CatalogStatus};

pub const HELP: &str = "\
help                         this list
status                       price list state, open tab, cart size
show                         quote for the open tab
options                      selectable values, disabled ones marked
tab hmi|plc                  switch product category
set <field> <value>          edit the selection
confirm                      add the selection to the cart
cart                         list the cart
qty <line> <n>               set the quantity of a cart line
remove <part-number>         remove a cart line
clear                        empty the cart
order <name> | <company>     compose the order message and link
reload                       re-read the price list
quit                         leave";

// =============================================================================
// Parsing
// =============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Status,
    Show,
    Options,
    Tab(String),
    Set { field: String, value: String },
    Confirm,
    Cart,
    Qty { line: String, quantity: String },
    Remove(String),
    Clear,
    Order { name: String, company: String },
    Reload,
    Quit,
}

/// Parses a shell line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, ApiError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => ReplCommand::Help,
        "status" => ReplCommand::Status,
        "show" => ReplCommand::Show,
        "options" => ReplCommand::Options,
        "tab" => ReplCommand::Tab(required(rest, "tab hmi|plc")?.to_string()),
        "set" => {
            let (field, value) = two_args(rest, "set <field> <value>")?;
            ReplCommand::Set { field, value }
        }
        "confirm" => ReplCommand::Confirm,
        "cart" => ReplCommand::Cart,
        "qty" => {
            let (line, quantity) = two_args(rest, "qty <line> <n>")?;
            ReplCommand::Qty { line, quantity }
        }
        "remove" => ReplCommand::Remove(required(rest, "remove <part-number>")?.to_string()),
        "clear" => ReplCommand::Clear,
        "order" => {
            // blank halves are left for the order validation to report
            let (name, company) = rest.split_once('|').unwrap_or((rest, ""));
            ReplCommand::Order {
                name: name.trim().to_string(),
                company: company.trim().to_string(),
            }
        }
        "reload" => ReplCommand::Reload,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(ApiError::not_found("Command", other)),
    };
    Ok(Some(command))
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str, ApiError> {
    if rest.is_empty() {
        Err(ApiError::validation(format!("usage: {}", usage)))
    } else {
        Ok(rest)
    }
}

/// First word, then everything after it. Values may contain spaces
/// (`set model PACs 5250`).
fn two_args(rest: &str, usage: &str) -> Result<(String, String), ApiError> {
    match rest.split_once(char::is_whitespace) {
        Some((first, second)) if !second.trim().is_empty() => {
            Ok((first.to_string(), second.trim().to_string()))
        }
        _ => Err(ApiError::validation(format!("usage: {}", usage))),
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// What a command produced.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Help { help: &'static str },
    Status(StatusResponse),
    Quote(Box<QuoteResponse>),
    Options(OptionsResponse),
    Confirmed(ConfirmResponse),
    Cart(CartResponse),
    Order(OrderResponse),
    Catalog(CatalogStatus),
}

/// Runs one command. `Quit` is handled by the loop and never reaches here.
pub async fn dispatch(state: &AppState, command: ReplCommand) -> Result<Response, ApiError> {
    let response = match command {
        ReplCommand::Help => Response::Help { help: HELP },
        ReplCommand::Status => Response::Status(catalog::status(&state.catalog, &state.cart, &state.session)),
        ReplCommand::Show => Response::Quote(Box::new(configure::show(&state.catalog, &state.session))),
        ReplCommand::Options => Response::Options(configure::options(&state.session)),
        ReplCommand::Tab(tab) => Response::Quote(Box::new(configure::switch_tab(
            &state.catalog,
            &state.session,
            &tab,
        )?)),
        ReplCommand::Set { field, value } => Response::Quote(Box::new(configure::set_field(
            &state.catalog,
            &state.session,
            &field,
            &value,
        )?)),
        ReplCommand::Confirm => {
            Response::Confirmed(cart::confirm(&state.catalog, &state.session, &state.cart)?)
        }
        ReplCommand::Cart => Response::Cart(cart::get_cart(&state.cart)),
        ReplCommand::Qty { line, quantity } => {
            Response::Cart(cart::update_quantity(&state.cart, &line, &quantity)?)
        }
        ReplCommand::Remove(identity) => Response::Cart(cart::remove_from_cart(&state.cart, &identity)?),
        ReplCommand::Clear => Response::Cart(cart::clear_cart(&state.cart)),
        ReplCommand::Order { name, company } => {
            Response::Order(order::place_order(&state.cart, &state.config, &name, &company)?)
        }
        ReplCommand::Reload => Response::Catalog(catalog::reload(state).await?),
        ReplCommand::Quit => return Err(ApiError::internal("quit is handled by the shell loop")),
    };
    Ok(response)
}

// =============================================================================
// Text Rendering
// =============================================================================

fn price(amount: Money, currency: &str) -> String {
    format!("{} {}", amount, currency)
}

fn render_catalog(status: &CatalogStatus) -> String {
    match status {
        CatalogStatus::Unconfigured => "price list: not configured".to_string(),
        CatalogStatus::Loading => "price list: loading".to_string(),
        CatalogStatus::Failed { message } => format!("price list: failed ({})", message),
        CatalogStatus::Ready { rows, unbound_roles } if unbound_roles.is_empty() => {
            format!("price list: ready, {} rows", rows)
        }
        CatalogStatus::Ready { rows, unbound_roles } => format!(
            "price list: ready, {} rows, unpriced extras: {}",
            rows,
            unbound_roles.join(", ")
        ),
    }
}

fn render_quote(quote: &QuoteResponse, currency: &str) -> String {
    let mut out = String::new();
    if !quote.accepted {
        out.push_str("(value not available for this selection, unchanged)\n");
    }
    let heading = match quote.selection {
        Selection::Hmi(_) => "HMI",
        Selection::Plc(_) => "PLC",
    };
    out.push_str(&format!("[{}] {}\n", heading, quote.part_number));
    out.push_str(&format!("price: {}\n", price(quote.unit_price, currency)));
    if let Some(breakdown) = &quote.breakdown {
        out.push_str(&format!("  base: {}\n", price(breakdown.base, currency)));
        for line in &breakdown.extras {
            out.push_str(&format!(
                "  {} x{}: {}\n",
                line.role,
                line.quantity,
                price(line.line_total, currency)
            ));
        }
    }
    if !quote.description.is_empty() {
        out.push_str(&format!("description:{}\n", quote.description));
    }
    out.push_str(&format!("options: {}\n", quote.options_summary));
    if !matches!(quote.catalog, CatalogStatus::Ready { .. }) {
        out.push_str(&render_catalog(&quote.catalog));
        out.push('\n');
    }
    out.trim_end().to_string()
}

fn render_options(options: &OptionsResponse) -> String {
    options
        .fields
        .iter()
        .map(|field| {
            let choices: Vec<String> = field
                .choices
                .iter()
                .map(|c| {
                    let mut text = c.value.clone();
                    if c.label != c.value {
                        text.push_str(&format!(" ({})", c.label));
                    }
                    if c.selected {
                        text = format!("[{}]", text);
                    }
                    if !c.enabled {
                        text.push_str(" -");
                    }
                    text
                })
                .collect();
            let lock = if field.editable { "" } else { " (fixed)" };
            format!("{}{}: {}", field.field, lock, choices.join("  "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cart(cart: &CartResponse, currency: &str) -> String {
    if cart.items.is_empty() {
        return "cart is empty".to_string();
    }
    let mut out = String::new();
    for (index, item) in cart.items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}] x{} @ {} = {}\n",
            index + 1,
            item.identity,
            item.category,
            item.quantity,
            price(item.unit_price, currency),
            price(item.line_total(), currency)
        ));
    }
    out.push_str(&format!(
        "{} lines, {} units, total {}",
        cart.totals.line_count,
        cart.totals.total_quantity,
        price(cart.totals.total, currency)
    ));
    out
}

/// Human-readable form of a response.
pub fn render(response: &Response, currency: &str) -> String {
    match response {
        Response::Help { help } => help.to_string(),
        Response::Status(status) => format!(
            "{}\ntab: {}\ncart lines: {}",
            render_catalog(&status.catalog),
            status.tab,
            status.cart_lines
        ),
        Response::Quote(quote) => render_quote(quote, currency),
        Response::Options(options) => render_options(options),
        Response::Confirmed(confirmed) => {
            let what = match confirmed.outcome {
                pacs_core::AddOutcome::Inserted => "added".to_string(),
                pacs_core::AddOutcome::Merged(quantity) => format!("now x{}", quantity),
            };
            format!("{} {}\n{}", confirmed.identity, what, render_cart(&confirmed.cart, currency))
        }
        Response::Cart(cart) => render_cart(cart, currency),
        Response::Order(order) => format!("{}\n\n{}", order.message, order.link),
        Response::Catalog(status) => render_catalog(status),
    }
}

pub fn render_error(err: &ApiError) -> String {
    format!("error [{}]: {}", err.code.as_str(), err.message)
}

// =============================================================================
// Loop
// =============================================================================

/// The shell: state plus output mode.
#[derive(Debug)]
pub struct Shell {
    pub state: AppState,
    pub json: bool,
}

impl Shell {
    pub fn new(state: AppState, json: bool) -> Self {
        Shell { state, json }
    }

    /// Runs one line and returns what to print, or `None` to stop.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let result = match parse_command(line) {
            Ok(None) => return Some(String::new()),
            Ok(Some(ReplCommand::Quit)) => return None,
            Ok(Some(command)) => dispatch(&self.state, command).await,
            Err(e) => Err(e),
        };

        let output = match (result, self.json) {
            (Ok(response), false) => render(&response, &self.state.config.display.currency_label),
            (Err(err), false) => render_error(&err),
            (Ok(response), true) => to_json(&response),
            (Err(err), true) => to_json(&err),
        };
        Some(output)
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        if !self.json {
            output.write_all(b"PACs quoter. Type 'help' for commands.\n").await?;
            output.flush().await?;
        }

        while let Some(line) = lines.next_line().await? {
            debug!(line = %line, "shell input");
            match self.handle_line(&line).await {
                Some(text) if text.is_empty() => {}
                Some(text) => {
                    output.write_all(text.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    output.flush().await?;
                }
                None => break,
            }
        }

        info!("shell closed");
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!(r#"{{"code":"INTERNAL","message":"{}"}}"#, e))
}
