//! A stand-in engine process for exercising the bridge without a real
//! formula engine.
//!
//! Speaks the cellwire protocol: one JSON `Request` per line on stdin, one
//! JSON `Response` per line on stdout, diagnostics on stderr (never stdout).
//! Formulas are stored verbatim in memory and never parsed or evaluated; the
//! "value" reported for an edit is a literal reading of the input text.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use cellwire_core::CellAddress;
use cellwire_protocol::{CellValue, Command, Request, Response, ResponseData, ResponseResult};

fn main() {
    eprintln!("[cellwire-stub-engine] starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut cells: BTreeMap<String, String> = BTreeMap::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("[cellwire-stub-engine] stdin read error: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("[cellwire-stub-engine] JSON parse error: {e}");
                // Answer with id=0 since the request id is unknown
                let resp = Response {
                    id: 0,
                    result: ResponseResult::Error {
                        message: format!("JSON parse error: {e}"),
                    },
                };
                let _ = writeln!(out, "{}", serde_json::to_string(&resp).unwrap());
                let _ = out.flush();
                continue;
            }
        };

        let is_shutdown = matches!(request.command, Command::Shutdown);
        let response = handle_command(&mut cells, request);
        let _ = writeln!(out, "{}", serde_json::to_string(&response).unwrap());
        let _ = out.flush();

        if is_shutdown {
            eprintln!("[cellwire-stub-engine] shutdown, exiting");
            return;
        }
    }

    eprintln!("[cellwire-stub-engine] stdin closed, exiting");
}

fn handle_command(cells: &mut BTreeMap<String, String>, request: Request) -> Response {
    let id = request.id;

    let result = match request.command {
        Command::GetFormula { address } => match canonical(&address) {
            Ok(address) => {
                let formula = cells.get(&address).cloned().unwrap_or_default();
                ResponseResult::Ok {
                    data: Some(ResponseData::Formula { formula }),
                }
            }
            Err(message) => ResponseResult::Error { message },
        },

        Command::SetFormula { address, formula } => match canonical(&address) {
            Ok(address) => {
                let value = literal_value(&formula);
                cells.insert(address.clone(), formula);

                let mut updates = BTreeMap::new();
                updates.insert(address, value);
                ResponseResult::Ok {
                    data: Some(ResponseData::Updates { updates }),
                }
            }
            Err(message) => ResponseResult::Error { message },
        },

        Command::Shutdown => ResponseResult::Ok { data: None },
    };

    Response { id, result }
}

/// Validate and canonicalize an address, as a real engine would.
fn canonical(address: &str) -> Result<String, String> {
    address
        .parse::<CellAddress>()
        .map(|a| a.to_string())
        .map_err(|e| e.to_string())
}

/// A literal, non-evaluating reading of an input. Anything that looks like a
/// formula comes back as `Empty` because this stub does not compute.
fn literal_value(formula: &str) -> CellValue {
    if formula.is_empty() || formula.starts_with('=') {
        CellValue::Empty
    } else if let Ok(n) = formula.parse::<f64>() {
        CellValue::Number(n)
    } else {
        CellValue::Text(formula.to_string())
    }
}
