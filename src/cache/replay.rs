//! Replay of recorded calls.

use std::fmt;

use tracing::warn;

use crate::error::{Error, Result};
use crate::keys;
use crate::kv::KeyValueStore;
use crate::value::decode_integer;

/// Recorded history of one operation.
///
/// `calls` and `history` are maintained by different wrappers and may
/// disagree: `calls` is the counter, `history` the aligned input/output pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Replay {
    pub name: String,
    pub calls: i64,
    pub history: Vec<(String, String)>,
}

impl Replay {
    /// Writes the replay to standard output.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.calls)?;
        for (input, output) in &self.history {
            writeln!(f, "{}(*{}) -> {}", self.name, input, output)?;
        }
        Ok(())
    }
}

/// Reads the counter and the input/output lists of `name`.
///
/// A missing or undecodable counter reads as 0; history entries that are
/// not UTF-8 read as empty strings.
pub async fn replay(store: &dyn KeyValueStore, name: &str) -> Result<Replay> {
    let calls = match store.get(&keys::counter_key(name)).await {
        Ok(Some(raw)) => decode_integer(raw).unwrap_or_else(|err| {
            warn!("Unreadable counter for {}: {}", name, err);
            0
        }),
        Ok(None) => 0,
        Err(Error::WrongType(_)) => 0,
        Err(err) => return Err(err),
    };

    let inputs = store.lrange(&keys::inputs_key(name), 0, -1).await?;
    let outputs = store.lrange(&keys::outputs_key(name), 0, -1).await?;
    let history = inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| (lossless_or_empty(input), lossless_or_empty(output)))
        .collect();

    Ok(Replay {
        name: name.to_string(),
        calls,
        history,
    })
}

fn lossless_or_empty(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_default()
}
