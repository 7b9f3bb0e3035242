//! Positional `<csv> <label>` pairs.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPair {
    pub path: String,
    pub label: String,
}

/// Split `args` into (path, label) pairs. `None` if the list is empty or odd.
pub fn pairs(args: &[String]) -> Option<Vec<InputPair>> {
    if args.len() < 2 || args.len() % 2 != 0 {
        return None;
    }

    Some(
        args.chunks_exact(2)
            .map(|pair| InputPair {
                path: pair[0].clone(),
                label: pair[1].clone(),
            })
            .collect(),
    )
}

/// Placeholder shown when no subcommand was given.
pub const ANY_COMMAND: &str = "<density|density-dual|scatter>";

pub fn usage(command: &str) -> String {
    format!(
        "Usage: tickplot {} <csv1> <label1> [<csv2> <label2> ...]",
        command
    )
}
