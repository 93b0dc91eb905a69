//! Interactive selection among ambiguous candidates.

use std::io::{self, BufRead, Write};

use macrodata_model::MatchCandidate;

use crate::summary::candidate_table;

/// What a line of user input means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the candidate list.
    Selected(usize),
    Cancel,
    Invalid,
}

/// Interpret one input line against a list of `count` candidates. Indices
/// are 1-based; an empty line or `q` cancels.
pub fn parse_choice(line: &str, count: usize) -> Choice {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("q") {
        return Choice::Cancel;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Selected(n - 1),
        _ => Choice::Invalid,
    }
}

/// Show the candidates on `output` and read a selection from `input`.
///
/// Invalid input re-prompts. Returns `None` when the user cancels or the
/// input ends.
pub fn choose<R: BufRead, W: Write>(
    candidates: &[MatchCandidate],
    mut input: R,
    mut output: W,
) -> io::Result<Option<usize>> {
    writeln!(output, "{}", candidate_table(candidates))?;
    loop {
        write!(
            output,
            "Select a variable [1-{}], or press Enter to cancel: ",
            candidates.len()
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        match parse_choice(&line, candidates.len()) {
            Choice::Selected(index) => return Ok(Some(index)),
            Choice::Cancel => return Ok(None),
            Choice::Invalid => {
                writeln!(output, "Not a valid choice: {}", line.trim())?;
            }
        }
    }
}
