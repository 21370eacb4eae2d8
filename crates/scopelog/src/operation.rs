use std::fmt;

use serde::{Deserialize, Serialize};

use crate::style::Style;

/// Semantic category of a log record, independent of its severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    /// Plain message
    #[default]
    Msg,
    Io,
    /// Waiting on something to finish
    Await,
    /// Something finished successfully
    Done,
    Note,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Msg,
        Operation::Io,
        Operation::Await,
        Operation::Done,
        Operation::Note,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Operation::Msg => "MSG",
            Operation::Io => "IO",
            Operation::Await => "AWAIT",
            Operation::Done => "DONE",
            Operation::Note => "NOTE",
        }
    }

    pub const fn style(self) -> Style {
        match self {
            Operation::Msg | Operation::Note => Style::OnBlack,
            Operation::Io => Style::OnMagenta,
            Operation::Await => Style::OnCyan,
            Operation::Done => Style::OnGreen,
        }
    }
}

/// Width of the operation column: the longest operation label.
pub const MAX_OPERATION_WIDTH: usize = max_label_width(&Operation::ALL);

const fn max_label_width(operations: &[Operation]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < operations.len() {
        let len = operations[i].label().len();
        if len > max {
            max = len;
        }
        i += 1;
    }
    max
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
