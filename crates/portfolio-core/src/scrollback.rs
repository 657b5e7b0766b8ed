//! Append-only terminal output with indexed in-place replacement

/// Whether a line echoes user input or is terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub kind: LineKind,
    pub text: String,
}

/// Handle to a line. Handles taken before a reset never resolve afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId {
    index: usize,
    epoch: u32,
}

impl LineId {
    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
pub struct Scrollback {
    lines: Vec<ScrollbackLine>,
    epoch: u32,
    revision: u64,
}

impl Scrollback {
    /// A scrollback holding a single output line.
    pub fn new(first_line: impl Into<String>) -> Self {
        Self {
            lines: vec![ScrollbackLine {
                kind: LineKind::Output,
                text: first_line.into(),
            }],
            epoch: 0,
            revision: 0,
        }
    }

    pub fn push_input(&mut self, text: impl Into<String>) -> LineId {
        self.push(LineKind::Input, text.into())
    }

    pub fn push_output(&mut self, text: impl Into<String>) -> LineId {
        self.push(LineKind::Output, text.into())
    }

    fn push(&mut self, kind: LineKind, text: String) -> LineId {
        self.lines.push(ScrollbackLine { kind, text });
        self.revision += 1;
        LineId {
            index: self.lines.len() - 1,
            epoch: self.epoch,
        }
    }

    /// Rewrite the text of an existing line. Returns false for stale handles.
    pub fn replace(&mut self, id: LineId, text: impl Into<String>) -> bool {
        if id.epoch != self.epoch {
            return false;
        }
        match self.lines.get_mut(id.index) {
            Some(line) => {
                line.text = text.into();
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Drop every line and start over with a single output line.
    pub fn reset(&mut self, first_line: impl Into<String>) {
        self.lines.clear();
        self.lines.push(ScrollbackLine {
            kind: LineKind::Output,
            text: first_line.into(),
        });
        self.epoch = self.epoch.wrapping_add(1);
        self.revision += 1;
    }

    pub fn get(&self, id: LineId) -> Option<&ScrollbackLine> {
        if id.epoch != self.epoch {
            return None;
        }
        self.lines.get(id.index)
    }

    pub fn lines(&self) -> &[ScrollbackLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&ScrollbackLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Bumped on every change; front ends follow the newest line when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
