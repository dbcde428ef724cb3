//! # Navigator Module - Lines, caret and indentation jumps
//!
//! Code is typed line by line, and an editor would supply the indentation of the
//! next line on its own. The navigator works out where the caret belongs after a
//! line break and which characters the caller has to splice into the input to get
//! there, so the input stays aligned with the target character by character.
//!
//! Offsets are in `char`s. Nothing here mutates an input buffer.
//!
//! ```rust
//! use quill::navigator::Navigator;
//!
//! let navigator = Navigator::new("fn main() {\n\n    run();\n}");
//!
//! // The caret sits on the newline ending line 0
//! let jump = navigator.line_break(11, true).unwrap();
//! assert_eq!(jump.insertion, "\n\n    ");
//! assert_eq!(jump.line, 2);
//! assert_eq!(jump.caret, 17);
//! ```

/// Find the line the caret should land on after leaving line `from`.
///
/// With `skip_blank`, returns the first line after `from` that has non-whitespace
/// content. Otherwise, or when no such line exists, returns `from + 1` clamped to
/// the last line. An empty line list yields 0.
pub fn find_next_content_line<S: AsRef<str>>(lines: &[S], from: usize, skip_blank: bool) -> usize {
    let Some(last) = lines.len().checked_sub(1) else {
        return 0;
    };
    let next = from.saturating_add(1).min(last);

    if !skip_blank {
        return next;
    }

    lines
        .iter()
        .enumerate()
        .skip(from.saturating_add(1))
        .find(|(_, line)| !line.as_ref().trim().is_empty())
        .map_or(next, |(index, _)| index)
}

/// The leading whitespace of a line
pub fn leading_indentation(line: &str) -> &str {
    let content_start = line.len() - line.trim_start().len();
    &line[..content_start]
}

/// Index of the first non-whitespace character, or the line length if the line is blank
pub fn first_content_offset(line: &str) -> usize {
    leading_indentation(line).chars().count()
}

/// Zero-based line containing the caret: the number of newlines before `offset`.
///
/// An offset past the end of the text is treated as the end of the text.
pub fn line_for_offset(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count()
}

/// Where a line break takes the caret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreak {
    /// Characters to append to the input: the newline, any skipped lines
    /// verbatim and the indentation of the landing line
    pub insertion: String,
    /// The line the caret lands on
    pub line: usize,
    /// Caret offset after the insertion
    pub caret: usize,
}

/// Line table over a target text
#[derive(Debug, Clone)]
pub struct Navigator {
    /// Lines without their trailing newline
    lines: Vec<String>,
    /// Char offset of the first character of each line
    starts: Vec<usize>,
    /// Char length of each line
    lengths: Vec<usize>,
}

impl Navigator {
    pub fn new(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let lengths: Vec<usize> = lines.iter().map(|line| line.chars().count()).collect();

        let mut starts = Vec::with_capacity(lines.len());
        let mut offset = 0;
        for length in &lengths {
            starts.push(offset);
            offset += length + 1;
        }

        Self {
            lines,
            starts,
            lengths,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Char offset where line `index` begins
    pub fn line_start(&self, index: usize) -> Option<usize> {
        self.starts.get(index).copied()
    }

    /// Leading whitespace of line `index`
    pub fn indentation(&self, index: usize) -> Option<&str> {
        self.line(index).map(leading_indentation)
    }

    /// Same as [`line_for_offset`], answered from the line table
    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }

    /// Plan a line break with the caret at `caret`.
    ///
    /// Returns `None` unless the caret sits on a newline of the target, that is at
    /// the end of a line which is not the last one.
    pub fn line_break(&self, caret: usize, skip_blank: bool) -> Option<LineBreak> {
        let line = self.line_for_offset(caret);
        if line + 1 >= self.lines.len() || caret != self.starts[line] + self.lengths[line] {
            return None;
        }

        let landing = find_next_content_line(&self.lines, line, skip_blank);
        let indentation = leading_indentation(&self.lines[landing]);

        let mut insertion = String::from('\n');
        for skipped in &self.lines[line + 1..landing] {
            insertion.push_str(skipped);
            insertion.push('\n');
        }
        insertion.push_str(indentation);

        Some(LineBreak {
            insertion,
            line: landing,
            caret: self.starts[landing] + indentation.chars().count(),
        })
    }
}
