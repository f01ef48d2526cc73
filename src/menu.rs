use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::list::OrderedList;

const MENU: &str = "\
Linked List Operations Menu:
1. Insert at Beginning
2. Insert at End
3. Insert into Sorted List
4. Delete First Node
5. Delete Last Node
6. Delete at Index
7. Print List
8. Sort List
9. Front-Back Split
10. Merge Two Sorted Lists
0. Exit";

/// Where the menu reads its input from. `Ok(None)` means the input is over.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive input backed by a rustyline editor.
pub struct Terminal {
    editor: DefaultEditor,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for Terminal {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let entry = line.trim();
                if !entry.is_empty() {
                    self.editor.add_history_entry(entry)?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                info!("interrupted");
                Ok(None)
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Non-interactive input read line by line from any buffered reader.
/// Prompts are not echoed.
pub struct Script<R> {
    reader: R,
}

impl<R: BufRead> Script<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for Script<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    InsertAtBeginning,
    InsertAtEnd,
    InsertSorted,
    DeleteFirst,
    DeleteLast,
    DeleteAtIndex,
    Print,
    Sort,
    Split,
    Merge,
    Exit,
}

impl Choice {
    pub fn parse(selector: &str) -> Option<Choice> {
        let choice = match selector {
            "1" => Choice::InsertAtBeginning,
            "2" => Choice::InsertAtEnd,
            "3" => Choice::InsertSorted,
            "4" => Choice::DeleteFirst,
            "5" => Choice::DeleteLast,
            "6" => Choice::DeleteAtIndex,
            "7" => Choice::Print,
            "8" => Choice::Sort,
            "9" => Choice::Split,
            "10" => Choice::Merge,
            "0" => Choice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

fn parse_number<T>(token: &str) -> Result<T>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    token.parse().map_err(|source| Error::parse(token, source))
}

/// Builds a list from comma separated values using sorted insertion.
/// Blank items are skipped.
pub fn parse_sorted(line: &str) -> Result<OrderedList> {
    let mut list = OrderedList::new();
    for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        list.insert_sorted(parse_number(token)?);
    }
    Ok(list)
}

/// The interactive command loop around a single working list.
pub struct Menu<W> {
    list: OrderedList,
    out: W,
    show_banner: bool,
}

impl<W: Write> Menu<W> {
    pub fn new(out: W) -> Self {
        Self {
            list: OrderedList::new(),
            out,
            show_banner: true,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.show_banner = !quiet;
        self
    }

    pub fn list(&self) -> &OrderedList {
        &self.list
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs commands until the exit selector or the end of input.
    pub fn run(&mut self, input: &mut impl LineSource) -> Result<()> {
        loop {
            if self.show_banner {
                writeln!(self.out, "{}", MENU)?;
            }
            self.out.flush()?;

            let Some(line) = input.read_line("Enter your choice: ")? else {
                debug!("input closed");
                return Ok(());
            };
            let selector = line.trim();

            let flow = match Choice::parse(selector) {
                Some(choice) => {
                    debug!(?choice, "dispatching");
                    match self.execute(choice, input) {
                        Ok(flow) => flow,
                        Err(Error::Parse { token, source }) => {
                            warn!(%token, %source, "rejected input");
                            writeln!(self.out, "Invalid number: {}", token)?;
                            ControlFlow::Continue(())
                        }
                        Err(Error::List(err)) => {
                            debug!(%err, "delete failed");
                            writeln!(self.out, "Invalid index.")?;
                            ControlFlow::Continue(())
                        }
                        Err(err) => return Err(err),
                    }
                }
                None => {
                    debug!(selector, "unknown selector");
                    writeln!(self.out, "Invalid choice. Please try again.")?;
                    ControlFlow::Continue(())
                }
            };

            writeln!(self.out)?;
            if flow.is_break() {
                self.out.flush()?;
                return Ok(());
            }
        }
    }

    fn execute(
        &mut self,
        choice: Choice,
        input: &mut impl LineSource,
    ) -> Result<ControlFlow<()>> {
        match choice {
            Choice::InsertAtBeginning => {
                let Some(value) = read_number(input, "Enter value to insert at beginning: ")?
                else {
                    return Ok(ControlFlow::Break(()));
                };
                self.list.insert_at_beginning(value);
            }
            Choice::InsertAtEnd => {
                let Some(value) = read_number(input, "Enter value to insert at end: ")? else {
                    return Ok(ControlFlow::Break(()));
                };
                self.list.insert_at_end(value);
            }
            Choice::InsertSorted => {
                let Some(value) = read_number(input, "Enter value to insert into sorted list: ")?
                else {
                    return Ok(ControlFlow::Break(()));
                };
                self.list.insert_sorted(value);
            }
            Choice::DeleteFirst => {
                self.list.delete_first();
                writeln!(self.out, "First node deleted.")?;
            }
            Choice::DeleteLast => {
                self.list.delete_last();
                writeln!(self.out, "Last node deleted.")?;
            }
            Choice::DeleteAtIndex => {
                let Some(index): Option<isize> = read_number(input, "Enter index to delete: ")? else {
                    return Ok(ControlFlow::Break(()));
                };
                self.list.delete_at_index(index)?;
                writeln!(self.out, "Node at index {} deleted.", index)?;
            }
            Choice::Print => {
                writeln!(self.out, "Current List:")?;
                writeln!(self.out, "{}", self.list)?;
            }
            Choice::Sort => {
                self.list.sort();
                writeln!(self.out, "List sorted.")?;
            }
            Choice::Split => {
                let (front, back) = self.list.front_back_split();
                writeln!(self.out, "Front list after split:")?;
                writeln!(self.out, "{}", front)?;
                writeln!(self.out, "Back list after split:")?;
                writeln!(self.out, "{}", back)?;
            }
            Choice::Merge => {
                let prompts = [
                    "Enter values for first sorted list (comma separated): ",
                    "Enter values for second sorted list (comma separated): ",
                ];
                let mut sides = Vec::with_capacity(prompts.len());
                for prompt in prompts {
                    let Some(line) = input.read_line(prompt)? else {
                        return Ok(ControlFlow::Break(()));
                    };
                    sides.push(parse_sorted(&line)?);
                }
                let merged = OrderedList::merge(&sides[0], &sides[1]);
                writeln!(self.out, "Merged list:")?;
                writeln!(self.out, "{}", merged)?;
            }
            Choice::Exit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }
}

fn read_number<T>(input: &mut impl LineSource, prompt: &str) -> Result<Option<T>>
where
    T: FromStr<Err = std::num::ParseIntError>,
{
    match input.read_line(prompt)? {
        Some(line) => parse_number(line.trim()).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListError;
    use std::io::Cursor;

    #[test]
    fn choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::InsertAtBeginning));
        assert_eq!(Choice::parse("10"), Some(Choice::Merge));
        assert_eq!(Choice::parse("0"), Some(Choice::Exit));
        assert_eq!(Choice::parse("11"), None);
        assert_eq!(Choice::parse("01"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn parse_sorted_builds_ordered_list() {
        let list = parse_sorted(" 5, 1 ,3,1,").unwrap();
        assert_eq!(list.to_vec(), vec![1, 1, 3, 5]);

        assert!(parse_sorted("").unwrap().is_empty());
        assert!(matches!(
            parse_sorted("1, two"),
            Err(Error::Parse { ref token, .. }) if token == "two"
        ));
    }

    #[test]
    fn script_source_reads_lines_until_eof() {
        let mut script = Script::new(Cursor::new("7\n0"));
        assert_eq!(script.read_line("").unwrap().as_deref(), Some("7\n"));
        assert_eq!(script.read_line("").unwrap().as_deref(), Some("0"));
        assert_eq!(script.read_line("").unwrap(), None);
    }

    #[test]
    fn bad_index_is_reported_as_list_error() {
        let mut menu = Menu::new(Vec::new());
        menu.list.insert_at_end(1);

        let err = menu
            .execute(Choice::DeleteAtIndex, &mut Script::new(Cursor::new("2\n")))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::List(ListError::IndexOutOfRange { index: 2, len: 1 })
        ));
        assert_eq!(menu.list().to_vec(), vec![1]);

        menu.run(&mut Script::new(Cursor::new("6\n-3\n0\n"))).unwrap();
        let out = String::from_utf8(menu.into_output()).unwrap();
        assert!(out.contains("Invalid index.\n"));
    }

    #[test]
    fn menu_keeps_working_list() {
        let mut menu = Menu::new(Vec::new()).quiet(true);
        menu.run(&mut Script::new(Cursor::new("3\n4\n3\n2\n2\n9\n6\n0\n")))
            .unwrap();
        assert_eq!(menu.list().to_vec(), vec![4, 9]);
    }
}
