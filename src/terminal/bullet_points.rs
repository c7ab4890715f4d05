const INDENT_SIZE: usize = 2;

pub struct BulletPointPrinter<W: LineWriter + Clone> {
    writer: W,
    nesting: usize,
}

impl<W: LineWriter + Clone> BulletPointPrinter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, nesting: 0 }
    }

    pub fn print_item(&self, message: impl std::fmt::Display) {
        let indent = " ".repeat(self.nesting * INDENT_SIZE);
        self.writer.write_line(&format!("{}• {}", indent, message));
    }

    /// Prints `empty_message` instead when there are no items.
    pub fn print_items<I: std::fmt::Display>(
        &self,
        items: impl IntoIterator<Item = I>,
        empty_message: impl std::fmt::Display,
    ) {
        let mut any = false;
        for item in items {
            any = true;
            self.print_item(item);
        }
        if !any {
            self.print_item(empty_message);
        }
    }

    pub fn indent(&self) -> Self {
        Self {
            writer: self.writer.clone(),
            nesting: self.nesting + 1,
        }
    }
}

impl BulletPointPrinter<StdoutLineWriter> {
    pub fn new_stdout() -> Self {
        Self::new(StdoutLineWriter)
    }
}

pub trait LineWriter {
    fn write_line(&self, line: &str);
}

#[derive(Clone, Copy)]
pub struct StdoutLineWriter;
impl LineWriter for StdoutLineWriter {
    fn write_line(&self, line: &str) {
        println!("{}", line);
    }
}

#[cfg(test)]
pub mod testutils {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::LineWriter;

    #[derive(Clone, Default)]
    pub struct RecordingLineWriter {
        lines: Rc<RefCell<Vec<String>>>,
    }

    impl RecordingLineWriter {
        pub fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }
    }

    impl LineWriter for RecordingLineWriter {
        fn write_line(&self, line: &str) {
            self.lines.borrow_mut().push(line.to_string());
        }
    }
}
