mod bullet_points;
mod prompt;

pub use bullet_points::{BulletPointPrinter, LineWriter, StdoutLineWriter};
pub use prompt::{edit, prompt, prompt_allow_empty, prompt_parsed, select};

#[cfg(test)]
pub use bullet_points::testutils::RecordingLineWriter;
