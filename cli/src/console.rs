//! Line-oriented terminal I/O.

use tokio::io::{stdin, stdout, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use common::{AppError, AppResult};

pub struct Console {
    lines: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(stdin()).lines(),
        }
    }

    /// Next input line, `None` at end of input. Cancel safe.
    pub async fn next_line(&mut self) -> AppResult<Option<String>> {
        self.lines
            .next_line()
            .await
            .map_err(|e| AppError::internal(format!("Failed to read input: {}", e)))
    }

    /// Print a label without a newline and read the answer.
    pub async fn prompt(&mut self, label: &str) -> AppResult<String> {
        let mut out = stdout();
        out.write_all(label.as_bytes()).await.map_err(write_error)?;
        out.flush().await.map_err(write_error)?;

        self.next_line()
            .await?
            .ok_or_else(|| AppError::validation("Input closed"))
    }
}

fn write_error(e: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to write prompt: {}", e))
}
